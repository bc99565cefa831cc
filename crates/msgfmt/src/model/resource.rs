//! Resources: named trees of compiled messages for one locale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ast::Message;

/// A named collection of messages for one locale.
///
/// Entries form a tree: each entry is either a message or a group of further
/// entries, addressed by a path of names.
///
/// # Example
///
/// ```
/// use msgfmt::model::Resource;
///
/// let resource: Resource = serde_json::from_str(r#"{
///     "id": "res",
///     "locale": "fi",
///     "entries": {
///         "browser": { "entries": { "firefox": { "value": ["Firefox"] } } }
///     }
/// }"#).unwrap();
///
/// assert!(resource.get_message(&["browser", "firefox"]).is_some());
/// assert!(resource.get_message(&["browser"]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub locale: String,
    #[serde(default)]
    pub entries: BTreeMap<String, Entry>,
}

/// A node in a resource tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Message(Message),
    Group(MessageGroup),
}

/// A named group of entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageGroup {
    pub entries: BTreeMap<String, Entry>,
}

impl Resource {
    /// Create an empty resource.
    pub fn new(id: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry under `name`, replacing any previous entry with that name.
    pub fn with_entry(mut self, name: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.entries.insert(name.into(), entry.into());
        self
    }

    /// Get the entry at `path`. An empty path names no entry.
    pub fn get_entry<S: AsRef<str>>(&self, path: &[S]) -> Option<&Entry> {
        let (first, rest) = path.split_first()?;
        let mut entry = self.entries.get(first.as_ref())?;
        for name in rest {
            let Entry::Group(group) = entry else {
                return None;
            };
            entry = group.entries.get(name.as_ref())?;
        }
        Some(entry)
    }

    /// Get the message at `path`, if that entry exists and is a message.
    pub fn get_message<S: AsRef<str>>(&self, path: &[S]) -> Option<&Message> {
        match self.get_entry(path)? {
            Entry::Message(message) => Some(message),
            Entry::Group(_) => None,
        }
    }

    /// Dotted paths of every message in this resource, sorted.
    pub fn message_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_paths(&self.entries, &mut Vec::new(), &mut paths);
        paths.sort();
        paths
    }

    /// Visit every message with its path, in path order.
    pub fn for_each_message(&self, mut f: impl FnMut(&[&str], &Message)) {
        visit_messages(&self.entries, &mut Vec::new(), &mut f);
    }
}

impl MessageGroup {
    /// Add an entry under `name`, replacing any previous entry with that name.
    pub fn with_entry(mut self, name: impl Into<String>, entry: impl Into<Entry>) -> Self {
        self.entries.insert(name.into(), entry.into());
        self
    }
}

impl From<Message> for Entry {
    fn from(message: Message) -> Self {
        Entry::Message(message)
    }
}

impl From<MessageGroup> for Entry {
    fn from(group: MessageGroup) -> Self {
        Entry::Group(group)
    }
}

fn collect_paths<'a>(
    entries: &'a BTreeMap<String, Entry>,
    prefix: &mut Vec<&'a str>,
    out: &mut Vec<String>,
) {
    for (name, entry) in entries {
        prefix.push(name);
        match entry {
            Entry::Message(_) => out.push(prefix.join(".")),
            Entry::Group(group) => collect_paths(&group.entries, prefix, out),
        }
        prefix.pop();
    }
}

fn visit_messages<'a>(
    entries: &'a BTreeMap<String, Entry>,
    prefix: &mut Vec<&'a str>,
    f: &mut impl FnMut(&[&str], &Message),
) {
    for (name, entry) in entries {
        prefix.push(name);
        match entry {
            Entry::Message(message) => f(prefix, message),
            Entry::Group(group) => visit_messages(&group.entries, prefix, f),
        }
        prefix.pop();
    }
}
