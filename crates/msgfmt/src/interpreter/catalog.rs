//! Resource catalog and formatting entry points.
//!
//! [`MessageFormat`] owns a locale list, runtime function tables and a set of
//! resources keyed by id, and formats messages by resource id and path.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bon::Builder;

use crate::interpreter::context::{Context, DEFAULT_MAX_DEPTH, MessageLookup, Scope};
use crate::interpreter::error::{FormatError, LoadError};
use crate::interpreter::evaluator::{format_to_parts, format_to_string};
use crate::interpreter::runtime::Runtime;
use crate::model::{Entry, Message, Resource};
use crate::types::{FormattedPart, Value};

/// Formats messages from a set of resources.
///
/// Resources are stored by id; adding a resource with an id that is already
/// present replaces the previous one. There is no locale fallback between
/// resources: every lookup names its resource explicitly, and message
/// references inside a resource default to that same resource.
///
/// # Example
///
/// ```
/// use msgfmt::{MessageFormat, scope};
///
/// let mut mf = MessageFormat::builder()
///     .locales(vec!["en".to_string()])
///     .build();
///
/// mf.load_resource_str(r#"{
///     "id": "res",
///     "locale": "en",
///     "entries": {
///         "greeting": { "value": ["Hello, ", { "var_path": ["name"] }, "!"] }
///     }
/// }"#).unwrap();
///
/// let text = mf.format("res", &["greeting"], scope! { "name" => "Alice" }).unwrap();
/// assert_eq!(text, "Hello, Alice!");
/// ```
#[derive(Debug, Builder)]
pub struct MessageFormat {
    /// Ordered locale list passed to runtime functions.
    #[builder(default = vec!["en".to_string()])]
    locales: Vec<String>,

    /// Format and select function tables.
    #[builder(default = Runtime::with_defaults())]
    runtime: Runtime,

    /// Maximum number of nested message references per formatting call.
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Resources indexed by id.
    #[builder(skip)]
    resources: HashMap<String, Resource>,
}

impl Default for MessageFormat {
    fn default() -> Self {
        MessageFormat::builder().build()
    }
}

impl MessageFormat {
    /// Create a catalog with default settings (English, built-in functions).
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Get the ordered locale list.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Replace the locale list.
    pub fn set_locales(&mut self, locales: Vec<String>) {
        self.locales = locales;
    }

    /// Get the runtime function tables (read-only).
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Get the runtime function tables (mutable) for registering functions.
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Add a resource, returning the resource it replaced, if any.
    pub fn add_resource(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.id.clone(), resource)
    }

    /// Load a resource from a JSON string, returning its id.
    ///
    /// Loading a resource whose id is already present **replaces** it.
    pub fn load_resource_str(&mut self, content: &str) -> Result<String, LoadError> {
        self.load_resource_internal(content, Path::new("<string>"))
    }

    /// Load a resource from a JSON file, returning its id.
    ///
    /// Loading a resource whose id is already present **replaces** it.
    ///
    /// ```ignore
    /// let id = mf.load_resource("locales/fi.json")?;
    /// ```
    pub fn load_resource(&mut self, path: impl AsRef<Path>) -> Result<String, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load_resource_internal(&content, path)
    }

    fn load_resource_internal(&mut self, content: &str, path: &Path) -> Result<String, LoadError> {
        let resource = parse_resource(content, path)?;
        let id = resource.id.clone();
        self.add_resource(resource);
        Ok(id)
    }

    /// Get a resource by id.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Ids of all loaded resources, sorted.
    pub fn resource_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Get an entry (message or group) by resource id and path.
    pub fn get_entry<S: AsRef<str>>(&self, resource_id: &str, path: &[S]) -> Option<&Entry> {
        self.resources.get(resource_id)?.get_entry(path)
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Build a formatting context for messages in `resource_id`.
    pub fn context(&self, resource_id: &str, scope: Scope) -> Context<'_> {
        Context::builder()
            .locales(&self.locales)
            .runtime(&self.runtime)
            .messages(self)
            .resource_id(resource_id)
            .scope(scope)
            .max_depth(self.max_depth)
            .build()
    }

    /// Format the message at `path` in `resource_id` to a string.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MessageNotFound`] if the message does not exist,
    /// or a reference-chain error from [`format_to_string`].
    pub fn format<S: AsRef<str>>(
        &self,
        resource_id: &str,
        path: &[S],
        scope: HashMap<String, Value>,
    ) -> Result<String, FormatError> {
        let message = self.require_message(resource_id, path)?;
        format_to_string(&self.context(resource_id, Scope::from(scope)), message)
    }

    /// Format the message at `path` in `resource_id` to parts.
    ///
    /// # Errors
    ///
    /// Same as [`MessageFormat::format`].
    pub fn format_to_parts<S: AsRef<str>>(
        &self,
        resource_id: &str,
        path: &[S],
        scope: HashMap<String, Value>,
    ) -> Result<Vec<FormattedPart>, FormatError> {
        let message = self.require_message(resource_id, path)?;
        format_to_parts(&self.context(resource_id, Scope::from(scope)), message)
    }

    fn require_message<S: AsRef<str>>(
        &self,
        resource_id: &str,
        path: &[S],
    ) -> Result<&Message, FormatError> {
        match self.get_entry(resource_id, path) {
            Some(Entry::Message(message)) => Ok(message),
            _ => Err(FormatError::MessageNotFound {
                resource: resource_id.to_string(),
                path: path
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join("."),
            }),
        }
    }
}

/// Lookups require a resource id; the context supplies its own when the
/// reference names none.
impl MessageLookup for MessageFormat {
    fn lookup(&self, resource_id: Option<&str>, path: &[String]) -> Option<&Message> {
        self.resources.get(resource_id?)?.get_message(path)
    }
}

/// A single resource answers lookups for its own id, or for no id at all.
impl MessageLookup for Resource {
    fn lookup(&self, resource_id: Option<&str>, path: &[String]) -> Option<&Message> {
        match resource_id {
            Some(id) if id != self.id => None,
            _ => self.get_message(path),
        }
    }
}

/// Parse a resource from JSON, reporting the location of any syntax or shape error.
pub fn parse_resource(content: &str, path: &Path) -> Result<Resource, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
        message: e.to_string(),
    })
}
