//! Formatting context and variable scope.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;

use crate::interpreter::runtime::Runtime;
use crate::model::Message;
use crate::types::Value;

/// Default limit on nested message references.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Source of messages for message references.
///
/// Implementations return `None` for any path they cannot resolve; lookups
/// never fail.
pub trait MessageLookup {
    /// Get the message at `path` in the resource `resource_id`.
    ///
    /// A `None` resource id means the implementation's own default, if any.
    fn lookup(&self, resource_id: Option<&str>, path: &[String]) -> Option<&Message>;
}

/// Variable bindings for one formatting call.
///
/// Scopes are persistent: [`Scope::with_overrides`] produces a child scope
/// that shadows some names and shares the rest with its parent. Nothing a
/// child does is visible through the parent.
///
/// # Example
///
/// ```
/// use msgfmt::{Scope, Value, scope};
///
/// let parent = Scope::from(scope! { "browser-id" => "chrome", "count" => 3 });
/// let child = parent.with_overrides(scope! { "browser-id" => "firefox" });
///
/// assert_eq!(child.get("browser-id"), Some(&Value::from("firefox")));
/// assert_eq!(child.get("count"), Some(&Value::from(3)));
/// assert_eq!(parent.get("browser-id"), Some(&Value::from("chrome")));
/// ```
#[derive(Clone, Default)]
pub struct Scope {
    frame: Option<Arc<Frame>>,
}

struct Frame {
    vars: HashMap<String, Value>,
    parent: Scope,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable, searching from the innermost frame outwards.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut scope = self;
        while let Some(frame) = &scope.frame {
            if let Some(value) = frame.vars.get(name) {
                return Some(value);
            }
            scope = &frame.parent;
        }
        None
    }

    /// Check if a variable is bound in any frame.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Create a child scope in which `overrides` shadow this scope's bindings.
    pub fn with_overrides(&self, overrides: HashMap<String, Value>) -> Scope {
        Scope {
            frame: Some(Arc::new(Frame {
                vars: overrides,
                parent: self.clone(),
            })),
        }
    }

    /// Number of frames in this scope chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self;
        while let Some(frame) = &scope.frame {
            depth += 1;
            scope = &frame.parent;
        }
        depth
    }

    /// All visible bindings, with inner frames shadowing outer ones.
    pub fn flatten(&self) -> HashMap<String, Value> {
        let mut frames = Vec::new();
        let mut scope = self;
        while let Some(frame) = &scope.frame {
            frames.push(&frame.vars);
            scope = &frame.parent;
        }
        let mut vars = HashMap::new();
        for frame in frames.into_iter().rev() {
            vars.extend(frame.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        vars
    }
}

impl From<HashMap<String, Value>> for Scope {
    fn from(vars: HashMap<String, Value>) -> Self {
        Scope::new().with_overrides(vars)
    }
}

impl FromIterator<(String, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Scope::from(iter.into_iter().collect::<HashMap<_, _>>())
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let vars = self.flatten();
        let mut names: Vec<&String> = vars.keys().collect();
        names.sort();
        let mut map = f.debug_map();
        for name in names {
            map.entry(name, &vars[name]);
        }
        map.finish()
    }
}

/// Immutable snapshot of everything one formatting call needs.
///
/// The context carries:
/// - The ordered locale list passed to runtime functions
/// - The variable scope
/// - The format and select function tables
/// - The message lookup used by message references
/// - The resource that lookups default to
/// - The limit on nested message references
///
/// Resolution never mutates a context. Message references that redirect the
/// resource or override variables derive a child context with
/// [`Context::extend`].
///
/// # Example
///
/// ```
/// use msgfmt::model::Resource;
/// use msgfmt::{Context, Runtime, scope};
///
/// let locales = vec!["en".to_string()];
/// let runtime = Runtime::with_defaults();
/// let resource = Resource::new("res", "en");
///
/// let ctx = Context::builder()
///     .locales(&locales)
///     .runtime(&runtime)
///     .messages(&resource)
///     .resource_id("res")
///     .scope(scope! { "name" => "Alice" }.into())
///     .build();
///
/// assert_eq!(ctx.resource_id(), Some("res"));
/// ```
#[derive(Clone, Builder)]
pub struct Context<'a> {
    locales: &'a [String],
    runtime: &'a Runtime,
    messages: &'a dyn MessageLookup,
    #[builder(into)]
    resource_id: Option<String>,
    #[builder(default)]
    scope: Scope,
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl<'a> Context<'a> {
    /// The ordered locale list.
    pub fn locales(&self) -> &'a [String] {
        self.locales
    }

    /// The runtime function tables.
    pub fn runtime(&self) -> &'a Runtime {
        self.runtime
    }

    /// The resource that lookups without an explicit resource id target.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// The variable scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Maximum number of nested message references.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Look up a message, defaulting to this context's resource.
    pub fn get_message(&self, resource_id: Option<&str>, path: &[String]) -> Option<&'a Message> {
        let messages = self.messages;
        messages.lookup(resource_id.or(self.resource_id()), path)
    }

    /// Derive a child context.
    ///
    /// With a `resource_id`, lookups in the child default to that resource.
    /// With `overrides`, the child scope shadows the given variables. The
    /// overrides must already be resolved against this context. Without
    /// either, this context is reused as is.
    pub fn extend(
        &self,
        resource_id: Option<&str>,
        overrides: Option<HashMap<String, Value>>,
    ) -> Cow<'_, Context<'a>> {
        if resource_id.is_none() && overrides.is_none() {
            return Cow::Borrowed(self);
        }
        let mut child = self.clone();
        if let Some(resource_id) = resource_id {
            child.resource_id = Some(resource_id.to_string());
        }
        if let Some(overrides) = overrides {
            child.scope = self.scope.with_overrides(overrides);
        }
        Cow::Owned(child)
    }
}

impl Debug for Context<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Context")
            .field("locales", &self.locales)
            .field("runtime", &self.runtime)
            .field("resource_id", &self.resource_id)
            .field("scope", &self.scope)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
