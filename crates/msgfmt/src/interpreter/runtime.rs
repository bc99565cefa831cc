//! Runtime function tables.
//!
//! Runtime functions are injected by the caller and looked up by name in one
//! of two disjoint namespaces: format functions produce displayable values,
//! select functions produce match keys for select cases.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::interpreter::builtins;
use crate::interpreter::error::FunctionError;
use crate::model::FunctionOptions;
use crate::types::Value;

/// Runtime function signature.
///
/// Takes:
/// - `locales`: The ordered locale list of the formatting context
/// - `options`: Options declared on the function reference
/// - `args`: Resolved argument values, in declaration order
///
/// Returns the produced value, or an error when the function cannot handle
/// its arguments. Errors are never propagated out of formatting; the caller
/// substitutes a fallback instead.
pub type RuntimeFn = fn(&[String], &FunctionOptions, &[Value]) -> Result<Value, FunctionError>;

/// The namespace a runtime function is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Functions called from patterns, producing displayable values.
    Format,
    /// Functions called from selectors, producing match keys.
    Select,
}

/// Named format and select function tables.
///
/// # Example
///
/// ```
/// use msgfmt::{FunctionKind, Runtime, Value};
///
/// let runtime = Runtime::new().with_format("shout", |_, _, args| {
///     Ok(Value::from(format!("{}!", args[0])))
/// });
///
/// assert!(runtime.has_function(FunctionKind::Format, "shout"));
/// assert!(!runtime.has_function(FunctionKind::Select, "shout"));
/// ```
#[derive(Clone, Default)]
pub struct Runtime {
    format: HashMap<String, RuntimeFn>,
    select: HashMap<String, RuntimeFn>,
}

impl Runtime {
    /// Create a runtime with no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runtime with the built-in functions registered.
    ///
    /// Format: `number`, `upper`, `lower`, `capitalize`. Select: `plural`.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_format("number", builtins::number)
            .with_format("upper", builtins::upper)
            .with_format("lower", builtins::lower)
            .with_format("capitalize", builtins::capitalize)
            .with_select("plural", builtins::plural)
    }

    /// Register a format function, returning the runtime.
    pub fn with_format(mut self, name: impl Into<String>, f: RuntimeFn) -> Self {
        self.register(FunctionKind::Format, name, f);
        self
    }

    /// Register a select function, returning the runtime.
    pub fn with_select(mut self, name: impl Into<String>, f: RuntimeFn) -> Self {
        self.register(FunctionKind::Select, name, f);
        self
    }

    /// Register a function, replacing any function with the same name and kind.
    pub fn register(&mut self, kind: FunctionKind, name: impl Into<String>, f: RuntimeFn) {
        self.table_mut(kind).insert(name.into(), f);
    }

    /// Get a function by kind and name.
    pub fn get(&self, kind: FunctionKind, name: &str) -> Option<RuntimeFn> {
        self.table(kind).get(name).copied()
    }

    /// Check if a function exists in the given namespace.
    pub fn has_function(&self, kind: FunctionKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    /// Names of the functions registered under `kind`, sorted.
    pub fn function_names(&self, kind: FunctionKind) -> Vec<&str> {
        let mut names: Vec<&str> = self.table(kind).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn table(&self, kind: FunctionKind) -> &HashMap<String, RuntimeFn> {
        match kind {
            FunctionKind::Format => &self.format,
            FunctionKind::Select => &self.select,
        }
    }

    fn table_mut(&mut self, kind: FunctionKind) -> &mut HashMap<String, RuntimeFn> {
        match kind {
            FunctionKind::Format => &mut self.format,
            FunctionKind::Select => &mut self.select,
        }
    }
}

impl Debug for Runtime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Runtime")
            .field("format", &self.function_names(FunctionKind::Format))
            .field("select", &self.function_names(FunctionKind::Select))
            .finish()
    }
}
