//! Message interpreter.
//!
//! This module provides the resolution engine that takes compiled messages
//! and produces formatted strings or parts. It looks up variables, calls
//! injected runtime functions, follows message references and evaluates
//! select case tables.

mod builtins;
mod catalog;
mod context;
mod error;
mod evaluator;
mod lint;
mod runtime;

pub use builtins::plural_category;
pub use catalog::{MessageFormat, parse_resource};
pub use context::{Context, DEFAULT_MAX_DEPTH, MessageLookup, Scope};
pub use error::{FormatError, FunctionError, LintWarning, LoadError};
pub use evaluator::{format_to_parts, format_to_string};
pub use lint::lint_resource;
pub use runtime::{FunctionKind, Runtime, RuntimeFn};
