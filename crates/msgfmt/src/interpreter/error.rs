//! Error types for message resolution and resource loading.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading a resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a resource file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The resource is not valid JSON or does not match the data model.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

/// An error that aborts formatting.
///
/// Missing variables, missing referenced messages, failing runtime functions
/// and unmatched selections are never errors; they degrade to placeholders or
/// empty output. Only runaway reference chains abort a formatting call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A message reference re-entered a message that is still being resolved.
    #[error("cyclic message reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Message references nested deeper than the context allows.
    #[error("maximum message reference depth of {max_depth} exceeded")]
    MaxDepthExceeded { max_depth: usize },

    /// The top-level message requested from a catalog does not exist.
    #[error("message not found: '{path}' in resource '{resource}'")]
    MessageNotFound { resource: String, path: String },
}

/// Raised by a runtime function that cannot handle its arguments.
///
/// The resolver catches this at the call site and substitutes a fallback;
/// the contents of the error are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    /// An argument has a type or value the function does not accept.
    #[error("unsupported argument: {reason}")]
    UnsupportedArgument { reason: String },

    /// A required argument is missing.
    #[error("missing argument {index}")]
    MissingArgument { index: usize },

    /// An option has a value the function does not accept.
    #[error("invalid option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    /// The requested locale is not supported by the function.
    #[error("unsupported locale: {locale}")]
    UnsupportedLocale { locale: String },
}

/// A problem found by static analysis of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintWarning {
    /// A select case has a different number of keys than there are selectors.
    CaseKeyArity {
        message: String,
        case_index: usize,
        expected: usize,
        got: usize,
    },

    /// No case matches when every selector falls back to its default.
    MissingFallbackCase { message: String },

    /// A case follows a case whose keys are all selector defaults.
    UnreachableCase { message: String, case_index: usize },

    /// A static reference names no message in this resource.
    UnresolvedReference { message: String, target: String },

    /// A select declares no selectors.
    EmptySelect { message: String },
}

impl LintWarning {
    /// The dotted path of the message the warning is about.
    pub fn message(&self) -> &str {
        match self {
            LintWarning::CaseKeyArity { message, .. }
            | LintWarning::MissingFallbackCase { message }
            | LintWarning::UnreachableCase { message, .. }
            | LintWarning::UnresolvedReference { message, .. }
            | LintWarning::EmptySelect { message } => message,
        }
    }
}

impl Display for LintWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            LintWarning::CaseKeyArity {
                message,
                case_index,
                expected,
                got,
            } => write!(
                f,
                "message '{message}': case {case_index} has {got} keys but there are {expected} selectors"
            ),
            LintWarning::MissingFallbackCase { message } => write!(
                f,
                "message '{message}': no case matches the selector defaults, some inputs format to an empty string"
            ),
            LintWarning::UnreachableCase {
                message,
                case_index,
            } => write!(
                f,
                "message '{message}': case {case_index} is unreachable after a default case"
            ),
            LintWarning::UnresolvedReference { message, target } => {
                write!(f, "message '{message}': reference to missing message '{target}'")
            }
            LintWarning::EmptySelect { message } => {
                write!(f, "message '{message}': select has no selectors")
            }
        }
    }
}
