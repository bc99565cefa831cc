//! Public data model for compiled messages.
//!
//! These types mirror the JSON tree produced by an external message compiler.
//! They are public so that compilers and tooling can build or inspect messages
//! directly.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::types::{Literal, Value};

/// Options passed to a runtime function, keyed by option name.
pub type FunctionOptions = BTreeMap<String, Literal>;

/// An ordered sequence of pattern elements forming a message body.
pub type Pattern = Vec<PatternElement>;

/// A compiled message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub value: MessageValue,
}

/// The body of a message: either a plain pattern or a selection.
///
/// A [`Select`] may only appear here, as the whole value of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    Pattern(Pattern),
    Select(Select),
}

/// One element of a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternElement {
    /// Constant text or scalar.
    Literal(Literal),
    /// A lookup into the variable scope: `{$name}`.
    Variable(VariableReference),
    /// A call to a runtime function: `{func(arg)}`.
    Function(FunctionReference),
    /// A reference to another message: `{-term}`.
    Message(MessageReference),
}

/// A path into the variable scope.
///
/// Each segment is itself a pattern element, so segments may be computed from
/// other variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReference {
    pub var_path: Vec<PatternElement>,
}

/// A call to a named runtime function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReference {
    pub func: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<PatternElement>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: FunctionOptions,
}

/// A reference to another message, possibly in another resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReference {
    /// Target resource. Defaults to the resource of the current context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res_id: Option<String>,
    /// Path to the message within its resource.
    pub msg_path: Vec<PatternElement>,
    /// Variables overridden while the referenced message is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<BTreeMap<String, ScopeOverride>>,
}

/// The value bound to one variable by a message reference's scope.
///
/// Anything that parses as a pattern element is resolved against the
/// referencing context; any other JSON value is bound as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeOverride {
    Element(PatternElement),
    Value(Value),
}

impl From<PatternElement> for ScopeOverride {
    fn from(element: PatternElement) -> Self {
        ScopeOverride::Element(element)
    }
}

impl From<Value> for ScopeOverride {
    fn from(value: Value) -> Self {
        ScopeOverride::Value(value)
    }
}

/// A selection between cases based on one or more selector values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub select: Vec<Selector>,
    pub cases: Vec<SelectCase>,
}

/// A value-producing expression used to choose a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub value: PatternElement,
    /// Key that always matches this selector. `"other"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

/// One row of a select case table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectCase {
    /// One key per selector, in selector order.
    pub key: Vec<Literal>,
    pub value: Pattern,
}

impl Message {
    /// Create a message with a plain pattern body.
    pub fn pattern(elements: impl IntoIterator<Item = PatternElement>) -> Self {
        Self {
            value: MessageValue::Pattern(elements.into_iter().collect()),
        }
    }

    /// Create a message with a select body.
    pub fn select(select: Select) -> Self {
        Self {
            value: MessageValue::Select(select),
        }
    }
}

impl PatternElement {
    /// A literal element.
    pub fn literal(value: impl Into<Literal>) -> Self {
        PatternElement::Literal(value.into())
    }

    /// A variable reference with static path segments.
    pub fn variable<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Literal>,
    {
        PatternElement::Variable(VariableReference {
            var_path: path.into_iter().map(Self::literal).collect(),
        })
    }

    /// A function call without options.
    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = PatternElement>) -> Self {
        PatternElement::Function(FunctionReference {
            func: name.into(),
            args: args.into_iter().collect(),
            options: FunctionOptions::new(),
        })
    }

    /// A reference to a message in the current resource.
    pub fn message(path: impl IntoIterator<Item = PatternElement>) -> Self {
        PatternElement::Message(MessageReference {
            res_id: None,
            msg_path: path.into_iter().collect(),
            scope: None,
        })
    }
}

impl Selector {
    /// The key that always matches this selector.
    pub fn default_key(&self) -> Literal {
        self.default
            .clone()
            .unwrap_or_else(|| Literal::from(DEFAULT_CATEGORY))
    }
}

/// Default key of a selector that declares none.
pub const DEFAULT_CATEGORY: &str = "other";

/// Source-like rendering used in diagnostics.
impl Display for PatternElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PatternElement::Literal(literal) => write!(f, "{literal}"),
            PatternElement::Variable(var) => {
                f.write_str("$")?;
                write_path(f, &var.var_path)
            }
            PatternElement::Function(func) => {
                write!(f, "{}(", func.func)?;
                for (i, arg) in func.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            PatternElement::Message(msg) => {
                if let Some(res_id) = &msg.res_id {
                    write!(f, "{res_id}:")?;
                }
                write_path(f, &msg.msg_path)
            }
        }
    }
}

fn write_path(f: &mut Formatter<'_>, path: &[PatternElement]) -> FmtResult {
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        match segment {
            PatternElement::Literal(literal) => write!(f, "{literal}")?,
            other => write!(f, "{{{other}}}")?,
        }
    }
    Ok(())
}
