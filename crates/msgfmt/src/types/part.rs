use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::{Literal, Value};

/// One fragment of a structured formatting result.
///
/// Parts mirror the resolved pattern: literal text stays tagged as literal,
/// resolved variables and function calls become dynamic values, and each
/// message reference becomes a nested list so that message boundaries
/// survive formatting.
///
/// On the wire a part is `{"kind": "literal" | "dynamic" | "message", "value": ...}`.
///
/// # Example
///
/// ```
/// use msgfmt::{FormattedPart, Literal};
///
/// let part = FormattedPart::Message(vec![FormattedPart::Literal(Literal::from("Firefoxin"))]);
/// assert_eq!(part.to_string(), "Firefoxin");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FormattedPart {
    /// Text copied verbatim from the pattern.
    Literal(Literal),

    /// A value produced by a variable or function reference.
    Dynamic(Value),

    /// The parts of a referenced message. Empty when the message was not found.
    Message(Vec<FormattedPart>),
}

impl FormattedPart {
    /// Returns the nested parts of a message part.
    pub fn as_message(&self) -> Option<&[FormattedPart]> {
        match self {
            FormattedPart::Message(parts) => Some(parts),
            _ => None,
        }
    }
}

/// Concatenates the display form of every part, rendering `Null` as nothing.
impl Display for FormattedPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FormattedPart::Literal(literal) => write!(f, "{literal}"),
            FormattedPart::Dynamic(Value::Null) => Ok(()),
            FormattedPart::Dynamic(value) => write!(f, "{value}"),
            FormattedPart::Message(parts) => {
                for part in parts {
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}
