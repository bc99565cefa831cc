use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::Literal;

/// A runtime value bound in a scope or produced by a runtime function.
///
/// Scalars mirror [`Literal`]; lists and maps are the indexable containers a
/// variable path can walk into. Rich values pass through resolution untouched
/// so that runtime functions can consume them.
///
/// # Example
///
/// ```
/// use msgfmt::Value;
///
/// // Numbers become Value::Number
/// let count: Value = 42.into();
///
/// // Strings become Value::String
/// let name: Value = "Alice".into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.as_str(), Some("Alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An explicitly empty value.
    #[default]
    Null,

    /// A boolean value.
    Boolean(bool),

    /// A number (used for plural selection).
    Number(f64),

    /// A string value.
    String(String),

    /// An ordered list, indexable by position.
    List(Vec<Value>),

    /// A string-keyed map, indexable by name.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns true for scalar values that could appear as a [`Literal`].
    pub fn is_literal(&self) -> bool {
        matches!(self, Value::Boolean(_) | Value::Number(_) | Value::String(_))
    }

    /// Returns the literal form of this value, if it is a scalar.
    pub fn to_literal(&self) -> Option<Literal> {
        match self {
            Value::Boolean(b) => Some(Literal::Boolean(*b)),
            Value::Number(n) => Some(Literal::Number(*n)),
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Index into a container value.
    ///
    /// Maps are indexed by the string form of `key`. Lists are indexed by a
    /// non-negative integer, given either as a number or a numeric string.
    /// Scalars and `Null` are not indexable and always return `None`.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(&key.to_string()),
            Value::List(items) => list_index(key).and_then(|i| items.get(i)),
            Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    /// Returns true if this value is exactly equal to `literal`.
    pub fn equals_literal(&self, literal: &Literal) -> bool {
        match (self, literal) {
            (Value::Boolean(a), Literal::Boolean(b)) => a == b,
            (Value::Number(a), Literal::Number(b)) => a == b,
            (Value::String(a), Literal::String(b)) => a == b,
            _ => false,
        }
    }

    /// Returns true if this value is a list containing `literal`.
    pub fn contains_literal(&self, literal: &Literal) -> bool {
        match self {
            Value::List(items) => items.iter().any(|item| item.equals_literal(literal)),
            _ => false,
        }
    }
}

fn list_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if n.fract() == 0.0 && *n >= 0.0 => Some(*n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// From implementations for common types

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Boolean(b) => Value::Boolean(b),
            Literal::Number(n) => Value::Number(n),
            Literal::String(s) => Value::String(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
