pub mod interpreter;
pub mod model;
pub mod types;

pub use interpreter::{
    Context, FormatError, FunctionError, FunctionKind, LintWarning, LoadError, MessageFormat,
    MessageLookup, Runtime, RuntimeFn, Scope, format_to_parts, format_to_string, lint_resource,
};
pub use model::{FunctionOptions, Message, Resource};
pub use types::{FormattedPart, Literal, Value};

/// Creates a `HashMap<String, Value>` of variable bindings from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, booleans or `Value` directly.
///
/// # Example
///
/// ```
/// use msgfmt::{scope, Value};
///
/// let s = scope! { "count" => 3, "name" => "Alice" };
/// assert_eq!(s.len(), 2);
/// assert_eq!(s["count"].as_number(), Some(3.0));
/// assert_eq!(s["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! scope {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
