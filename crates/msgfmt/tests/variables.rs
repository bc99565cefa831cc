//! Integration tests for variable path resolution.

use std::collections::{BTreeMap, HashMap};

use msgfmt::model::{PatternElement, Resource, VariableReference};
use msgfmt::{Context, FormattedPart, Message, Runtime, Value, format_to_parts, scope};

fn resolve(var: PatternElement, vars: HashMap<String, Value>) -> Value {
    let locales = vec!["en".to_string()];
    let runtime = Runtime::new();
    let resource = Resource::new("res", "en");
    let ctx = Context::builder()
        .locales(&locales)
        .runtime(&runtime)
        .messages(&resource)
        .scope(vars.into())
        .build();
    let mut parts = format_to_parts(&ctx, &Message::pattern([var])).unwrap();
    match parts.pop() {
        Some(FormattedPart::Dynamic(value)) => value,
        other => panic!("expected a dynamic part, got {other:?}"),
    }
}

fn map(pairs: &[(&str, Value)]) -> Value {
    Value::Map(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    )
}

// =============================================================================
// Fallback placeholders
// =============================================================================

#[test]
fn missing_variable_in_empty_scope_yields_placeholder() {
    assert_eq!(
        resolve(PatternElement::variable(["browser-id"]), scope! {}),
        Value::from("{$browser-id}")
    );
}

#[test]
fn walking_into_a_scalar_yields_dotted_placeholder() {
    assert_eq!(
        resolve(
            PatternElement::variable(["user", "name", "first"]),
            scope! { "user" => map(&[("name", Value::from("Ann"))]) }
        ),
        Value::from("{$user.name.first}")
    );
}

#[test]
fn missing_nested_key_yields_placeholder() {
    assert_eq!(
        resolve(
            PatternElement::variable(["user", "age"]),
            scope! { "user" => map(&[("name", Value::from("Ann"))]) }
        ),
        Value::from("{$user.age}")
    );
}

#[test]
fn walking_past_a_missing_key_yields_placeholder() {
    assert_eq!(
        resolve(PatternElement::variable(["a", "b", "c"]), scope! { "a" => map(&[]) }),
        Value::from("{$a.b.c}")
    );
}

#[test]
fn empty_path_yields_bare_placeholder() {
    let var = PatternElement::Variable(VariableReference {
        var_path: Vec::new(),
    });
    assert_eq!(resolve(var, scope! { "x" => 1 }), Value::from("{$}"));
}

// =============================================================================
// Successful walks
// =============================================================================

#[test]
fn nested_map_value_is_found() {
    assert_eq!(
        resolve(
            PatternElement::variable(["user", "name"]),
            scope! { "user" => map(&[("name", Value::from("Ann"))]) }
        ),
        Value::from("Ann")
    );
}

#[test]
fn list_is_indexed_by_number_or_numeric_string() {
    let vars = || scope! { "items" => vec!["zero", "one", "two"] };
    assert_eq!(
        resolve(PatternElement::variable(["items", "1"]), vars()),
        Value::from("one")
    );
    let by_number = PatternElement::Variable(VariableReference {
        var_path: vec![PatternElement::literal("items"), PatternElement::literal(2)],
    });
    assert_eq!(resolve(by_number, vars()), Value::from("two"));
    assert_eq!(
        resolve(PatternElement::variable(["items", "9"]), vars()),
        Value::from("{$items.9}")
    );
}

#[test]
fn rich_values_are_returned_untouched() {
    let range = map(&[("start", Value::from(1)), ("end", Value::from(5))]);
    assert_eq!(
        resolve(PatternElement::variable(["range"]), scope! { "range" => range.clone() }),
        range
    );
}

#[test]
fn falsy_values_are_found() {
    assert_eq!(
        resolve(PatternElement::variable(["zero"]), scope! { "zero" => 0 }),
        Value::from(0)
    );
    assert_eq!(
        resolve(PatternElement::variable(["no"]), scope! { "no" => false }),
        Value::from(false)
    );
    assert_eq!(
        resolve(PatternElement::variable(["empty"]), scope! { "empty" => "" }),
        Value::from("")
    );
}

#[test]
fn null_value_is_found_but_cannot_be_walked() {
    assert_eq!(
        resolve(PatternElement::variable(["n"]), scope! { "n" => Value::Null }),
        Value::Null
    );
    assert_eq!(
        resolve(PatternElement::variable(["n", "x"]), scope! { "n" => Value::Null }),
        Value::from("{$n.x}")
    );
}

// =============================================================================
// Dynamic segments
// =============================================================================

#[test]
fn segment_may_be_another_variable() {
    let var = PatternElement::Variable(VariableReference {
        var_path: vec![
            PatternElement::literal("names"),
            PatternElement::variable(["lang"]),
        ],
    });
    let vars = scope! {
        "lang" => "fi",
        "names" => map(&[("en", Value::from("English")), ("fi", Value::from("suomi"))]),
    };
    assert_eq!(resolve(var, vars), Value::from("suomi"));
}

#[test]
fn placeholder_uses_resolved_dynamic_segments() {
    let var = PatternElement::Variable(VariableReference {
        var_path: vec![
            PatternElement::literal("names"),
            PatternElement::variable(["lang"]),
        ],
    });
    let vars = scope! { "lang" => "de", "names" => map(&[]) };
    assert_eq!(resolve(var, vars), Value::from("{$names.de}"));
}
