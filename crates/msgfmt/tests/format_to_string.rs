//! Integration tests for flat string formatting.

use std::collections::HashMap;

use msgfmt::model::{PatternElement, Resource, Select, SelectCase, Selector};
use msgfmt::{Context, Literal, Message, Runtime, Value, format_to_string, scope};

fn en() -> Vec<String> {
    vec!["en".to_string()]
}

fn format(message: &Message, vars: HashMap<String, Value>) -> String {
    let locales = en();
    let runtime = Runtime::new();
    let resource = Resource::new("res", "en");
    let ctx = Context::builder()
        .locales(&locales)
        .runtime(&runtime)
        .messages(&resource)
        .resource_id("res")
        .scope(vars.into())
        .build();
    format_to_string(&ctx, message).unwrap()
}

// =============================================================================
// Literal patterns
// =============================================================================

#[test]
fn empty_pattern_formats_to_empty_string() {
    let message = Message::pattern([]);
    assert_eq!(format(&message, scope! {}), "");
}

#[test]
fn literal_pattern_concatenates_in_order() {
    let message = Message::pattern([
        PatternElement::literal("Hello"),
        PatternElement::literal(", "),
        PatternElement::literal("world"),
        PatternElement::literal("!"),
    ]);
    assert_eq!(format(&message, scope! {}), "Hello, world!");
}

#[test]
fn numeric_and_boolean_literals_use_display_form() {
    let message = Message::pattern([
        PatternElement::literal(3),
        PatternElement::literal(" "),
        PatternElement::literal(2.5),
        PatternElement::literal(" "),
        PatternElement::literal(true),
    ]);
    assert_eq!(format(&message, scope! {}), "3 2.5 true");
}

// =============================================================================
// Dynamic values
// =============================================================================

#[test]
fn variable_value_is_interpolated() {
    let message = Message::pattern([
        PatternElement::literal("Hello, "),
        PatternElement::variable(["name"]),
        PatternElement::literal("!"),
    ]);
    assert_eq!(
        format(&message, scope! { "name" => "Alice" }),
        "Hello, Alice!"
    );
}

#[test]
fn null_variable_contributes_nothing() {
    let message = Message::pattern([
        PatternElement::literal("["),
        PatternElement::variable(["nothing"]),
        PatternElement::literal("]"),
    ]);
    assert_eq!(format(&message, scope! { "nothing" => Value::Null }), "[]");
}

#[test]
fn list_variable_joins_items() {
    let message = Message::pattern([PatternElement::variable(["items"])]);
    let vars = scope! { "items" => vec!["a", "b", "c"] };
    assert_eq!(format(&message, vars), "a,b,c");
}

#[test]
fn missing_variable_renders_placeholder_inline() {
    let message = Message::pattern([
        PatternElement::literal("Hi "),
        PatternElement::variable(["who"]),
    ]);
    assert_eq!(format(&message, scope! {}), "Hi {$who}");
}

// =============================================================================
// Idempotence and totality
// =============================================================================

#[test]
fn formatting_twice_gives_identical_output() {
    let message = Message::pattern([
        PatternElement::variable(["n"]),
        PatternElement::literal(" items, "),
        PatternElement::function("missing", [PatternElement::literal(1)]),
        PatternElement::message([PatternElement::literal("nowhere")]),
    ]);
    let first = format(&message, scope! { "n" => 4 });
    let second = format(&message, scope! { "n" => 4 });
    assert_eq!(first, second);
    assert_eq!(first, "4 items, {missing(1)}{nowhere}");
}

#[test]
fn unmatched_select_formats_to_empty_string() {
    let message = Message::select(Select {
        select: vec![Selector {
            value: PatternElement::variable(["kind"]),
            default: Some(Literal::from("fallback")),
        }],
        cases: vec![
            SelectCase {
                key: vec![Literal::from("a")],
                value: vec![PatternElement::literal("A")],
            },
            SelectCase {
                key: vec![Literal::from("b")],
                value: vec![PatternElement::literal("B")],
            },
        ],
    });
    assert_eq!(format(&message, scope! { "kind" => "c" }), "");
}

#[test]
fn select_with_no_cases_formats_to_empty_string() {
    let message = Message::select(Select {
        select: vec![Selector {
            value: PatternElement::literal("x"),
            default: None,
        }],
        cases: Vec::new(),
    });
    assert_eq!(format(&message, scope! {}), "");
}
