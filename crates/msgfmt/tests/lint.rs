//! Integration tests for static resource linting.

use msgfmt::model::{MessageReference, PatternElement, Resource, Select, SelectCase, Selector};
use msgfmt::{LintWarning, Literal, Message, lint_resource};

fn select(selectors: usize, cases: &[&[&str]]) -> Message {
    Message::select(Select {
        select: (0..selectors)
            .map(|i| Selector {
                value: PatternElement::variable([format!("s{i}")]),
                default: None,
            })
            .collect(),
        cases: cases
            .iter()
            .map(|keys| SelectCase {
                key: keys.iter().map(|k| Literal::from(*k)).collect(),
                value: vec![PatternElement::literal("x")],
            })
            .collect(),
    })
}

fn lint_one(message: Message) -> Vec<LintWarning> {
    lint_resource(&Resource::new("res", "en").with_entry("m", message))
}

#[test]
fn clean_resource_has_no_warnings() {
    let resource = Resource::new("res", "en")
        .with_entry("target", Message::pattern([PatternElement::literal("t")]))
        .with_entry("ref", Message::pattern([PatternElement::message([PatternElement::literal("target")])]))
        .with_entry("sel", select(2, &[&["one", "a"], &["other", "other"]]));
    assert!(lint_resource(&resource).is_empty());
}

#[test]
fn wrong_key_count() {
    let warnings = lint_one(select(2, &[&["one"], &["other", "other"]]));
    assert_eq!(
        warnings,
        [LintWarning::CaseKeyArity {
            message: "m".to_string(),
            case_index: 0,
            expected: 2,
            got: 1,
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "message 'm': case 0 has 1 keys but there are 2 selectors"
    );
}

#[test]
fn missing_fallback_case() {
    let warnings = lint_one(select(1, &[&["one"]]));
    assert_eq!(
        warnings,
        [LintWarning::MissingFallbackCase {
            message: "m".to_string(),
        }]
    );
}

#[test]
fn declared_default_counts_as_fallback() {
    let message = Message::select(Select {
        select: vec![Selector {
            value: PatternElement::variable(["x"]),
            default: Some(Literal::from("*")),
        }],
        cases: vec![
            SelectCase {
                key: vec![Literal::from("other")],
                value: Vec::new(),
            },
            SelectCase {
                key: vec![Literal::from("*")],
                value: Vec::new(),
            },
        ],
    });
    assert!(lint_one(message).is_empty());
}

#[test]
fn cases_after_fallback_are_unreachable() {
    let warnings = lint_one(select(1, &[&["other"], &["one"], &["few"]]));
    assert_eq!(
        warnings,
        [
            LintWarning::UnreachableCase {
                message: "m".to_string(),
                case_index: 1,
            },
            LintWarning::UnreachableCase {
                message: "m".to_string(),
                case_index: 2,
            },
        ]
    );
}

#[test]
fn empty_select() {
    let warnings = lint_one(select(0, &[&[]]));
    assert_eq!(
        warnings,
        [LintWarning::EmptySelect {
            message: "m".to_string(),
        }]
    );
    assert_eq!(warnings[0].message(), "m");
}

#[test]
fn unresolved_static_reference() {
    let resource = Resource::new("res", "en").with_entry(
        "m",
        Message::pattern([PatternElement::function(
            "upper",
            [PatternElement::message([
                PatternElement::literal("missing"),
                PatternElement::literal("child"),
            ])],
        )]),
    );
    let warnings = lint_resource(&resource);
    assert_eq!(
        warnings,
        [LintWarning::UnresolvedReference {
            message: "m".to_string(),
            target: "missing.child".to_string(),
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "message 'm': reference to missing message 'missing.child'"
    );
}

#[test]
fn dynamic_and_foreign_references_are_not_checked() {
    let resource = Resource::new("res", "en")
        .with_entry(
            "dynamic",
            Message::pattern([PatternElement::message([
                PatternElement::literal("browser"),
                PatternElement::variable(["id"]),
            ])]),
        )
        .with_entry(
            "foreign",
            Message::pattern([PatternElement::Message(MessageReference {
                res_id: Some("other".to_string()),
                msg_path: vec![PatternElement::literal("anything")],
                scope: None,
            })]),
        );
    assert!(lint_resource(&resource).is_empty());
}

#[test]
fn references_inside_select_cases_are_checked() {
    let message = Message::select(Select {
        select: vec![Selector {
            value: PatternElement::variable(["x"]),
            default: None,
        }],
        cases: vec![SelectCase {
            key: vec![Literal::from("other")],
            value: vec![PatternElement::message([PatternElement::literal("gone")])],
        }],
    });
    let warnings = lint_one(message);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        LintWarning::UnresolvedReference { target, .. } if target == "gone"
    ));
}

#[test]
fn warnings_follow_message_path_order() {
    let resource = Resource::new("res", "en")
        .with_entry("b", select(1, &[&["one"]]))
        .with_entry("a", select(0, &[]));
    let warnings = lint_resource(&resource);
    let names: Vec<&str> = warnings.iter().map(LintWarning::message).collect();
    assert_eq!(names, ["a", "b"]);
}
