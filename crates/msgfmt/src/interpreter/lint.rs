//! Static lint rules for compiled resources.
//!
//! Analyzes the message tree without evaluating anything, to find select case
//! tables that can never match or that leave inputs uncovered, and static
//! references to messages that do not exist.

use std::slice;

use crate::interpreter::error::LintWarning;
use crate::model::{
    Message, MessageValue, PatternElement, Resource, ScopeOverride, Select, Selector,
};
use crate::types::Literal;

/// Runs static lint rules over every message in a resource, returning warnings
/// in message path order.
pub fn lint_resource(resource: &Resource) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    resource.for_each_message(|path, message| {
        let name = path.join(".");
        lint_message(resource, &name, message, &mut warnings);
    });
    warnings
}

fn lint_message(
    resource: &Resource,
    name: &str,
    message: &Message,
    warnings: &mut Vec<LintWarning>,
) {
    match &message.value {
        MessageValue::Pattern(pattern) => {
            lint_references(resource, name, pattern, warnings);
        }
        MessageValue::Select(select) => {
            lint_select(name, select, warnings);
            for selector in &select.select {
                lint_references(resource, name, slice::from_ref(&selector.value), warnings);
            }
            for case in &select.cases {
                lint_references(resource, name, &case.value, warnings);
            }
        }
    }
}

/// Checks case key arity, default coverage and cases shadowed by a default case.
fn lint_select(name: &str, select: &Select, warnings: &mut Vec<LintWarning>) {
    if select.select.is_empty() {
        warnings.push(LintWarning::EmptySelect {
            message: name.to_string(),
        });
        return;
    }

    let defaults: Vec<Literal> = select.select.iter().map(Selector::default_key).collect();
    let mut catch_all: Option<usize> = None;

    for (index, case) in select.cases.iter().enumerate() {
        if case.key.len() != defaults.len() {
            warnings.push(LintWarning::CaseKeyArity {
                message: name.to_string(),
                case_index: index,
                expected: defaults.len(),
                got: case.key.len(),
            });
            continue;
        }
        if catch_all.is_some() {
            warnings.push(LintWarning::UnreachableCase {
                message: name.to_string(),
                case_index: index,
            });
            continue;
        }
        if case.key == defaults {
            catch_all = Some(index);
        }
    }

    if catch_all.is_none() {
        warnings.push(LintWarning::MissingFallbackCase {
            message: name.to_string(),
        });
    }
}

/// Reports static references to messages missing from this resource.
///
/// Only references whose path is made entirely of literals and that target
/// this resource can be checked without evaluation.
fn lint_references(
    resource: &Resource,
    name: &str,
    elements: &[PatternElement],
    warnings: &mut Vec<LintWarning>,
) {
    for element in elements {
        match element {
            PatternElement::Literal(_) => {}
            PatternElement::Variable(var) => {
                lint_references(resource, name, &var.var_path, warnings);
            }
            PatternElement::Function(func) => {
                lint_references(resource, name, &func.args, warnings);
            }
            PatternElement::Message(reference) => {
                lint_references(resource, name, &reference.msg_path, warnings);
                if let Some(scope) = &reference.scope {
                    let values: Vec<PatternElement> = scope
                        .values()
                        .filter_map(|value| match value {
                            ScopeOverride::Element(element) => Some(element.clone()),
                            ScopeOverride::Value(_) => None,
                        })
                        .collect();
                    lint_references(resource, name, &values, warnings);
                }

                let targets_self = reference
                    .res_id
                    .as_deref()
                    .is_none_or(|id| id == resource.id);
                let static_path: Option<Vec<String>> = reference
                    .msg_path
                    .iter()
                    .map(|segment| match segment {
                        PatternElement::Literal(literal) => Some(literal.to_string()),
                        _ => None,
                    })
                    .collect();
                if let Some(path) = static_path
                    && targets_self
                    && resource.get_message(&path).is_none()
                {
                    warnings.push(LintWarning::UnresolvedReference {
                        message: name.to_string(),
                        target: path.join("."),
                    });
                }
            }
        }
    }
}
