//! Message resolution engine.
//!
//! This module walks a compiled message and resolves it against a
//! [`Context`], producing either a flat string or a tree of formatted parts.
//! It looks up variables, calls runtime functions, resolves message
//! references with optional scope overrides, and evaluates select case tables.
//!
//! Resolution is total: missing variables, missing messages and failing
//! runtime functions degrade to placeholders, and an unmatched select yields
//! an empty pattern. The only errors are cyclic or overly deep message
//! reference chains.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::interpreter::context::Context;
use crate::interpreter::error::FormatError;
use crate::interpreter::runtime::FunctionKind;
use crate::model::{
    FunctionOptions, FunctionReference, Message, MessageReference, MessageValue, PatternElement,
    ScopeOverride, Select, VariableReference,
};
use crate::types::{FormattedPart, Literal, Value};

/// Name of the select function used to categorise numeric selector values.
const PLURAL_FUNCTION: &str = "plural";

/// Format a message to a string.
///
/// Each pattern element is resolved and its display form appended; `Null`
/// values contribute nothing. A select body is first reduced to the pattern
/// of its matching case.
///
/// # Errors
///
/// Returns an error if:
/// - A message reference re-enters a message that is being resolved
/// - Message references nest deeper than [`Context::max_depth`]
pub fn format_to_string(ctx: &Context<'_>, message: &Message) -> Result<String, FormatError> {
    Resolver::new().message_to_string(ctx, message)
}

/// Format a message to a list of parts, preserving message boundaries.
///
/// # Errors
///
/// Same as [`format_to_string`].
pub fn format_to_parts(
    ctx: &Context<'_>,
    message: &Message,
) -> Result<Vec<FormattedPart>, FormatError> {
    Resolver::new().message_to_parts(ctx, message)
}

/// A selector value paired with the key that always matches it.
struct ResolvedSelector {
    value: Value,
    default: Literal,
}

impl ResolvedSelector {
    /// A key matches if it is the default, equals the value, or is a member of
    /// a category set value.
    fn matches(&self, key: &Literal) -> bool {
        *key == self.default || self.value.equals_literal(key) || self.value.contains_literal(key)
    }
}

/// Per-call resolution state: the chain of messages currently being resolved.
struct Resolver {
    call_stack: Vec<CallFrame>,
}

/// A message being resolved, keyed by `resource:dotted.path`, with the
/// variables visible to it.
#[derive(PartialEq)]
struct CallFrame {
    key: String,
    vars: HashMap<String, Value>,
}

impl Resolver {
    fn new() -> Self {
        Self {
            call_stack: Vec::new(),
        }
    }

    fn message_to_string(
        &mut self,
        ctx: &Context<'_>,
        message: &Message,
    ) -> Result<String, FormatError> {
        let pattern = self.pattern_for(ctx, message)?;
        let mut output = String::new();
        for element in pattern {
            match self.resolve_value(ctx, element)? {
                Value::Null => {}
                Value::String(s) => output.push_str(&s),
                value => output.push_str(&value.to_string()),
            }
        }
        Ok(output)
    }

    fn message_to_parts(
        &mut self,
        ctx: &Context<'_>,
        message: &Message,
    ) -> Result<Vec<FormattedPart>, FormatError> {
        let pattern = self.pattern_for(ctx, message)?;
        pattern
            .iter()
            .map(|element| self.resolve_part(ctx, element))
            .collect()
    }

    /// The pattern to format: the message body, or the matching select case.
    fn pattern_for<'m>(
        &mut self,
        ctx: &Context<'_>,
        message: &'m Message,
    ) -> Result<&'m [PatternElement], FormatError> {
        match &message.value {
            MessageValue::Pattern(pattern) => Ok(pattern.as_slice()),
            MessageValue::Select(select) => self.resolve_select(ctx, select),
        }
    }

    /// Resolve an element to a tagged part. Referenced messages nest; a
    /// missing referenced message is an empty list.
    fn resolve_part(
        &mut self,
        ctx: &Context<'_>,
        element: &PatternElement,
    ) -> Result<FormattedPart, FormatError> {
        match element {
            PatternElement::Literal(literal) => Ok(FormattedPart::Literal(literal.clone())),
            PatternElement::Variable(var) => {
                Ok(FormattedPart::Dynamic(self.resolve_variable(ctx, var)?))
            }
            PatternElement::Function(func) => Ok(FormattedPart::Dynamic(
                self.resolve_function(ctx, func, FunctionKind::Format)?,
            )),
            PatternElement::Message(reference) => {
                let (path, message, msg_ctx) = self.resolve_message(ctx, reference)?;
                let parts = match message {
                    Some(message) => {
                        self.push_call(&msg_ctx, &path)?;
                        let parts = self.message_to_parts(&msg_ctx, message)?;
                        self.pop_call();
                        parts
                    }
                    None => Vec::new(),
                };
                Ok(FormattedPart::Message(parts))
            }
        }
    }

    /// Resolve an element to a value. Referenced messages flatten to a string;
    /// a missing referenced message becomes a `{path}` placeholder.
    fn resolve_value(
        &mut self,
        ctx: &Context<'_>,
        element: &PatternElement,
    ) -> Result<Value, FormatError> {
        match element {
            PatternElement::Literal(literal) => Ok(Value::from(literal.clone())),
            PatternElement::Variable(var) => self.resolve_variable(ctx, var),
            PatternElement::Function(func) => self.resolve_function(ctx, func, FunctionKind::Format),
            PatternElement::Message(reference) => {
                let (path, message, msg_ctx) = self.resolve_message(ctx, reference)?;
                match message {
                    Some(message) => {
                        self.push_call(&msg_ctx, &path)?;
                        let text = self.message_to_string(&msg_ctx, message)?;
                        self.pop_call();
                        Ok(Value::String(text))
                    }
                    None => Ok(Value::String(format!("{{{}}}", path.join(".")))),
                }
            }
        }
    }

    /// Walk the scope along the variable path.
    ///
    /// Every segment is resolved first, so segments may be dynamic. The walk
    /// yields a `{$a.b}` placeholder if it reaches a value that cannot be
    /// indexed or ends on a missing value. Found values are returned as is,
    /// including lists and maps.
    fn resolve_variable(
        &mut self,
        ctx: &Context<'_>,
        var: &VariableReference,
    ) -> Result<Value, FormatError> {
        let keys = var
            .var_path
            .iter()
            .map(|segment| self.resolve_value(ctx, segment))
            .collect::<Result<Vec<_>, _>>()?;

        let placeholder = || {
            let path: Vec<String> = keys.iter().map(ToString::to_string).collect();
            trace!(path = %path.join("."), "unresolved variable");
            Value::String(format!("{{${}}}", path.join(".")))
        };

        let Some((first, rest)) = keys.split_first() else {
            return Ok(placeholder());
        };
        let mut current = ctx.scope().get(&first.to_string());
        for key in rest {
            current = current.and_then(|value| value.get(key));
        }
        Ok(current.cloned().unwrap_or_else(placeholder))
    }

    /// Call a runtime function with eagerly resolved arguments.
    ///
    /// A missing function or a function error falls back per namespace:
    /// format functions produce a `{name(arg,...)}` placeholder; select
    /// functions pass their first argument through so selection can proceed.
    fn resolve_function(
        &mut self,
        ctx: &Context<'_>,
        func: &FunctionReference,
        kind: FunctionKind,
    ) -> Result<Value, FormatError> {
        let args = func
            .args
            .iter()
            .map(|arg| self.resolve_value(ctx, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let result = ctx
            .runtime()
            .get(kind, &func.func)
            .and_then(|f| f(ctx.locales(), &func.options, &args).ok());
        if let Some(value) = result {
            return Ok(value);
        }

        Ok(match kind {
            FunctionKind::Format => {
                let args: Vec<String> = args
                    .iter()
                    .map(|arg| match arg {
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                Value::String(format!("{{{}({})}}", func.func, args.join(",")))
            }
            FunctionKind::Select => match args.into_iter().next() {
                Some(first) if first.is_literal() => first,
                Some(first) => Value::String(first.to_string()),
                None => Value::String(String::new()),
            },
        })
    }

    /// Look up a referenced message and the context to resolve it in.
    ///
    /// Returns the string path, the message if found, and either this context
    /// or a child derived for a resource redirect or scope override. Override
    /// values are resolved against this context.
    fn resolve_message<'c, 'a>(
        &mut self,
        ctx: &'c Context<'a>,
        reference: &MessageReference,
    ) -> Result<(Vec<String>, Option<&'a Message>, Cow<'c, Context<'a>>), FormatError> {
        let path = reference
            .msg_path
            .iter()
            .map(|segment| self.resolve_value(ctx, segment).map(|value| value.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let message = ctx.get_message(reference.res_id.as_deref(), &path);
        if message.is_none() {
            trace!(
                resource = ?reference.res_id.as_deref().or(ctx.resource_id()),
                path = %path.join("."),
                "referenced message not found"
            );
        }

        let overrides = match &reference.scope {
            Some(scope) => {
                let mut resolved = HashMap::with_capacity(scope.len());
                for (name, entry) in scope {
                    let value = match entry {
                        ScopeOverride::Element(PatternElement::Literal(literal)) => {
                            Value::from(literal.clone())
                        }
                        ScopeOverride::Element(element) => self.resolve_value(ctx, element)?,
                        ScopeOverride::Value(value) => value.clone(),
                    };
                    resolved.insert(name.clone(), value);
                }
                Some(resolved)
            }
            None => None,
        };
        let msg_ctx = ctx.extend(reference.res_id.as_deref(), overrides);
        Ok((path, message, msg_ctx))
    }

    /// Evaluate the selectors and return the pattern of the first matching
    /// case, or an empty pattern if no case matches.
    fn resolve_select<'m>(
        &mut self,
        ctx: &Context<'_>,
        select: &'m Select,
    ) -> Result<&'m [PatternElement], FormatError> {
        let mut selectors = Vec::with_capacity(select.select.len());
        for selector in &select.select {
            let value = match &selector.value {
                PatternElement::Function(func) => {
                    self.resolve_function(ctx, func, FunctionKind::Select)?
                }
                other => self.resolve_value(ctx, other)?,
            };
            selectors.push(ResolvedSelector {
                value: selector_value(ctx, value),
                default: selector.default_key(),
            });
        }

        let matched = select.cases.iter().find(|case| {
            case.key.len() == selectors.len()
                && case
                    .key
                    .iter()
                    .zip(&selectors)
                    .all(|(key, selector)| selector.matches(key))
        });
        match matched {
            Some(case) => Ok(case.value.as_slice()),
            None => {
                trace!(cases = select.cases.len(), "no select case matched");
                Ok(&[])
            }
        }
    }

    /// Record entry into a referenced message, rejecting cycles and runaway depth.
    ///
    /// Re-entering a message is a cycle only when its resource, path and
    /// visible variables all repeat. A reference that recurses with a changing
    /// override is bounded by the depth limit instead.
    fn push_call(&mut self, msg_ctx: &Context<'_>, path: &[String]) -> Result<(), FormatError> {
        let resource = msg_ctx.resource_id().unwrap_or_default();
        let frame = CallFrame {
            key: format!("{resource}:{}", path.join(".")),
            vars: msg_ctx.scope().flatten(),
        };
        if self.call_stack.contains(&frame) {
            let mut chain: Vec<String> = self.call_stack.iter().map(|f| f.key.clone()).collect();
            chain.push(frame.key);
            debug!(chain = %chain.join(" -> "), "cyclic message reference");
            return Err(FormatError::CyclicReference { chain });
        }
        if self.call_stack.len() >= msg_ctx.max_depth() {
            debug!(max_depth = msg_ctx.max_depth(), "message reference depth exceeded");
            return Err(FormatError::MaxDepthExceeded {
                max_depth: msg_ctx.max_depth(),
            });
        }
        self.call_stack.push(frame);
        Ok(())
    }

    fn pop_call(&mut self) {
        self.call_stack.pop();
    }
}

/// Normalize a resolved selector value into a match value.
///
/// Numbers go through the `plural` select function when the runtime has one;
/// strings and lists are used as is; everything else matches by its string
/// form.
fn selector_value(ctx: &Context<'_>, value: Value) -> Value {
    match value {
        Value::Number(n) => match ctx.runtime().get(FunctionKind::Select, PLURAL_FUNCTION) {
            Some(plural) => plural(ctx.locales(), &FunctionOptions::new(), &[Value::Number(n)])
                .unwrap_or_else(|_| {
                    trace!(n, "plural categorisation failed, matching raw number");
                    Value::Number(n)
                }),
            None => Value::Number(n),
        },
        Value::String(_) | Value::List(_) => value,
        other => Value::String(other.to_string()),
    }
}
