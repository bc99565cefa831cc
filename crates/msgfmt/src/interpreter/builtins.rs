//! Built-in runtime functions.
//!
//! These cover the common cases so that a [`Runtime`](super::Runtime) is useful
//! without any caller-provided functions:
//!
//! - `plural` (select): CLDR plural category resolution. Returns a category
//!   set holding both the number itself and its category, so select cases can
//!   be keyed by an exact number (`=0`) or by a category (`one`).
//! - `number` (format): plain number formatting with fraction digit options.
//! - `upper`, `lower` (format): locale-aware case mapping.
//! - `capitalize` (format): uppercase the first grapheme cluster.
//!
//! Plural rules are cached per thread per locale and rule type to avoid
//! re-creating `PluralRules` instances on every call.

use std::cell::RefCell;
use std::iter::repeat_n;

use fixed_decimal::Decimal;
use icu_casemap::CaseMapper;
use icu_locale_core::{LanguageIdentifier, Locale, langid, locale};
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};
use unicode_segmentation::UnicodeSegmentation;

use crate::interpreter::error::FunctionError;
use crate::model::FunctionOptions;
use crate::types::{Literal, Value};

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale tag and rule type.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, PluralRuleType, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Select the plural category set for a number.
///
/// The first argument must be a number or a numeric string. The option
/// `type: "ordinal"` selects ordinal rules; anything else uses cardinal rules.
pub fn plural(
    locales: &[String],
    options: &FunctionOptions,
    args: &[Value],
) -> Result<Value, FunctionError> {
    let n = numeric_arg(args, 0)?;
    let rule_type = match options.get("type").and_then(Literal::as_str) {
        Some("ordinal") => PluralRuleType::Ordinal,
        Some("cardinal") | None => PluralRuleType::Cardinal,
        Some(other) => {
            return Err(FunctionError::InvalidOption {
                name: "type".to_string(),
                reason: format!("expected 'cardinal' or 'ordinal', got '{other}'"),
            });
        }
    };
    let category = plural_category(locales, rule_type, n)?;
    Ok(Value::List(vec![
        Value::Number(n),
        Value::String(category.to_string()),
    ]))
}

/// Format a number, honoring `minimumFractionDigits` and `maximumFractionDigits`.
pub fn number(
    _locales: &[String],
    options: &FunctionOptions,
    args: &[Value],
) -> Result<Value, FunctionError> {
    let n = numeric_arg(args, 0)?;
    let min = digits_option(options, "minimumFractionDigits")?.unwrap_or(0);
    let max = digits_option(options, "maximumFractionDigits")?;
    if let Some(max) = max
        && max < min
    {
        return Err(FunctionError::InvalidOption {
            name: "maximumFractionDigits".to_string(),
            reason: format!("{max} is less than minimumFractionDigits {min}"),
        });
    }

    let mut text = match max {
        Some(max) => format!("{n:.max$}"),
        None => n.to_string(),
    };
    if let Some(dot) = text.find('.') {
        // Trailing zeros go, but never below the minimum
        let min_len = dot + 1 + min;
        while text.len() > min_len && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    let fraction_len = text.find('.').map_or(0, |dot| text.len() - dot - 1);
    if fraction_len < min {
        if fraction_len == 0 {
            text.push('.');
        }
        text.extend(repeat_n('0', min - fraction_len));
    }
    Ok(Value::String(text))
}

/// Uppercase the string form of the first argument.
pub fn upper(
    locales: &[String],
    _options: &FunctionOptions,
    args: &[Value],
) -> Result<Value, FunctionError> {
    let text = string_arg(args, 0)?;
    let langid = language_id(locales);
    Ok(Value::String(
        CaseMapper::new().uppercase_to_string(&text, &langid).to_string(),
    ))
}

/// Lowercase the string form of the first argument.
pub fn lower(
    locales: &[String],
    _options: &FunctionOptions,
    args: &[Value],
) -> Result<Value, FunctionError> {
    let text = string_arg(args, 0)?;
    let langid = language_id(locales);
    Ok(Value::String(
        CaseMapper::new().lowercase_to_string(&text, &langid).to_string(),
    ))
}

/// Uppercase the first grapheme cluster of the string form of the first argument.
pub fn capitalize(
    locales: &[String],
    _options: &FunctionOptions,
    args: &[Value],
) -> Result<Value, FunctionError> {
    let text = string_arg(args, 0)?;
    let Some(first) = text.graphemes(true).next() else {
        return Ok(Value::String(text));
    };
    let langid = language_id(locales);
    let mut out = CaseMapper::new()
        .uppercase_to_string(first, &langid)
        .to_string();
    out.push_str(&text[first.len()..]);
    Ok(Value::String(out))
}

/// Get the CLDR plural category for a number in the first usable locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Locales that
/// fail to parse are skipped; with none left, English rules apply.
///
/// # Examples
///
/// ```
/// use msgfmt::interpreter::plural_category;
/// use icu_plurals::PluralRuleType;
///
/// let en = ["en".to_string()];
/// assert_eq!(plural_category(&en, PluralRuleType::Cardinal, 1.0).unwrap(), "one");
/// assert_eq!(plural_category(&en, PluralRuleType::Cardinal, 2.0).unwrap(), "other");
///
/// let ru = ["ru".to_string()];
/// assert_eq!(plural_category(&ru, PluralRuleType::Cardinal, 2.0).unwrap(), "few");
/// assert_eq!(plural_category(&ru, PluralRuleType::Cardinal, 5.0).unwrap(), "many");
/// ```
pub fn plural_category(
    locales: &[String],
    rule_type: PluralRuleType,
    n: f64,
) -> Result<&'static str, FunctionError> {
    let operands = plural_operands(n)?;
    let loc = first_locale(locales);
    let tag = loc.to_string();
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, _, rules)) = cache
            .iter()
            .find(|(cached, kind, _)| *cached == tag && *kind == rule_type)
        {
            return Ok(category_str(rules.category_for(operands)));
        }
        let rules = PluralRules::try_new(loc.into(), rule_type.into()).map_err(|_| {
            FunctionError::UnsupportedLocale {
                locale: tag.clone(),
            }
        })?;
        let category = category_str(rules.category_for(operands));
        cache.push((tag, rule_type, rules));
        Ok(category)
    })
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

fn plural_operands(n: f64) -> Result<PluralOperands, FunctionError> {
    if !n.is_finite() {
        return Err(FunctionError::UnsupportedArgument {
            reason: format!("{n} has no plural category"),
        });
    }
    let magnitude = n.abs();
    if magnitude.fract() == 0.0 && magnitude <= i64::MAX as f64 {
        return Ok(PluralOperands::from(magnitude as i64));
    }
    let decimal = Decimal::try_from_str(&magnitude.to_string()).map_err(|_| {
        FunctionError::UnsupportedArgument {
            reason: format!("{n} has no plural category"),
        }
    })?;
    Ok(PluralOperands::from(&decimal))
}

fn first_locale(locales: &[String]) -> Locale {
    locales
        .iter()
        .find_map(|tag| tag.parse::<Locale>().ok())
        .unwrap_or(locale!("en"))
}

fn language_id(locales: &[String]) -> LanguageIdentifier {
    locales
        .iter()
        .find_map(|tag| tag.parse::<LanguageIdentifier>().ok())
        .unwrap_or(langid!("und"))
}

fn numeric_arg(args: &[Value], index: usize) -> Result<f64, FunctionError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        Some(Value::String(s)) => {
            s.trim()
                .parse()
                .map_err(|_| FunctionError::UnsupportedArgument {
                    reason: format!("'{s}' is not a number"),
                })
        }
        Some(other) => Err(FunctionError::UnsupportedArgument {
            reason: format!("'{other}' is not a number"),
        }),
        None => Err(FunctionError::MissingArgument { index }),
    }
}

fn string_arg(args: &[Value], index: usize) -> Result<String, FunctionError> {
    match args.get(index) {
        Some(Value::Null) => Err(FunctionError::UnsupportedArgument {
            reason: "null has no text".to_string(),
        }),
        Some(value) => Ok(value.to_string()),
        None => Err(FunctionError::MissingArgument { index }),
    }
}

fn digits_option(options: &FunctionOptions, name: &str) -> Result<Option<usize>, FunctionError> {
    match options.get(name) {
        None => Ok(None),
        Some(Literal::Number(n)) if n.fract() == 0.0 && (0.0..=20.0).contains(n) => {
            Ok(Some(*n as usize))
        }
        Some(other) => Err(FunctionError::InvalidOption {
            name: name.to_string(),
            reason: format!("expected an integer from 0 to 20, got '{other}'"),
        }),
    }
}
