//! Validator execution
//!
//! Applies one [`ValidatorKind`] to an actual value and an expected value.
//! `Ok(false)` is a validation miss; `Err` is an escalation that aborts the
//! evaluation:
//!
//! - receiver shape errors (length of a number, ordering a string against an
//!   object, substring of a non-string) are [`StructuralError`]s;
//! - expected values of the wrong shape (a length given as text, `in_values`
//!   given a scalar) are [`ConfigError`]s.
//!
//! Equality never coerces. Ordering coerces numeric-looking strings.

use crate::error::{CheckResult, ConfigError, StructuralError, display_path};
use crate::rule::Conditional;
use crate::validator::{TypeName, ValidatorKind};
use crate::value::{Numeric, emptiness, length_of, string_form, type_name, values_equal};
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;

/// Runs `validator` on `actual` (found at `path`) against `expect`.
///
/// `depth` is the conditional nesting level of the rule being executed.
pub(crate) fn execute(
    validator: ValidatorKind,
    actual: &Value,
    expect: &Value,
    path: &str,
    depth: usize,
) -> CheckResult<bool> {
    PreparedCheck::new(validator, expect).run(actual, path, depth)
}

/// A validator and its expected value, prepared once and run on every match
/// of a rule.
pub(crate) struct PreparedCheck<'e> {
    validator: ValidatorKind,
    expect: &'e Value,
    /// Anchored pattern of a `regex` rule; `None` for other validators and for
    /// malformed patterns.
    pattern: Option<Regex>,
}

impl<'e> PreparedCheck<'e> {
    pub(crate) fn new(validator: ValidatorKind, expect: &'e Value) -> Self {
        let pattern = if validator == ValidatorKind::Regex {
            compile_pattern(expect)
        } else {
            None
        };
        Self {
            validator,
            expect,
            pattern,
        }
    }

    pub(crate) fn run(&self, actual: &Value, path: &str, depth: usize) -> CheckResult<bool> {
        let (validator, expect) = (self.validator, self.expect);
        let passed = match validator {
            ValidatorKind::NotEmpty => emptiness(actual).is_none(),
            ValidatorKind::Eq => values_equal(actual, expect),
            ValidatorKind::Ne => !values_equal(actual, expect),
            ValidatorKind::Gt => compare(actual, expect, path)? == Ordering::Greater,
            ValidatorKind::Ge => compare(actual, expect, path)? != Ordering::Less,
            ValidatorKind::Lt => compare(actual, expect, path)? == Ordering::Less,
            ValidatorKind::Le => compare(actual, expect, path)? != Ordering::Greater,
            ValidatorKind::Contains => contains(actual, expect, path)?,
            ValidatorKind::ContainedBy => contained_in(validator, actual, expect, path)?,
            ValidatorKind::StartsWith => string_form(actual).starts_with(&*string_form(expect)),
            ValidatorKind::EndsWith => string_form(actual).ends_with(&*string_form(expect)),
            ValidatorKind::Regex => self
                .pattern
                .as_ref()
                .is_some_and(|regex| regex.is_match(&string_form(actual))),
            ValidatorKind::TypeMatch => type_name_of(expect)?.matches(actual),
            ValidatorKind::CustomNumberCheck => actual.is_number(),
            ValidatorKind::InValues => contained_in(validator, actual, expect, path)?,
            ValidatorKind::NotInValues => !contained_in(validator, actual, expect, path)?,
            ValidatorKind::LengthEq
            | ValidatorKind::LengthNe
            | ValidatorKind::LengthGt
            | ValidatorKind::LengthGe
            | ValidatorKind::LengthLt
            | ValidatorKind::LengthLe => {
                let bound = expected_length(validator, expect)?;
                let len = measure(actual, path)?;
                match validator {
                    ValidatorKind::LengthEq => len == bound,
                    ValidatorKind::LengthNe => len != bound,
                    ValidatorKind::LengthGt => len > bound,
                    ValidatorKind::LengthGe => len >= bound,
                    ValidatorKind::LengthLt => len < bound,
                    _ => len <= bound,
                }
            }
            ValidatorKind::LengthBetween => {
                let (min, max) = length_bounds(expect)?;
                let len = measure(actual, path)?;
                (min..=max).contains(&len)
            }
            ValidatorKind::ConditionalCheck => {
                let conditional = Conditional::from_expect(expect)?;
                crate::engine::check_conditional(actual, &conditional, depth)?
            }
        };
        Ok(passed)
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Orders `actual` against `expect`.
///
/// Numbers compare numerically. If either side is a string, both sides are
/// coerced to numbers when possible; otherwise two strings compare
/// lexicographically. Booleans order `false < true`. Any other pairing has no
/// order and escalates.
fn compare(actual: &Value, expect: &Value, path: &str) -> Result<Ordering, StructuralError> {
    let incomparable = || StructuralError::Incomparable {
        path: display_path(path),
        left: type_name(actual),
        right: type_name(expect),
    };

    let ordering = match (actual, expect) {
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        (Value::Number(_) | Value::String(_), Value::Number(_) | Value::String(_)) => {
            match (Numeric::coerce(actual), Numeric::coerce(expect)) {
                (Some(l), Some(r)) => l.partial_cmp(&r),
                _ => match (actual, expect) {
                    (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
                    _ => None,
                },
            }
        }
        _ => None,
    };

    ordering.ok_or_else(incomparable)
}

// ============================================================================
// MEMBERSHIP
// ============================================================================

enum Membership {
    Found(bool),
    /// The container cannot hold other values.
    NotContainer,
    /// Substring tests need a string on both sides.
    NeedsString,
}

/// `item in container`: substring for strings, element equality for arrays,
/// key presence for objects.
fn membership(container: &Value, item: &Value) -> Membership {
    match container {
        Value::String(haystack) => match item {
            Value::String(needle) => Membership::Found(haystack.contains(needle.as_str())),
            _ => Membership::NeedsString,
        },
        Value::Array(items) => Membership::Found(items.iter().any(|v| values_equal(v, item))),
        Value::Object(map) => Membership::Found(item.as_str().is_some_and(|k| map.contains_key(k))),
        _ => Membership::NotContainer,
    }
}

/// `expect in actual`; the data is the container.
fn contains(actual: &Value, expect: &Value, path: &str) -> CheckResult<bool> {
    match membership(actual, expect) {
        Membership::Found(found) => Ok(found),
        Membership::NotContainer => Err(StructuralError::NotContainer {
            path: display_path(path),
            validator: ValidatorKind::Contains.as_str(),
            found: type_name(actual),
        }
        .into()),
        Membership::NeedsString => Err(StructuralError::TypeMismatch {
            path: display_path(path),
            expected: "string",
            found: type_name(expect),
        }
        .into()),
    }
}

/// `actual in expect`; the rule supplies the container.
fn contained_in(
    validator: ValidatorKind,
    actual: &Value,
    expect: &Value,
    path: &str,
) -> CheckResult<bool> {
    match membership(expect, actual) {
        Membership::Found(found) => Ok(found),
        Membership::NotContainer => Err(ConfigError::invalid_expectation(
            validator.as_str(),
            format!(
                "expects a string, array or object to test against, got {}",
                type_name(expect)
            ),
        )
        .into()),
        Membership::NeedsString => Err(StructuralError::TypeMismatch {
            path: display_path(path),
            expected: "string",
            found: type_name(actual),
        }
        .into()),
    }
}

// ============================================================================
// TEXT AND TYPE
// ============================================================================

/// Compiles the pattern so it matches at the start of a value's string form.
///
/// A malformed pattern yields `None`, and every match of the rule is a miss.
fn compile_pattern(expect: &Value) -> Option<Regex> {
    let pattern = string_form(expect);
    Regex::new(&format!(r"\A(?:{pattern})"))
        .inspect_err(|e| {
            tracing::warn!(
                pattern = %pattern,
                error = %e,
                "invalid regex pattern, treating every match as failed"
            );
        })
        .ok()
}

fn type_name_of(expect: &Value) -> Result<TypeName, ConfigError> {
    match expect {
        Value::String(name) => name.parse(),
        other => Err(ConfigError::invalid_expectation(
            ValidatorKind::TypeMatch.as_str(),
            format!("expects a type name, got {}", type_name(other)),
        )),
    }
}

// ============================================================================
// LENGTH
// ============================================================================

fn measure(actual: &Value, path: &str) -> Result<usize, StructuralError> {
    length_of(actual).ok_or_else(|| StructuralError::NoLength {
        path: display_path(path),
        found: type_name(actual),
    })
}

/// A non-negative integer, accepting integral floats such as `2.0`.
fn as_length(value: &Value) -> Option<usize> {
    let n = value.as_number()?;
    if let Some(u) = n.as_u64() {
        return usize::try_from(u).ok();
    }
    n.as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= usize::MAX as f64)
        .map(|f| f as usize)
}

fn expected_length(validator: ValidatorKind, expect: &Value) -> Result<usize, ConfigError> {
    as_length(expect).ok_or_else(|| {
        ConfigError::invalid_expectation(
            validator.as_str(),
            format!("expects a non-negative integer length, got {expect}"),
        )
    })
}

fn length_bounds(expect: &Value) -> Result<(usize, usize), ConfigError> {
    let invalid = || ConfigError::InvalidBounds {
        found: expect.to_string(),
    };
    match expect.as_array().map(Vec::as_slice) {
        Some([min, max]) => Ok((
            as_length(min).ok_or_else(invalid)?,
            as_length(max).ok_or_else(invalid)?,
        )),
        _ => Err(invalid()),
    }
}

// ============================================================================
// TESTS
// ============================================================================
