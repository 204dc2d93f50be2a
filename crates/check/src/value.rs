//! Inspection helpers for `serde_json::Value`
//!
//! Emptiness classification, type names for diagnostics, the canonical string
//! form used by text operators, and the numeric view used by ordering
//! operators.

use serde_json::{Number, Value};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// EMPTINESS
// ============================================================================

/// Why a value counts as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyReason {
    /// The value is `null`.
    Null,
    /// A string that is empty or only whitespace.
    BlankString,
    /// The literal string `"null"` in any letter case.
    NullLiteral,
    /// An array with no elements.
    EmptyArray,
    /// An object with no entries.
    EmptyObject,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Null => "value is null",
            Self::BlankString => "value is a blank string",
            Self::NullLiteral => "value is the string 'null'",
            Self::EmptyArray => "value is an empty array",
            Self::EmptyObject => "value is an empty object",
        };
        f.write_str(reason)
    }
}

/// Classifies a value as empty, returning the reason, or `None` if non-empty.
///
/// Numbers and booleans (including `0` and `false`) are never empty.
pub fn emptiness(value: &Value) -> Option<EmptyReason> {
    match value {
        Value::Null => Some(EmptyReason::Null),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(EmptyReason::BlankString)
            } else if trimmed.eq_ignore_ascii_case("null") {
                Some(EmptyReason::NullLiteral)
            } else {
                None
            }
        }
        Value::Array(items) if items.is_empty() => Some(EmptyReason::EmptyArray),
        Value::Object(map) if map.is_empty() => Some(EmptyReason::EmptyObject),
        _ => None,
    }
}

/// Returns true if the value counts as empty.
#[inline]
pub fn is_empty_value(value: &Value) -> bool {
    emptiness(value).is_some()
}

// ============================================================================
// TYPE NAMES AND STRING FORM
// ============================================================================

/// Type name of a value for diagnostics.
///
/// Numbers are split into `integer` and `float` the same way `type_match`
/// splits them.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Canonical string form: strings as-is, everything else as compact JSON.
pub fn string_form(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Length of a value, if it has one.
///
/// Strings are measured in Unicode scalar values.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

// ============================================================================
// EQUALITY
// ============================================================================

/// Strict equality with numeric comparison for numbers.
///
/// `1` equals `1.0`, but the string `"1"` never equals the number `1`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            match (Numeric::from_number(l), Numeric::from_number(r)) {
                (Some(l), Some(r)) => l == r,
                _ => l == r,
            }
        }
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(k, v)| r.get(k).is_some_and(|other| values_equal(v, other)))
        }
        _ => left == right,
    }
}

// ============================================================================
// NUMERIC VIEW
// ============================================================================

/// A number used for ordering: exact for integers, `f64` otherwise.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    pub(crate) fn from_number(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            Some(Self::Int(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Some(Self::Int(i128::from(u)))
        } else {
            n.as_f64().map(Self::Float)
        }
    }

    /// Parses a numeric-looking string. Surrounding whitespace is ignored;
    /// `inf` and `NaN` spellings are rejected.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if !s.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        if let Ok(i) = s.parse::<i128>() {
            return Some(Self::Int(i));
        }
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Self::Float)
    }

    /// Numeric view of a number or numeric-looking string.
    pub(crate) fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(l), Self::Int(r)) => Some(l.cmp(r)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), Some(EmptyReason::Null))]
    #[case(json!(""), Some(EmptyReason::BlankString))]
    #[case(json!("   "), Some(EmptyReason::BlankString))]
    #[case(json!("NULL"), Some(EmptyReason::NullLiteral))]
    #[case(json!(" null "), Some(EmptyReason::NullLiteral))]
    #[case(json!([]), Some(EmptyReason::EmptyArray))]
    #[case(json!({}), Some(EmptyReason::EmptyObject))]
    #[case(json!(0), None)]
    #[case(json!(false), None)]
    #[case(json!("nullable"), None)]
    #[case(json!([null]), None)]
    fn test_emptiness(#[case] value: Value, #[case] expected: Option<EmptyReason>) {
        assert_eq!(emptiness(&value), expected);
        assert_eq!(is_empty_value(&value), expected.is_some());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!(1)), "integer");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!({"a": 1})), "object");
    }

    #[test]
    fn test_string_form() {
        assert_eq!(string_form(&json!("abc")), "abc");
        assert_eq!(string_form(&json!(42)), "42");
        assert_eq!(string_form(&json!(null)), "null");
        assert_eq!(string_form(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_length_counts_chars() {
        assert_eq!(length_of(&json!("héllo")), Some(5));
        assert_eq!(length_of(&json!([1, 2, 3])), Some(3));
        assert_eq!(length_of(&json!({"a": 1})), Some(1));
        assert_eq!(length_of(&json!(12345)), None);
    }

    #[test]
    fn test_values_equal_numbers() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!("1"), &json!(1)));
        assert!(values_equal(&json!([1, {"a": 2}]), &json!([1.0, {"a": 2}])));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_numeric_parse() {
        assert_eq!(Numeric::parse(" 10 "), Some(Numeric::Int(10)));
        assert_eq!(Numeric::parse("-2.5"), Some(Numeric::Float(-2.5)));
        assert_eq!(Numeric::parse("1e3"), Some(Numeric::Float(1000.0)));
        assert_eq!(Numeric::parse("inf"), None);
        assert_eq!(Numeric::parse("NaN"), None);
        assert_eq!(Numeric::parse("abc"), None);
        assert_eq!(Numeric::parse(""), None);
    }

    #[test]
    fn test_numeric_ordering_mixed() {
        assert!(Numeric::Int(2) > Numeric::Float(1.5));
        assert!(Numeric::Float(10.0) == Numeric::Int(10));
        assert!(Numeric::Int(i128::from(u64::MAX)) > Numeric::Int(i128::from(i64::MAX)));
    }
}
