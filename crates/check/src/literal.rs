//! Expected-value literals of textual rules
//!
//! The right-hand side of `"price >= 10.5"` is coerced by an ordered series of
//! parse attempts. The order resolves ambiguous inputs and must not change:
//!
//! 1. surrounded by matching `'` or `"` quotes → string (quotes stripped; a
//!    lone quote is an empty string)
//! 2. ASCII digits only → integer
//! 3. contains `.` and parses as a float → float
//! 4. `true` / `false` (any case) → boolean
//! 5. `null` / `none` (any case) → null
//! 6. anything else → the bare string

use serde_json::{Number, Value};

/// A coerced expected value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    /// Digit-only literals too large for `i64`.
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    Str(String),
}

impl Literal {
    /// Coerces the raw right-hand side of a textual rule.
    pub fn coerce(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some(inner) = strip_quotes(raw) {
            return Self::Str(inner.to_owned());
        }

        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = raw.parse::<i64>() {
                return Self::Int(i);
            }
            if let Ok(u) = raw.parse::<u64>() {
                return Self::UInt(u);
            }
        }

        if raw.contains('.') {
            if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
                return Self::Float(f);
            }
        }

        if raw.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }

        if raw.eq_ignore_ascii_case("null") || raw.eq_ignore_ascii_case("none") {
            return Self::Null;
        }

        Self::Str(raw.to_owned())
    }
}

/// A lone quote character opens and closes an empty string.
fn strip_quotes(raw: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        let rest = raw.strip_prefix(q)?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_suffix(q)
        }
    })
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Int(i) => Value::from(i),
            Literal::UInt(u) => Value::from(u),
            Literal::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Null => Value::Null,
            Literal::Str(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("'active'", Literal::Str("active".into()))]
    #[case("\"10\"", Literal::Str("10".into()))]
    #[case("'mixed\"", Literal::Str("'mixed\"".into()))]
    #[case("200", Literal::Int(200))]
    #[case("007", Literal::Int(7))]
    #[case("18446744073709551615", Literal::UInt(u64::MAX))]
    #[case("10.5", Literal::Float(10.5))]
    #[case("-1.5", Literal::Float(-1.5))]
    #[case("1.2.3", Literal::Str("1.2.3".into()))]
    #[case("True", Literal::Bool(true))]
    #[case("FALSE", Literal::Bool(false))]
    #[case("null", Literal::Null)]
    #[case("None", Literal::Null)]
    #[case("-1", Literal::Str("-1".into()))]
    #[case("  hello  ", Literal::Str("hello".into()))]
    #[case("''", Literal::Str(String::new()))]
    #[case("'", Literal::Str(String::new()))]
    #[case("\"", Literal::Str(String::new()))]
    #[case("", Literal::Str(String::new()))]
    fn test_coerce(#[case] raw: &str, #[case] expected: Literal) {
        assert_eq!(Literal::coerce(raw), expected);
    }

    #[test]
    fn quoted_keywords_stay_strings() {
        assert_eq!(Literal::coerce("'true'"), Literal::Str("true".into()));
        assert_eq!(Literal::coerce("\"null\""), Literal::Str("null".into()));
    }

    #[test]
    fn converts_into_json() {
        assert_eq!(Value::from(Literal::Int(3)), serde_json::json!(3));
        assert_eq!(Value::from(Literal::Float(0.5)), serde_json::json!(0.5));
        assert_eq!(Value::from(Literal::Null), Value::Null);
    }
}
