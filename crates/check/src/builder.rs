//! Fluent rule builder
//!
//! [`Checker`] accumulates rules with chained calls and evaluates them once:
//!
//! ```
//! use assay_check::checker;
//! use serde_json::json;
//!
//! let user = json!({"name": "ada", "age": 36, "email": "ada@example.com", "tags": ["admin"]});
//!
//! let ok = checker(&user)
//!     .not_empty(["name", "email"])
//!     .between("age", 18, 120, true)
//!     .is_email("email")
//!     .length_greater_equal("tags", 1)
//!     .validate()
//!     .unwrap();
//! assert!(ok);
//! ```
//!
//! Expected values are stored as typed JSON in structured rules, so a string
//! such as `"10"` stays a string and is never re-parsed as a number.
//!
//! A `Checker` is built on one thread and evaluated once; it holds no shared
//! state.

use crate::engine::{EvaluationReport, evaluate, evaluate_report};
use crate::error::CheckResult;
use crate::rule::{Conditional, Rule, RuleList};
use crate::validator::{TypeName, ValidatorKind};
use serde_json::Value;

/// Email address shape used by [`Checker::is_email`].
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Mainland China mobile number shape used by [`Checker::is_phone`].
pub const PHONE_PATTERN: &str = r"^1[3-9]\d{9}$";

/// HTTP(S) URL shape used by [`Checker::is_url`].
pub const URL_PATTERN: &str = r"^https?://[^\s/$.?#].[^\s]*$";

/// Starts a [`Checker`] over `data`.
pub fn checker(data: &Value) -> Checker<'_> {
    Checker::new(data)
}

/// Chainable rule accumulator bound to one data value.
#[derive(Debug, Clone)]
pub struct Checker<'a> {
    data: &'a Value,
    rules: Vec<Rule>,
}

impl<'a> Checker<'a> {
    pub fn new(data: &'a Value) -> Self {
        Self {
            data,
            rules: Vec::new(),
        }
    }

    fn push(mut self, field: &str, validator: ValidatorKind, expect: impl Into<Value>) -> Self {
        self.rules.push(Rule::structured(field, validator, expect));
        self
    }

    // ========================================================================
    // GENERAL
    // ========================================================================

    /// Adds any rule as is.
    pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Requires `path` to be non-empty.
    pub fn field(self, path: &str) -> Self {
        self.push(path, ValidatorKind::NotEmpty, true)
    }

    /// Adds a textual rule `"<path> <expr>"`, e.g. `field_expr("price", "> 0")`.
    pub fn field_expr(self, path: &str, expr: &str) -> Self {
        self.rule(format!("{path} {}", expr.trim()))
    }

    /// Requires every path to be non-empty.
    pub fn not_empty<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self = self.field(path.as_ref());
        }
        self
    }

    // ========================================================================
    // COMPARISON
    // ========================================================================

    pub fn equals(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Eq, value)
    }

    pub fn not_equals(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Ne, value)
    }

    pub fn greater_than(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Gt, value)
    }

    pub fn greater_equal(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Ge, value)
    }

    pub fn less_than(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Lt, value)
    }

    pub fn less_equal(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Le, value)
    }

    /// Adds a lower and an upper bound: `ge`/`le` when inclusive, else `gt`/`lt`.
    pub fn between(
        self,
        path: &str,
        min: impl Into<Value>,
        max: impl Into<Value>,
        inclusive: bool,
    ) -> Self {
        if inclusive {
            self.greater_equal(path, min).less_equal(path, max)
        } else {
            self.greater_than(path, min).less_than(path, max)
        }
    }

    pub fn is_positive(self, path: &str) -> Self {
        self.greater_than(path, 0)
    }

    pub fn is_negative(self, path: &str) -> Self {
        self.less_than(path, 0)
    }

    pub fn is_non_negative(self, path: &str) -> Self {
        self.greater_equal(path, 0)
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    pub fn starts_with(self, path: &str, prefix: &str) -> Self {
        self.push(path, ValidatorKind::StartsWith, prefix)
    }

    pub fn ends_with(self, path: &str, suffix: &str) -> Self {
        self.push(path, ValidatorKind::EndsWith, suffix)
    }

    /// `value in <path>`: substring, element or key.
    pub fn contains(self, path: &str, value: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::Contains, value)
    }

    /// `<path> in container`.
    pub fn contained_by(self, path: &str, container: impl Into<Value>) -> Self {
        self.push(path, ValidatorKind::ContainedBy, container)
    }

    /// Matches `pattern` at the start of the value.
    pub fn matches_regex(self, path: &str, pattern: &str) -> Self {
        self.push(path, ValidatorKind::Regex, pattern)
    }

    pub fn is_email(self, path: &str) -> Self {
        self.matches_regex(path, EMAIL_PATTERN)
    }

    pub fn is_phone(self, path: &str) -> Self {
        self.matches_regex(path, PHONE_PATTERN)
    }

    pub fn is_url(self, path: &str) -> Self {
        self.matches_regex(path, URL_PATTERN)
    }

    // ========================================================================
    // TYPES
    // ========================================================================

    pub fn is_type(self, path: &str, ty: TypeName) -> Self {
        self.push(path, ValidatorKind::TypeMatch, ty.as_str())
    }

    pub fn is_string(self, path: &str) -> Self {
        self.is_type(path, TypeName::Str)
    }

    /// Integer or float.
    pub fn is_number(self, path: &str) -> Self {
        self.push(path, ValidatorKind::CustomNumberCheck, Value::Null)
    }

    pub fn is_integer(self, path: &str) -> Self {
        self.is_type(path, TypeName::Int)
    }

    pub fn is_float(self, path: &str) -> Self {
        self.is_type(path, TypeName::Float)
    }

    pub fn is_boolean(self, path: &str) -> Self {
        self.is_type(path, TypeName::Bool)
    }

    pub fn is_list(self, path: &str) -> Self {
        self.is_type(path, TypeName::List)
    }

    pub fn is_dict(self, path: &str) -> Self {
        self.is_type(path, TypeName::Dict)
    }

    pub fn is_none(self, path: &str) -> Self {
        self.is_type(path, TypeName::None)
    }

    // ========================================================================
    // MEMBERSHIP
    // ========================================================================

    pub fn in_values<I, V>(self, path: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(path, ValidatorKind::InValues, collect_values(values))
    }

    pub fn not_in_values<I, V>(self, path: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(path, ValidatorKind::NotInValues, collect_values(values))
    }

    // ========================================================================
    // LENGTH
    // ========================================================================

    pub fn length_equals(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthEq, length)
    }

    pub fn length_not_equals(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthNe, length)
    }

    pub fn length_greater_than(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthGt, length)
    }

    pub fn length_less_than(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthLt, length)
    }

    pub fn length_greater_equal(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthGe, length)
    }

    pub fn length_less_equal(self, path: &str, length: usize) -> Self {
        self.push(path, ValidatorKind::LengthLe, length)
    }

    /// Inclusive bounds use the single `length_between` validator; exclusive
    /// bounds add `length_gt` and `length_lt`.
    pub fn length_between(self, path: &str, min: usize, max: usize, inclusive: bool) -> Self {
        if inclusive {
            self.push(path, ValidatorKind::LengthBetween, vec![min, max])
        } else {
            self.length_greater_than(path, min).length_less_than(path, max)
        }
    }

    // ========================================================================
    // BATCH
    // ========================================================================

    pub fn all_fields_not_empty<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.not_empty(paths)
    }

    pub fn all_fields_positive<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self = self.is_positive(path.as_ref());
        }
        self
    }

    pub fn all_fields_type<I, S>(mut self, ty: TypeName, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self = self.is_type(path.as_ref(), ty);
        }
        self
    }

    // ========================================================================
    // CONDITIONAL
    // ========================================================================

    /// When `condition` holds on the whole data, every `then` rule must hold.
    pub fn when(self, condition: impl Into<Rule>, then: impl Into<RuleList>) -> Self {
        self.rule(Conditional::new(condition, then))
    }

    // ========================================================================
    // TERMINALS
    // ========================================================================

    /// Rules accumulated so far.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Evaluates the accumulated rules.
    pub fn validate(&self) -> CheckResult<bool> {
        evaluate(self.data, &self.rules)
    }

    /// Evaluates the accumulated rules and returns the tally.
    pub fn report(&self) -> CheckResult<EvaluationReport> {
        evaluate_report(self.data, &self.rules)
    }
}

fn collect_values<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Value::Array(values.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::StructuredRule;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn product() -> Value {
        json!({
            "id": 7,
            "name": "Desk",
            "price": 129.5,
            "stock": "12",
            "status": "active",
            "tags": ["office", "wood"],
            "homepage": "https://shop.example.com/desk",
            "contact": {"phone": "13812345678", "email": "sales@example.com"}
        })
    }

    #[test]
    fn accumulates_structured_rules_in_order() {
        let data = json!({});
        let rules = checker(&data)
            .field("a")
            .equals("b", "10")
            .length_between("c", 1, 3, true)
            .into_rules();

        assert_eq!(
            rules,
            vec![
                Rule::structured("a", ValidatorKind::NotEmpty, true),
                Rule::structured("b", ValidatorKind::Eq, "10"),
                Rule::structured("c", ValidatorKind::LengthBetween, json!([1, 3])),
            ]
        );
    }

    #[test]
    fn between_expands_to_two_rules() {
        let data = json!({});
        let inclusive = checker(&data).between("n", 1, 5, true);
        let exclusive = checker(&data).between("n", 1, 5, false);
        assert_eq!(
            inclusive.rules(),
            &[
                Rule::structured("n", ValidatorKind::Ge, 1),
                Rule::structured("n", ValidatorKind::Le, 5),
            ]
        );
        assert_eq!(
            exclusive.rules(),
            &[
                Rule::structured("n", ValidatorKind::Gt, 1),
                Rule::structured("n", ValidatorKind::Lt, 5),
            ]
        );
    }

    #[test]
    fn full_chain_passes() {
        let data = product();
        let result = checker(&data)
            .not_empty(["id", "name"])
            .is_positive("id")
            .is_integer("id")
            .is_float("price")
            .is_number("price")
            .is_string("name")
            .greater_than("stock", 10)
            .equals("status", "active")
            .in_values("status", ["active", "paused"])
            .not_in_values("status", ["deleted"])
            .starts_with("homepage", "https://")
            .ends_with("homepage", "/desk")
            .contains("tags", "wood")
            .contained_by("status", "inactive")
            .is_list("tags")
            .is_dict("contact")
            .length_equals("tags", 2)
            .length_between("name", 2, 10, false)
            .is_url("homepage")
            .is_email("contact.email")
            .is_phone("contact.phone")
            .when("status == 'active'", "stock > 0")
            .validate();
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn typed_expectations_are_not_coerced() {
        let data = json!({"code": 10});
        assert_eq!(checker(&data).equals("code", "10").validate(), Ok(false));
        assert_eq!(checker(&data).equals("code", 10).validate(), Ok(true));
    }

    #[test]
    fn report_counts_rules() {
        let data = product();
        let report = checker(&data)
            .is_negative("price")
            .is_non_negative("price")
            .is_boolean("name")
            .is_none("name")
            .report()
            .unwrap();
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 3);
        assert_eq!(report.failed_rules[0].index, 0);
    }

    #[test]
    fn batch_helpers() {
        let data = json!({"a": 1, "b": 2, "c": "x"});
        let rules = checker(&data)
            .all_fields_positive(["a", "b"])
            .all_fields_type(TypeName::Int, ["a", "b"])
            .all_fields_not_empty(["c"]);
        assert_eq!(rules.rules().len(), 5);
        assert_eq!(rules.validate(), Ok(true));
    }

    #[test]
    fn when_adds_conditional_rule() {
        let data = json!({"type": "vip", "discount": 0.1});
        let built = checker(&data).when("type == 'vip'", vec!["discount > 0", "discount < 1"]);
        let Rule::Structured(StructuredRule { field, validator, .. }) = &built.rules()[0] else {
            panic!("expected a structured rule");
        };
        assert_eq!(field.as_deref(), Some("conditional"));
        assert_eq!(validator.as_deref(), Some("conditional_check"));
        assert_eq!(built.validate(), Ok(true));
    }

    #[test]
    fn field_expr_and_raw_rule() {
        let data = json!({"price": "9.5", "n": 3});
        let result = checker(&data)
            .field_expr("price", "< 10")
            .rule("n #>= 0")
            .validate();
        assert!(result.unwrap_err().is_structural());

        let result = checker(&data).field_expr("price", " > 1 ").rule("n == 3").validate();
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn regex_patterns() {
        let data = json!({"ok": "a.b@example.io", "bad": "a@b", "phone": "12345678901"});
        assert_eq!(checker(&data).is_email("ok").validate(), Ok(true));
        assert_eq!(checker(&data).is_email("bad").validate(), Ok(false));
        assert_eq!(checker(&data).is_phone("phone").validate(), Ok(false));
    }
}
