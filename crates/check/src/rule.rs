//! Rules and the rule parser
//!
//! A rule is either a one-line expression such as `"data.items.*.price >= 10.5"`
//! (a bare path means "not empty") or a structured record
//! `{ "field", "validator", "expect" }`. Both deserialize from JSON:
//!
//! ```
//! use assay_check::Rule;
//!
//! let rules: Vec<Rule> = serde_json::from_str(r#"[
//!     "status == 'active'",
//!     { "field": "tags", "validator": "length_ge", "expect": 1 }
//! ]"#).unwrap();
//! assert_eq!(rules.len(), 2);
//! ```
//!
//! Parsing is done fresh on every evaluation; nothing is cached.

use crate::error::ConfigError;
use crate::literal::Literal;
use crate::validator::ValidatorKind;
use crate::value::type_name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Field name carried by conditional rules. The engine ignores it.
pub const CONDITIONAL_FIELD: &str = "conditional";

/// Operator table, scanned in order. The first operator found anywhere in
/// the rule text splits it.
///
/// Length operators come first so `#>=` is never split as `>=`, and `!=`
/// precedes `==` so `a != b` is never read as `a ! == b`.
pub const OPERATORS: &[(&str, ValidatorKind)] = &[
    ("#<=", ValidatorKind::LengthLe),
    ("#>=", ValidatorKind::LengthGe),
    ("#!=", ValidatorKind::LengthNe),
    ("#=", ValidatorKind::LengthEq),
    ("#<", ValidatorKind::LengthLt),
    ("#>", ValidatorKind::LengthGt),
    ("!=", ValidatorKind::Ne),
    ("==", ValidatorKind::Eq),
    ("<=", ValidatorKind::Le),
    (">=", ValidatorKind::Ge),
    ("<", ValidatorKind::Lt),
    (">", ValidatorKind::Gt),
    ("~=", ValidatorKind::Regex),
    ("^=", ValidatorKind::StartsWith),
    ("$=", ValidatorKind::EndsWith),
    ("*=", ValidatorKind::Contains),
    ("=*", ValidatorKind::ContainedBy),
    ("@=", ValidatorKind::TypeMatch),
];

// ============================================================================
// RULE
// ============================================================================

/// One validation instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    /// `"<path> <op> <expected>"` or a bare `"<path>"`.
    Text(String),
    /// `{ field, validator, expect }`.
    Structured(StructuredRule),
}

impl Rule {
    /// Creates a structured rule.
    pub fn structured(
        field: impl Into<String>,
        validator: ValidatorKind,
        expect: impl Into<Value>,
    ) -> Self {
        Self::Structured(StructuredRule::new(field, validator, expect))
    }

    /// Splits the rule into field path, validator and expected value.
    pub fn parse(&self) -> Result<ParsedRule<'_>, ConfigError> {
        match self {
            Self::Text(text) => Ok(parse_text(text)),
            Self::Structured(rule) => rule.parse(),
        }
    }

    /// JSON form of the rule, as it would be written in a rule file.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Structured(rule) => rule.to_value(),
        }
    }
}

impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Rule {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Rule {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<StructuredRule> for Rule {
    fn from(rule: StructuredRule) -> Self {
        Self::Structured(rule)
    }
}

impl From<Conditional> for Rule {
    fn from(conditional: Conditional) -> Self {
        conditional.into_rule()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(rule) => write!(f, "{}", rule.to_value()),
        }
    }
}

// ============================================================================
// STRUCTURED RULE
// ============================================================================

/// A rule given as a record rather than an expression.
///
/// `field` is required at evaluation time; `validator` defaults to
/// `not_empty` and `expect` to `null`. Only a JSON object decodes into a
/// structured rule; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct StructuredRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub expect: Value,
}

impl TryFrom<Map<String, Value>> for StructuredRule {
    type Error = String;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            field: take_string(&mut map, "field")?,
            validator: take_string(&mut map, "validator")?,
            expect: map.remove("expect").unwrap_or(Value::Null),
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(format!(
            "`{key}` must be a string, found {}",
            type_name(&other)
        )),
    }
}

impl StructuredRule {
    pub fn new(field: impl Into<String>, validator: ValidatorKind, expect: impl Into<Value>) -> Self {
        Self {
            field: Some(field.into()),
            validator: Some(validator.as_str().to_owned()),
            expect: expect.into(),
        }
    }

    fn parse(&self) -> Result<ParsedRule<'_>, ConfigError> {
        let field = match self.field.as_deref() {
            Some(field) if !field.is_empty() => field,
            _ => return Err(ConfigError::MissingField),
        };
        let validator = match self.validator.as_deref() {
            Some(name) => name.parse()?,
            None => ValidatorKind::NotEmpty,
        };
        Ok(ParsedRule {
            field: Cow::Borrowed(field),
            validator,
            expect: Cow::Borrowed(&self.expect),
        })
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(field) = &self.field {
            map.insert("field".to_owned(), Value::String(field.clone()));
        }
        if let Some(validator) = &self.validator {
            map.insert("validator".to_owned(), Value::String(validator.clone()));
        }
        if !self.expect.is_null() {
            map.insert("expect".to_owned(), self.expect.clone());
        }
        Value::Object(map)
    }
}

// ============================================================================
// CONDITIONAL
// ============================================================================

/// One rule or several, as accepted by the `then` branch of a conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleList {
    Many(Vec<Rule>),
    One(Rule),
}

impl RuleList {
    pub fn as_slice(&self) -> &[Rule] {
        match self {
            Self::One(rule) => std::slice::from_ref(rule),
            Self::Many(rules) => rules,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Self::One(rule) => rule.to_value(),
            Self::Many(rules) => Value::Array(rules.iter().map(Rule::to_value).collect()),
        }
    }
}

impl From<Rule> for RuleList {
    fn from(rule: Rule) -> Self {
        Self::One(rule)
    }
}

impl From<&str> for RuleList {
    fn from(text: &str) -> Self {
        Self::One(text.into())
    }
}

impl From<String> for RuleList {
    fn from(text: String) -> Self {
        Self::One(text.into())
    }
}

impl From<StructuredRule> for RuleList {
    fn from(rule: StructuredRule) -> Self {
        Self::One(rule.into())
    }
}

impl From<Vec<Rule>> for RuleList {
    fn from(rules: Vec<Rule>) -> Self {
        Self::Many(rules)
    }
}

impl From<Vec<&str>> for RuleList {
    fn from(rules: Vec<&str>) -> Self {
        Self::Many(rules.into_iter().map(Rule::from).collect())
    }
}

/// The expected value of a `conditional_check` rule.
///
/// When `condition` holds on the scope, every rule in `then` must hold too;
/// otherwise the conditional is vacuously satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: Rule,
    pub then: RuleList,
}

impl Conditional {
    pub fn new(condition: impl Into<Rule>, then: impl Into<RuleList>) -> Self {
        Self {
            condition: condition.into(),
            then: then.into(),
        }
    }

    /// Decodes the expected value of a `conditional_check` rule.
    pub fn from_expect(expect: &Value) -> Result<Self, ConfigError> {
        Self::deserialize(expect).map_err(|e| {
            ConfigError::invalid_expectation(
                ValidatorKind::ConditionalCheck.as_str(),
                format!("expects {{\"condition\": rule, \"then\": rule or [rule]}}: {e}"),
            )
        })
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("condition".to_owned(), self.condition.to_value());
        map.insert("then".to_owned(), self.then.to_value());
        Value::Object(map)
    }

    /// Wraps the conditional in a `conditional_check` rule.
    pub fn into_rule(self) -> Rule {
        Rule::structured(
            CONDITIONAL_FIELD,
            ValidatorKind::ConditionalCheck,
            self.to_value(),
        )
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// A rule split into its three parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRule<'r> {
    pub field: Cow<'r, str>,
    pub validator: ValidatorKind,
    pub expect: Cow<'r, Value>,
}

fn parse_text(text: &str) -> ParsedRule<'_> {
    for &(op, validator) in OPERATORS {
        if let Some((field, raw)) = text.split_once(op) {
            return ParsedRule {
                field: Cow::Borrowed(field.trim()),
                validator,
                expect: Cow::Owned(Literal::coerce(raw).into()),
            };
        }
    }

    ParsedRule {
        field: Cow::Borrowed(text.trim()),
        validator: ValidatorKind::NotEmpty,
        expect: Cow::Owned(Value::Bool(true)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
