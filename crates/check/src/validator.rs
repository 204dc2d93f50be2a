//! Validator kinds and the `type_match` alias table

use crate::error::ConfigError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// VALIDATOR KIND
// ============================================================================

/// Every predicate a rule can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    NotEmpty,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
    ContainedBy,
    StartsWith,
    EndsWith,
    Regex,
    TypeMatch,
    CustomNumberCheck,
    InValues,
    NotInValues,
    LengthEq,
    LengthNe,
    LengthGt,
    LengthGe,
    LengthLt,
    LengthLe,
    LengthBetween,
    ConditionalCheck,
}

impl ValidatorKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::NotEmpty,
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Ge,
        Self::Lt,
        Self::Le,
        Self::Contains,
        Self::ContainedBy,
        Self::StartsWith,
        Self::EndsWith,
        Self::Regex,
        Self::TypeMatch,
        Self::CustomNumberCheck,
        Self::InValues,
        Self::NotInValues,
        Self::LengthEq,
        Self::LengthNe,
        Self::LengthGt,
        Self::LengthGe,
        Self::LengthLt,
        Self::LengthLe,
        Self::LengthBetween,
        Self::ConditionalCheck,
    ];

    /// The name used in structured rules.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotEmpty => "not_empty",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Contains => "contains",
            Self::ContainedBy => "contained_by",
            Self::StartsWith => "startswith",
            Self::EndsWith => "endswith",
            Self::Regex => "regex",
            Self::TypeMatch => "type_match",
            Self::CustomNumberCheck => "custom_number_check",
            Self::InValues => "in_values",
            Self::NotInValues => "not_in_values",
            Self::LengthEq => "length_eq",
            Self::LengthNe => "length_ne",
            Self::LengthGt => "length_gt",
            Self::LengthGe => "length_ge",
            Self::LengthLt => "length_lt",
            Self::LengthLe => "length_le",
            Self::LengthBetween => "length_between",
            Self::ConditionalCheck => "conditional_check",
        }
    }
}

impl FromStr for ValidatorKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownValidator {
                name: name.to_owned(),
            })
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TYPE NAMES
// ============================================================================

/// Type names understood by `type_match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Int,
    Float,
    Str,
    Bool,
    List,
    Dict,
    /// Known name with no JSON counterpart; never matches.
    Tuple,
    /// Known name with no JSON counterpart; never matches.
    Set,
    None,
}

impl TypeName {
    /// Returns true if `value` is of this type.
    ///
    /// Booleans are not integers, and integral floats such as `1.0` are floats.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Int => value.as_number().is_some_and(|n| !n.is_f64()),
            Self::Float => value.as_number().is_some_and(serde_json::Number::is_f64),
            Self::Str => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Dict => value.is_object(),
            Self::Tuple | Self::Set => false,
            Self::None => value.is_null(),
        }
    }

    /// Canonical alias.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::None => "none",
        }
    }
}

impl FromStr for TypeName {
    type Err = ConfigError;

    /// Case-insensitive lookup in the alias table.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "int" => Self::Int,
            "float" => Self::Float,
            "str" | "string" => Self::Str,
            "bool" | "boolean" => Self::Bool,
            "list" => Self::List,
            "dict" => Self::Dict,
            "tuple" => Self::Tuple,
            "set" => Self::Set,
            "none" | "null" | "nonetype" => Self::None,
            _ => {
                return Err(ConfigError::UnknownType {
                    name: name.to_owned(),
                });
            }
        };
        Ok(kind)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ValidatorKind::ALL {
            assert_eq!(kind.as_str().parse::<ValidatorKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_validator_is_config_error() {
        assert_eq!(
            "between".parse::<ValidatorKind>(),
            Err(ConfigError::UnknownValidator {
                name: "between".to_owned()
            })
        );
    }

    #[rstest]
    #[case("INT", TypeName::Int)]
    #[case("String", TypeName::Str)]
    #[case("boolean", TypeName::Bool)]
    #[case("NoneType", TypeName::None)]
    #[case("null", TypeName::None)]
    fn type_aliases(#[case] name: &str, #[case] expected: TypeName) {
        assert_eq!(name.parse::<TypeName>(), Ok(expected));
    }

    #[test]
    fn unknown_type_name_is_config_error() {
        assert!(matches!(
            "decimal".parse::<TypeName>(),
            Err(ConfigError::UnknownType { .. })
        ));
    }

    #[rstest]
    #[case(TypeName::Int, json!(3), true)]
    #[case(TypeName::Int, json!(3.0), false)]
    #[case(TypeName::Int, json!(true), false)]
    #[case(TypeName::Float, json!(3.5), true)]
    #[case(TypeName::Str, json!("x"), true)]
    #[case(TypeName::List, json!([]), true)]
    #[case(TypeName::Dict, json!({}), true)]
    #[case(TypeName::None, json!(null), true)]
    #[case(TypeName::Tuple, json!([1, 2]), false)]
    #[case(TypeName::Set, json!([1]), false)]
    fn type_matching(#[case] ty: TypeName, #[case] value: Value, #[case] expected: bool) {
        assert_eq!(ty.matches(&value), expected);
    }
}
