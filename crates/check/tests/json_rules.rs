//! Rule lists stored as JSON documents next to fixtures.

use assay_check::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const RULES: &str = r#"[
    "status_code == 200",
    "data.user.name",
    "data.user.email ~= '^[^@]+@'",
    { "field": "data.user.roles", "validator": "length_between", "expect": [1, 3] },
    { "field": "data.user.level", "validator": "in_values", "expect": ["gold", "silver"] },
    { "field": "data.user.id" },
    {
        "field": "conditional",
        "validator": "conditional_check",
        "expect": { "condition": "data.user.level == 'gold'", "then": "data.user.credit >= 1000" }
    }
]"#;

#[test]
fn loads_and_evaluates_rule_file() {
    let rules: Vec<Rule> = serde_json::from_str(RULES).unwrap();
    assert_eq!(rules.len(), 7);

    let data = json!({
        "status_code": 200,
        "data": {
            "user": {
                "id": 42,
                "name": "ada",
                "email": "ada@example.com",
                "roles": ["admin"],
                "level": "gold",
                "credit": "1500"
            }
        }
    });
    assert_eq!(evaluate(&data, &rules), Ok(true));

    let mut poor = data.clone();
    poor["data"]["user"]["credit"] = json!(10);
    let report = evaluate_report(&poor, &rules).unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.failed_rules[0].index, 6);
}

#[test]
fn builder_rules_serialize_to_the_same_shape() {
    let data = json!({});
    let rules = checker(&data)
        .equals("status", "ok")
        .length_greater_than("items", 0)
        .when("kind == 'a'", "a_field")
        .into_rules();

    let encoded = serde_json::to_value(&rules).unwrap();
    assert_eq!(
        encoded,
        json!([
            {"field": "status", "validator": "eq", "expect": "ok"},
            {"field": "items", "validator": "length_gt", "expect": 0},
            {
                "field": "conditional",
                "validator": "conditional_check",
                "expect": {"condition": "kind == 'a'", "then": "a_field"}
            }
        ])
    );

    let decoded: Vec<Rule> = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, rules);
}

#[test]
fn rule_display_is_readable() {
    let rules: Vec<Rule> = serde_json::from_str(RULES).unwrap();
    assert_eq!(rules[0].to_string(), "status_code == 200");
    assert_eq!(
        rules[5].to_string(),
        r#"{"field":"data.user.id"}"#
    );
}

#[test]
fn unknown_validator_in_file_escalates() {
    let rules: Vec<Rule> =
        serde_json::from_str(r#"[{"field": "a", "validator": "fuzzy"}]"#).unwrap();
    let err = evaluate(&json!({"a": 1}), &rules).unwrap_err();
    assert_eq!(
        err,
        CheckError::Config(ConfigError::UnknownValidator {
            name: "fuzzy".to_owned()
        })
    );
}
