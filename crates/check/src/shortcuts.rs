//! Convenience entry points
//!
//! Thin wrappers that build rule lists for common shapes of test assertions
//! and hand them to [`evaluate`]. They share its contract: `Ok(false)` for a
//! miss, `Err` for an escalation.

use crate::engine::evaluate;
use crate::error::{CheckResult, StructuralError, display_path};
use crate::path::{has_wildcard, resolve};
use crate::rule::{Conditional, Rule, RuleList};
use crate::value::type_name;
use serde_json::Value;

/// Evaluates any mix of textual and structured rules.
///
/// ```
/// use assay_check::check;
/// use serde_json::json;
///
/// let response = json!({"status_code": 200, "data": {"items": [{"id": 1}, {"id": 2}]}});
/// assert!(check(&response, ["status_code == 200", "data.items.*.id > 0"]).unwrap());
/// ```
pub fn check<I>(data: &Value, rules: I) -> CheckResult<bool>
where
    I: IntoIterator,
    I::Item: Into<Rule>,
{
    let rules: Vec<Rule> = rules.into_iter().map(Into::into).collect();
    evaluate(data, &rules)
}

/// Checks that every path resolves to non-empty values.
pub fn check_not_empty<I, S>(data: &Value, paths: I) -> CheckResult<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    check(data, paths.into_iter().map(|p| Rule::from(p.as_ref())))
}

/// When `condition` holds on `data`, every `then` rule must hold as well.
pub fn check_when(
    data: &Value,
    condition: impl Into<Rule>,
    then: impl Into<RuleList>,
) -> CheckResult<bool> {
    evaluate(data, &[Conditional::new(condition, then).into_rule()])
}

/// Checks fields of every element of a list.
///
/// Each field in `fields` must be non-empty in every element. Each
/// `(field, expression)` pair in `validators` becomes `"*.<field> <expression>"`.
/// Fields that already contain a `*` segment are used as given.
///
/// # Errors
///
/// [`StructuralError::TypeMismatch`] if `data` is not an array, plus any
/// escalation from [`evaluate`].
pub fn check_list<'f, F, V>(data: &Value, fields: F, validators: V) -> CheckResult<bool>
where
    F: IntoIterator<Item = &'f str>,
    V: IntoIterator<Item = (&'f str, &'f str)>,
{
    if !data.is_array() {
        return Err(StructuralError::TypeMismatch {
            path: display_path(""),
            expected: "array",
            found: type_name(data),
        }
        .into());
    }

    let mut rules: Vec<Rule> = fields.into_iter().map(|f| Rule::from(per_element(f))).collect();
    rules.extend(
        validators
            .into_iter()
            .map(|(field, expr)| Rule::from(format!("{} {}", per_element(field), expr.trim()))),
    );

    tracing::info!(
        items = data.as_array().map_or(0, Vec::len),
        rules = rules.len(),
        "checking list elements"
    );
    evaluate(data, &rules)
}

fn per_element(field: &str) -> String {
    if has_wildcard(field) {
        field.to_owned()
    } else {
        format!("*.{field}")
    }
}

/// Checks fields inside a list nested in each element of another list.
///
/// `list_path` must resolve to a non-empty array whose first element holds
/// `nested_field`. If that field is an array, each validation is applied as
/// `<list_path>.*.<nested_field>.*.<validation>`; if it is an object, as
/// `<list_path>.*.<nested_field>.<validation>`.
///
/// # Errors
///
/// [`StructuralError`] if `list_path` is missing or not a non-empty array, or
/// if the first element's `nested_field` is neither an array nor an object.
pub fn check_nested<I, S>(
    data: &Value,
    list_path: &str,
    nested_field: &str,
    validations: I,
) -> CheckResult<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = nested_prefix(data, list_path, nested_field)?;
    tracing::info!(path = %prefix, "checking nested list elements");

    let rules: Vec<Rule> = validations
        .into_iter()
        .map(|v| Rule::from(join(&prefix, v.as_ref().trim())))
        .collect();
    evaluate(data, &rules)
}

fn nested_prefix(data: &Value, list_path: &str, nested_field: &str) -> CheckResult<String> {
    let list = resolve(data, list_path)?
        .into_iter()
        .next()
        .map_or(&Value::Null, |r| r.value);

    if !list.as_array().is_some_and(|items| !items.is_empty()) {
        return Err(StructuralError::TypeMismatch {
            path: display_path(list_path),
            expected: "non-empty array",
            found: type_name(list),
        }
        .into());
    }

    let first_field = resolve(data, &join(&join(list_path, "0"), nested_field))?;
    let Some(nested) = first_field.first() else {
        return Ok(join(&join(list_path, "*"), nested_field));
    };

    match nested.value {
        Value::Array(_) => Ok(join(&join(&join(list_path, "*"), nested_field), "*")),
        Value::Object(_) => Ok(join(&join(list_path, "*"), nested_field)),
        other => Err(StructuralError::TypeMismatch {
            path: nested.path.clone(),
            expected: "array or object",
            found: type_name(other),
        }
        .into()),
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_owned()
    } else {
        format!("{path}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;
    use serde_json::json;

    const NO_VALIDATORS: [(&str, &str); 0] = [];

    fn products() -> Value {
        json!({
            "data": {
                "productList": [
                    {"id": 1, "name": "a", "purchasePlan": [{"id": 10, "amount": 100}]},
                    {"id": 2, "name": "b", "purchasePlan": [{"id": 11, "amount": 250}]}
                ]
            }
        })
    }

    #[test]
    fn check_accepts_mixed_rules() {
        let data = json!({"n": "10", "tags": ["x"]});
        let rules: Vec<Rule> = vec![
            "n > 5".into(),
            Rule::structured("tags", crate::ValidatorKind::LengthEq, 1),
        ];
        assert_eq!(check(&data, rules), Ok(true));
        assert_eq!(check(&data, ["n == 10"]), Ok(false));
    }

    #[test]
    fn check_not_empty_fails_on_blank() {
        let data = json!({"a": "x", "b": "  "});
        assert_eq!(check_not_empty(&data, ["a"]), Ok(true));
        assert_eq!(check_not_empty(&data, ["a", "b"]), Ok(false));
    }

    #[test]
    fn check_when_is_vacuous_when_condition_fails() {
        let data = json!({"status": "inactive", "price": 0});
        assert_eq!(check_when(&data, "status == 'active'", "price > 0"), Ok(true));
        let data = json!({"status": "active", "price": 0});
        assert_eq!(check_when(&data, "status == 'active'", "price > 0"), Ok(false));
    }

    #[test]
    fn check_list_prefixes_wildcard() {
        let data = json!([{"id": 1, "name": "a"}, {"id": 2, "name": ""}]);
        assert_eq!(check_list(&data, ["id"], [("id", "> 0")]), Ok(true));
        assert_eq!(check_list(&data, ["name"], NO_VALIDATORS), Ok(false));
        assert_eq!(check_list(&data, ["*.id"], NO_VALIDATORS), Ok(true));
    }

    #[test]
    fn check_list_requires_array() {
        let err = check_list(&json!({"id": 1}), ["id"], NO_VALIDATORS).unwrap_err();
        assert_eq!(
            err,
            CheckError::Structural(StructuralError::TypeMismatch {
                path: "<root>".to_owned(),
                expected: "array",
                found: "object"
            })
        );
    }

    #[test]
    fn check_nested_over_list_field() {
        let data = products();
        assert_eq!(
            check_nested(&data, "data.productList", "purchasePlan", ["id > 0", "amount >= 100"]),
            Ok(true)
        );
        assert_eq!(
            check_nested(&data, "data.productList", "purchasePlan", ["amount > 100"]),
            Ok(false)
        );
    }

    #[test]
    fn check_nested_over_object_field() {
        let data = json!({"items": [{"meta": {"sku": "x"}}, {"meta": {"sku": "y"}}]});
        assert_eq!(check_nested(&data, "items", "meta", ["sku"]), Ok(true));
    }

    #[test]
    fn check_nested_rejects_empty_list() {
        let data = json!({"items": []});
        let err = check_nested(&data, "items", "meta", ["sku"]).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Structural(StructuralError::TypeMismatch { found: "array", .. })
        ));
    }

    #[test]
    fn check_nested_rejects_scalar_field() {
        let data = json!({"items": [{"meta": 1}]});
        let err = check_nested(&data, "items", "meta", ["sku"]).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Structural(StructuralError::TypeMismatch { found: "integer", .. })
        ));
    }

    #[test]
    fn check_nested_missing_field_is_structural() {
        let data = json!({"items": [{"other": 1}]});
        let err = check_nested(&data, "items", "meta", ["sku"]).unwrap_err();
        assert_eq!(
            err,
            CheckError::Structural(StructuralError::MissingKey {
                path: "items[0].meta".to_owned()
            })
        );
    }
}
