//! Property-based tests for assay-check.

use assay_check::literal::Literal;
use assay_check::prelude::*;
use proptest::prelude::*;
use serde_json::{Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-z0-9 ]{0,8}".prop_map(Value::from),
    ]
}

// ============================================================================
// PURITY: evaluate(d, r) == evaluate(d, r)
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_repeatable(value in scalar(), bound in any::<i32>()) {
        let data = json!({"v": value});
        let rules = vec![Rule::from("v"), Rule::from(format!("v == {bound}"))];
        let first = evaluate(&data, &rules);
        let second = evaluate(&data, &rules);
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// WILDCARD CARDINALITY: N elements, one validator call each
// ============================================================================

proptest! {
    #[test]
    fn wildcard_checks_every_element(values in prop::collection::vec(-100i64..100, 0..20)) {
        let data = json!({"items": values.iter().map(|v| json!({"n": v})).collect::<Vec<_>>()});
        let expected = values.iter().all(|v| *v > 0);
        prop_assert_eq!(check(&data, ["items.*.n > 0"]), Ok(expected));
        prop_assert_eq!(check(&data, [format!("items #= {}", values.len())]), Ok(true));
    }
}

// ============================================================================
// COERCION ORDER
// ============================================================================

proptest! {
    #[test]
    fn digit_strings_coerce_to_integers(n in any::<u32>()) {
        prop_assert_eq!(Literal::coerce(&n.to_string()), Literal::Int(i64::from(n)));
    }

    #[test]
    fn quoted_text_stays_a_string(s in "[a-zA-Z0-9 .]{0,12}") {
        prop_assert_eq!(Literal::coerce(&format!("'{s}'")), Literal::Str(s));
    }

    #[test]
    fn equality_never_coerces_but_ordering_does(n in 1u32..1_000_000) {
        let data = json!({"n": n.to_string()});
        prop_assert_eq!(check(&data, [format!("n == {n}")]), Ok(false));
        prop_assert_eq!(check(&data, [format!("n >= {n}")]), Ok(true));
    }
}

// ============================================================================
// CONDITIONALS: a false condition is vacuously true
// ============================================================================

proptest! {
    #[test]
    fn false_condition_is_vacuous(value in scalar(), threshold in any::<i32>()) {
        let data = json!({"flag": false, "v": value});
        let result = check_when(&data, "flag == true", format!("v > {threshold}"));
        prop_assert_eq!(result, Ok(true));
    }
}
