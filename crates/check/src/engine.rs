//! Evaluation engine
//!
//! Runs a rule list against one data value. Each rule is parsed, its path
//! resolved, and its validator executed on every match; the first failing
//! match ends that rule. Conditional rules skip resolution and run on the
//! current scope directly.
//!
//! A validation miss is tallied and evaluation continues. A [`CheckError`]
//! aborts the whole run and is returned to the caller unchanged.

use crate::error::{CheckResult, ConfigError, display_path};
use crate::executor::{PreparedCheck, execute};
use crate::path::resolve;
use crate::rule::{Conditional, Rule};
use crate::validator::ValidatorKind;
use crate::value::{emptiness, string_form, type_name};
use serde_json::Value;

/// Maximum nesting of conditional rules inside one another.
pub const MAX_CONDITIONAL_DEPTH: usize = 32;

// ============================================================================
// REPORT
// ============================================================================

/// A rule that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRule {
    /// Zero-based position in the evaluated rule list.
    pub index: usize,
    /// The rule as written.
    pub rule: String,
}

/// Tally of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    pub passed: usize,
    pub failed: usize,
    pub failed_rules: Vec<FailedRule>,
}

impl EvaluationReport {
    /// Number of rules evaluated.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Returns true if no rule failed. An empty rule list succeeds.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Share of passed rules in percent; `100.0` for an empty rule list.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 100.0,
            total => self.passed as f64 / total as f64 * 100.0,
        }
    }

    fn record(&mut self, index: usize, rule: &Rule, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failed_rules.push(FailedRule {
                index,
                rule: rule.to_string(),
            });
        }
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Returns true if every rule holds on `data`.
///
/// # Errors
///
/// Returns [`CheckError`](crate::CheckError) if a rule is malformed or the
/// data does not have the shape a rule assumes. A rule that simply does not
/// hold is `Ok(false)`.
pub fn evaluate(data: &Value, rules: &[Rule]) -> CheckResult<bool> {
    evaluate_report(data, rules).map(|report| report.is_success())
}

/// Like [`evaluate`], but returns the full tally.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn evaluate_report(data: &Value, rules: &[Rule]) -> CheckResult<EvaluationReport> {
    let total = rules.len();
    tracing::info!(total, "starting evaluation");

    let mut report = EvaluationReport::default();
    for (index, rule) in rules.iter().enumerate() {
        tracing::debug!(index = index + 1, total, rule = %rule, "evaluating rule");

        let passed = check_rule(data, rule, 0).inspect_err(|e| {
            tracing::error!(index = index + 1, rule = %rule, error = %e, "rule escalated");
        })?;

        if passed {
            tracing::debug!(index = index + 1, rule = %rule, "rule passed");
        } else {
            tracing::warn!(index = index + 1, rule = %rule, "rule failed");
        }
        report.record(index, rule, passed);
    }

    tracing::info!(
        passed = report.passed,
        total,
        success_rate = report.success_rate(),
        "evaluation finished"
    );
    Ok(report)
}

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// Evaluates one rule against `scope`. `depth` counts enclosing conditionals.
pub(crate) fn check_rule(scope: &Value, rule: &Rule, depth: usize) -> CheckResult<bool> {
    if depth > MAX_CONDITIONAL_DEPTH {
        return Err(ConfigError::DepthExceeded {
            limit: MAX_CONDITIONAL_DEPTH,
        }
        .into());
    }

    let parsed = rule.parse()?;
    tracing::debug!(
        field = %parsed.field,
        validator = %parsed.validator,
        expect = %parsed.expect,
        "parsed rule"
    );

    if parsed.validator == ValidatorKind::ConditionalCheck {
        return execute(parsed.validator, scope, &parsed.expect, "", depth);
    }

    let matches = resolve(scope, &parsed.field)?;
    tracing::debug!(path = %parsed.field, matches = matches.len(), "resolved path");

    let prepared = PreparedCheck::new(parsed.validator, &parsed.expect);
    for matched in &matches {
        let passed = prepared.run(matched.value, &matched.path, depth)?;

        if passed {
            tracing::debug!(
                path = %display_path(&matched.path),
                value = %string_form(matched.value),
                validator = %parsed.validator,
                "match passed"
            );
        } else {
            let reason = emptiness(matched.value).map(|r| r.to_string());
            tracing::warn!(
                path = %display_path(&matched.path),
                value = %string_form(matched.value),
                value_type = type_name(matched.value),
                validator = %parsed.validator,
                expect = %parsed.expect,
                empty = reason.as_deref(),
                "match failed"
            );
            return Ok(false);
        }
    }

    Ok(true)
}

/// Runs a conditional on `scope`: vacuously true unless the condition holds,
/// then every `then` rule must hold.
///
/// All `then` rules are evaluated so each miss is logged.
pub(crate) fn check_conditional(
    scope: &Value,
    conditional: &Conditional,
    depth: usize,
) -> CheckResult<bool> {
    if !check_rule(scope, &conditional.condition, depth + 1)? {
        tracing::debug!(condition = %conditional.condition, "condition not met, skipping");
        return Ok(true);
    }

    let mut all_passed = true;
    for rule in conditional.then.as_slice() {
        if !check_rule(scope, rule, depth + 1)? {
            tracing::warn!(condition = %conditional.condition, rule = %rule, "conditional rule failed");
            all_passed = false;
        }
    }
    Ok(all_passed)
}

// ============================================================================
// TESTS
// ============================================================================
