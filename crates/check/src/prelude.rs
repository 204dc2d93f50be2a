//! Prelude module for convenient imports.
//!
//! `use assay_check::prelude::*;` brings in the entry points, the builder and
//! the rule and error types.

// ============================================================================
// ENTRY POINTS
// ============================================================================

pub use crate::engine::{EvaluationReport, evaluate, evaluate_report};
pub use crate::shortcuts::{check, check_list, check_nested, check_not_empty, check_when};

// ============================================================================
// BUILDER
// ============================================================================

pub use crate::builder::{Checker, checker};

// ============================================================================
// RULES AND ERRORS
// ============================================================================

pub use crate::error::{CheckError, CheckResult, ConfigError, StructuralError};
pub use crate::rule::{Conditional, Rule, RuleList, StructuredRule};
pub use crate::validator::{TypeName, ValidatorKind};
pub use crate::value::{EmptyReason, emptiness, is_empty_value};
