//! # assay-check
//!
//! Declarative assertions over nested JSON data.
//!
//! Rules are short expressions such as `"data.products.*.price >= 10.5"` or
//! structured records `{ "field", "validator", "expect" }`. Each rule resolves
//! a dotted path (with `*` wildcards) against the data and applies one
//! validator to every match.
//!
//! ## Quick Start
//!
//! ```rust
//! use assay_check::prelude::*;
//! use serde_json::json;
//!
//! let response = json!({
//!     "status_code": 200,
//!     "data": {"products": [{"id": 1, "price": 12.5}, {"id": 2, "price": "15"}]}
//! });
//!
//! assert!(check(&response, [
//!     "status_code == 200",
//!     "data.products.*.id > 0",
//!     "data.products.*.price >= 10.5",
//!     "data.products #= 2",
//! ]).unwrap());
//! ```
//!
//! ## Misses and escalations
//!
//! A rule that does not hold makes the verdict `false`. A rule that cannot be
//! applied at all (unknown validator, missing key, length of a number) is a
//! [`CheckError`] and aborts the evaluation:
//!
//! ```rust
//! use assay_check::{CheckError, check};
//! use serde_json::json;
//!
//! let data = json!({"price": -1});
//! assert_eq!(check(&data, ["price > 0"]), Ok(false));
//! assert!(matches!(check(&data, ["cost > 0"]), Err(CheckError::Structural(_))));
//! ```
//!
//! ## Operators
//!
//! | Operator | Validator | | Operator | Validator |
//! |---|---|---|---|---|
//! | `==` `!=` | `eq` `ne` | | `#=` `#!=` | `length_eq` `length_ne` |
//! | `>` `>=` | `gt` `ge` | | `#>` `#>=` | `length_gt` `length_ge` |
//! | `<` `<=` | `lt` `le` | | `#<` `#<=` | `length_lt` `length_le` |
//! | `~=` | `regex` | | `^=` `$=` | `startswith` `endswith` |
//! | `*=` | `contains` | | `=*` | `contained_by` |
//! | `@=` | `type_match` | | *(none)* | `not_empty` |

pub mod builder;
pub mod engine;
pub mod error;
mod executor;
pub mod literal;
pub mod path;
pub mod prelude;
pub mod rule;
pub mod shortcuts;
pub mod validator;
pub mod value;

pub use builder::{Checker, checker};
pub use engine::{EvaluationReport, FailedRule, MAX_CONDITIONAL_DEPTH, evaluate, evaluate_report};
pub use error::{CheckError, CheckResult, ConfigError, StructuralError};
pub use rule::{Conditional, Rule, RuleList, StructuredRule};
pub use shortcuts::{check, check_list, check_nested, check_not_empty, check_when};
pub use validator::{TypeName, ValidatorKind};
