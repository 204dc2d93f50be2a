//! Error types for rule evaluation
//!
//! Evaluation distinguishes two outcomes that must never be conflated:
//!
//! - a **validation miss**: the data is well-shaped but a predicate does not
//!   hold. This is reported through the boolean verdict, never as an error.
//! - an **escalation**: the rule is malformed ([`ConfigError`]) or the data
//!   does not have the shape the rule assumes ([`StructuralError`]). Both
//!   abort the evaluation and surface as [`CheckError`].

// ============================================================================
// CHECK ERROR
// ============================================================================

/// Escalation returned by every evaluation entry point.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CheckError {
    /// The rule itself is malformed.
    #[error("invalid rule: {0}")]
    Config(#[from] ConfigError),

    /// The data does not have the shape the rule assumes.
    #[error("data structure mismatch: {0}")]
    Structural(#[from] StructuralError),
}

impl CheckError {
    /// Returns true if this is a configuration (malformed rule) error.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a structural (data shape) error.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

/// Result alias used across the crate.
pub type CheckResult<T> = Result<T, CheckError>;

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// A rule that cannot be executed as written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A structured rule without a `field`.
    #[error("structured rule must contain a non-empty 'field'")]
    MissingField,

    /// The validator name is not one of the supported validators.
    #[error("unsupported validator '{name}'")]
    UnknownValidator { name: String },

    /// `type_match` was given a type name outside the alias table.
    #[error("unsupported type name '{name}'")]
    UnknownType { name: String },

    /// `length_between` was not given a `[min, max]` pair.
    #[error("length_between expects a [min, max] pair of non-negative integers, got {found}")]
    InvalidBounds { found: String },

    /// The expected value has the wrong shape for the validator.
    #[error("validator '{validator}' {reason}")]
    InvalidExpectation {
        validator: &'static str,
        reason: String,
    },

    /// Conditional rules nested deeper than the supported limit.
    #[error("conditional rules nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

impl ConfigError {
    pub(crate) fn invalid_expectation(validator: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidExpectation {
            validator,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// STRUCTURAL ERROR
// ============================================================================

/// The data does not match the shape a path or validator requires.
///
/// Every variant carries the concrete path at which the mismatch was found,
/// e.g. `data.products[1].price`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StructuralError {
    /// A mapping does not contain the requested key.
    #[error("field does not exist: {path}")]
    MissingKey { path: String },

    /// A sequence index is outside `[0, len)`.
    #[error("index out of range: {path} (index {index}, length {len})")]
    IndexOutOfRange {
        path: String,
        index: String,
        len: usize,
    },

    /// A non-numeric segment was applied to a sequence.
    #[error("sequence index must be numeric, got '{segment}' at {path}")]
    InvalidIndex { path: String, segment: String },

    /// `*` was applied to something that is neither a sequence nor a mapping.
    #[error("wildcard '*' requires a sequence or mapping at {path}, found {found}")]
    WildcardOnScalar { path: String, found: &'static str },

    /// A key or index segment was applied to a scalar.
    #[error("cannot access '{segment}' on {found} at {path}")]
    NotTraversable {
        path: String,
        segment: String,
        found: &'static str,
    },

    /// A length operator was applied to a value without a length.
    #[error("value at {path} has no length (found {found})")]
    NoLength { path: String, found: &'static str },

    /// An ordering operator was applied to operands without an order.
    #[error("cannot order {left} against {right} at {path}")]
    Incomparable {
        path: String,
        left: &'static str,
        right: &'static str,
    },

    /// A membership operator was applied to a value that cannot contain others.
    #[error("validator '{validator}' cannot test membership in {found} at {path}")]
    NotContainer {
        path: String,
        validator: &'static str,
        found: &'static str,
    },

    /// A shortcut precondition on the data failed.
    #[error("expected {expected} at {path}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Renders an empty concrete path as `<root>` in diagnostics.
pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_owned()
    } else {
        path.to_owned()
    }
}

// ============================================================================
// TESTS
// ============================================================================
