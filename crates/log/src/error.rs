//! Error types for logger setup

/// Logger setup failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The level filter could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    /// A global subscriber is already installed.
    #[error("failed to install logger: {0}")]
    Init(String),
}

/// Result alias for logger setup.
pub type LogResult<T> = Result<T, LogError>;
