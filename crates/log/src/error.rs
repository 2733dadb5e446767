//! Logger errors

use thiserror::Error;

/// Result alias for logger setup.
pub type LogResult<T> = Result<T, LogError>;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The level string is not a valid `EnvFilter` directive.
    #[error("Invalid log filter {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

impl LogError {
    pub(crate) fn filter(directive: &str, reason: impl std::fmt::Display) -> Self {
        Self::Filter(format!("'{directive}': {reason}"))
    }
}
