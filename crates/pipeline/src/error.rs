//! Pipeline errors.
//!
//! Wraps every lower crate's error so callers handle one type. A form that
//! fails validation is not an error; see
//! [`Submission::Rejected`](crate::Submission::Rejected).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Hash(#[from] formulary_hash::HashError),

    #[error(transparent)]
    Rule(#[from] formulary_validator::RuleError),

    #[error(transparent)]
    Form(#[from] formulary_form::FormError),

    #[error(transparent)]
    Log(#[from] formulary_log::LogError),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// An environment override or config value outside its domain.
    #[error("Invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },

    /// No strategy is registered under the method key.
    #[error("No payload strategy registered for method '{0}'")]
    UnknownMethod(String),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_setting(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            value: value.into(),
        }
    }
}
