//! Errors raised while building or evaluating rules.
//!
//! A field that fails its rule is not an error; it is reported through
//! [`ValidationResult`](crate::ValidationResult). These errors mean the rule
//! itself is broken.

use std::borrow::Cow;
use thiserror::Error;

/// Result alias for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A predicate could not judge its input. Aborts the whole validation
    /// pass.
    #[error("Rule for field '{field}' could not be evaluated: {reason}")]
    Predicate {
        field: String,
        reason: Cow<'static, str>,
    },

    /// A `pattern` check was given a malformed regular expression.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A range check with `min > max`.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: f64, max: f64 },
}

impl RuleError {
    /// Creates a predicate failure. The field is filled in by the rule that
    /// ran the predicate.
    pub fn predicate(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Predicate {
            field: String::new(),
            reason: reason.into(),
        }
    }

    /// Attaches a field name to a predicate failure that has none.
    #[must_use]
    pub fn with_field(self, name: &str) -> Self {
        match self {
            Self::Predicate { field, reason } if field.is_empty() => Self::Predicate {
                field: name.to_owned(),
                reason,
            },
            other => other,
        }
    }
}
