//! Declarative rules.
//!
//! A [`RuleConfig`] names a field, one built-in check with its parameters,
//! and an optional message:
//!
//! ```toml
//! [[rules]]
//! field = "email"
//! check = "required"
//! message = "Email is required"
//!
//! [[rules]]
//! field = "age"
//! check = "in_range"
//! min = 18
//! max = 130
//! ```

use crate::checks;
use crate::error::RuleResult;
use crate::rule::{Check, FieldRule};
use serde::{Deserialize, Serialize};

/// One rule as read from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub field: String,

    #[serde(flatten)]
    pub check: CheckConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A built-in check and its parameters, tagged by `check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckConfig {
    Required,
    Truthy,
    MinLength { min: usize },
    MaxLength { max: usize },
    Pattern { pattern: String },
    Email,
    InRange { min: f64, max: f64 },
    SameAs { other: String },
    OneOf { values: Vec<String> },
}

impl CheckConfig {
    /// Builds the check.
    ///
    /// # Errors
    ///
    /// Malformed patterns and inverted ranges.
    pub fn to_check(&self) -> RuleResult<Check> {
        Ok(match self {
            Self::Required => checks::required(),
            Self::Truthy => checks::truthy(),
            Self::MinLength { min } => checks::min_length(*min),
            Self::MaxLength { max } => checks::max_length(*max),
            Self::Pattern { pattern } => checks::pattern(pattern)?,
            Self::Email => checks::email(),
            Self::InRange { min, max } => checks::in_range(*min, *max)?,
            Self::SameAs { other } => checks::same_as(other.as_str()),
            Self::OneOf { values } => checks::one_of(values.iter().cloned()),
        })
    }
}

impl RuleConfig {
    pub fn new(field: impl Into<String>, check: CheckConfig) -> Self {
        Self {
            field: field.into(),
            check,
            message: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builds the rule.
    ///
    /// # Errors
    ///
    /// See [`CheckConfig::to_check`].
    pub fn to_rule(&self) -> RuleResult<FieldRule> {
        let rule = FieldRule::with_check(self.field.as_str(), self.check.to_check()?);
        Ok(match &self.message {
            Some(message) => rule.with_message(message.as_str()),
            None => rule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use formulary_value::{FieldValue, ValueHash};

    #[test]
    fn builds_rule_with_message() {
        let rule = RuleConfig::new("name", CheckConfig::MinLength { min: 2 })
            .with_message("too short")
            .to_rule()
            .unwrap();

        assert_eq!(rule.field(), "name");
        assert_eq!(rule.code(), "min_length");
        assert_eq!(rule.message(), Some("too short"));
        assert!(
            rule.is_invalid(&FieldValue::from("a"), &ValueHash::new())
                .unwrap()
        );
    }

    #[test]
    fn bad_parameters_fail_to_build() {
        let pattern = RuleConfig::new(
            "zip",
            CheckConfig::Pattern {
                pattern: "[".into(),
            },
        );
        assert!(matches!(
            pattern.to_rule(),
            Err(RuleError::InvalidPattern { .. })
        ));

        let range = RuleConfig::new("n", CheckConfig::InRange { min: 5.0, max: 1.0 });
        assert!(matches!(range.to_rule(), Err(RuleError::InvalidRange { .. })));
    }

    #[test]
    fn deserializes_from_json() {
        let config: RuleConfig = serde_json::from_str(
            r#"{ "field": "plan", "check": "one_of", "values": ["free", "pro"] }"#,
        )
        .unwrap();
        assert_eq!(
            config.check,
            CheckConfig::OneOf {
                values: vec!["free".into(), "pro".into()],
            }
        );
        assert_eq!(config.message, None);
    }

    #[test]
    fn unknown_check_is_rejected() {
        let parsed: Result<RuleConfig, _> =
            serde_json::from_str(r#"{ "field": "a", "check": "telepathy" }"#);
        assert!(parsed.is_err());
    }
}
