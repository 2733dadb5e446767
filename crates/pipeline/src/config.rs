//! Pipeline configuration.
//!
//! Read from TOML, then optionally overridden from the environment:
//!
//! ```toml
//! method = "POST"
//! endpoint = "/api/signup"
//! gap_policy = "reject"
//!
//! [graphql]
//! document = "mutation Signup($user: UserInput!) { signup(user: $user) { id } }"
//!
//! [[rules]]
//! field = "user.email"
//! check = "email"
//! message = "Enter a valid email"
//!
//! [log]
//! level = "debug"
//! ```

use crate::error::{PipelineError, PipelineResult};
use formulary_hash::{GapPolicy, MAX_ARRAY_LENGTH, MAX_PATH_SEGMENTS};
use formulary_validator::{RuleConfig, Validator};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_METHOD: &str = "POST";

/// Everything a [`FormPipeline`](crate::FormPipeline) needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Writes past the end of an array: pad with null or fail.
    pub gap_policy: GapPolicy,

    /// Upper bound on segments per key path.
    pub max_path_segments: usize,

    /// Upper bound on the length of any array in the nested payload.
    pub max_array_length: usize,

    /// Method key used when the form snapshot names none.
    pub method: String,

    /// Endpoint used when the form snapshot has no action.
    pub endpoint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<GraphQlConfig>,

    pub rules: Vec<RuleConfig>,

    pub log: formulary_log::Config,
}

/// GraphQL operation sent when the method key is `GRAPHQL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GraphQlConfig {
    pub document: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::default(),
            max_path_segments: MAX_PATH_SEGMENTS,
            max_array_length: MAX_ARRAY_LENGTH,
            method: DEFAULT_METHOD.to_owned(),
            endpoint: String::new(),
            graphql: None,
            rules: Vec::new(),
            log: formulary_log::Config::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded pipeline config");
        Ok(config)
    }

    /// Applies `FORMULARY_GAP_POLICY`, `FORMULARY_METHOD` and
    /// `FORMULARY_ENDPOINT` from the process environment.
    pub fn with_env_overrides(self) -> PipelineResult<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a
    /// custom variable lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> PipelineResult<Self> {
        if let Some(policy) = lookup("FORMULARY_GAP_POLICY") {
            self.gap_policy = match policy.trim().to_ascii_lowercase().as_str() {
                "fill" => GapPolicy::Fill,
                "reject" => GapPolicy::Reject,
                _ => return Err(PipelineError::invalid_setting("FORMULARY_GAP_POLICY", policy)),
            };
        }
        if let Some(method) = lookup("FORMULARY_METHOD") {
            self.method = method;
        }
        if let Some(endpoint) = lookup("FORMULARY_ENDPOINT") {
            self.endpoint = endpoint;
        }
        Ok(self)
    }

    /// Builds the validator from the declarative rules, in order.
    pub fn validator(&self) -> PipelineResult<Validator> {
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rules.into_iter().collect())
    }
}
