//! Logger configuration

mod presets;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logger configuration.
///
/// Deserializes from the `[log]` table of a pipeline config:
///
/// ```rust
/// use formulary_log::{Config, Format};
///
/// let config: Config = serde_json::from_str(r#"{ "level": "debug", "format": "json" }"#).unwrap();
/// assert_eq!(config.format, Format::Json);
/// assert!(config.display.time);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive string, e.g. `"info,formulary_hash=trace"`.
    pub level: String,
    pub format: Format,
    pub writer: WriterConfig,
    pub display: DisplayConfig,
    pub fields: Fields,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::default(),
            writer: WriterConfig::default(),
            display: DisplayConfig::default(),
            fields: Fields::default(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to [`Format::Compact`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// Where formatted events go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    #[default]
    Stderr,
    Stdout,
}

/// Per-event display options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub time: bool,
    pub target: bool,
    /// File and line of the call site.
    pub source: bool,
    pub colors: bool,
    /// Lift event fields to the top level of JSON output.
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            target: true,
            source: false,
            colors: false,
            flatten: false,
        }
    }
}

impl DisplayConfig {
    /// Applies `FORMULARY_LOG_*` display switches from `lookup`.
    pub(crate) fn apply_vars(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let flag = |name: &str| lookup(name).map(|v| matches!(v.trim(), "1" | "true" | "yes"));

        if let Some(time) = flag("FORMULARY_LOG_TIME") {
            self.time = time;
        }
        if let Some(source) = flag("FORMULARY_LOG_SOURCE") {
            self.source = source;
        }
        if let Some(colors) = flag("FORMULARY_LOG_COLORS") {
            self.colors = colors;
        }
    }
}

/// Global fields attached to every event through a root span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Fields {
    pub(crate) fn from_vars(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service: lookup("FORMULARY_SERVICE"),
            env: lookup("FORMULARY_ENV"),
            version: lookup("FORMULARY_VERSION"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.env.is_none() && self.version.is_none()
    }
}
