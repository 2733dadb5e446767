//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Fields, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// `FORMULARY_LOG` (falling back to `RUST_LOG`) sets the filter and
    /// `FORMULARY_LOG_FORMAT` the format.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    #[must_use]
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("FORMULARY_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("FORMULARY_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        config.display.apply_vars(&lookup);
        config.fields = Fields::from_vars(&lookup);

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (everything, no time or colors)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_owned(),
            format: Format::Compact,
            display: DisplayConfig {
                colors: false,
                time: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_is_default() {
        assert_eq!(Config::from_vars(vars(&[])), Config::default());
    }

    #[test]
    fn formulary_log_wins_over_rust_log() {
        let config = Config::from_vars(vars(&[("FORMULARY_LOG", "trace"), ("RUST_LOG", "warn")]));
        assert_eq!(config.level, "trace");

        let config = Config::from_vars(vars(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn format_and_display_switches() {
        let config = Config::from_vars(vars(&[
            ("FORMULARY_LOG_FORMAT", "JSON"),
            ("FORMULARY_LOG_TIME", "false"),
            ("FORMULARY_LOG_SOURCE", "1"),
            ("FORMULARY_SERVICE", "signup"),
        ]));
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.time);
        assert!(config.display.source);
        assert_eq!(config.fields.service.as_deref(), Some("signup"));
        assert!(!config.fields.is_empty());
    }

    #[test]
    fn unknown_format_is_compact() {
        let config = Config::from_vars(vars(&[("FORMULARY_LOG_FORMAT", "logfmt")]));
        assert_eq!(config.format, Format::Compact);
    }

    #[test]
    fn presets() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().level, "info");
        assert!(Config::production().display.flatten);
        assert!(!Config::test().display.time);
    }
}
