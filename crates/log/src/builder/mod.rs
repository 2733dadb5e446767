//! Logger builder implementation

// External dependencies
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, writer::BoxMakeWriter},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

// Internal crates
use crate::config::{Config, DisplayConfig, Format, WriterConfig};
use crate::error::{LogError, LogResult};

type Filtered = Layered<EnvFilter, Registry>;
type FmtLayer = Box<dyn Layer<Filtered> + Send + Sync>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger's root span entered
///
/// Drop it at the end of `main`.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse the filter directive without installing anything.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] for malformed directives.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already set
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let fmt_layer = fmt_layer(self.config.format, &self.config.display, self.config.writer);

        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        let fields = &self.config.fields;
        let root_span = (!fields.is_empty()).then(|| {
            tracing::info_span!(
                "app",
                service = fields.service.as_deref().unwrap_or(""),
                env = fields.env.as_deref().unwrap_or(""),
                version = fields.version.as_deref().unwrap_or("")
            )
            .entered()
        });

        tracing::debug!(level = %self.config.level, format = %self.config.format, "logger initialized");
        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

fn make_writer(writer: WriterConfig) -> BoxMakeWriter {
    match writer {
        WriterConfig::Stderr => BoxMakeWriter::new(std::io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(std::io::stdout),
    }
}

/// One boxed `fmt` layer per format and time setting.
fn fmt_layer(format: Format, display: &DisplayConfig, writer: WriterConfig) -> FmtLayer {
    let base = fmt::layer()
        .with_ansi(display.colors)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source)
        .with_writer(make_writer(writer));

    match (format, display.time) {
        (Format::Pretty, true) => base.pretty().boxed(),
        (Format::Pretty, false) => base.pretty().without_time().boxed(),
        (Format::Compact, true) => base.compact().boxed(),
        (Format::Compact, false) => base.compact().without_time().boxed(),
        (Format::Json, true) => base.json().flatten_event(display.flatten).boxed(),
        (Format::Json, false) => base
            .json()
            .flatten_event(display.flatten)
            .without_time()
            .boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_filter_is_rejected() {
        let builder = LoggerBuilder::from_config(Config {
            level: "formulary=loud".to_owned(),
            ..Config::default()
        });
        assert!(matches!(builder.filter(), Err(LogError::Filter(_))));
    }

    #[test]
    fn directive_filters_parse() {
        let builder = LoggerBuilder::from_config(Config {
            level: "warn,formulary_hash=trace".to_owned(),
            ..Config::default()
        });
        assert!(builder.filter().is_ok());
    }

    #[test]
    fn every_format_builds_a_layer() {
        for format in [Format::Pretty, Format::Compact, Format::Json] {
            for time in [true, false] {
                let display = DisplayConfig {
                    time,
                    ..DisplayConfig::default()
                };
                let _layer = fmt_layer(format, &display, WriterConfig::Stdout);
            }
        }
    }
}
