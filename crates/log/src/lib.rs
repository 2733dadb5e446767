//! # formulary-log
//!
//! Installs a `tracing` subscriber for formulary binaries and tests: an
//! `EnvFilter` plus one `fmt` layer in compact, pretty or JSON form.
//!
//! ```rust,no_run
//! use formulary_log::{Config, LoggerBuilder};
//!
//! let _guard = LoggerBuilder::from_config(Config::from_env()).build()?;
//! tracing::info!("ready");
//! # Ok::<(), formulary_log::LogError>(())
//! ```
//!
//! Library crates only emit events; they never install a subscriber.

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Fields, Format, WriterConfig};
pub use error::{LogError, LogResult};

/// Initialize from `FORMULARY_LOG` / `RUST_LOG` and friends.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initialize with an explicit configuration.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests, ignoring an already installed subscriber.
pub fn init_test() -> Option<LoggerGuard> {
    init_with(Config::test()).ok()
}
