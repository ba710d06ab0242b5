//! Logging initialization for binaries and tests built on the client.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! human-readable or a JSON formatting layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use redfish_client::tracing::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new()
//!     .with_default_filter("redfish_client=debug")
//!     .with_format(LogFormat::Json)
//!     .init()?;
//! ```
//!
//! Invariants:
//! - `RUST_LOG` always wins over the configured default filter.
//! - `init` fails instead of panicking when a global subscriber already exists.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the formatting layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Configuration for the global subscriber.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
    /// Emit ANSI colors (plain format only).
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Plain,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// The filter the subscriber will use.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.default_filter)
                .map_err(|e| LoggingError::InvalidFilter(e.to_string())),
        }
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// Returns an error if the default filter does not parse or a global
    /// subscriber is already installed.
    pub fn init(&self) -> Result<(), LoggingError> {
        let env_filter = self.env_filter()?;

        let result = match self.format {
            LogFormat::Plain => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_ansi(self.ansi))
                .try_init(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init(),
        };

        result.map_err(|e| LoggingError::InitError(e.to_string()))
    }
}

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    config.init()
}

/// Errors that can occur during logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("Failed to initialize logging: {0}")]
    InitError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = LoggingConfig::new()
            .with_default_filter("redfish_client=debug")
            .with_format(LogFormat::Json)
            .with_ansi(false);
        assert_eq!(config.default_filter, "redfish_client=debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.ansi);
    }

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = LoggingConfig::new().with_ansi(false);
        let _ = config.init();
        assert!(matches!(config.init(), Err(LoggingError::InitError(_))));
    }
}
