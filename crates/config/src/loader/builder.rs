//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from a config file, environment variables, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Config file parsing (delegated to file.rs).
//!
//! Invariants / Assumptions:
//! - Sources are applied in call order; later sources overwrite earlier ones.
//!   The intended order is file, then env, then explicit builder overrides.
//! - A token wins over username/password when both are configured.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use secrecy::SecretString;
use std::path::Path;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::file::apply_file;
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use crate::types::{AuthConfig, AuthStrategy, ClientOptions, Config, ConnectionConfig};

/// Configuration loader that builds config from files, env and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    token: Option<SecretString>,
    basic_auth: Option<bool>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    follow_next_links: Option<bool>,
    loose: Option<bool>,
    noop_update_returns_success: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// Missing `.env` files are silently ignored. Set `DOTENV_DISABLED` to
    /// `true` or `1` to skip loading entirely.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from a JSON config file.
    pub fn from_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        apply_file(&mut self, path.as_ref())?;
        Ok(self)
    }

    /// Read configuration from `REDFISH_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set a pre-issued session token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Use HTTP basic auth instead of a login session for username/password.
    pub fn with_basic_auth(mut self, basic: bool) -> Self {
        self.basic_auth = Some(basic);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Replace all codec options at once.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.follow_next_links = Some(options.follow_next_links);
        self.loose = Some(options.loose);
        self.noop_update_returns_success = Some(options.noop_update_returns_success);
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .as_deref()
            .map(validate_and_normalize_base_url)
            .transpose()?
            .ok_or(ConfigError::MissingBaseUrl)?;

        let strategy = if let Some(token) = self.token {
            Some(AuthStrategy::Token { token })
        } else if let Some(username) = self.username {
            let password = self.password.ok_or(ConfigError::MissingPassword)?;
            if self.basic_auth.unwrap_or(false) {
                Some(AuthStrategy::Basic { username, password })
            } else {
                Some(AuthStrategy::Session { username, password })
            }
        } else {
            None
        };

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        };
        Self::validate_connection(&connection)?;

        let defaults = ClientOptions::default();
        let options = ClientOptions {
            follow_next_links: self.follow_next_links.unwrap_or(defaults.follow_next_links),
            loose: self.loose.unwrap_or(defaults.loose),
            noop_update_returns_success: self
                .noop_update_returns_success
                .unwrap_or(defaults.noop_update_returns_success),
        };

        Ok(Config {
            connection,
            auth: strategy.map(|strategy| AuthConfig { strategy }),
            options,
        })
    }

    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }
        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }
        Ok(())
    }

    // Internal setters for use by other loader modules

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_basic_auth(&mut self, basic: Option<bool>) {
        self.basic_auth = basic;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_follow_next_links(&mut self, follow: Option<bool>) {
        self.follow_next_links = follow;
    }

    pub(crate) fn set_loose(&mut self, loose: Option<bool>) {
        self.loose = loose;
    }

    pub(crate) fn set_noop_update_returns_success(&mut self, noop: Option<bool>) {
        self.noop_update_returns_success = noop;
    }
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace; blank is treated as missing
/// - Parse as an absolute http(s) URL with a host
/// - Strip a trailing `/redfish/v1` so callers may paste the service root
/// - Strip trailing slashes
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingBaseUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!("must be an absolute http(s) URL with a host (e.g. https://bmc.example.com): {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required (e.g. https://bmc.example.com)".into(),
        });
    }

    let normalized = parsed.as_str().trim_end_matches('/');
    let normalized = normalized
        .strip_suffix("/redfish/v1")
        .unwrap_or(normalized)
        .trim_end_matches('/');

    Ok(normalized.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_service_root_and_slashes() {
        assert_eq!(
            validate_and_normalize_base_url("https://bmc.example.com/redfish/v1/").unwrap(),
            "https://bmc.example.com"
        );
        assert_eq!(
            validate_and_normalize_base_url("  https://10.0.0.5:8443/  ").unwrap(),
            "https://10.0.0.5:8443"
        );
    }

    #[test]
    fn test_normalize_rejects_non_http_scheme() {
        let err = validate_and_normalize_base_url("ftp://bmc.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_blank_base_url_is_missing() {
        let err = validate_and_normalize_base_url("   ").unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }
}
