//! Connection configuration types for the Redfish client.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection, auth and codec options.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::types::auth::{AuthConfig, AuthStrategy};
use crate::types::options::ClientOptions;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for a Redfish service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the service, without the `/redfish/v1` suffix
    /// (e.g. `https://bmc.example.com`).
    pub base_url: String,
    /// Whether to skip TLS verification (BMCs commonly use self-signed certificates).
    #[serde(default)]
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds).
    #[serde(with = "duration_seconds", default = "default_timeout")]
    pub timeout: Duration,
    /// Maximum number of retries for throttled requests.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_max_retries() -> usize {
    DEFAULT_MAX_RETRIES
}

impl ConnectionConfig {
    /// Connection settings for `base_url` with every other value defaulted.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            skip_verify: false,
            timeout: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings; `None` talks to the service anonymously.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// Codec and update behavior.
    #[serde(default)]
    pub options: ClientOptions,
}

impl Config {
    /// Anonymous configuration for `base_url`.
    pub fn anonymous(base_url: impl Into<String>) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth: None,
            options: ClientOptions::default(),
        }
    }

    /// Configuration using HTTP basic authentication.
    pub fn with_basic_auth(
        base_url: impl Into<String>,
        username: String,
        password: SecretString,
    ) -> Self {
        Self::with_strategy(base_url, AuthStrategy::Basic { username, password })
    }

    /// Configuration using a Redfish login session.
    pub fn with_session(base_url: impl Into<String>, username: String, password: SecretString) -> Self {
        Self::with_strategy(base_url, AuthStrategy::Session { username, password })
    }

    /// Configuration using a pre-issued session token.
    pub fn with_token(base_url: impl Into<String>, token: SecretString) -> Self {
        Self::with_strategy(base_url, AuthStrategy::Token { token })
    }

    fn with_strategy(base_url: impl Into<String>, strategy: AuthStrategy) -> Self {
        Self {
            connection: ConnectionConfig::new(base_url),
            auth: Some(AuthConfig { strategy }),
            options: ClientOptions::default(),
        }
    }
}
