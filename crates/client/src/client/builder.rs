//! Builder for constructing [`HttpTransport`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for transport configuration
//! - Validating and normalizing the base URL (trailing slashes removed)
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS verification)
//!
//! # What this module does NOT handle:
//! - Sending requests (handled by [`HttpTransport`] in `mod.rs`)
//! - Session login (handled in `session.rs`)
//!
//! # Invariants
//! - `base_url` is required and must parse as an absolute URL
//! - No auth strategy means anonymous access (the service root is public)
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use url::Url;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::HttpTransport;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use redfish_config::{
    ClientOptions, Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`HttpTransport`].
///
/// ```rust,ignore
/// use redfish_client::HttpTransport;
/// use redfish_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
/// let transport = HttpTransport::builder().from_config(&config).build()?;
/// ```
pub struct HttpTransportBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    options: ClientOptions,
    metrics: Option<MetricsCollector>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            options: ClientOptions::default(),
            metrics: None,
        }
    }
}

impl HttpTransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the service, e.g. `https://bmc.example.com`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy. Without one, requests are anonymous.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Disabling verification makes the connection vulnerable to
    /// man-in-the-middle attacks. Management controllers often ship
    /// self-signed certificates; prefer installing a trusted one.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for throttled (429/503) requests.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the codec options handed to every resource.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Record request metrics through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pre-configure the builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = config.auth.as_ref().map(|a| AuthStrategy::from(&a.strategy));
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.options = config.options;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://bmc:443/"` -> `"https://bmc:443"`
    /// - `"https://bmc//"` -> `"https://bmc"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not an absolute URL.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<HttpTransport> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert("OData-Version", HeaderValue::from_static("4.0"));

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(HttpTransport {
            http,
            base_url,
            session_manager: RwLock::new(SessionManager::new(self.auth_strategy)),
            login_lock: tokio::sync::Mutex::new(()),
            max_retries: self.max_retries,
            options: self.options,
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_missing_base_url() {
        let result = HttpTransport::builder().build();
        assert!(matches!(result.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let result = HttpTransport::builder()
            .base_url("bmc.example.com".to_string())
            .build();
        assert!(matches!(result.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_anonymous_transport_builds() {
        let transport = HttpTransport::builder()
            .base_url("https://bmc.example.com/".to_string())
            .build()
            .unwrap();
        assert_eq!(transport.base_url(), "https://bmc.example.com");
        assert!(!transport.is_session_auth());
    }

    #[test]
    fn test_skip_verify_with_http_url() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8000".to_string())
            .skip_verify(true)
            .build();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_from_config_with_session() {
        let config = Config::with_session(
            "https://bmc.example.com",
            "admin".to_string(),
            SecretString::new("pw".to_string().into()),
        );
        let transport = HttpTransport::builder().from_config(&config).build().unwrap();
        assert!(transport.is_session_auth());
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::anonymous("https://bmc.example.com");
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);
        config.connection.max_retries = 5;
        config.options = ClientOptions::strict();

        let builder = HttpTransport::builder().from_config(&config);

        assert_eq!(builder.base_url.as_deref(), Some("https://bmc.example.com"));
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 5);
        assert!(!builder.options.loose);
        assert!(builder.auth_strategy.is_none());
    }

    #[test]
    fn test_normalize_base_url_multiple_trailing_slashes() {
        assert_eq!(
            HttpTransportBuilder::normalize_base_url("https://bmc.example.com//".to_string()),
            "https://bmc.example.com"
        );
    }
}
