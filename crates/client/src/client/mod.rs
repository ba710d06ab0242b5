//! HTTP transport for Redfish services.
//!
//! [`HttpTransport`] implements [`Transport`] over `reqwest`. It resolves
//! resource URIs against the service base URL, attaches credentials, retries
//! throttled requests and keeps a Redfish login session alive.
//!
//! # Submodules
//! - [`builder`]: Transport construction and configuration
//! - `request`: Retry loop for throttled requests (private module)
//! - `session`: Session login/logout helpers (private module)
//!
//! # What this module does NOT handle:
//! - Decoding resources (see [`crate::codec`])
//! - Status-to-error mapping for resource calls (callers use `Response::error_for_status`)
//!
//! # Invariants
//! - A 401 on a session-authenticated request logs in again and retries the
//!   request once; basic, token and anonymous auth never retry on 401.
//! - Session state sits behind a lock so the transport can be shared as
//!   `Arc<dyn Transport>`.

pub mod builder;
mod request;
mod session;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use redfish_config::ClientOptions;
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use url::Url;

use crate::auth::SessionManager;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::transport::{Response, SharedTransport, Transport};

pub use request::send_request_with_retry;

/// Redfish transport over HTTP(S).
///
/// ```rust,ignore
/// use redfish_client::{HttpTransport, AuthStrategy};
/// use secrecy::SecretString;
///
/// let transport = HttpTransport::builder()
///     .base_url("https://bmc.example.com".to_string())
///     .auth_strategy(AuthStrategy::Session {
///         username: "admin".to_string(),
///         password: SecretString::new("secret".to_string().into()),
///     })
///     .build()?
///     .shared();
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session_manager: RwLock<SessionManager>,
    /// Serializes logins so concurrent 401s create one session.
    pub(crate) login_lock: tokio::sync::Mutex<()>,
    pub(crate) max_retries: usize,
    pub(crate) options: ClientOptions,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl HttpTransport {
    /// Create a new transport builder.
    pub fn builder() -> builder::HttpTransportBuilder {
        builder::HttpTransportBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wrap in the handle resources keep.
    pub fn shared(self) -> SharedTransport {
        Arc::new(self)
    }

    /// Resolve `uri` against the base URL; absolute URLs pass through.
    pub fn resolve(&self, uri: &str) -> Result<String> {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return Ok(uri.to_string());
        }
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        base.join(uri)
            .map(String::from)
            .map_err(|e| ClientError::InvalidUrl(format!("{uri}: {e}")))
    }

    pub(crate) fn sessions(&self) -> RwLockReadGuard<'_, SessionManager> {
        self.session_manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn sessions_mut(&self) -> RwLockWriteGuard<'_, SessionManager> {
        self.session_manager
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Send one request with credentials and throttling retries.
    async fn send(
        &self,
        method: &Method,
        uri: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<Response> {
        let url = self.resolve(uri)?;
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(headers.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let builder = self.sessions().authorize(builder);

        send_request_with_retry(
            builder,
            self.max_retries,
            self.metrics.as_ref(),
            uri,
            method.as_str(),
        )
        .await
    }

    /// Send a request, logging in first when needed and once more after a 401.
    pub(crate) async fn execute(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<Response> {
        self.ensure_session().await?;
        let (token, session_auth) = {
            let sessions = self.sessions();
            (
                sessions.auth_token().map(str::to_string),
                sessions.is_session_auth(),
            )
        };

        tracing::debug!(method = %method, uri = %uri, "Sending Redfish request");
        let response = self.send(&method, uri, body, headers).await?;

        if response.status == 401 && session_auth {
            tracing::debug!(uri = %uri, "Session rejected, logging in again");
            self.relogin(token.as_deref()).await?;
            return self.send(&method, uri, body, headers).await;
        }
        Ok(response)
    }

    /// DELETE `uri`. Used for sessions; resources are never deleted by the core.
    pub async fn delete(&self, uri: &str) -> Result<Response> {
        self.execute(Method::DELETE, uri, None, &HeaderMap::new())
            .await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, uri: &str) -> Result<Response> {
        self.execute(Method::GET, uri, None, &HeaderMap::new()).await
    }

    async fn post(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response> {
        self.execute(Method::POST, uri, Some(body), headers).await
    }

    async fn patch(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response> {
        self.execute(Method::PATCH, uri, Some(body), headers).await
    }

    fn headers(&self) -> HeaderMap {
        self.sessions().headers()
    }

    fn options(&self) -> ClientOptions {
        self.options
    }

    fn record_decode_failure(&self, uri: &str, resource: &'static str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_decode_failure(uri, resource);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthStrategy;
    use secrecy::SecretString;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::builder()
            .base_url(base_url.to_string())
            .auth_strategy(AuthStrategy::Token {
                token: SecretString::new("test-token".to_string().into()),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_absolute_path() {
        let t = transport("https://bmc.example.com");
        assert_eq!(
            t.resolve("/redfish/v1/Chassis/1").unwrap(),
            "https://bmc.example.com/redfish/v1/Chassis/1"
        );
    }

    #[test]
    fn test_resolve_keeps_full_urls() {
        let t = transport("https://bmc.example.com");
        assert_eq!(
            t.resolve("https://other.example.com/redfish/v1").unwrap(),
            "https://other.example.com/redfish/v1"
        );
    }

    #[test]
    fn test_resolve_ignores_base_path() {
        let t = transport("https://bmc.example.com:8443/");
        assert_eq!(
            t.resolve("/redfish/v1/").unwrap(),
            "https://bmc.example.com:8443/redfish/v1/"
        );
    }

    #[test]
    fn test_token_header_exposed_through_transport() {
        let t = transport("https://bmc.example.com");
        let headers = Transport::headers(&t);
        assert_eq!(headers.get("X-Auth-Token").unwrap(), "test-token");
    }

    #[test]
    fn test_options_default_to_tolerant() {
        let t = transport("https://bmc.example.com");
        assert!(Transport::options(&t).loose);
    }
}
