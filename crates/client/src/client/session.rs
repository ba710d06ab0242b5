//! Redfish session login and logout.
//!
//! # What this module does NOT handle:
//! - Token storage (handled by [`SessionManager`](crate::auth::SessionManager))
//! - Choosing the auth strategy (handled during construction in `builder.rs`)
//!
//! # Invariants
//! - Logins are serialized by `login_lock`; a task that waited for the lock
//!   re-checks the session before logging in again.
//! - Credentials are sent only in the login body, never logged.

use reqwest::header::LOCATION;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;

use redfish_config::constants::{AUTH_TOKEN_HEADER, SESSIONS_PATH};

use super::request::send_request_with_retry;
use crate::auth::AuthStrategy;
use crate::client::HttpTransport;
use crate::error::{ClientError, Result, error_message_from_body};

impl HttpTransport {
    /// Whether requests carry a session-based credential.
    pub fn is_session_auth(&self) -> bool {
        self.sessions().is_session_auth()
    }

    /// Create a session at `SessionService/Sessions` and store its token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] when the strategy is not session
    /// based, the service rejects the credentials, or the response carries no
    /// `X-Auth-Token`.
    pub async fn login(&self) -> Result<()> {
        let _guard = self.login_lock.lock().await;
        self.login_locked().await
    }

    /// Delete the current session on the service and forget it locally.
    ///
    /// Succeeds without a request when no session exists. A 404 means the
    /// service already expired the session and is not an error.
    pub async fn logout(&self) -> Result<()> {
        let _guard = self.login_lock.lock().await;
        let (location, headers) = {
            let sessions = self.sessions();
            (
                sessions.session_location().map(str::to_string),
                sessions.headers(),
            )
        };

        let Some(location) = location else {
            self.sessions_mut().clear_session();
            return Ok(());
        };

        let url = self.resolve(&location)?;
        let builder = self.http.delete(&url).headers(headers);
        let result = send_request_with_retry(
            builder,
            self.max_retries,
            self.metrics.as_ref(),
            &location,
            "DELETE",
        )
        .await;
        self.sessions_mut().clear_session();

        let response = result?;
        if response.status == 404 {
            debug!(session = %location, "Session already gone");
            return Ok(());
        }
        response.error_for_status(&location)?;
        debug!(session = %location, "Deleted Redfish session");
        Ok(())
    }

    /// Log in if session auth is configured and no session exists.
    pub(crate) async fn ensure_session(&self) -> Result<()> {
        let needs_login = self.sessions().needs_login();
        if !needs_login {
            return Ok(());
        }
        let _guard = self.login_lock.lock().await;
        let needs_login = self.sessions().needs_login();
        if !needs_login {
            return Ok(());
        }
        self.login_locked().await
    }

    /// Replace a session the service rejected.
    ///
    /// `stale` is the token the failed request carried; if another task has
    /// already replaced it, the new session is kept.
    pub(crate) async fn relogin(&self, stale: Option<&str>) -> Result<()> {
        let _guard = self.login_lock.lock().await;
        let current = self.sessions().auth_token().map(str::to_string);
        if current.as_deref() != stale && current.is_some() {
            return Ok(());
        }
        self.sessions_mut().clear_session();
        self.login_locked().await
    }

    async fn login_locked(&self) -> Result<()> {
        let credentials = match self.sessions().strategy() {
            Some(AuthStrategy::Session { username, password }) => {
                Some((username.clone(), password.clone()))
            }
            _ => None,
        };
        let (username, password) = credentials.ok_or_else(|| {
            ClientError::AuthFailed("Login requires the session auth strategy".to_string())
        })?;

        let url = self.resolve(SESSIONS_PATH)?;
        let body = json!({
            "UserName": username,
            "Password": password.expose_secret(),
        });
        let builder = self.http.post(&url).json(&body);
        let response = send_request_with_retry(
            builder,
            self.max_retries,
            self.metrics.as_ref(),
            SESSIONS_PATH,
            "POST",
        )
        .await?;

        if !response.is_success() {
            return Err(ClientError::AuthFailed(format!(
                "Session login rejected ({}): {}",
                response.status,
                error_message_from_body(&response.body)
            )));
        }

        let token = response
            .header(AUTH_TOKEN_HEADER)
            .ok_or_else(|| {
                ClientError::AuthFailed("Session response carried no X-Auth-Token".to_string())
            })?
            .to_string();
        let location = response.header(LOCATION.as_str()).map(str::to_string);

        debug!(username = %username, session = ?location, "Created Redfish session");
        self.sessions_mut().set_session(token, location);
        Ok(())
    }
}
