//! Authentication strategies and session state.
//!
//! Responsibilities:
//! - Hold the configured `AuthStrategy` and the current Redfish session.
//! - Apply credentials to outgoing requests (basic auth or `X-Auth-Token`).
//!
//! Does NOT handle:
//! - Creating or deleting sessions on the service (see `client::session`).
//!
//! Invariants:
//! - Secrets stay inside `SecretString`; `Debug` output never exposes them.
//! - Token and basic strategies never require a login.

use reqwest::RequestBuilder;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use redfish_config::constants::AUTH_TOKEN_HEADER;

/// Strategy for authenticating with a Redfish service.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// HTTP basic authentication on every request.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Username and password exchanged for a session token at
    /// `SessionService/Sessions`; the client manages the session.
    Session {
        username: String,
        password: SecretString,
    },
    /// A session token issued out of band.
    Token { token: SecretString },
}

impl From<&redfish_config::AuthStrategy> for AuthStrategy {
    fn from(strategy: &redfish_config::AuthStrategy) -> Self {
        use redfish_config::AuthStrategy as Config;
        match strategy {
            Config::Basic { username, password } => Self::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            Config::Session { username, password } => Self::Session {
                username: username.clone(),
                password: password.clone(),
            },
            Config::Token { token } => Self::Token {
                token: token.clone(),
            },
        }
    }
}

/// A live Redfish session.
#[derive(Debug, Clone)]
struct Session {
    token: SecretString,
    /// URI of the session resource, used to log out.
    location: Option<String>,
}

/// Tracks the credentials attached to every request.
#[derive(Debug, Default)]
pub struct SessionManager {
    strategy: Option<AuthStrategy>,
    session: Option<Session>,
}

impl SessionManager {
    /// Create a manager for `strategy`; `None` talks to the service anonymously.
    pub fn new(strategy: Option<AuthStrategy>) -> Self {
        Self {
            strategy,
            session: None,
        }
    }

    pub fn strategy(&self) -> Option<&AuthStrategy> {
        self.strategy.as_ref()
    }

    /// Whether this manager creates sessions on the service.
    pub fn is_session_auth(&self) -> bool {
        matches!(self.strategy, Some(AuthStrategy::Session { .. }))
    }

    /// Session auth without a live session.
    pub fn needs_login(&self) -> bool {
        self.is_session_auth() && self.session.is_none()
    }

    /// Store the token and session URI returned by a login.
    pub fn set_session(&mut self, token: String, location: Option<String>) {
        self.session = Some(Session {
            token: SecretString::new(token.into()),
            location,
        });
    }

    /// Forget the current session (forces the next request to log in again).
    pub fn clear_session(&mut self) -> Option<String> {
        self.session.take().and_then(|s| s.location)
    }

    /// URI of the current session resource.
    pub fn session_location(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.location.as_deref())
    }

    /// The token sent as `X-Auth-Token`, if any.
    pub fn auth_token(&self) -> Option<&str> {
        match &self.strategy {
            Some(AuthStrategy::Token { token }) => Some(token.expose_secret()),
            Some(AuthStrategy::Session { .. }) => {
                self.session.as_ref().map(|s| s.token.expose_secret())
            }
            _ => None,
        }
    }

    /// Token header for the current credentials.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.auth_token() {
            match HeaderValue::from_str(token) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTH_TOKEN_HEADER, value);
                }
                Err(_) => tracing::warn!("Session token is not a valid header value"),
            }
        }
        headers
    }

    /// Attach credentials to a request.
    pub fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.strategy {
            Some(AuthStrategy::Basic { username, password }) => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            Some(_) => builder.headers(self.headers()),
            None => builder,
        }
    }
}
