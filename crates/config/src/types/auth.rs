//! Authentication types for Redfish client configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (HTTP basic, Redfish session, pre-issued token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Session creation or deletion against the service (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization includes secrets for config file round-trips; secrecy is for runtime safety.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating with a Redfish service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// HTTP basic authentication on every request.
    #[serde(rename = "basic")]
    Basic {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// Redfish session login; the client posts to the session collection
    /// and sends the returned `X-Auth-Token` afterwards.
    #[serde(rename = "session")]
    Session {
        username: String,
        #[serde(with = "secret_string")]
        password: SecretString,
    },
    /// A session token issued out of band.
    #[serde(rename = "token")]
    Token {
        #[serde(with = "secret_string")]
        token: SecretString,
    },
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    #[serde(flatten)]
    pub strategy: AuthStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_session_strategy_round_trips_through_json() {
        let json = r#"{"type":"session","username":"root","password":"calvin"}"#;
        let auth: AuthConfig = serde_json::from_str(json).unwrap();
        match &auth.strategy {
            AuthStrategy::Session { username, password } => {
                assert_eq!(username, "root");
                assert_eq!(password.expose_secret(), "calvin");
            }
            other => panic!("unexpected strategy: {other:?}"),
        }
        let back = serde_json::to_value(&auth).unwrap();
        assert_eq!(back["type"], "session");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let auth = AuthStrategy::Token {
            token: SecretString::new("super-secret".to_string().into()),
        };
        let rendered = format!("{auth:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
