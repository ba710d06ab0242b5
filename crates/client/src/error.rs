//! Error types for the Redfish client.
//!
//! Responsibilities:
//! - Define `ClientError`, the single error type returned by every operation.
//! - Parse Redfish error bodies (`{"error": {...}}`) into readable messages.
//!
//! Invariants:
//! - Error messages never contain credentials or session tokens.
//! - A missing link is never an error; accessors return `None` or an empty `Vec`.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Redfish client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx response from the service.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
        body: String,
    },

    /// Failure reported by a non-HTTP transport implementation.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// The document did not match the resource shape.
    #[error("Failed to decode {type_name}: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The resource document did not declare the requested action.
    #[error("Action {0} is not supported by this resource")]
    UnsupportedAction(String),

    /// `update()` found no changed writable fields.
    #[error("Update contained no changed writable fields")]
    NoOpUpdate,

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A task monitor did not complete in time.
    #[error("Task at {uri} did not complete within {waited:?}")]
    TaskTimeout { uri: String, waited: Duration },

    /// Invalid response format from the service.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A network operation was attempted on a resource with no bound transport.
    #[error("Resource {0} is not bound to a transport")]
    Unbound(String),

    /// A collection walk failed after decoding some members.
    #[error("Collection fetch failed after {fetched} members: {source}")]
    Collection {
        fetched: usize,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests
    /// - 503: Service Unavailable (BMC busy or restarting)
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 503)
    }

    /// Check if the service rejected a conditional update (ETag mismatch).
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ApiError { status: 412, .. })
    }

    /// Check if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed(_) | Self::ApiError { status: 401, .. }
        )
    }
}

/// A Redfish error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct RedfishError {
    pub error: RedfishErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedfishErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<crate::models::Message>,
}

impl RedfishError {
    /// Render the body for display: the top-level message followed by each
    /// extended message.
    pub fn display_message(&self) -> String {
        let mut parts = Vec::new();
        if !self.error.message.is_empty() {
            parts.push(self.error.message.clone());
        } else if !self.error.code.is_empty() {
            parts.push(self.error.code.clone());
        }
        parts.extend(
            self.error
                .extended_info
                .iter()
                .filter(|m| !m.message.is_empty())
                .map(|m| match &m.message_id {
                    Some(id) => format!("{id}: {}", m.message),
                    None => m.message.clone(),
                }),
        );
        parts.join("; ")
    }
}

/// Build the human-readable message for a failed response body.
///
/// Falls back to the raw body when it is not a Redfish error document.
pub fn error_message_from_body(body: &[u8]) -> String {
    match serde_json::from_slice::<RedfishError>(body) {
        Ok(parsed) => {
            let message = parsed.display_message();
            if message.is_empty() {
                String::from_utf8_lossy(body).into_owned()
            } else {
                message
            }
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "/redfish/v1/Chassis/1".to_string(),
            message: "failed".to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_is_conflict_only_for_412() {
        assert!(api_error(412).is_conflict());
        assert!(!api_error(409).is_conflict());
        assert!(!ClientError::NoOpUpdate.is_conflict());
    }

    #[test]
    fn test_is_not_found() {
        assert!(api_error(404).is_not_found());
        assert!(!api_error(400).is_not_found());
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(ClientError::is_retryable_status(429));
        assert!(ClientError::is_retryable_status(503));
        assert!(!ClientError::is_retryable_status(400));
        assert!(!ClientError::is_retryable_status(412));
        assert!(!ClientError::is_retryable_status(500));
        assert!(api_error(503).is_retryable());
        assert!(!ClientError::UnsupportedAction("#Circuit.PowerControl".into()).is_retryable());
    }

    #[test]
    fn test_redfish_error_body_message() {
        let body = br#"{
            "error": {
                "code": "Base.1.8.GeneralError",
                "message": "A general error has occurred.",
                "@Message.ExtendedInfo": [
                    {
                        "MessageId": "Base.1.8.PropertyValueNotInList",
                        "Message": "The value Sparkly for IndicatorLED is not in the list."
                    }
                ]
            }
        }"#;
        let message = error_message_from_body(body);
        assert_eq!(
            message,
            "A general error has occurred.; Base.1.8.PropertyValueNotInList: The value Sparkly for IndicatorLED is not in the list."
        );
    }

    #[test]
    fn test_non_redfish_body_is_returned_verbatim() {
        assert_eq!(error_message_from_body(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_collection_error_displays_count() {
        let err = ClientError::Collection {
            fetched: 2,
            source: Box::new(api_error(500)),
        };
        assert!(err.to_string().starts_with("Collection fetch failed after 2 members"));
    }
}
