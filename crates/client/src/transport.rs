//! The transport boundary consumed by the resource codec.
//!
//! Responsibilities:
//! - Define the `Transport` trait: GET, POST and PATCH of JSON documents.
//! - Define `Response`, the status/headers/body triple every call returns.
//!
//! Does NOT handle:
//! - Authentication, retries, TLS (see `client::HttpTransport`).
//!
//! Invariants:
//! - Implementations must tolerate concurrent calls; one transport is shared
//!   by every resource it produced.
//! - Relative URIs are resolved against the service base URL; absolute URIs
//!   are used as-is.

use async_trait::async_trait;
use redfish_config::ClientOptions;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{ClientError, Result, error_message_from_body};

/// A completed HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A 200 response carrying `body`.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, HeaderMap::new(), body.into())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Turn a non-2xx response into `ClientError::ApiError`.
    pub fn error_for_status(self, uri: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ClientError::ApiError {
            status: self.status,
            url: uri.to_string(),
            message: error_message_from_body(&self.body),
            body: String::from_utf8_lossy(&self.body).into_owned(),
        })
    }
}

/// `Retry-After` as delta seconds. HTTP-date values are ignored.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// The HTTP operations the resource codec needs from a Redfish service.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, uri: &str) -> Result<Response>;

    async fn post(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response>;

    async fn patch(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response>;

    /// Headers the transport attaches to every request (session token etc.).
    fn headers(&self) -> HeaderMap;

    /// Codec behavior for resources produced through this transport.
    fn options(&self) -> ClientOptions {
        ClientOptions::default()
    }

    /// Called when a document fetched from `uri` failed to decode.
    fn record_decode_failure(&self, _uri: &str, _resource: &'static str) {}
}

/// Handle shared by every resource bound to a transport.
pub type SharedTransport = Arc<dyn Transport>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status_keeps_success() {
        let response = Response::ok(b"{}".to_vec());
        assert!(response.error_for_status("/redfish/v1").is_ok());
    }

    #[test]
    fn test_retry_after_seconds_only() {
        let mut headers = HeaderMap::new();
        headers.insert("Retry-After", "7".parse().unwrap());
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(
            "Retry-After",
            "Wed, 21 Oct 2026 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn test_error_for_status_carries_body() {
        let response = Response::new(412, HeaderMap::new(), b"precondition failed".to_vec());
        match response.error_for_status("/redfish/v1/Chassis/1") {
            Err(ClientError::ApiError {
                status, url, body, ..
            }) => {
                assert_eq!(status, 412);
                assert_eq!(url, "/redfish/v1/Chassis/1");
                assert_eq!(body, "precondition failed");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
