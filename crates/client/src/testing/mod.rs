//! Testing utilities for Redfish client tests.
//!
//! Fixture loading plus [`RecordingTransport`], an in-memory [`Transport`]
//! that replays canned responses and records every call.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use redfish_client::testing::{RecordingTransport, fixture_bytes};
//!
//! let transport = Arc::new(
//!     RecordingTransport::new()
//!         .with_get("/redfish/v1/Chassis/1/Power", fixture_bytes("power/power.json")),
//! );
//! let power = Power::get(&transport.shared(), "/redfish/v1/Chassis/1/Power").await?;
//! assert_eq!(transport.calls().len(), 1);
//! ```
//!
//! # Invariants
//! - A queued response is consumed unless it is the last one for its
//!   method and URI; the last one repeats.
//! - Unregistered GETs answer 404 with a Redfish error body; unregistered
//!   POST and PATCH calls answer 204.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use redfish_config::ClientOptions;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::Result;
use crate::transport::{Response, SharedTransport, Transport};

fn fixture_path(fixture_path: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path)
}

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    serde_json::from_slice(&fixture_bytes(fixture_path)).expect("Invalid JSON in fixture")
}

/// Raw bytes of a fixture file, for tests that check byte-exact raw data.
///
/// # Panics
/// If the fixture file cannot be read.
pub fn fixture_bytes(path: &str) -> Vec<u8> {
    let full_path = fixture_path(path);
    std::fs::read(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub uri: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

/// In-memory transport that records calls and replays canned responses.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<(&'static str, String), VecDeque<Response>>>,
    options: ClientOptions,
    headers: HeaderMap,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec options reported to resources.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Headers reported by `Transport::headers`.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Queue a response for `method` on `uri`.
    pub fn with_response(self, method: &'static str, uri: &str, response: Response) -> Self {
        self.push(method, uri, response);
        self
    }

    /// Queue a 200 GET response carrying `body`.
    pub fn with_get(self, uri: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response("GET", uri, Response::ok(body))
    }

    /// Queue a response after construction (e.g. from inside a test).
    pub fn push(&self, method: &'static str, uri: &str, response: Response) {
        lock(&self.responses)
            .entry((method, uri.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Every call in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Calls made with `method`.
    pub fn calls_for(&self, method: &str) -> Vec<RecordedCall> {
        lock(&self.calls)
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.calls).last().cloned()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// The handle resources hold; the `Arc` stays available for assertions.
    pub fn shared(self: &Arc<Self>) -> SharedTransport {
        self.clone()
    }

    fn respond(
        &self,
        method: &'static str,
        uri: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Response {
        lock(&self.calls).push(RecordedCall {
            method,
            uri: uri.to_string(),
            body: body.cloned(),
            headers: headers.clone(),
        });

        let mut responses = lock(&self.responses);
        let queued = responses.get_mut(&(method, uri.to_string())).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });

        queued.unwrap_or_else(|| match method {
            "GET" => Response::new(
                404,
                HeaderMap::new(),
                br#"{"error":{"code":"Base.1.0.ResourceMissingAtURI","message":"The resource was not found."}}"#
                    .to_vec(),
            ),
            _ => Response::new(204, HeaderMap::new(), Vec::new()),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, uri: &str) -> Result<Response> {
        Ok(self.respond("GET", uri, None, &HeaderMap::new()))
    }

    async fn post(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response> {
        Ok(self.respond("POST", uri, Some(body), headers))
    }

    async fn patch(&self, uri: &str, body: &Value, headers: &HeaderMap) -> Result<Response> {
        Ok(self.respond("PATCH", uri, Some(body), headers))
    }

    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }

    fn options(&self) -> ClientOptions {
        self.options
    }
}
