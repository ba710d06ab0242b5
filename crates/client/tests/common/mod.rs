//! Common test utilities for integration tests.
//!
//! Shared helpers and re-exports for the Redfish client tests. All
//! integration tests should use these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::sync::Arc;
use std::time::Duration;

#[allow(unused_imports)]
pub use redfish_client::testing::{RecordedCall, RecordingTransport, fixture_bytes, load_fixture};
#[allow(unused_imports)]
pub use redfish_client::{ClientError, Resource, Response, SharedTransport, Transport};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// A recording transport that serves each `(uri, fixture)` pair on GET.
#[allow(dead_code)]
pub fn serve_fixtures(pairs: &[(&str, &str)]) -> Arc<RecordingTransport> {
    let transport = pairs
        .iter()
        .fold(RecordingTransport::new(), |t, (uri, fixture)| {
            t.with_get(uri, fixture_bytes(fixture))
        });
    Arc::new(transport)
}

/// A recording transport that serves inline JSON documents on GET.
#[allow(dead_code)]
pub fn serve_json(pairs: &[(&str, serde_json::Value)]) -> Arc<RecordingTransport> {
    let transport = pairs
        .iter()
        .fold(RecordingTransport::new(), |t, (uri, body)| {
            t.with_get(uri, body.to_string())
        });
    Arc::new(transport)
}

/// Fetch a resource through `transport`, panicking on failure.
#[allow(dead_code)]
pub async fn fetch<R: Resource>(transport: &Arc<RecordingTransport>, uri: &str) -> R {
    R::get(&transport.shared(), uri)
        .await
        .unwrap_or_else(|e| panic!("GET {uri} failed: {e}"))
}

/// A `202 Accepted` response pointing at a task monitor.
#[allow(dead_code)]
pub fn accepted(monitor: &str, retry_after: Option<u64>) -> Response {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("Location", monitor.parse().unwrap());
    if let Some(secs) = retry_after {
        headers.insert("Retry-After", secs.to_string().parse().unwrap());
    }
    Response::new(202, headers, Vec::new())
}

/// Advance Tokio's paused clock and yield so sleepers can observe the change.
#[allow(dead_code)]
pub async fn advance_and_yield(duration: Duration) {
    tokio::time::advance(duration).await;
    tokio::task::yield_now().await;
}

/// Assert that a task has not completed after yielding to the scheduler.
#[allow(dead_code)]
pub async fn assert_pending<T>(handle: &tokio::task::JoinHandle<T>, context: &str) {
    tokio::task::yield_now().await;
    assert!(!handle.is_finished(), "Expected pending task: {}", context);
}
