//! Retry helper for throttled HTTP requests.
//!
//! Retries HTTP 429 and 503 responses, waiting `Retry-After` seconds when the
//! service sends one and `2^attempt` seconds otherwise.
//!
//! # What this module does NOT handle:
//! - Mapping non-2xx statuses to errors (callers use `Response::error_for_status`)
//! - Session re-login on 401 (see `client::session`)
//!
//! # Invariants
//! - The body is fully read before returning; callers never touch `reqwest::Response`.
//! - Retry delays are capped at `MAX_BACKOFF`.

use std::time::{Duration, Instant};

use reqwest::RequestBuilder;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::{ErrorCategory, MetricsCollector};
use crate::transport::{Response, retry_after};

/// Longest single wait between attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Delay before retry number `attempt + 1`.
fn backoff(attempt: usize, suggested: Option<Duration>) -> Duration {
    suggested
        .unwrap_or_else(|| Duration::from_secs(2u64.saturating_pow(attempt as u32)))
        .min(MAX_BACKOFF)
}

/// Send `builder`, retrying throttled responses up to `max_retries` times.
///
/// `endpoint` and `method` label the recorded metrics.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every attempt was throttled.
/// Propagates `reqwest` errors as `ClientError::HttpError`.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    metrics: Option<&MetricsCollector>,
    endpoint: &str,
    method: &str,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, retry impossible");
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        if let Some(m) = metrics {
            m.record_request(endpoint, method);
            if attempt > 0 {
                m.record_retry(endpoint, method, attempt);
            }
        }

        let started = Instant::now();
        let response = match attempt_builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                if let Some(m) = metrics {
                    m.record_request_duration(endpoint, method, started.elapsed(), None);
                    m.record_client_error(endpoint, method, &err);
                }
                return Err(err);
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        if let Some(m) = metrics {
            m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
        }

        if ClientError::is_retryable_status(status) {
            if attempt < max_retries {
                let delay = backoff(attempt, retry_after(&headers));
                debug!(
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    status,
                    delay_secs = delay.as_secs(),
                    "Service throttled request, retrying"
                );
                tokio::time::sleep(delay).await;
                continue;
            }
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            let err = ClientError::MaxRetriesExceeded(max_retries + 1);
            if let Some(m) = metrics {
                m.record_client_error(endpoint, method, &err);
            }
            return Err(err);
        }

        let body = response.bytes().await?.to_vec();
        if attempt > 0 {
            debug!(attempt = attempt + 1, status, "Request succeeded after retry");
        }
        if status >= 400
            && let Some(m) = metrics
        {
            m.record_error(endpoint, method, ErrorCategory::from_status(status));
        }
        return Ok(Response::new(status, headers, body));
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}
