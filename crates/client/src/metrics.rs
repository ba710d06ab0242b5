//! Metrics collection for Redfish requests.
//!
//! This module records, through the `metrics` facade:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//! - Resource decode failures
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install any `metrics` recorder)
//! - Alerting or threshold monitoring
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible and never disrupts a request
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "redfish_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "redfish_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "redfish_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "redfish_errors_total";

/// Metric name for decode failure counter.
pub const METRIC_DECODE_FAILURES: &str = "redfish_decode_failures_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection-level errors (refused, DNS, reset)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Retries exhausted on 429/503
    Throttled,
    /// Request or task timeout
    Timeout,
    /// Document did not match the resource shape
    Decode,
    /// Authentication or session failure
    Auth,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Throttled => "throttled",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Unknown => "unknown",
        }
    }

    /// Category of an error status code.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorCategory::Auth,
            400..=499 => ErrorCategory::Http4xx,
            500..=599 => ErrorCategory::Http5xx,
            _ => ErrorCategory::Unknown,
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::TaskTimeout { .. } => ErrorCategory::Timeout,
            ClientError::Transport(_) => ErrorCategory::Transport,
            ClientError::AuthFailed(_) => ErrorCategory::Auth,
            ClientError::MaxRetriesExceeded(_) => ErrorCategory::Throttled,
            ClientError::Decode { .. } => ErrorCategory::Decode,
            ClientError::ApiError { status, .. } => ErrorCategory::from_status(*status),
            ClientError::HttpError(e) => {
                if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_connect() {
                    ErrorCategory::Transport
                } else {
                    ErrorCategory::Unknown
                }
            }
            ClientError::Collection { source, .. } => ErrorCategory::from(source.as_ref()),
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Redfish requests.
///
/// A lightweight wrapper around the `metrics` crate macros that keeps
/// labels consistent across call sites.
///
/// ```rust,ignore
/// use redfish_client::metrics::MetricsCollector;
///
/// let collector = MetricsCollector::new();
/// collector.record_request_duration("/redfish/v1/Chassis", "GET", Duration::from_millis(150), Some(200));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of a request.
    ///
    /// `status` is `None` when the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based; the initial request is not a retry).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Categorize and record a `ClientError`.
    pub fn record_client_error(&self, endpoint: &str, method: &str, error: &ClientError) {
        self.record_error(endpoint, method, ErrorCategory::from(error));
    }

    /// Record a document that failed to decode as `resource`.
    pub fn record_decode_failure(&self, endpoint: &str, resource: &'static str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_DECODE_FAILURES,
            "endpoint" => endpoint.to_string(),
            "resource" => resource,
        )
        .increment(1);
    }
}
