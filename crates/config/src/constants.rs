//! Centralized constants for the Redfish client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for throttled requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Task Monitor Defaults
// =============================================================================

/// Poll interval used when a task monitor does not send `Retry-After`.
pub const DEFAULT_TASK_POLL_INTERVAL_SECS: u64 = 10;

/// Default upper bound on how long `wait` keeps polling a task monitor.
pub const DEFAULT_TASK_MAX_WAIT_SECS: u64 = 1800;

// =============================================================================
// Redfish Well-Known Paths
// =============================================================================

/// Redfish service root.
pub const SERVICE_ROOT: &str = "/redfish/v1/";

/// Session collection used for session-based login.
pub const SESSIONS_PATH: &str = "/redfish/v1/SessionService/Sessions";

/// Header carrying the session token on every authenticated request.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
