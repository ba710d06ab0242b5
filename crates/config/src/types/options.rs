//! Behavioral switches for the resource codec and update engine.
//!
//! Invariants:
//! - Every switch defaults to the tolerant choice (`true`).
//! - The struct is `Copy`; transports hand out values, never references.

use serde::{Deserialize, Serialize};

/// Options that change how resources are decoded, paginated and updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Follow `Members@odata.nextLink` when walking collections.
    pub follow_next_links: bool,
    /// Accept the documented vendor deviations (numeric `MemberId`,
    /// stringified sensor floats, single object where an array is expected).
    pub loose: bool,
    /// When an update has nothing to send, report success instead of
    /// returning the no-op sentinel error.
    pub noop_update_returns_success: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            follow_next_links: true,
            loose: true,
            noop_update_returns_success: true,
        }
    }
}

impl ClientOptions {
    /// Options with every vendor tolerance switched off.
    pub fn strict() -> Self {
        Self {
            loose: false,
            ..Self::default()
        }
    }
}
