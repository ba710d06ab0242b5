//! Tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test builder methods and auth strategy resolution.
//! - Test config file loading and environment variable precedence.
//! - Test validation of timeouts, retries and base URLs.
//! - Test dotenv gating.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (tested in env.rs).
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod basic_tests;
pub mod dotenv_tests;
pub mod file_tests;
pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
