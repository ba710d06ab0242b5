//! Validation tests for the configuration loader builder.
//!
//! Responsibilities:
//! - Test timeout configuration validation (zero, max boundary, valid values).
//! - Test max retries validation (zero allowed, max boundary).
//! - Test base URL validation.

use crate::constants::{MAX_MAX_RETRIES, MAX_TIMEOUT_SECS};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use std::time::Duration;

fn loader() -> ConfigLoader {
    ConfigLoader::new().with_base_url("https://bmc.example.com".to_string())
}

#[test]
fn test_timeout_zero_invalid() {
    let result = loader().with_timeout(Duration::from_secs(0)).build();
    match result {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(message.contains("must be greater than 0"), "got: {message}");
        }
        other => panic!("expected InvalidTimeout, got {other:?}"),
    }
}

#[test]
fn test_timeout_exceeds_max_invalid() {
    let result = loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS + 1))
        .build();
    match result {
        Err(ConfigError::InvalidTimeout { message }) => {
            assert!(message.contains("exceeds maximum"), "got: {message}");
        }
        other => panic!("expected InvalidTimeout, got {other:?}"),
    }
}

#[test]
fn test_timeout_at_max_valid() {
    let config = loader()
        .with_timeout(Duration::from_secs(MAX_TIMEOUT_SECS))
        .build()
        .unwrap();
    assert_eq!(config.connection.timeout.as_secs(), MAX_TIMEOUT_SECS);
}

#[test]
fn test_max_retries_zero_valid() {
    let config = loader().with_max_retries(0).build().unwrap();
    assert_eq!(config.connection.max_retries, 0);
}

#[test]
fn test_max_retries_exceeds_max_invalid() {
    let result = loader().with_max_retries(MAX_MAX_RETRIES + 1).build();
    assert!(matches!(result, Err(ConfigError::InvalidMaxRetries { .. })));
}

#[test]
fn test_invalid_base_url_scheme() {
    let result = ConfigLoader::new()
        .with_base_url("bmc.example.com".to_string())
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}
