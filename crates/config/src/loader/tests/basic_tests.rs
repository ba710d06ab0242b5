//! Basic tests for builder methods and auth strategy resolution.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::{AuthStrategy, ClientOptions};
use secrecy::ExposeSecret;
use std::time::Duration;

#[test]
fn test_anonymous_config_has_no_auth() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .build()
        .unwrap();

    assert!(config.auth.is_none());
    assert_eq!(config.connection.base_url, "https://bmc.example.com");
    assert_eq!(config.connection.timeout, Duration::from_secs(30));
    assert_eq!(config.connection.max_retries, 3);
    assert!(!config.connection.skip_verify);
    assert_eq!(config.options, ClientOptions::default());
}

#[test]
fn test_username_password_defaults_to_session() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_username("admin".to_string())
        .with_password("secret".to_string())
        .build()
        .unwrap();

    match config.auth.map(|a| a.strategy) {
        Some(AuthStrategy::Session { username, password }) => {
            assert_eq!(username, "admin");
            assert_eq!(password.expose_secret(), "secret");
        }
        other => panic!("expected session auth, got {other:?}"),
    }
}

#[test]
fn test_basic_auth_flag_selects_basic() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_username("admin".to_string())
        .with_password("secret".to_string())
        .with_basic_auth(true)
        .build()
        .unwrap();

    assert!(matches!(
        config.auth.map(|a| a.strategy),
        Some(AuthStrategy::Basic { .. })
    ));
}

#[test]
fn test_token_wins_over_credentials() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_username("admin".to_string())
        .with_password("secret".to_string())
        .with_token("abc123".to_string())
        .build()
        .unwrap();

    match config.auth.map(|a| a.strategy) {
        Some(AuthStrategy::Token { token }) => assert_eq!(token.expose_secret(), "abc123"),
        other => panic!("expected token auth, got {other:?}"),
    }
}

#[test]
fn test_username_without_password_is_error() {
    let result = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_username("admin".to_string())
        .build();

    assert!(matches!(result, Err(ConfigError::MissingPassword)));
}

#[test]
fn test_missing_base_url_is_error() {
    let result = ConfigLoader::new().with_token("abc".to_string()).build();
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl)));
}

#[test]
fn test_with_options_replaces_all_flags() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_options(ClientOptions {
            follow_next_links: false,
            loose: false,
            noop_update_returns_success: false,
        })
        .build()
        .unwrap();

    assert!(!config.options.loose);
    assert!(!config.options.follow_next_links);
    assert!(!config.options.noop_update_returns_success);
}

#[test]
fn test_with_options_strict_keeps_other_defaults() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com".to_string())
        .with_options(ClientOptions::strict())
        .build()
        .unwrap();

    assert_eq!(config.options, ClientOptions::strict());
    assert!(!config.options.loose);
    assert_eq!(
        config.options.follow_next_links,
        ClientOptions::default().follow_next_links
    );
}

#[test]
fn test_service_root_suffix_is_stripped() {
    let config = ConfigLoader::new()
        .with_base_url("https://bmc.example.com/redfish/v1/".to_string())
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://bmc.example.com");
}
