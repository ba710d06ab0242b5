//! Tests for JSON config file loading.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::AuthStrategy;
use secrecy::ExposeSecret;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_file_sets_connection_and_auth() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("redfish.json");
    fs::write(
        &path,
        r#"{
            "base_url": "https://bmc.lab.local/",
            "token": "file-token",
            "skip_verify": true,
            "timeout_seconds": 12,
            "follow_next_links": false
        }"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .from_file(&path)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "https://bmc.lab.local");
    assert!(config.connection.skip_verify);
    assert_eq!(config.connection.timeout.as_secs(), 12);
    assert!(!config.options.follow_next_links);
    assert!(config.options.loose);
    match config.auth.map(|a| a.strategy) {
        Some(AuthStrategy::Token { token }) => assert_eq!(token.expose_secret(), "file-token"),
        other => panic!("expected token auth, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let result = ConfigLoader::new().from_file(&path);
    match result {
        Err(ConfigError::ConfigFileRead { path: p }) => assert_eq!(p, path),
        Err(e) => panic!("expected ConfigFileRead, got {e:?}"),
        Ok(_) => panic!("expected ConfigFileRead, got Ok"),
    }
}

#[test]
fn test_parse_error_does_not_echo_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"password": "hunter2", "timeout_seconds": "soon"}"#).unwrap();

    let err = match ConfigLoader::new().from_file(&path) {
        Err(e) => e,
        Ok(_) => panic!("expected parse error"),
    };
    let message = err.to_string();

    assert!(matches!(err, ConfigError::ConfigFileParse { .. }));
    assert!(message.contains("line 1"));
    assert!(!message.contains("hunter2"));
    assert!(!message.contains("soon"));
}

#[test]
fn test_unknown_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("typo.json");
    fs::write(&path, r#"{"base_uri": "https://bmc.example.com"}"#).unwrap();

    assert!(matches!(
        ConfigLoader::new().from_file(&path),
        Err(ConfigError::ConfigFileParse { .. })
    ));
}
