//! Tests for dotenv loading behavior.
//!
//! Responsibilities:
//! - Test that missing `.env` files are silently ignored.
//! - Test that invalid `.env` files return errors without leaking secrets.
//! - Test that `DOTENV_DISABLED=1` skips dotenv loading.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` and `serial` because they change the process cwd.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);

    temp_env::with_var("DOTENV_DISABLED", None::<&str>, || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
#[serial]
fn test_invalid_dotenv_does_not_leak_secret() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);
    fs::write(
        temp_dir.path().join(".env"),
        "REDFISH_PASSWORD=super-secret-value\nthis line is broken 'quote\n",
    )
    .unwrap();

    temp_env::with_vars(
        [("DOTENV_DISABLED", None::<&str>), ("REDFISH_PASSWORD", None)],
        || match ConfigLoader::new().load_dotenv() {
            Err(err @ ConfigError::DotenvParse { .. }) => {
                assert!(!err.to_string().contains("super-secret-value"));
            }
            Err(e) => panic!("expected DotenvParse, got {e:?}"),
            Ok(_) => panic!("expected DotenvParse, got Ok"),
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "not valid 'dotenv\n").unwrap();

    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}
