//! JSON config file loading.
//!
//! Responsibilities:
//! - Read a flat JSON config file and apply the keys it sets to a ConfigLoader.
//!
//! Does NOT handle:
//! - Environment variables (see env.rs).
//! - Locating a default config path; callers pass the file explicitly.
//!
//! Invariants:
//! - Keys absent from the file leave the loader untouched.
//! - Parse errors report only the line and column, never file content.

use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// On-disk representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    basic_auth: Option<bool>,
    skip_verify: Option<bool>,
    timeout_seconds: Option<u64>,
    max_retries: Option<usize>,
    follow_next_links: Option<bool>,
    loose: Option<bool>,
    noop_update_returns_success: Option<bool>,
}

/// Apply the config file at `path` to the loader.
pub fn apply_file(loader: &mut ConfigLoader, path: &Path) -> Result<(), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
    })?;
    let file: FileConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
            path: path.to_path_buf(),
            message: format!("line {} column {}", e.line(), e.column()),
        })?;

    tracing::debug!(path = %path.display(), "Applying Redfish config file");

    if file.base_url.is_some() {
        loader.set_base_url(file.base_url);
    }
    if file.username.is_some() {
        loader.set_username(file.username);
    }
    if let Some(password) = file.password {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = file.token {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if file.basic_auth.is_some() {
        loader.set_basic_auth(file.basic_auth);
    }
    if file.skip_verify.is_some() {
        loader.set_skip_verify(file.skip_verify);
    }
    if let Some(secs) = file.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if file.max_retries.is_some() {
        loader.set_max_retries(file.max_retries);
    }
    if file.follow_next_links.is_some() {
        loader.set_follow_next_links(file.follow_next_links);
    }
    if file.loose.is_some() {
        loader.set_loose(file.loose);
    }
    if file.noop_update_returns_success.is_some() {
        loader.set_noop_update_returns_success(file.noop_update_returns_success);
    }

    Ok(())
}
