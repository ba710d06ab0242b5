//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `REDFISH_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Loading from config files (see file.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("REDFISH_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(username) = env_var_or_none("REDFISH_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("REDFISH_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none("REDFISH_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(basic) = parse_env::<bool>("REDFISH_BASIC_AUTH", "must be true or false")? {
        loader.set_basic_auth(Some(basic));
    }
    if let Some(skip) = parse_env::<bool>("REDFISH_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("REDFISH_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>("REDFISH_MAX_RETRIES", "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if let Some(follow) =
        parse_env::<bool>("REDFISH_FOLLOW_NEXT_LINKS", "must be true or false")?
    {
        loader.set_follow_next_links(Some(follow));
    }
    if let Some(loose) = parse_env::<bool>("REDFISH_LOOSE", "must be true or false")? {
        loader.set_loose(Some(loose));
    }
    if let Some(noop) = parse_env::<bool>(
        "REDFISH_NOOP_UPDATE_RETURNS_SUCCESS",
        "must be true or false",
    )? {
        loader.set_noop_update_returns_success(Some(noop));
    }

    Ok(())
}
