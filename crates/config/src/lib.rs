//! Configuration management for the Redfish client.
//!
//! This crate provides types and loaders for Redfish connection settings,
//! authentication, and the behavioral options consumed by the resource codec
//! (pagination, vendor tolerance, no-op update handling).

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, ClientOptions, Config, ConnectionConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
