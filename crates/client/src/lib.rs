//! Redfish client object model.
//!
//! This crate decodes Redfish resources into typed values, follows their
//! links and collections, invokes their actions, and writes back only the
//! writable properties that changed. [`HttpTransport`] talks to a live
//! service; any [`Transport`] implementation can stand in for it.

pub mod action;
mod auth;
pub mod client;
pub mod codec;
pub mod collection;
pub mod entity;
pub mod error;
pub mod metrics;
pub mod models;
pub mod odata;
mod serde_helpers;
pub mod task;
pub mod tracing;
pub mod transport;
pub mod update;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{AuthStrategy, SessionManager};
pub use client::HttpTransport;
pub use client::builder::HttpTransportBuilder;
pub use codec::{Resource, decode, decode_with};
pub use collection::PartialCollection;
pub use entity::Entity;
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use odata::{ActionTarget, Link, Links};
pub use task::{TaskMonitorInfo, TaskPoll};
pub use transport::{Response, SharedTransport, Transport};
pub use update::UpdateOutcome;

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;
