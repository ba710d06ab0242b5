//! Action dispatch for targets captured from the `Actions` envelope.
//!
//! Invariants:
//! - An empty target means the service did not declare the action; dispatch
//!   fails with `UnsupportedAction` before touching the transport.
//! - The resource's conditional headers accompany every action POST.

use serde_json::Value;
use tracing::debug;

use crate::entity::Entity;
use crate::error::{ClientError, Result};
use crate::task::TaskMonitorInfo;
use crate::transport::Response;

/// POST `body` to an action `target` on behalf of `entity`.
///
/// Returns the task monitor when the service accepted the action
/// asynchronously (`202 Accepted` with `Location`).
pub async fn post_action(
    entity: &Entity,
    action: &str,
    target: &str,
    body: &Value,
) -> Result<Option<TaskMonitorInfo>> {
    let response = post_action_response(entity, action, target, body).await?;
    Ok(TaskMonitorInfo::from_response(&response))
}

/// POST an action and return the service's response for actions that
/// answer with a document.
pub async fn post_action_response(
    entity: &Entity,
    action: &str,
    target: &str,
    body: &Value,
) -> Result<Response> {
    if target.is_empty() {
        return Err(ClientError::UnsupportedAction(action.to_string()));
    }

    let client = entity.client()?;
    debug!(uri = %target, action = %action, "Invoking Redfish action");

    client
        .post(target, body, &entity.headers())
        .await?
        .error_for_status(target)
}
