//! Task documents returned by task monitors and the task service.

use serde::{Deserialize, Serialize};

use crate::codec::impl_resource;
use crate::entity::Entity;
use crate::models::common::{Health, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskState {
    New,
    Starting,
    Running,
    Suspended,
    Interrupted,
    Pending,
    Stopping,
    Completed,
    Killed,
    Exception,
    Service,
    Cancelling,
    Cancelled,
    #[serde(other)]
    #[default]
    Unknown,
}

impl TaskState {
    /// Whether the task can no longer make progress.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Killed | Self::Exception | Self::Cancelled
        )
    }
}

/// The request that started a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(rename = "HttpHeaders", default)]
    pub http_headers: Vec<String>,
    #[serde(rename = "HttpOperation", default, skip_serializing_if = "Option::is_none")]
    pub http_operation: Option<String>,
    #[serde(rename = "JsonBody", default, skip_serializing_if = "Option::is_none")]
    pub json_body: Option<String>,
    #[serde(rename = "TargetUri", default, skip_serializing_if = "Option::is_none")]
    pub target_uri: Option<String>,
}

/// A long-running operation tracked by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_payload: Option<bool>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_monitor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_state: Option<TaskState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_status: Option<Health>,
}

impl_resource!(Task, "Task");
