//! Task monitor handling for asynchronous operations.
//!
//! Responsibilities:
//! - Recognize `202 Accepted` + `Location` responses as task monitors.
//! - Poll a monitor once, or wait for completion with a bounded deadline.
//!
//! Does NOT handle:
//! - Deciding whether to wait; callers receive the monitor and choose.
//!
//! Invariants:
//! - `Retry-After` (delta seconds) overrides the caller's default interval.
//! - `wait` never sleeps past `max_wait`.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::codec::decode;
use crate::error::{ClientError, Result};
use crate::models::Task;
use crate::transport::{Response, SharedTransport, retry_after};

/// Handle to an operation the service is completing asynchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskMonitorInfo {
    /// URI to poll (from `Location`).
    pub task_monitor: String,
    /// Service-suggested polling interval.
    pub retry_after: Option<Duration>,
    /// The Task document, when the response body was one.
    pub task: Option<Task>,
}

/// Outcome of a single poll.
#[derive(Debug, Clone)]
pub enum TaskPoll {
    Running(TaskMonitorInfo),
    Completed(Response),
}

fn parse_retry_after(response: &Response) -> Option<Duration> {
    retry_after(&response.headers)
}

fn parse_task(body: &[u8]) -> Option<Task> {
    let doc: serde_json::Value = serde_json::from_slice(body).ok()?;
    let odata_type = doc.get("@odata.type")?.as_str()?;
    if !odata_type.contains("#Task.") {
        return None;
    }
    decode::<Task>(body).ok()
}

impl TaskMonitorInfo {
    /// Build a monitor from a `202 Accepted` response with a `Location` header.
    pub fn from_response(response: &Response) -> Option<Self> {
        if response.status != 202 {
            return None;
        }
        let location = response.header("Location")?;
        Some(Self {
            task_monitor: location.to_string(),
            retry_after: parse_retry_after(response),
            task: parse_task(&response.body),
        })
    }

    /// GET the monitor once.
    pub async fn poll(&self, client: &SharedTransport) -> Result<TaskPoll> {
        let response = client
            .get(&self.task_monitor)
            .await?
            .error_for_status(&self.task_monitor)?;

        if response.status == 202 {
            let task_monitor = response
                .header("Location")
                .unwrap_or(&self.task_monitor)
                .to_string();
            return Ok(TaskPoll::Running(Self {
                task_monitor,
                retry_after: parse_retry_after(&response),
                task: parse_task(&response.body),
            }));
        }
        Ok(TaskPoll::Completed(response))
    }

    /// Poll until the task completes or `max_wait` elapses.
    pub async fn wait(
        self,
        client: &SharedTransport,
        default_interval: Duration,
        max_wait: Duration,
    ) -> Result<Response> {
        let started = Instant::now();
        let uri = self.task_monitor.clone();
        let mut current = self;

        loop {
            match current.poll(client).await? {
                TaskPoll::Completed(response) => return Ok(response),
                TaskPoll::Running(info) => {
                    let delay = info.retry_after.unwrap_or(default_interval);
                    if started.elapsed() + delay > max_wait {
                        return Err(ClientError::TaskTimeout {
                            uri,
                            waited: started.elapsed(),
                        });
                    }
                    debug!(
                        uri = %info.task_monitor,
                        delay_secs = delay.as_secs(),
                        state = ?info.task.as_ref().and_then(|t| t.task_state.clone()),
                        "Task still running"
                    );
                    tokio::time::sleep(delay).await;
                    current = info;
                }
            }
        }
    }
}
