//! Task monitor polling tests.
//!
//! This module tests waiting on asynchronous operations with Tokio's paused
//! clock, so no test sleeps in real time.
//!
//! # Invariants
//! - `Retry-After` from the monitor overrides the default interval
//! - `wait` gives up before sleeping past its deadline

mod common;

use common::*;
use redfish_client::TaskMonitorInfo;
use std::time::Duration;

const MONITOR: &str = "/redfish/v1/TaskService/TaskMonitors/545";

fn running() -> Response {
    let mut response = accepted(MONITOR, Some(5));
    response.body = fixture_bytes("task/task_running.json");
    response
}

fn monitor() -> TaskMonitorInfo {
    TaskMonitorInfo::from_response(&accepted(MONITOR, None)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_wait_polls_until_complete() {
    let transport = std::sync::Arc::new(
        RecordingTransport::new()
            .with_response("GET", MONITOR, running())
            .with_response("GET", MONITOR, running())
            .with_get(MONITOR, br#"{"Status":"done"}"#.to_vec()),
    );
    let client = transport.shared();

    let handle = tokio::spawn(async move {
        monitor()
            .wait(&client, Duration::from_secs(30), Duration::from_secs(600))
            .await
    });

    assert_pending(&handle, "first poll reports running").await;
    advance_and_yield(Duration::from_secs(5)).await;
    assert_pending(&handle, "second poll reports running").await;
    advance_and_yield(Duration::from_secs(5)).await;

    let response = handle.await.unwrap().unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, br#"{"Status":"done"}"#);
    assert_eq!(transport.calls_for("GET").len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_wait_times_out_before_deadline() {
    let transport =
        std::sync::Arc::new(RecordingTransport::new().with_response("GET", MONITOR, running()));

    let err = monitor()
        .wait(&transport.shared(), Duration::from_secs(30), Duration::from_secs(12))
        .await
        .unwrap_err();

    match err {
        ClientError::TaskTimeout { uri, waited } => {
            assert_eq!(uri, MONITOR);
            assert!(waited <= Duration::from_secs(12));
        }
        other => panic!("expected TaskTimeout, got {other:?}"),
    }
    // Polls at t=0, 5 and 10; the next wait would pass the deadline.
    assert_eq!(transport.calls_for("GET").len(), 3);
}

#[tokio::test]
async fn test_failed_task_monitor_is_api_error() {
    let transport = std::sync::Arc::new(RecordingTransport::new().with_response(
        "GET",
        MONITOR,
        Response::new(
            500,
            Default::default(),
            br#"{"error":{"code":"Base.1.8.InternalError","message":"Task failed."}}"#.to_vec(),
        ),
    ));

    let err = monitor().poll(&transport.shared()).await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 500, .. }));
    assert!(err.to_string().contains("Task failed."));
}
