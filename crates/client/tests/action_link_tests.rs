//! Action dispatch and link traversal tests.
//!
//! # Invariants
//! - Actions POST to the exact target the document declared
//! - An undeclared action fails before any request is sent
//! - Following a link performs a fresh GET every time
//! - Decoded resources keep the exact bytes they came from

mod common;

use common::*;
use redfish_client::TaskPoll;
use redfish_client::models::{
    Circuit, ComposeOutcome, ComposeRequest, ComposeRequestType, CompositionService,
    PoolType, PowerControlState, Sensor, TaskState,
};
use serde_json::json;

const BRANCH_A: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Branches/A";
const MAINS: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Mains/AC1";
const OUTLET_A1: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1";
const OUTLET_A2: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2";
const COMPOSITION: &str = "/redfish/v1/CompositionService";
const SENSOR: &str = "/redfish/v1/Chassis/1U/Sensors/AmbientTemp";

fn pdu_transport() -> std::sync::Arc<RecordingTransport> {
    serve_fixtures(&[
        (BRANCH_A, "circuit/circuit.json"),
        (MAINS, "circuit/circuit_no_actions.json"),
        (OUTLET_A1, "circuit/outlet_a1.json"),
        (OUTLET_A2, "circuit/outlet_a2.json"),
    ])
}

#[tokio::test]
async fn test_circuit_power_control_posts_to_declared_target() {
    let transport = pdu_transport();
    let circuit: Circuit = fetch(&transport, BRANCH_A).await;
    assert!(circuit.supports_power_control());

    let monitor = circuit.power_control(PowerControlState::On).await.unwrap();
    assert!(monitor.is_none());

    let post = transport.last_call().unwrap();
    assert_eq!(post.method, "POST");
    assert_eq!(
        post.uri,
        "/redfish/v1/PowerEquipment/RackPDUs/1/Branches/A/Actions/Circuit.PowerControl"
    );
    assert_eq!(post.body, Some(json!({"PowerState": "On"})));
    assert_eq!(post.headers.get("If-Match").unwrap(), "\"0xBEEF\"");
}

#[tokio::test]
async fn test_breaker_control_and_reset_metrics_targets() {
    let transport = pdu_transport();
    let circuit: Circuit = fetch(&transport, BRANCH_A).await;

    circuit.breaker_control(PowerControlState::Off).await.unwrap();
    circuit.reset_metrics().await.unwrap();

    let posts = transport.calls_for("POST");
    assert_eq!(posts.len(), 2);
    assert!(posts[0].uri.ends_with("/Actions/Circuit.BreakerControl"));
    assert_eq!(posts[0].body, Some(json!({"PowerState": "Off"})));
    assert!(posts[1].uri.ends_with("/Actions/Circuit.ResetMetrics"));
    assert_eq!(posts[1].body, Some(json!({})));
}

#[tokio::test]
async fn test_undeclared_action_sends_nothing() {
    let transport = pdu_transport();
    let mains: Circuit = fetch(&transport, MAINS).await;
    transport.clear_calls();

    assert!(!mains.supports_power_control());
    let err = mains.power_control(PowerControlState::PowerCycle).await.unwrap_err();

    assert!(matches!(err, ClientError::UnsupportedAction(ref name) if name == "#Circuit.PowerControl"));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_accepted_action_returns_task_monitor() {
    let transport = pdu_transport();
    let monitor_uri = "/redfish/v1/TaskService/TaskMonitors/545";
    transport.push(
        "POST",
        "/redfish/v1/PowerEquipment/RackPDUs/1/Branches/A/Actions/Circuit.PowerControl",
        accepted(monitor_uri, Some(3)),
    );
    transport.push(
        "GET",
        monitor_uri,
        Response::new(202, Default::default(), fixture_bytes("task/task_running.json")),
    );
    let circuit: Circuit = fetch(&transport, BRANCH_A).await;

    let monitor = circuit
        .power_control(PowerControlState::Off)
        .await
        .unwrap()
        .expect("202 should produce a task monitor");
    assert_eq!(monitor.task_monitor, monitor_uri);
    assert_eq!(monitor.retry_after, Some(std::time::Duration::from_secs(3)));

    match monitor.poll(&transport.shared()).await.unwrap() {
        TaskPoll::Running(info) => {
            let task = info.task.expect("task body");
            assert_eq!(task.task_state, Some(TaskState::Running));
            assert_eq!(task.percent_complete, Some(40));
        }
        TaskPoll::Completed(_) => panic!("task should still be running"),
    }
}

#[tokio::test]
async fn test_sensor_reset_metrics() {
    let transport = serve_fixtures(&[(SENSOR, "sensor/sensor.json")]);
    let sensor: Sensor = fetch(&transport, SENSOR).await;

    sensor.reset_metrics().await.unwrap();

    let post = transport.last_call().unwrap();
    assert_eq!(post.method, "POST");
    assert!(post.uri.ends_with("/Actions/Sensor.ResetMetrics"));
}

#[tokio::test]
async fn test_following_links_fetches_every_time() {
    let transport = pdu_transport();
    let circuit: Circuit = fetch(&transport, BRANCH_A).await;

    let first = circuit.outlets().await.unwrap();
    let second = circuit.outlets().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(first[0].entity.id, "A1");
    assert_eq!(first[1].entity.id, "A2");

    let outlet_gets: Vec<String> = transport
        .calls_for("GET")
        .into_iter()
        .map(|c| c.uri)
        .filter(|uri| uri.contains("/Outlets/"))
        .collect();
    assert_eq!(outlet_gets, [OUTLET_A1, OUTLET_A2, OUTLET_A1, OUTLET_A2]);

    let outlet = &first[0];
    transport.clear_calls();
    let a = outlet.branch_circuit().await.unwrap().unwrap();
    let b = outlet.branch_circuit().await.unwrap().unwrap();
    assert_eq!(a.entity.odata_id, BRANCH_A);
    assert_eq!(a, b);
    assert_eq!(transport.calls_for("GET").len(), 2);
}

#[tokio::test]
async fn test_absent_link_is_none_without_request() {
    let transport = pdu_transport();
    let mains: Circuit = fetch(&transport, MAINS).await;
    transport.clear_calls();

    assert!(mains.branch_circuit().await.unwrap().is_none());
    assert!(mains.outlets().await.unwrap().is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_raw_data_matches_fetched_bytes() {
    let transport = pdu_transport();
    let circuit: Circuit = fetch(&transport, BRANCH_A).await;
    assert_eq!(circuit.entity.raw_data(), fixture_bytes("circuit/circuit.json"));

    let service_bytes = fixture_bytes("compositionservice/composition_service.json");
    let service: CompositionService = redfish_client::decode(&service_bytes).unwrap();
    assert_eq!(service.entity.raw_data(), service_bytes.as_slice());
}

#[tokio::test]
async fn test_refresh_replaces_value_from_service() {
    let transport = pdu_transport();
    let mut circuit: Circuit = fetch(&transport, BRANCH_A).await;

    let mut updated = load_fixture("circuit/circuit.json");
    updated["UserLabel"] = json!("Rack 4 (moved)");
    transport.push("GET", BRANCH_A, Response::ok(updated.to_string()));
    // The original document is still queued ahead of the new one.
    circuit.refresh().await.unwrap();
    assert_eq!(circuit.user_label.as_deref(), Some("Rack 4 left"));
    circuit.refresh().await.unwrap();

    assert_eq!(circuit.user_label.as_deref(), Some("Rack 4 (moved)"));
    assert!(redfish_client::update::changed_fields(&circuit).unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_current_value() {
    let transport = pdu_transport();
    let mut circuit: Circuit = fetch(&transport, BRANCH_A).await;

    transport.push("GET", BRANCH_A, Response::ok(b"{not json".to_vec()));
    circuit.refresh().await.unwrap();
    circuit.user_label = Some("local edit".into());
    let err = circuit.refresh().await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { type_name: "Circuit", .. }));
    assert_eq!(circuit.user_label.as_deref(), Some("local edit"));
}

#[tokio::test]
async fn test_update_from_raw_data_keeps_binding() {
    let transport = pdu_transport();
    let mut circuit: Circuit = fetch(&transport, BRANCH_A).await;

    let mut doc = load_fixture("circuit/circuit.json");
    doc["UserLabel"] = json!("from event");
    let raw = serde_json::to_vec(&doc).unwrap();
    circuit.update_from_raw_data(&raw).unwrap();

    assert_eq!(circuit.user_label.as_deref(), Some("from event"));
    assert_eq!(circuit.entity.raw_data(), raw.as_slice());

    circuit.power_control(PowerControlState::On).await.unwrap();
    assert_eq!(transport.last_call().unwrap().method, "POST");
}

#[tokio::test]
async fn test_compose_synchronous_response() {
    let transport = serve_fixtures(&[(COMPOSITION, "compositionservice/composition_service.json")]);
    let target = "/redfish/v1/CompositionService/Actions/CompositionService.Compose";
    transport.push(
        "POST",
        target,
        Response::ok(
            json!({
                "RequestFormat": "Manifest",
                "RequestType": "Preview",
                "Manifest": {"Expand": "None"}
            })
            .to_string(),
        ),
    );
    let service: CompositionService = fetch(&transport, COMPOSITION).await;

    let request = ComposeRequest {
        manifest: Some(json!({"Description": "web tier"})),
        request_format: Some("Manifest".into()),
        request_type: Some(ComposeRequestType::Preview),
        reservation_id: None,
    };
    let outcome = service.compose(&request).await.unwrap();

    match outcome {
        ComposeOutcome::Completed(response) => {
            assert_eq!(response.request_type, Some(ComposeRequestType::Preview));
        }
        ComposeOutcome::Accepted(_) => panic!("expected a synchronous response"),
    }
    let post = transport.last_call().unwrap();
    assert_eq!(post.uri, target);
    assert_eq!(
        post.body,
        Some(json!({
            "Manifest": {"Description": "web tier"},
            "RequestFormat": "Manifest",
            "RequestType": "Preview"
        }))
    );
}

#[tokio::test]
async fn test_composition_pools_and_blocks() {
    let transport = serve_fixtures(&[
        (COMPOSITION, "compositionservice/composition_service.json"),
        (
            "/redfish/v1/CompositionService/ResourceBlocks",
            "compositionservice/resource_blocks.json",
        ),
        (
            "/redfish/v1/CompositionService/ResourceBlocks/ComputeBlock1",
            "compositionservice/compute_block.json",
        ),
        (
            "/redfish/v1/CompositionService/ResourceBlocks/DriveBlock3",
            "compositionservice/drive_block.json",
        ),
        (
            "/redfish/v1/CompositionService/ActivePool",
            "compositionservice/active_pool.json",
        ),
        (
            "/redfish/v1/CompositionService/FreePool",
            "compositionservice/free_pool.json",
        ),
    ]);
    let service: CompositionService = fetch(&transport, COMPOSITION).await;
    assert_eq!(
        service.resource_blocks_uri(),
        "/redfish/v1/CompositionService/ResourceBlocks"
    );

    let blocks = service.resource_blocks().await.unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].entity.id, "ComputeBlock1");
    assert_eq!(blocks[0].pool, Some(PoolType::Active));

    let active = service.active_pool().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].entity.id, "ComputeBlock1");
    let free = service.free_pool().await.unwrap();
    assert_eq!(free[0].entity.id, "DriveBlock3");
}
