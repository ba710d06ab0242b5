//! Collection traversal tests.
//!
//! # Invariants
//! - Members are returned in document order across pages
//! - A failed member fetch returns the members decoded before it
//! - `Links.Members` is accepted when `Members` is absent
//! - A member carrying only its link and annotations is fetched, not decoded in place
//!
//! # What this does NOT handle
//! - Member decoding details (see update_tests.rs)

mod common;

use common::*;
use redfish_client::models::{Outlet, ResourceBlock};
use redfish_config::ClientOptions;
use serde_json::json;
use std::sync::Arc;

const OUTLETS: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets";
const OUTLET_A1: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1";
const OUTLET_A2: &str = "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2";

fn outlet_doc(id: &str) -> serde_json::Value {
    json!({
        "@odata.id": format!("{OUTLETS}/{id}"),
        "@odata.type": "#Outlet.v1_4_0.Outlet",
        "Id": id,
        "Name": format!("Outlet {id}"),
    })
}

fn paged_transport(options: ClientOptions) -> Arc<RecordingTransport> {
    let page2 = format!("{OUTLETS}?$skip=2");
    let transport = RecordingTransport::new()
        .with_options(options)
        .with_get(
            OUTLETS,
            json!({
                "Members@odata.count": 3,
                "Members": [
                    {"@odata.id": OUTLET_A1},
                    {"@odata.id": OUTLET_A2}
                ],
                "Members@odata.nextLink": page2,
            })
            .to_string(),
        )
        .with_get(
            &page2,
            json!({
                "Members@odata.count": 3,
                "Members": [{"@odata.id": format!("{OUTLETS}/B1")}]
            })
            .to_string(),
        )
        .with_get(OUTLET_A1, fixture_bytes("circuit/outlet_a1.json"))
        .with_get(OUTLET_A2, fixture_bytes("circuit/outlet_a2.json"))
        .with_get(&format!("{OUTLETS}/B1"), outlet_doc("B1").to_string());
    Arc::new(transport)
}

#[tokio::test]
async fn test_list_follows_next_link_in_order() {
    let transport = paged_transport(ClientOptions::default());
    let outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();

    let ids: Vec<&str> = outlets.iter().map(|o| o.entity.id.as_str()).collect();
    assert_eq!(ids, ["A1", "A2", "B1"]);
}

#[tokio::test]
async fn test_list_stops_at_first_page_when_disabled() {
    let options = ClientOptions {
        follow_next_links: false,
        ..ClientOptions::default()
    };
    let transport = paged_transport(options);
    let outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();

    assert_eq!(outlets.len(), 2);
    assert!(
        transport
            .calls_for("GET")
            .iter()
            .all(|c| !c.uri.contains("$skip"))
    );
}

#[tokio::test]
async fn test_partial_collection_keeps_fetched_prefix() {
    let transport = serve_json(&[(
        OUTLETS,
        json!({
            "Members": [
                {"@odata.id": OUTLET_A1},
                {"@odata.id": format!("{OUTLETS}/Gone")},
                {"@odata.id": OUTLET_A2}
            ]
        }),
    )]);
    transport.push("GET", OUTLET_A1, Response::ok(fixture_bytes("circuit/outlet_a1.json")));
    transport.push("GET", OUTLET_A2, Response::ok(fixture_bytes("circuit/outlet_a2.json")));

    let partial = Outlet::list(&transport.shared(), OUTLETS).await.unwrap_err();

    assert_eq!(partial.items.len(), 1);
    assert_eq!(partial.items[0].entity.id, "A1");
    assert!(partial.error.is_not_found());
    assert!(
        transport.calls_for("GET").iter().all(|c| c.uri != OUTLET_A2),
        "traversal should stop at the failed member"
    );

    let err: ClientError = partial.into();
    assert!(matches!(err, ClientError::Collection { fetched: 1, .. }));
}

#[tokio::test]
async fn test_links_members_fallback() {
    let transport = serve_json(&[
        (
            OUTLETS,
            json!({"Links": {"Members": [{"@odata.id": OUTLET_A2}]}}),
        ),
        (OUTLET_A2, load_fixture("circuit/outlet_a2.json")),
    ]);

    let outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();
    assert_eq!(outlets.len(), 1);
    assert_eq!(outlets[0].entity.id, "A2");
}

#[tokio::test]
async fn test_expanded_members_decode_without_requests() {
    let transport = serve_json(&[(
        OUTLETS,
        json!({"Members": [outlet_doc("C1"), outlet_doc("C2")]}),
    )]);

    let mut outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();
    assert_eq!(outlets.len(), 2);
    assert_eq!(transport.calls().len(), 1);

    outlets[1].user_label = Some("spare".into());
    outlets[1].update().await.unwrap();
    let patch = transport.last_call().unwrap();
    assert_eq!(patch.uri, format!("{OUTLETS}/C2"));
    assert_eq!(patch.body, Some(json!({"UserLabel": "spare"})));
}

#[tokio::test]
async fn test_annotated_link_members_are_fetched() {
    let transport = serve_json(&[
        (
            OUTLETS,
            json!({
                "Members": [{
                    "@odata.id": OUTLET_A1,
                    "@odata.etag": "W/\"1\"",
                    "@odata.context": "/redfish/v1/$metadata#Outlet.Outlet"
                }]
            }),
        ),
        (OUTLET_A1, load_fixture("circuit/outlet_a1.json")),
    ]);

    let outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();

    assert_eq!(outlets.len(), 1);
    assert_eq!(outlets[0].entity.name, "Outlet A1");
    assert_eq!(outlets[0].user_label.as_deref(), Some("web-01 PSU1"));
    assert!(transport.calls_for("GET").iter().any(|c| c.uri == OUTLET_A1));
}

#[tokio::test]
async fn test_next_link_loop_terminates() {
    let transport = serve_json(&[
        (
            OUTLETS,
            json!({
                "Members": [{"@odata.id": OUTLET_A1}],
                "Members@odata.nextLink": OUTLETS
            }),
        ),
        (OUTLET_A1, load_fixture("circuit/outlet_a1.json")),
    ]);

    let outlets = Outlet::list(&transport.shared(), OUTLETS).await.unwrap();
    assert_eq!(outlets.len(), 1);
}

#[tokio::test]
async fn test_missing_collection_is_error_without_items() {
    let transport = Arc::new(RecordingTransport::new());
    let partial = ResourceBlock::list(&transport.shared(), "/redfish/v1/CompositionService/ResourceBlocks")
        .await
        .unwrap_err();

    assert!(partial.items.is_empty());
    assert!(partial.error.is_not_found());
    assert!(partial.to_string().contains("after 0 members"));
}
