//! Composition service: resource blocks, resource zones and the compose
//! action.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{post_action, post_action_response};
use crate::codec::impl_resource;
use crate::collection::{get_linked_collection, get_linked_objects};
use crate::entity::Entity;
use crate::error::{ClientError, Result};
use crate::models::common::Status;
use crate::odata::{ActionTarget, Link, Links};
use crate::task::TaskMonitorInfo;

const COMPOSITION_SERVICE_WRITABLE: &[&str] =
    &["AllowOverprovisioning", "ReservationDuration", "ServiceEnabled"];

const RESOURCE_BLOCK_WRITABLE: &[&str] = &["Client", "Pool"];

const ZONE_WRITABLE: &[&str] = &["DefaultRoutingEnabled", "ExternalAccessibility", "ZoneType"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ComposeRequestType {
    #[default]
    Apply,
    Preview,
    PreviewReserve,
}

/// Parameters of `#CompositionService.Compose`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeRequest {
    /// The manifest describing the requested composition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Value>,
    /// Always `Manifest` for current services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<ComposeRequestType>,
    #[serde(rename = "ReservationId", default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
}

/// Document returned by a synchronous compose.
pub type ComposeResponse = ComposeRequest;

/// Result of a compose request.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeOutcome {
    Completed(ComposeResponse),
    Accepted(TaskMonitorInfo),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CompositionActions {
    #[serde(rename = "#CompositionService.Compose", default)]
    compose: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CompositionRefs {
    #[serde(default)]
    active_pool: Link,
    #[serde(default)]
    composition_reservations: Link,
    #[serde(default)]
    free_pool: Link,
    #[serde(default)]
    resource_blocks: Link,
    #[serde(default)]
    resource_zones: Link,
    #[serde(default)]
    actions: CompositionActions,
}

/// The composition service of a Redfish service root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositionService {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_overprovisioning: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_zone_affinity: Option<bool>,
    /// ISO 8601 duration a reservation is held.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_enabled: Option<bool>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: CompositionRefs,
}

impl_resource!(
    CompositionService,
    "CompositionService",
    writable: COMPOSITION_SERVICE_WRITABLE,
    refs: refs
);

impl CompositionService {
    /// Request a composition from a manifest.
    ///
    /// Services that complete the request asynchronously return a task
    /// monitor instead of the response document.
    pub async fn compose(&self, request: &ComposeRequest) -> Result<ComposeOutcome> {
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        let response = post_action_response(
            &self.entity,
            "#CompositionService.Compose",
            &self.refs.actions.compose.target,
            &body,
        )
        .await?;

        if let Some(monitor) = TaskMonitorInfo::from_response(&response) {
            return Ok(ComposeOutcome::Accepted(monitor));
        }
        if response.body.is_empty() {
            return Ok(ComposeOutcome::Completed(ComposeResponse::default()));
        }
        let result = serde_json::from_slice(&response.body).map_err(|source| ClientError::Decode {
            type_name: "ComposeResponse",
            source,
        })?;
        Ok(ComposeOutcome::Completed(result))
    }

    /// URI of the resource block collection.
    pub fn resource_blocks_uri(&self) -> &str {
        self.refs.resource_blocks.as_str()
    }

    pub async fn resource_blocks(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_collection(self.entity.client_opt(), self.refs.resource_blocks.as_str()).await
    }

    pub async fn resource_zones(&self) -> Result<Vec<Zone>> {
        get_linked_collection(self.entity.client_opt(), self.refs.resource_zones.as_str()).await
    }

    /// Resource blocks currently in use by compositions.
    pub async fn active_pool(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_collection(self.entity.client_opt(), self.refs.active_pool.as_str()).await
    }

    /// Resource blocks available for composition.
    pub async fn free_pool(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_collection(self.entity.client_opt(), self.refs.free_pool.as_str()).await
    }

    pub fn composition_reservations(&self) -> &str {
        self.refs.composition_reservations.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompositionState {
    Composing,
    ComposedAndAvailable,
    Composed,
    Unused,
    Failed,
    Unavailable,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PoolType {
    Free,
    Active,
    Unassigned,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResourceBlockType {
    Compute,
    Processor,
    Memory,
    Network,
    Storage,
    ComputerSystem,
    Expansion,
    IndependentResource,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompositionStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_state: Option<CompositionState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_compositions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_compositions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_capable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceBlockLinks {
    #[serde(default)]
    chassis: Links,
    #[serde(default)]
    computer_systems: Links,
    #[serde(default)]
    consuming_resource_blocks: Links,
    #[serde(default)]
    supplying_resource_blocks: Links,
    #[serde(default)]
    zones: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResourceBlockRefs {
    #[serde(default)]
    computer_systems: Links,
    #[serde(default)]
    drives: Links,
    #[serde(default)]
    ethernet_interfaces: Links,
    #[serde(default)]
    memory: Links,
    #[serde(default)]
    network_interfaces: Links,
    #[serde(default)]
    processors: Links,
    #[serde(default)]
    storage: Links,
    #[serde(default)]
    links: ResourceBlockLinks,
}

/// A unit of composable hardware.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceBlock {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Client the block is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub composition_status: CompositionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolType>,
    #[serde(default)]
    pub resource_block_type: Vec<ResourceBlockType>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: ResourceBlockRefs,
}

impl_resource!(ResourceBlock, "ResourceBlock", writable: RESOURCE_BLOCK_WRITABLE, refs: refs);

impl ResourceBlock {
    /// Systems built from this block. Older services list them at the top
    /// level, newer ones under `Links`.
    pub fn computer_systems(&self) -> &[String] {
        if self.refs.computer_systems.is_empty() {
            self.refs.links.computer_systems.as_slice()
        } else {
            self.refs.computer_systems.as_slice()
        }
    }

    pub fn chassis(&self) -> &[String] {
        self.refs.links.chassis.as_slice()
    }

    pub async fn zones(&self) -> Result<Vec<Zone>> {
        get_linked_objects(self.entity.client_opt(), self.refs.links.zones.as_slice()).await
    }

    pub async fn consuming_resource_blocks(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_objects(
            self.entity.client_opt(),
            self.refs.links.consuming_resource_blocks.as_slice(),
        )
        .await
    }

    pub async fn supplying_resource_blocks(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_objects(
            self.entity.client_opt(),
            self.refs.links.supplying_resource_blocks.as_slice(),
        )
        .await
    }

    pub fn drives(&self) -> &[String] {
        self.refs.drives.as_slice()
    }

    pub fn ethernet_interfaces(&self) -> &[String] {
        self.refs.ethernet_interfaces.as_slice()
    }

    pub fn memory(&self) -> &[String] {
        self.refs.memory.as_slice()
    }

    pub fn network_interfaces(&self) -> &[String] {
        self.refs.network_interfaces.as_slice()
    }

    pub fn processors(&self) -> &[String] {
        self.refs.processors.as_slice()
    }

    pub fn storage(&self) -> &[String] {
        self.refs.storage.as_slice()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoneType {
    Default,
    ZoneOfEndpoints,
    ZoneOfZones,
    ZoneOfResourceBlocks,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExternalAccessibility {
    GloballyAccessible,
    NonZonedAccessible,
    ZoneOnly,
    NoInternalRouting,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Identifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durable_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durable_name_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneLinks {
    #[serde(default)]
    address_pools: Links,
    #[serde(default)]
    contained_by_zones: Links,
    #[serde(default)]
    contains_zones: Links,
    #[serde(default)]
    endpoints: Links,
    #[serde(default)]
    involved_switches: Links,
    #[serde(default)]
    resource_blocks: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ZoneActions {
    #[serde(rename = "#Zone.AddEndpoint", default)]
    add_endpoint: ActionTarget,
    #[serde(rename = "#Zone.RemoveEndpoint", default)]
    remove_endpoint: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneRefs {
    #[serde(default)]
    links: ZoneLinks,
    #[serde(default)]
    actions: ZoneActions,
}

/// A resource or fabric zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Zone {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_routing_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_accessibility: Option<ExternalAccessibility>,
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: ZoneRefs,
}

impl_resource!(Zone, "Zone", writable: ZONE_WRITABLE, refs: refs);

impl Zone {
    /// Add an endpoint to the zone. The ETags guard against concurrent changes.
    pub async fn add_endpoint(
        &self,
        endpoint: &str,
        endpoint_etag: &str,
        zone_etag: &str,
    ) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Zone.AddEndpoint",
            &self.refs.actions.add_endpoint.target,
            &endpoint_body(endpoint, endpoint_etag, zone_etag),
        )
        .await
    }

    pub async fn remove_endpoint(
        &self,
        endpoint: &str,
        endpoint_etag: &str,
        zone_etag: &str,
    ) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Zone.RemoveEndpoint",
            &self.refs.actions.remove_endpoint.target,
            &endpoint_body(endpoint, endpoint_etag, zone_etag),
        )
        .await
    }

    pub async fn resource_blocks(&self) -> Result<Vec<ResourceBlock>> {
        get_linked_objects(self.entity.client_opt(), self.refs.links.resource_blocks.as_slice())
            .await
    }

    pub async fn contained_by_zones(&self) -> Result<Vec<Zone>> {
        get_linked_objects(
            self.entity.client_opt(),
            self.refs.links.contained_by_zones.as_slice(),
        )
        .await
    }

    pub async fn contains_zones(&self) -> Result<Vec<Zone>> {
        get_linked_objects(self.entity.client_opt(), self.refs.links.contains_zones.as_slice())
            .await
    }

    pub fn address_pools(&self) -> &[String] {
        self.refs.links.address_pools.as_slice()
    }

    pub fn endpoints(&self) -> &[String] {
        self.refs.links.endpoints.as_slice()
    }

    pub fn involved_switches(&self) -> &[String] {
        self.refs.links.involved_switches.as_slice()
    }
}

fn endpoint_body(endpoint: &str, endpoint_etag: &str, zone_etag: &str) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("Endpoint".into(), Value::String(endpoint.to_string()));
    if !endpoint_etag.is_empty() {
        body.insert("EndpointETag".into(), Value::String(endpoint_etag.to_string()));
    }
    if !zone_etag.is_empty() {
        body.insert("ZoneETag".into(), Value::String(zone_etag.to_string()));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::update::changed_fields;
    use serde_json::json;

    #[test]
    fn test_resource_block_systems_fall_back_to_links() {
        let block: ResourceBlock = decode(
            br##"{
                "@odata.type": "#ResourceBlock.v1_4_0.ResourceBlock",
                "@odata.id": "/redfish/v1/CompositionService/ResourceBlocks/ComputeBlock1",
                "Id": "ComputeBlock1",
                "Name": "Compute Block 1",
                "ResourceBlockType": ["Compute"],
                "CompositionStatus": {"CompositionState": "Composed", "Reserved": false},
                "Pool": "Active",
                "Processors": [{"@odata.id": "/redfish/v1/Systems/1/Processors/1"}],
                "Links": {
                    "ComputerSystems": [{"@odata.id": "/redfish/v1/Systems/ComposedSystem"}],
                    "Zones": [{"@odata.id": "/redfish/v1/CompositionService/ResourceZones/1"}]
                }
            }"##,
        )
        .unwrap();

        assert_eq!(block.resource_block_type, [ResourceBlockType::Compute]);
        assert_eq!(
            block.composition_status.composition_state,
            Some(CompositionState::Composed)
        );
        assert_eq!(block.computer_systems(), ["/redfish/v1/Systems/ComposedSystem"]);
        assert_eq!(block.processors(), ["/redfish/v1/Systems/1/Processors/1"]);
        assert!(block.drives().is_empty());
    }

    #[test]
    fn test_zone_type_change() {
        let mut zone: Zone = decode(
            br##"{
                "@odata.id": "/redfish/v1/CompositionService/ResourceZones/1",
                "Id": "1",
                "Name": "Resource Zone 1",
                "ZoneType": "ZoneOfResourceBlocks",
                "Links": {
                    "ResourceBlocks": [
                        {"@odata.id": "/redfish/v1/CompositionService/ResourceBlocks/ComputeBlock1"},
                        {"@odata.id": "/redfish/v1/CompositionService/ResourceBlocks/DriveBlock3"}
                    ]
                }
            }"##,
        )
        .unwrap();
        assert_eq!(zone.refs.links.resource_blocks.len(), 2);

        zone.default_routing_enabled = Some(true);
        let changed = changed_fields(&zone).unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed["DefaultRoutingEnabled"], json!(true));
    }

    #[test]
    fn test_endpoint_body_omits_empty_etags() {
        assert_eq!(
            endpoint_body("/redfish/v1/Fabrics/1/Endpoints/A", "", "W/\"1\""),
            json!({"Endpoint": "/redfish/v1/Fabrics/1/Endpoints/A", "ZoneETag": "W/\"1\""})
        );
    }
}
