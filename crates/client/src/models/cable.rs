//! Cables connecting chassis and ports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::impl_resource;
use crate::entity::Entity;
use crate::models::common::Status;
use crate::odata::Links;

const CABLE_WRITABLE: &[&str] = &[
    "AssetTag",
    "CableClass",
    "CableStatus",
    "CableType",
    "DownstreamConnectorTypes",
    "DownstreamName",
    "LengthMeters",
    "Manufacturer",
    "Model",
    "PartNumber",
    "SKU",
    "SerialNumber",
    "UpstreamConnectorTypes",
    "UpstreamName",
    "UserDescription",
    "UserLabel",
    "Vendor",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CableClass {
    Power,
    Network,
    Storage,
    Fan,
    PCIe,
    USB,
    Video,
    Fabric,
    Serial,
    General,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CableStatus {
    Normal,
    Degraded,
    Failed,
    Testing,
    Disabled,
    SetByService,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CableLinks {
    #[serde(default)]
    downstream_chassis: Links,
    #[serde(default)]
    downstream_ports: Links,
    #[serde(default)]
    downstream_resources: Links,
    #[serde(default)]
    upstream_chassis: Links,
    #[serde(default)]
    upstream_ports: Links,
    #[serde(default)]
    upstream_resources: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CableRefs {
    #[serde(rename = "Links", default)]
    links: CableLinks,
}

/// A cable and the equipment at both of its ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cable {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_class: Option<CableClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_status: Option<CableStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_type: Option<String>,
    /// Connector types such as `RJ45` or `QSFP`.
    #[serde(default)]
    pub downstream_connector_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downstream_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(rename = "SKU", default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub upstream_connector_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: CableRefs,
}

impl_resource!(Cable, "Cable", writable: CABLE_WRITABLE, refs: refs);

impl Cable {
    pub fn downstream_chassis(&self) -> &[String] {
        self.refs.links.downstream_chassis.as_slice()
    }

    pub fn downstream_ports(&self) -> &[String] {
        self.refs.links.downstream_ports.as_slice()
    }

    pub fn downstream_resources(&self) -> &[String] {
        self.refs.links.downstream_resources.as_slice()
    }

    pub fn upstream_chassis(&self) -> &[String] {
        self.refs.links.upstream_chassis.as_slice()
    }

    pub fn upstream_ports(&self) -> &[String] {
        self.refs.links.upstream_ports.as_slice()
    }

    pub fn upstream_resources(&self) -> &[String] {
        self.refs.links.upstream_resources.as_slice()
    }
}
