//! Power distribution equipment: rack and floor PDUs, transfer switches,
//! switchgear and power shelves.
//!
//! Sub-resources (mains, branches, feeders, subfeeds, outlets, outlet groups,
//! sensors) are collections fetched on demand.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::impl_resource;
use crate::collection::get_linked_collection;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::circuit::Circuit;
use crate::models::common::Status;
use crate::models::outlet::Outlet;
use crate::models::outlet_group::OutletGroup;
use crate::models::sensor::Sensor;
use crate::odata::{ActionTarget, Link, Links};
use crate::task::TaskMonitorInfo;

const POWER_DISTRIBUTION_WRITABLE: &[&str] = &[
    "AssetTag",
    "TransferConfiguration",
    "TransferCriteria",
    "UserLabel",
];

/// Kind of power distribution equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerEquipmentType {
    RackPDU,
    FloorPDU,
    ManualTransferSwitch,
    AutomaticTransferSwitch,
    Switchgear,
    PowerShelf,
    Bus,
    BatteryShelf,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TransferSensitivity {
    High,
    Medium,
    Low,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Transfer switch behavior. Sent as a whole object when changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferConfiguration {
    #[serde(rename = "ActiveMainsId", default, skip_serializing_if = "Option::is_none")]
    pub active_mains_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_transfer_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_transition_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_transition_timeout_seconds: Option<i64>,
    #[serde(rename = "PreferredMainsId", default, skip_serializing_if = "Option::is_none")]
    pub preferred_mains_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retransfer_delay_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retransfer_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_delay_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_inhibit: Option<bool>,
}

/// Conditions that trigger a transfer between mains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransferCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_nominal_frequency_hz: Option<f64>,
    #[serde(rename = "OverVoltageRMSPercentage", default, skip_serializing_if = "Option::is_none")]
    pub over_voltage_rms_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_sensitivity: Option<TransferSensitivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under_nominal_frequency_hz: Option<f64>,
    #[serde(rename = "UnderVoltageRMSPercentage", default, skip_serializing_if = "Option::is_none")]
    pub under_voltage_rms_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct PowerDistributionLinks {
    #[serde(rename = "Chassis", default)]
    chassis: Links,
    #[serde(rename = "Facility", default)]
    facility: Link,
    #[serde(rename = "ManagedBy", default)]
    managed_by: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct PowerDistributionActions {
    #[serde(rename = "#PowerDistribution.TransferControl", default)]
    transfer_control: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PowerDistributionRefs {
    #[serde(default)]
    branches: Link,
    #[serde(default)]
    feeders: Link,
    #[serde(default)]
    mains: Link,
    #[serde(default)]
    metrics: Link,
    #[serde(default)]
    outlet_groups: Link,
    #[serde(default)]
    outlets: Link,
    #[serde(default)]
    power_supplies: Link,
    #[serde(default)]
    sensors: Link,
    #[serde(default)]
    subfeeds: Link,
    #[serde(default)]
    links: PowerDistributionLinks,
    #[serde(default)]
    actions: PowerDistributionActions,
}

/// A power distribution unit or similar equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerDistribution {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "AssetTag", default, skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    #[serde(rename = "EquipmentType", default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<PowerEquipmentType>,
    #[serde(rename = "FirmwareVersion", default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(rename = "Manufacturer", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(rename = "Model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "PartNumber", default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(rename = "ProductionDate", default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(rename = "SerialNumber", default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "TransferConfiguration", default, skip_serializing_if = "Option::is_none")]
    pub transfer_configuration: Option<TransferConfiguration>,
    #[serde(rename = "TransferCriteria", default, skip_serializing_if = "Option::is_none")]
    pub transfer_criteria: Option<TransferCriteria>,
    #[serde(rename = "UserLabel", default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(rename = "UUID", default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: PowerDistributionRefs,
}

impl_resource!(
    PowerDistribution,
    "PowerDistribution",
    writable: POWER_DISTRIBUTION_WRITABLE,
    refs: refs
);

impl PowerDistribution {
    /// Transfer the load to an alternate mains circuit.
    pub async fn transfer_control(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#PowerDistribution.TransferControl",
            &self.refs.actions.transfer_control.target,
            &json!({}),
        )
        .await
    }

    pub async fn branches(&self) -> Result<Vec<Circuit>> {
        get_linked_collection(self.entity.client_opt(), self.refs.branches.as_str()).await
    }

    pub async fn feeders(&self) -> Result<Vec<Circuit>> {
        get_linked_collection(self.entity.client_opt(), self.refs.feeders.as_str()).await
    }

    pub async fn mains(&self) -> Result<Vec<Circuit>> {
        get_linked_collection(self.entity.client_opt(), self.refs.mains.as_str()).await
    }

    pub async fn subfeeds(&self) -> Result<Vec<Circuit>> {
        get_linked_collection(self.entity.client_opt(), self.refs.subfeeds.as_str()).await
    }

    pub async fn outlets(&self) -> Result<Vec<Outlet>> {
        get_linked_collection(self.entity.client_opt(), self.refs.outlets.as_str()).await
    }

    pub async fn outlet_groups(&self) -> Result<Vec<OutletGroup>> {
        get_linked_collection(self.entity.client_opt(), self.refs.outlet_groups.as_str()).await
    }

    pub async fn sensors(&self) -> Result<Vec<Sensor>> {
        get_linked_collection(self.entity.client_opt(), self.refs.sensors.as_str()).await
    }

    /// URI of the metrics resource, empty when absent.
    pub fn metrics_uri(&self) -> &str {
        self.refs.metrics.as_str()
    }

    /// URI of the power supply collection, empty when absent.
    pub fn power_supplies_uri(&self) -> &str {
        self.refs.power_supplies.as_str()
    }

    pub fn chassis(&self) -> &[String] {
        self.refs.links.chassis.as_slice()
    }

    pub fn managed_by(&self) -> &[String] {
        self.refs.links.managed_by.as_slice()
    }

    pub fn facility(&self) -> &str {
        self.refs.links.facility.as_str()
    }
}
