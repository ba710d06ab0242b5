//! Liquid cooling equipment: cooling units (CDUs, heat exchangers) and the
//! cooling loops they serve.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::{get_optional, impl_resource};
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{Health, Status};
use crate::models::excerpts::SensorExcerpt;
use crate::models::leak_detection::LeakDetection;
use crate::odata::{ActionTarget, Link, Links};
use crate::task::TaskMonitorInfo;

const COOLING_UNIT_WRITABLE: &[&str] = &["AssetTag", "UserLabel"];

const COOLING_LOOP_WRITABLE: &[&str] = &[
    "ConsumingEquipmentNames",
    "CoolingManagerURI",
    "LocationIndicatorActive",
    "SupplyEquipmentNames",
    "UserLabel",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CoolingEquipmentType {
    CDU,
    HeatExchanger,
    ImmersionUnit,
    RPU,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Requested operating mode of a cooling unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoolingUnitMode {
    Enabled,
    Disabled,
}

/// Coolant properties of a loop or unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Coolant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additive_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additive_percent: Option<f64>,
    /// `Water`, `Hydrocarbon`, `Fluorocarbon` or `Dielectric`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_per_cubic_meter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_service_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serviced_date: Option<String>,
    #[serde(rename = "SpecificHeatkJoulesPerKgK", default, skip_serializing_if = "Option::is_none")]
    pub specific_heat_kjoules_per_kg_k: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EquipmentLinks {
    #[serde(default)]
    chassis: Links,
    #[serde(default)]
    facility: Link,
    #[serde(default)]
    managed_by: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CoolingUnitActions {
    #[serde(rename = "#CoolingUnit.SetMode", default)]
    set_mode: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoolingUnitRefs {
    #[serde(default)]
    assembly: Link,
    #[serde(default)]
    environment_metrics: Link,
    #[serde(default)]
    filters: Link,
    #[serde(default)]
    leak_detection: Link,
    #[serde(default)]
    primary_coolant_connectors: Link,
    #[serde(default)]
    pumps: Link,
    #[serde(default)]
    reservoirs: Link,
    #[serde(default)]
    secondary_coolant_connectors: Link,
    #[serde(default)]
    links: EquipmentLinks,
    #[serde(default)]
    actions: CoolingUnitActions,
}

/// A coolant distribution unit or similar cooling equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoolingUnit {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant: Option<Coolant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_capacity_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<CoolingEquipmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: CoolingUnitRefs,
}

impl_resource!(CoolingUnit, "CoolingUnit", writable: COOLING_UNIT_WRITABLE, refs: refs);

impl CoolingUnit {
    /// Enable or disable the unit.
    pub async fn set_mode(&self, mode: CoolingUnitMode) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#CoolingUnit.SetMode",
            &self.refs.actions.set_mode.target,
            &json!({ "Mode": mode }),
        )
        .await
    }

    pub async fn leak_detection(&self) -> Result<Option<LeakDetection>> {
        get_optional(self.entity.client_opt(), self.refs.leak_detection.as_str()).await
    }

    pub fn assembly(&self) -> &str {
        self.refs.assembly.as_str()
    }

    pub fn environment_metrics(&self) -> &str {
        self.refs.environment_metrics.as_str()
    }

    pub fn filters(&self) -> &str {
        self.refs.filters.as_str()
    }

    pub fn primary_coolant_connectors(&self) -> &str {
        self.refs.primary_coolant_connectors.as_str()
    }

    pub fn pumps(&self) -> &str {
        self.refs.pumps.as_str()
    }

    pub fn reservoirs(&self) -> &str {
        self.refs.reservoirs.as_str()
    }

    pub fn secondary_coolant_connectors(&self) -> &str {
        self.refs.secondary_coolant_connectors.as_str()
    }

    pub fn chassis(&self) -> &[String] {
        self.refs.links.chassis.as_slice()
    }

    pub fn facility(&self) -> &str {
        self.refs.links.facility.as_str()
    }

    pub fn managed_by(&self) -> &[String] {
        self.refs.links.managed_by.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoolingLoopRefs {
    #[serde(default)]
    primary_coolant_connectors: Link,
    #[serde(default)]
    secondary_coolant_connectors: Link,
    #[serde(default)]
    links: EquipmentLinks,
}

/// A liquid cooling loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoolingLoop {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub consuming_equipment_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant: Option<Coolant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant_level_percent: Option<SensorExcerpt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant_level_status: Option<Health>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coolant_quality: Option<Health>,
    #[serde(rename = "CoolingManagerURI", default, skip_serializing_if = "Option::is_none")]
    pub cooling_manager_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_indicator_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rated_flow_liters_per_minute: Option<f64>,
    #[serde(rename = "RatedPressurekPa", default, skip_serializing_if = "Option::is_none")]
    pub rated_pressure_kpa: Option<f64>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub supply_equipment_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: CoolingLoopRefs,
}

impl_resource!(CoolingLoop, "CoolingLoop", writable: COOLING_LOOP_WRITABLE, refs: refs);

impl CoolingLoop {
    pub fn primary_coolant_connectors(&self) -> &str {
        self.refs.primary_coolant_connectors.as_str()
    }

    pub fn secondary_coolant_connectors(&self) -> &str {
        self.refs.secondary_coolant_connectors.as_str()
    }

    pub fn chassis(&self) -> &[String] {
        self.refs.links.chassis.as_slice()
    }

    pub fn facility(&self) -> &str {
        self.refs.links.facility.as_str()
    }

    pub fn managed_by(&self) -> &[String] {
        self.refs.links.managed_by.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::update::changed_fields;

    const CDU: &[u8] = br##"{
        "@odata.type": "#CoolingUnit.v1_1_0.CoolingUnit",
        "@odata.id": "/redfish/v1/ThermalEquipment/CDUs/1",
        "Id": "1",
        "Name": "Rack CDU",
        "EquipmentType": "CDU",
        "CoolingCapacityWatts": 4000,
        "LeakDetection": {"@odata.id": "/redfish/v1/ThermalEquipment/CDUs/1/LeakDetection"},
        "Pumps": {"@odata.id": "/redfish/v1/ThermalEquipment/CDUs/1/Pumps"},
        "Links": {
            "Chassis": [{"@odata.id": "/redfish/v1/Chassis/Rack1"}],
            "ManagedBy": [{"@odata.id": "/redfish/v1/Managers/BMC"}]
        },
        "Actions": {
            "#CoolingUnit.SetMode": {"target": "/redfish/v1/ThermalEquipment/CDUs/1/Actions/CoolingUnit.SetMode"}
        }
    }"##;

    #[test]
    fn test_decode_cooling_unit() {
        let cdu: CoolingUnit = decode(CDU).unwrap();

        assert_eq!(cdu.equipment_type, Some(CoolingEquipmentType::CDU));
        assert_eq!(cdu.pumps(), "/redfish/v1/ThermalEquipment/CDUs/1/Pumps");
        assert_eq!(cdu.chassis(), ["/redfish/v1/Chassis/Rack1"]);
        assert_eq!(cdu.managed_by(), ["/redfish/v1/Managers/BMC"]);
        assert_eq!(cdu.facility(), "");
        assert_eq!(
            cdu.refs.actions.set_mode.target,
            "/redfish/v1/ThermalEquipment/CDUs/1/Actions/CoolingUnit.SetMode"
        );
    }

    #[test]
    fn test_cooling_loop_single_chassis_link() {
        let mut cooling_loop: CoolingLoop = decode(
            br#"{
                "@odata.id": "/redfish/v1/ThermalEquipment/CoolingLoops/Building",
                "Id": "Building",
                "Name": "Facility cooling loop",
                "ConsumingEquipmentNames": ["Rack1", "Rack2"],
                "CoolantQuality": "OK",
                "Links": {"Chassis": {"@odata.id": "/redfish/v1/Chassis/Rack1"}}
            }"#,
        )
        .unwrap();

        assert_eq!(cooling_loop.chassis(), ["/redfish/v1/Chassis/Rack1"]);

        cooling_loop.consuming_equipment_names.push("Rack3".to_string());
        cooling_loop.coolant_quality = Some(Health::Warning);
        let changed = changed_fields(&cooling_loop).unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(
            changed["ConsumingEquipmentNames"],
            json!(["Rack1", "Rack2", "Rack3"])
        );
    }
}
