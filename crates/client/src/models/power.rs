//! Legacy `Power` resource with its embedded power controls, supplies and
//! voltage sensors.
//!
//! Embedded members are resources in their own right: each carries the raw
//! bytes of its own sub-document, is bound to the transport of its parent and
//! can be updated on its own.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::{Resource, attach_embedded, bind_embedded, impl_resource};
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{IndicatorLED, InputType, Redundancy, Status};
use crate::odata::{ActionTarget, Link, Links};
use crate::serde_helpers::{member_id, one_or_many, opt_f64_loose};
use crate::task::TaskMonitorInfo;
use crate::transport::SharedTransport;

/// Reset requested through a reset action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    Nmi,
    ForceOn,
    PushPowerButton,
    PowerCycle,
    Suspend,
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerLimitException {
    NoAction,
    HardPowerOff,
    LogEventOnly,
    Oem,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerSupplyType {
    AC,
    DC,
    ACorDC,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Power cap applied by a power control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerLimit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction_in_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_exception: Option<PowerLimitException>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub limit_in_watts: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerMetrics {
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub average_consumed_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub interval_in_min: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_consumed_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_consumed_watts: Option<f64>,
}

/// Input range accepted by a power supply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub maximum_frequency_hz: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub maximum_voltage: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub minimum_frequency_hz: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub minimum_voltage: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub output_wattage: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct RelatedItemRefs {
    #[serde(rename = "RelatedItem", default)]
    related_item: Links,
}

/// Power budget and consumption of a chassis or system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerControl {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_allocated_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_available_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_capacity_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_consumed_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_limit: Option<PowerLimit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_metrics: Option<PowerMetrics>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_requested_watts: Option<f64>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: RelatedItemRefs,
}

impl_resource!(PowerControl, "PowerControl", writable: &["PowerLimit"], refs: refs);

impl PowerControl {
    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct PowerSupplyActions {
    #[serde(rename = "#PowerSupply.Reset", default)]
    reset: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PowerSupplyRefs {
    #[serde(default)]
    assembly: Link,
    #[serde(default)]
    metrics: Link,
    #[serde(default)]
    redundancy: Links,
    #[serde(default)]
    related_item: Links,
    #[serde(default)]
    actions: PowerSupplyActions,
}

/// A power supply listed in the legacy `Power` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub efficiency_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_pluggable: Option<bool>,
    #[serde(rename = "IndicatorLED", default, skip_serializing_if = "Option::is_none")]
    pub indicator_led: Option<IndicatorLED>,
    #[serde(default)]
    pub input_ranges: Vec<InputRange>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub last_power_output_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub line_input_voltage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_input_voltage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_capacity_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_input_watts: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_output_watts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_supply_type: Option<PowerSupplyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_number: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: PowerSupplyRefs,
}

impl_resource!(PowerSupply, "PowerSupply", writable: &["IndicatorLED"], refs: refs);

impl PowerSupply {
    /// Reset this power supply through its own reset action.
    pub async fn reset(&self, reset_type: ResetType) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#PowerSupply.Reset",
            &self.refs.actions.reset.target,
            &json!({ "ResetType": reset_type }),
        )
        .await
    }

    pub fn assembly(&self) -> &str {
        self.refs.assembly.as_str()
    }

    pub fn metrics_uri(&self) -> &str {
        self.refs.metrics.as_str()
    }

    /// URIs of the redundancy groups this supply belongs to.
    pub fn redundancy(&self) -> &[String] {
        self.refs.redundancy.as_slice()
    }

    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}

/// A voltage sensor listed in the legacy `Power` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Voltage {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_non_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_reading_range: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_reading_range: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading_volts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_number: Option<i64>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_non_critical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: RelatedItemRefs,
}

impl_resource!(Voltage, "Voltage", refs: refs);

impl Voltage {
    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct PowerActions {
    #[serde(rename = "#Power.PowerSupplyReset", default)]
    power_supply_reset: ActionTarget,
}

/// Sub-documents of the embedded members, kept as JSON so each member can
/// carry its own raw data.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PowerShadow {
    #[serde(default, deserialize_with = "one_or_many")]
    power_control: Vec<Value>,
    #[serde(default)]
    power_supplies: Vec<Value>,
    #[serde(default)]
    voltages: Vec<Value>,
    #[serde(default)]
    actions: PowerActions,
}

/// Legacy power resource of a chassis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Power {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Some services send a single object here instead of an array.
    #[serde(default, deserialize_with = "one_or_many")]
    pub power_control: Vec<PowerControl>,
    #[serde(default)]
    pub power_supplies: Vec<PowerSupply>,
    #[serde(default)]
    pub redundancy: Vec<Redundancy>,
    #[serde(default)]
    pub voltages: Vec<Voltage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    actions: PowerActions,
}

impl Resource for Power {
    const TYPE_NAME: &'static str = "Power";

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn capture_refs(&mut self, raw: &[u8]) -> serde_json::Result<()> {
        let shadow: PowerShadow = serde_json::from_slice(raw)?;
        attach_embedded(&mut self.power_control, &shadow.power_control)?;
        attach_embedded(&mut self.power_supplies, &shadow.power_supplies)?;
        attach_embedded(&mut self.voltages, &shadow.voltages)?;
        self.actions = shadow.actions;
        Ok(())
    }

    fn bind(&mut self, client: SharedTransport) {
        bind_embedded(&mut self.power_control, &client);
        bind_embedded(&mut self.power_supplies, &client);
        bind_embedded(&mut self.voltages, &client);
        self.entity.set_client(client);
    }
}

impl Power {
    /// Reset the power supply identified by `member_id`.
    pub async fn power_supply_reset(
        &self,
        member_id: &str,
        reset_type: ResetType,
    ) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Power.PowerSupplyReset",
            &self.actions.power_supply_reset.target,
            &json!({ "MemberId": member_id, "ResetType": reset_type }),
        )
        .await
    }

    /// Power supplies that make up the redundancy group at `index`.
    pub fn redundancy_set(&self, index: usize) -> Vec<&PowerSupply> {
        let Some(group) = self.redundancy.get(index) else {
            return Vec::new();
        };
        group
            .redundancy_set
            .as_slice()
            .iter()
            .filter_map(|uri| {
                self.power_supplies
                    .iter()
                    .find(|supply| &supply.entity.odata_id == uri)
            })
            .collect()
    }
}
