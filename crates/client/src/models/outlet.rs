//! Power outlets of a power distribution unit.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::{get_optional, impl_resource};
use crate::collection::get_linked_objects;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::circuit::Circuit;
use crate::models::common::{InputType, PowerControlState, PowerRestorePolicy, PowerState, Status};
use crate::models::excerpts::{
    PolyPhaseCurrentAmps, PolyPhaseVoltage, SensorCurrentExcerpt, SensorEnergykWhExcerpt,
    SensorExcerpt, SensorPowerExcerpt, SensorVoltageExcerpt,
};
use crate::odata::{ActionTarget, Link, Links};
use crate::task::TaskMonitorInfo;

const OUTLET_WRITABLE: &[&str] = &[
    "ConfigurationLocked",
    "ElectricalConsumerNames",
    "LocationIndicatorActive",
    "PowerControlLocked",
    "PowerCycleDelaySeconds",
    "PowerOffDelaySeconds",
    "PowerOnDelaySeconds",
    "PowerRestoreDelaySeconds",
    "PowerRestorePolicy",
    "UserLabel",
];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletLinks {
    #[serde(rename = "BranchCircuit", default)]
    branch_circuit: Link,
    #[serde(rename = "Chassis", default)]
    chassis: Links,
    #[serde(rename = "DistributionCircuits", default)]
    distribution_circuits: Links,
    #[serde(rename = "PowerSupplies", default)]
    power_supplies: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletActions {
    #[serde(rename = "#Outlet.PowerControl", default)]
    power_control: ActionTarget,
    #[serde(rename = "#Outlet.ResetMetrics", default)]
    reset_metrics: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletRefs {
    #[serde(rename = "Links", default)]
    links: OutletLinks,
    #[serde(rename = "Actions", default)]
    actions: OutletActions,
}

/// An electrical outlet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ConfigurationLocked", default, skip_serializing_if = "Option::is_none")]
    pub configuration_locked: Option<bool>,
    #[serde(rename = "CurrentAmps", default, skip_serializing_if = "Option::is_none")]
    pub current_amps: Option<SensorCurrentExcerpt>,
    #[serde(rename = "ElectricalConsumerNames", default)]
    pub electrical_consumer_names: Vec<String>,
    #[serde(rename = "ElectricalContext", default, skip_serializing_if = "Option::is_none")]
    pub electrical_context: Option<String>,
    #[serde(rename = "EnergykWh", default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<SensorEnergykWhExcerpt>,
    #[serde(rename = "FrequencyHz", default, skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<SensorExcerpt>,
    #[serde(rename = "LocationIndicatorActive", default, skip_serializing_if = "Option::is_none")]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "NominalVoltage", default, skip_serializing_if = "Option::is_none")]
    pub nominal_voltage: Option<String>,
    #[serde(rename = "OutletType", default, skip_serializing_if = "Option::is_none")]
    pub outlet_type: Option<String>,
    #[serde(rename = "PhaseWiringType", default, skip_serializing_if = "Option::is_none")]
    pub phase_wiring_type: Option<String>,
    #[serde(rename = "PolyPhaseCurrentAmps", default, skip_serializing_if = "Option::is_none")]
    pub poly_phase_current_amps: Option<PolyPhaseCurrentAmps>,
    #[serde(rename = "PolyPhaseVoltage", default, skip_serializing_if = "Option::is_none")]
    pub poly_phase_voltage: Option<PolyPhaseVoltage>,
    #[serde(rename = "PowerControlLocked", default, skip_serializing_if = "Option::is_none")]
    pub power_control_locked: Option<bool>,
    #[serde(rename = "PowerCycleDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub power_cycle_delay_seconds: Option<f64>,
    #[serde(rename = "PowerEnabled", default, skip_serializing_if = "Option::is_none")]
    pub power_enabled: Option<bool>,
    #[serde(rename = "PowerLoadPercent", default, skip_serializing_if = "Option::is_none")]
    pub power_load_percent: Option<SensorExcerpt>,
    #[serde(rename = "PowerOffDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub power_off_delay_seconds: Option<f64>,
    #[serde(rename = "PowerOnDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub power_on_delay_seconds: Option<f64>,
    #[serde(rename = "PowerRestoreDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub power_restore_delay_seconds: Option<f64>,
    #[serde(rename = "PowerRestorePolicy", default, skip_serializing_if = "Option::is_none")]
    pub power_restore_policy: Option<PowerRestorePolicy>,
    #[serde(rename = "PowerState", default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<PowerState>,
    #[serde(rename = "PowerStateInTransition", default, skip_serializing_if = "Option::is_none")]
    pub power_state_in_transition: Option<bool>,
    #[serde(rename = "PowerWatts", default, skip_serializing_if = "Option::is_none")]
    pub power_watts: Option<SensorPowerExcerpt>,
    #[serde(rename = "RatedCurrentAmps", default, skip_serializing_if = "Option::is_none")]
    pub rated_current_amps: Option<f64>,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "UserLabel", default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(rename = "Voltage", default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<SensorVoltageExcerpt>,
    #[serde(rename = "VoltageType", default, skip_serializing_if = "Option::is_none")]
    pub voltage_type: Option<InputType>,
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: OutletRefs,
}

impl_resource!(Outlet, "Outlet", writable: OUTLET_WRITABLE, refs: refs);

impl Outlet {
    /// Change the power state of the outlet.
    pub async fn power_control(&self, state: PowerControlState) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Outlet.PowerControl",
            &self.refs.actions.power_control.target,
            &json!({ "PowerState": state }),
        )
        .await
    }

    /// Reset accumulated readings of the outlet.
    pub async fn reset_metrics(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Outlet.ResetMetrics",
            &self.refs.actions.reset_metrics.target,
            &json!({}),
        )
        .await
    }

    /// The branch circuit that powers this outlet.
    pub async fn branch_circuit(&self) -> Result<Option<Circuit>> {
        get_optional(self.entity.client_opt(), self.refs.links.branch_circuit.as_str()).await
    }

    /// Circuits powered by this outlet.
    pub async fn distribution_circuits(&self) -> Result<Vec<Circuit>> {
        get_linked_objects(
            self.entity.client_opt(),
            self.refs.links.distribution_circuits.as_slice(),
        )
        .await
    }

    /// URIs of the chassis this outlet powers.
    pub fn chassis(&self) -> &[String] {
        self.refs.links.chassis.as_slice()
    }

    /// URIs of the power supplies connected to this outlet.
    pub fn power_supplies(&self) -> &[String] {
        self.refs.links.power_supplies.as_slice()
    }
}
