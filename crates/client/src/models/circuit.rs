//! Electrical circuits of a power distribution unit.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::{get_optional, impl_resource};
use crate::collection::get_linked_objects;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{IndicatorLED, InputType, PowerControlState, PowerRestorePolicy, PowerState, Status};
use crate::models::excerpts::{
    PolyPhaseCurrentAmps, PolyPhaseEnergykWh, PolyPhasePowerWatts, PolyPhaseVoltage,
    SensorCurrentExcerpt, SensorEnergykWhExcerpt, SensorExcerpt, SensorPowerExcerpt,
    SensorVoltageExcerpt,
};
use crate::models::outlet::Outlet;
use crate::odata::{ActionTarget, Link, Links};
use crate::task::TaskMonitorInfo;

const CIRCUIT_WRITABLE: &[&str] = &[
    "ConfigurationLocked",
    "CriticalCircuit",
    "ElectricalConsumerNames",
    "ElectricalSourceManagerURI",
    "ElectricalSourceName",
    "IndicatorLED",
    "LocationIndicatorActive",
    "PowerControlLocked",
    "PowerCycleDelaySeconds",
    "PowerOffDelaySeconds",
    "PowerOnDelaySeconds",
    "PowerRestoreDelaySeconds",
    "PowerRestorePolicy",
    "UserLabel",
];

/// State of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BreakerState {
    Normal,
    Off,
    Tripped,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Position of a circuit in the distribution tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CircuitType {
    Mains,
    Branch,
    Subfeed,
    Feeder,
    Bus,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CircuitLinks {
    #[serde(rename = "BranchCircuit", default)]
    branch_circuit: Link,
    #[serde(rename = "DistributionCircuits", default)]
    distribution_circuits: Links,
    #[serde(rename = "Outlets", default)]
    outlets: Links,
    #[serde(rename = "PowerOutlet", default)]
    power_outlet: Link,
    #[serde(rename = "SourceCircuit", default)]
    source_circuit: Link,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CircuitActions {
    #[serde(rename = "#Circuit.BreakerControl", default)]
    breaker_control: ActionTarget,
    #[serde(rename = "#Circuit.PowerControl", default)]
    power_control: ActionTarget,
    #[serde(rename = "#Circuit.ResetMetrics", default)]
    reset_metrics: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct CircuitRefs {
    #[serde(rename = "Links", default)]
    links: CircuitLinks,
    #[serde(rename = "Actions", default)]
    actions: CircuitActions,
}

/// A mains, feeder, subfeed or branch circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "BreakerState", default, skip_serializing_if = "Option::is_none")]
    pub breaker_state: Option<BreakerState>,
    #[serde(rename = "CircuitType", default, skip_serializing_if = "Option::is_none")]
    pub circuit_type: Option<CircuitType>,
    #[serde(rename = "ConfigurationLocked", default, skip_serializing_if = "Option::is_none")]
    pub configuration_locked: Option<bool>,
    #[serde(rename = "CriticalCircuit", default, skip_serializing_if = "Option::is_none")]
    pub critical_circuit: Option<bool>,
    #[serde(rename = "CurrentAmps", default, skip_serializing_if = "Option::is_none")]
    pub current_amps: Option<SensorCurrentExcerpt>,
    #[serde(rename = "ElectricalConsumerNames", default)]
    pub electrical_consumer_names: Vec<String>,
    #[serde(rename = "ElectricalContext", default, skip_serializing_if = "Option::is_none")]
    pub electrical_context: Option<String>,
    #[serde(rename = "ElectricalSourceManagerURI", default, skip_serializing_if = "Option::is_none")]
    pub electrical_source_manager_uri: Option<String>,
    #[serde(rename = "ElectricalSourceName", default, skip_serializing_if = "Option::is_none")]
    pub electrical_source_name: Option<String>,
    #[serde(rename = "EnergykWh", default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<SensorEnergykWhExcerpt>,
    #[serde(rename = "FrequencyHz", default, skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<SensorExcerpt>,
    #[serde(rename = "IndicatorLED", default, skip_serializing_if = "Option::is_none")]
    pub indicator_led: Option<IndicatorLED>,
    #[serde(rename = "LocationIndicatorActive", default, skip_serializing_if = "Option::is_none")]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "NominalVoltage", default, skip_serializing_if = "Option::is_none")]
    pub nominal_voltage: Option<String>,
    #[serde(rename = "PhaseWiringType", default, skip_serializing_if = "Option::is_none")]
    pub phase_wiring_type: Option<String>,
    #[serde(rename = "PlugType", default, skip_serializing_if = "Option::is_none")]
    pub plug_type: Option<String>,
    #[serde(rename = "PolyPhaseCurrentAmps", default, skip_serializing_if = "Option::is_none")]
    pub poly_phase_current_amps: Option<PolyPhaseCurrentAmps>,
    #[serde(rename = "PolyPhaseEnergykWh", default, skip_serializing_if = "Option::is_none")]
    pub poly_phase_energy_kwh: Option<PolyPhaseEnergykWh>,
    #[serde(rename = "PolyPhasePowerWatts", default, skip_serializing_if = "Option::is_none")]
    pub poly_phase_power_watts: Option<PolyPhasePowerWatts>,
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
    #[serde(rename = "UnbalancedCurrentPercent", default, skip_serializing_if = "Option::is_none")]
    pub unbalanced_current_percent: Option<SensorExcerpt>,
    #[serde(rename = "UnbalancedVoltagePercent", default, skip_serializing_if = "Option::is_none")]
    pub unbalanced_voltage_percent: Option<SensorExcerpt>,
    #[serde(rename = "UserLabel", default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(rename = "Voltage", default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<SensorVoltageExcerpt>,
    #[serde(rename = "VoltageType", default, skip_serializing_if = "Option::is_none")]
    pub voltage_type: Option<InputType>,
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: CircuitRefs,
}

impl_resource!(Circuit, "Circuit", writable: CIRCUIT_WRITABLE, refs: refs);

impl Circuit {
    /// Open, close or cycle the circuit breaker.
    pub async fn breaker_control(&self, state: PowerControlState) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Circuit.BreakerControl",
            &self.refs.actions.breaker_control.target,
            &json!({ "PowerState": state }),
        )
        .await
    }

    /// Change the power state of the circuit.
    pub async fn power_control(&self, state: PowerControlState) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Circuit.PowerControl",
            &self.refs.actions.power_control.target,
            &json!({ "PowerState": state }),
        )
        .await
    }

    /// Reset accumulated readings (energy, peaks) of the circuit.
    pub async fn reset_metrics(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Circuit.ResetMetrics",
            &self.refs.actions.reset_metrics.target,
            &json!({}),
        )
        .await
    }

    /// The branch circuit this circuit belongs to.
    pub async fn branch_circuit(&self) -> Result<Option<Circuit>> {
        get_optional(self.entity.client_opt(), self.refs.links.branch_circuit.as_str()).await
    }

    /// The circuit that feeds this one.
    pub async fn source_circuit(&self) -> Result<Option<Circuit>> {
        get_optional(self.entity.client_opt(), self.refs.links.source_circuit.as_str()).await
    }

    /// Circuits powered by this circuit.
    pub async fn distribution_circuits(&self) -> Result<Vec<Circuit>> {
        get_linked_objects(
            self.entity.client_opt(),
            self.refs.links.distribution_circuits.as_slice(),
        )
        .await
    }

    /// Outlets powered by this circuit.
    pub async fn outlets(&self) -> Result<Vec<Outlet>> {
        get_linked_objects(self.entity.client_opt(), self.refs.links.outlets.as_slice()).await
    }

    /// The outlet that supplies this circuit.
    pub async fn power_outlet(&self) -> Result<Option<Outlet>> {
        get_optional(self.entity.client_opt(), self.refs.links.power_outlet.as_str()).await
    }

    pub fn supports_breaker_control(&self) -> bool {
        !self.refs.actions.breaker_control.target.is_empty()
    }

    pub fn supports_power_control(&self) -> bool {
        !self.refs.actions.power_control.target.is_empty()
    }
}
