//! Groups of outlets controlled together.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::impl_resource;
use crate::collection::get_linked_objects;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{PowerControlState, PowerRestorePolicy, PowerState, Status};
use crate::models::excerpts::{SensorEnergykWhExcerpt, SensorPowerExcerpt};
use crate::models::outlet::Outlet;
use crate::odata::{ActionTarget, Links};
use crate::task::TaskMonitorInfo;

const OUTLET_GROUP_WRITABLE: &[&str] = &[
    "ConfigurationLocked",
    "CreatedBy",
    "PowerControlLocked",
    "PowerCycleDelaySeconds",
    "PowerOffDelaySeconds",
    "PowerOnDelaySeconds",
    "PowerRestoreDelaySeconds",
    "PowerRestorePolicy",
];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletGroupLinks {
    #[serde(rename = "Outlets", default)]
    outlets: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletGroupActions {
    #[serde(rename = "#OutletGroup.PowerControl", default)]
    power_control: ActionTarget,
    #[serde(rename = "#OutletGroup.ResetMetrics", default)]
    reset_metrics: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct OutletGroupRefs {
    #[serde(rename = "Links", default)]
    links: OutletGroupLinks,
    #[serde(rename = "Actions", default)]
    actions: OutletGroupActions,
}

/// A set of outlets with shared power control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutletGroup {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "ConfigurationLocked", default, skip_serializing_if = "Option::is_none")]
    pub configuration_locked: Option<bool>,
    #[serde(rename = "CreatedBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "EnergykWh", default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<SensorEnergykWhExcerpt>,
    #[serde(rename = "PowerControlLocked", default, skip_serializing_if = "Option::is_none")]
    pub power_control_locked: Option<bool>,
    #[serde(rename = "PowerCycleDelaySeconds", default, skip_serializing_if = "Option::is_none")]
    pub power_cycle_delay_seconds: Option<f64>,
    #[serde(rename = "PowerEnabled", default, skip_serializing_if = "Option::is_none")]
    pub power_enabled: Option<bool>,
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
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Oem", default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: OutletGroupRefs,
}

impl_resource!(OutletGroup, "OutletGroup", writable: OUTLET_GROUP_WRITABLE, refs: refs);

impl OutletGroup {
    /// Change the power state of every outlet in the group.
    pub async fn power_control(&self, state: PowerControlState) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#OutletGroup.PowerControl",
            &self.refs.actions.power_control.target,
            &json!({ "PowerState": state }),
        )
        .await
    }

    /// Reset accumulated readings of the group.
    pub async fn reset_metrics(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#OutletGroup.ResetMetrics",
            &self.refs.actions.reset_metrics.target,
            &json!({}),
        )
        .await
    }

    /// The outlets in this group.
    pub async fn outlets(&self) -> Result<Vec<Outlet>> {
        get_linked_objects(self.entity.client_opt(), self.refs.links.outlets.as_slice()).await
    }
}
