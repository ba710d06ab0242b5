//! Sensors: a single reading with thresholds and statistics.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::action::post_action;
use crate::codec::impl_resource;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{InputType, Status};
use crate::odata::{ActionTarget, Links};
use crate::serde_helpers::opt_f64_loose;
use crate::task::TaskMonitorInfo;

const SENSOR_WRITABLE: &[&str] = &[
    "AveragingInterval",
    "Calibration",
    "CalibrationTime",
    "Enabled",
    "PhysicalContext",
    "PhysicalSubContext",
    "UserLabel",
];

/// How a sensor produces its reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImplementationType {
    PhysicalSensor,
    Synthesized,
    Reported,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReadingBasisType {
    Zero,
    Delta,
    Headroom,
    #[serde(other)]
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThresholdActivation {
    Increasing,
    Decreasing,
    Either,
    Disabled,
    #[serde(other)]
    #[default]
    Unknown,
}

/// One threshold of a sensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Threshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation: Option<ThresholdActivation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dwell_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hysteresis_duration: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub hysteresis_reading: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Thresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_caution: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_caution_user: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_critical: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_critical_user: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_fatal: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_caution: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_caution_user: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_critical: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_critical_user: Option<Threshold>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_fatal: Option<Threshold>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SensorLinks {
    #[serde(rename = "AssociatedControls", default)]
    associated_controls: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SensorActions {
    #[serde(rename = "#Sensor.ResetMetrics", default)]
    reset_metrics: ActionTarget,
    #[serde(rename = "#Sensor.ResetToDefaults", default)]
    reset_to_defaults: ActionTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct SensorRefs {
    #[serde(rename = "RelatedItem", default)]
    related_item: Links,
    #[serde(rename = "Links", default)]
    links: SensorLinks,
    #[serde(rename = "Actions", default)]
    actions: SensorActions,
}

/// A sensor resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sensor {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(rename = "ApparentVA", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub apparent_va: Option<f64>,
    #[serde(rename = "ApparentkVAh", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub apparent_kvah: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub average_reading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub averaging_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub averaging_interval_achieved: Option<bool>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub calibration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub crest_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<ImplementationType>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lifetime_reading: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub load_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lowest_reading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowest_reading_time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_allowable_operating_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_allowable_operating_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub peak_reading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_reading_time: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub phase_angle_degrees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_sub_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(rename = "ReactiveVAR", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reactive_var: Option<f64>,
    #[serde(rename = "ReactivekVARh", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reactive_kvarh: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_basis: Option<ReadingBasisType>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading_range_max: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading_range_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>,
    /// Physical quantity measured, for example `Temperature` or `Power`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_units: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub sensing_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensing_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_reset_time: Option<String>,
    #[serde(rename = "SpeedRPM", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub speed_rpm: Option<f64>,
    #[serde(default)]
    pub status: Status,
    #[serde(rename = "THDPercent", default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub thd_percent: Option<f64>,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_type: Option<InputType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: SensorRefs,
}

impl_resource!(Sensor, "Sensor", writable: SENSOR_WRITABLE, refs: refs);

impl Sensor {
    /// Reset peak, lowest and average statistics.
    pub async fn reset_metrics(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Sensor.ResetMetrics",
            &self.refs.actions.reset_metrics.target,
            &json!({}),
        )
        .await
    }

    /// Restore thresholds and calibration to their factory values.
    pub async fn reset_to_defaults(&self) -> Result<Option<TaskMonitorInfo>> {
        post_action(
            &self.entity,
            "#Sensor.ResetToDefaults",
            &self.refs.actions.reset_to_defaults.target,
            &json!({}),
        )
        .await
    }

    /// URIs of the controls that use this sensor.
    pub fn associated_controls(&self) -> &[String] {
        self.refs.links.associated_controls.as_slice()
    }

    /// URIs of the resources this sensor measures.
    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}
