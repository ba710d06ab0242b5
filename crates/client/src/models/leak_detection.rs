//! Leak detection subsystem of a cooling unit and its detectors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::impl_resource;
use crate::collection::get_linked_collection;
use crate::entity::Entity;
use crate::error::Result;
use crate::models::common::{Health, Status};
use crate::odata::Link;

const LEAK_DETECTOR_WRITABLE: &[&str] = &[
    "CriticalReactionType",
    "Enabled",
    "ReactionDelaySeconds",
    "UserLabel",
    "WarningReactionType",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LeakDetectorType {
    Moisture,
    FloatSwitch,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Automatic response to a detected leak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReactionType {
    None,
    ForceOff,
    GracefulShutdown,
    #[serde(other)]
    #[default]
    Unknown,
}

/// State of a single detector as reported inside a detector group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetectorExcerpt {
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "Option::is_none")]
    pub data_source_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_state: Option<Health>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_sub_context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetectorGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_percent: Option<Value>,
    #[serde(default)]
    pub detectors: Vec<LeakDetectorExcerpt>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct LeakDetectionRefs {
    #[serde(rename = "LeakDetectors", default)]
    leak_detectors: Link,
}

/// Leak detection summary of a cooling unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetection {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub leak_detector_groups: Vec<LeakDetectorGroup>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: LeakDetectionRefs,
}

impl_resource!(LeakDetection, "LeakDetection", refs: refs);

impl LeakDetection {
    pub async fn leak_detectors(&self) -> Result<Vec<LeakDetector>> {
        get_linked_collection(self.entity.client_opt(), self.refs.leak_detectors.as_str()).await
    }
}

/// A single leak detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeakDetector {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_reaction_type: Option<ReactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_state: Option<Health>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leak_detector_type: Option<LeakDetectorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_sub_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_delay_seconds: Option<i64>,
    #[serde(rename = "SKU", default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensing_frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_number: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_reaction_type: Option<ReactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,
}

impl_resource!(LeakDetector, "LeakDetector", writable: LEAK_DETECTOR_WRITABLE);
