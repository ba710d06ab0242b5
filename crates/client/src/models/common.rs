//! Common types shared across Redfish resource models.
//!
//! This module contains enums and embedded objects used by multiple
//! resource modules. It does NOT contain resource types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::odata::Links;
use crate::serde_helpers::member_id;

/// Overall health of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Health {
    OK,
    Warning,
    Critical,
    /// Unknown or unrecognized health value.
    #[serde(other)]
    #[default]
    Unknown,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OK => write!(f, "OK"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Known state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum State {
    Enabled,
    Disabled,
    StandbyOffline,
    StandbySpare,
    InTest,
    Starting,
    Absent,
    UnavailableOffline,
    Deferring,
    Quiesced,
    Updating,
    Qualified,
    Degraded,
    #[serde(other)]
    #[default]
    Unknown,
}

/// The `Status` object carried by most resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(rename = "Health", default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
    #[serde(rename = "HealthRollup", default, skip_serializing_if = "Option::is_none")]
    pub health_rollup: Option<Health>,
}

/// State of an indicator LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IndicatorLED {
    Lit,
    Blinking,
    Off,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Power state reported by a circuit, outlet or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerState {
    On,
    Off,
    PoweringOn,
    PoweringOff,
    Paused,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Power state requested through a `PowerControl` or `BreakerControl` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerControlState {
    On,
    Off,
    PowerCycle,
}

/// Desired power state after power is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PowerRestorePolicy {
    AlwaysOn,
    AlwaysOff,
    LastState,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Electrical input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputType {
    AC,
    DC,
    #[serde(other)]
    #[default]
    Unknown,
}

/// Redundancy group embedded in legacy `Power` and `Thermal` documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Redundancy {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Mode", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(rename = "MaxNumSupported", default, skip_serializing_if = "Option::is_none")]
    pub max_num_supported: Option<u32>,
    #[serde(rename = "MinNumNeeded", default, skip_serializing_if = "Option::is_none")]
    pub min_num_needed: Option<u32>,
    #[serde(rename = "RedundancyEnabled", default, skip_serializing_if = "Option::is_none")]
    pub redundancy_enabled: Option<bool>,
    #[serde(rename = "RedundancySet", default)]
    pub redundancy_set: Links,
    #[serde(rename = "Status", default)]
    pub status: Status,
}

/// An entry of `@Message.ExtendedInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "MessageArgs", default, skip_serializing_if = "Vec::is_empty")]
    pub message_args: Vec<String>,
    #[serde(rename = "MessageSeverity", default, skip_serializing_if = "Option::is_none")]
    pub message_severity: Option<Health>,
    #[serde(rename = "Resolution", default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(rename = "RelatedProperties", default, skip_serializing_if = "Vec::is_empty")]
    pub related_properties: Vec<String>,
}
