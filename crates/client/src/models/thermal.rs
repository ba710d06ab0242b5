//! Legacy `Thermal` resource with embedded fans and temperature sensors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{Resource, attach_embedded, bind_embedded, impl_resource};
use crate::entity::Entity;
use crate::models::common::{IndicatorLED, Redundancy, Status};
use crate::odata::{Link, Links};
use crate::serde_helpers::{member_id, opt_f64_loose};
use crate::transport::SharedTransport;

const THERMAL_WRITABLE: &[&str] = &["Fans", "Temperatures"];

const TEMPERATURE_WRITABLE: &[&str] = &["LowerThresholdUser", "UpperThresholdUser"];

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FanRefs {
    #[serde(default)]
    assembly: Link,
    #[serde(default)]
    redundancy: Links,
    #[serde(default)]
    related_item: Links,
}

/// A fan listed in the legacy `Thermal` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThermalFan {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_pluggable: Option<bool>,
    #[serde(rename = "IndicatorLED", default, skip_serializing_if = "Option::is_none")]
    pub indicator_led: Option<IndicatorLED>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_non_critical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_reading_range: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_reading_range: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading: Option<f64>,
    /// `RPM` or `Percent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_non_critical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: FanRefs,
}

impl_resource!(ThermalFan, "ThermalFan", writable: &["IndicatorLED"], refs: refs);

impl ThermalFan {
    pub fn assembly(&self) -> &str {
        self.refs.assembly.as_str()
    }

    pub fn redundancy(&self) -> &[String] {
        self.refs.redundancy.as_slice()
    }

    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct TemperatureRefs {
    #[serde(rename = "RelatedItem", default)]
    related_item: Links,
}

/// A temperature sensor listed in the legacy `Thermal` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "MemberId", default, deserialize_with = "member_id")]
    pub member_id: String,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub adjusted_max_allowable_operating_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub adjusted_min_allowable_operating_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_physical_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub delta_reading_celsius: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_non_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub lower_threshold_user: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_allowable_operating_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub max_reading_range_temp: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_allowable_operating_value: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub min_reading_range_temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_context: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub reading_celsius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_fatal: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_non_critical: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_loose", skip_serializing_if = "Option::is_none")]
    pub upper_threshold_user: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,

    #[serde(skip)]
    refs: TemperatureRefs,
}

impl_resource!(Temperature, "Temperature", writable: TEMPERATURE_WRITABLE, refs: refs);

impl Temperature {
    pub fn related_item(&self) -> &[String] {
        self.refs.related_item.as_slice()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ThermalShadow {
    #[serde(default)]
    fans: Vec<Value>,
    #[serde(default)]
    temperatures: Vec<Value>,
}

/// Legacy thermal resource of a chassis.
///
/// `Fans` and `Temperatures` are writable as whole arrays on the parent; each
/// member can also be updated on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Thermal {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fans: Vec<ThermalFan>,
    #[serde(default)]
    pub redundancy: Vec<Redundancy>,
    #[serde(default)]
    pub temperatures: Vec<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem: Option<Value>,
}

impl Resource for Thermal {
    const TYPE_NAME: &'static str = "Thermal";
    const WRITABLE: &'static [&'static str] = THERMAL_WRITABLE;

    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn capture_refs(&mut self, raw: &[u8]) -> serde_json::Result<()> {
        let shadow: ThermalShadow = serde_json::from_slice(raw)?;
        attach_embedded(&mut self.fans, &shadow.fans)?;
        attach_embedded(&mut self.temperatures, &shadow.temperatures)
    }

    fn bind(&mut self, client: SharedTransport) {
        bind_embedded(&mut self.fans, &client);
        bind_embedded(&mut self.temperatures, &client);
        self.entity.set_client(client);
    }
}

impl Thermal {
    /// The fan with the given `MemberId`.
    pub fn fan(&self, member_id: &str) -> Option<&ThermalFan> {
        self.fans.iter().find(|fan| fan.member_id == member_id)
    }

    pub fn fan_mut(&mut self, member_id: &str) -> Option<&mut ThermalFan> {
        self.fans.iter_mut().find(|fan| fan.member_id == member_id)
    }
}
