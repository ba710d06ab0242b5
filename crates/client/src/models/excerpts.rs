//! Sensor excerpts embedded in power and cooling resources.
//!
//! Every reading is tolerant of vendors that send numbers as strings.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::opt_f64_loose;

/// A generic sensor reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorExcerpt {
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "String::is_empty")]
    pub data_source_uri: String,
    #[serde(
        rename = "Reading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<f64>,
}

/// A current or voltage reading (the schema uses the same shape for both).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorVoltageExcerpt {
    #[serde(
        rename = "CrestFactor",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub crest_factor: Option<f64>,
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "String::is_empty")]
    pub data_source_uri: String,
    #[serde(
        rename = "Reading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<f64>,
    #[serde(
        rename = "THDPercent",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub thd_percent: Option<f64>,
}

/// A current reading.
pub type SensorCurrentExcerpt = SensorVoltageExcerpt;

/// A power reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorPowerExcerpt {
    #[serde(
        rename = "ApparentVA",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub apparent_va: Option<f64>,
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "String::is_empty")]
    pub data_source_uri: String,
    #[serde(
        rename = "PhaseAngleDegrees",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub phase_angle_degrees: Option<f64>,
    #[serde(
        rename = "PowerFactor",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub power_factor: Option<f64>,
    #[serde(
        rename = "ReactiveVAR",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reactive_var: Option<f64>,
    #[serde(
        rename = "Reading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<f64>,
}

/// An energy reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorEnergykWhExcerpt {
    #[serde(
        rename = "ApparentkVAh",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub apparent_kvah: Option<f64>,
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "String::is_empty")]
    pub data_source_uri: String,
    #[serde(
        rename = "LifetimeReading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub lifetime_reading: Option<f64>,
    #[serde(
        rename = "ReactivekVARh",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reactive_kvarh: Option<f64>,
    #[serde(
        rename = "Reading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<f64>,
    #[serde(rename = "SensorResetTime", default, skip_serializing_if = "Option::is_none")]
    pub sensor_reset_time: Option<String>,
}

/// A fan or pump speed reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorFanExcerpt {
    #[serde(rename = "DataSourceUri", default, skip_serializing_if = "String::is_empty")]
    pub data_source_uri: String,
    #[serde(
        rename = "Reading",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub reading: Option<f64>,
    #[serde(
        rename = "SpeedRPM",
        default,
        deserialize_with = "opt_f64_loose",
        skip_serializing_if = "Option::is_none"
    )]
    pub speed_rpm: Option<f64>,
}

/// Per-line current readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyPhaseCurrentAmps {
    #[serde(rename = "Line1", default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<SensorCurrentExcerpt>,
    #[serde(rename = "Line2", default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<SensorCurrentExcerpt>,
    #[serde(rename = "Line3", default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<SensorCurrentExcerpt>,
    #[serde(rename = "Neutral", default, skip_serializing_if = "Option::is_none")]
    pub neutral: Option<SensorCurrentExcerpt>,
}

/// Per-phase-pair readings, shared by the energy, power and voltage variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyPhase<T> {
    #[serde(rename = "Line1ToLine2", default, skip_serializing_if = "Option::is_none")]
    pub line1_to_line2: Option<T>,
    #[serde(rename = "Line1ToNeutral", default, skip_serializing_if = "Option::is_none")]
    pub line1_to_neutral: Option<T>,
    #[serde(rename = "Line2ToLine3", default, skip_serializing_if = "Option::is_none")]
    pub line2_to_line3: Option<T>,
    #[serde(rename = "Line2ToNeutral", default, skip_serializing_if = "Option::is_none")]
    pub line2_to_neutral: Option<T>,
    #[serde(rename = "Line3ToLine1", default, skip_serializing_if = "Option::is_none")]
    pub line3_to_line1: Option<T>,
    #[serde(rename = "Line3ToNeutral", default, skip_serializing_if = "Option::is_none")]
    pub line3_to_neutral: Option<T>,
}

pub type PolyPhaseEnergykWh = PolyPhase<SensorEnergykWhExcerpt>;
pub type PolyPhasePowerWatts = PolyPhase<SensorPowerExcerpt>;
pub type PolyPhaseVoltage = PolyPhase<SensorVoltageExcerpt>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_readings_are_coerced() {
        let power: SensorPowerExcerpt = serde_json::from_str(
            r#"{"Reading": "512.25", "PowerFactor": 0.98, "DataSourceUri": "/redfish/v1/Sensors/PDU1Power"}"#,
        )
        .unwrap();
        assert_eq!(power.reading, Some(512.25));
        assert_eq!(power.power_factor, Some(0.98));
        assert_eq!(power.data_source_uri, "/redfish/v1/Sensors/PDU1Power");
    }

    #[test]
    fn test_poly_phase_voltage() {
        let v: PolyPhaseVoltage = serde_json::from_str(
            r#"{"Line1ToNeutral": {"Reading": 118.2}, "Line2ToNeutral": {"Reading": "119.0"}}"#,
        )
        .unwrap();
        assert_eq!(v.line1_to_neutral.unwrap().reading, Some(118.2));
        assert_eq!(v.line2_to_neutral.unwrap().reading, Some(119.0));
        assert!(v.line3_to_neutral.is_none());
    }
}
