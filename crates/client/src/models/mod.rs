//! Typed Redfish resources.
//!
//! Each submodule holds one schema family. Every resource type implements
//! [`Resource`](crate::codec::Resource): it decodes from a service document,
//! keeps the bytes it was decoded from, exposes its links and actions through
//! methods, and PATCHes only the writable properties that changed.
//!
//! Links to resource types outside this catalog (chassis, managers,
//! facilities, ports, systems) are returned as URIs.

pub mod cable;
pub mod circuit;
pub mod common;
pub mod composition;
pub mod cooling;
pub mod excerpts;
pub mod leak_detection;
pub mod outlet;
pub mod outlet_group;
pub mod power;
pub mod power_distribution;
pub mod sensor;
pub mod task;
pub mod thermal;

pub use cable::{Cable, CableClass, CableStatus};
pub use circuit::{BreakerState, Circuit, CircuitType};
pub use common::{
    Health, IndicatorLED, InputType, Message, PowerControlState, PowerRestorePolicy, PowerState,
    Redundancy, State, Status,
};
pub use composition::{
    ComposeOutcome, ComposeRequest, ComposeRequestType, ComposeResponse, CompositionService,
    CompositionState, CompositionStatus, ExternalAccessibility, Identifier, PoolType,
    ResourceBlock, ResourceBlockType, Zone, ZoneType,
};
pub use cooling::{Coolant, CoolingEquipmentType, CoolingLoop, CoolingUnit, CoolingUnitMode};
pub use excerpts::{
    PolyPhase, PolyPhaseCurrentAmps, PolyPhaseEnergykWh, PolyPhasePowerWatts, PolyPhaseVoltage,
    SensorCurrentExcerpt, SensorEnergykWhExcerpt, SensorExcerpt, SensorFanExcerpt,
    SensorPowerExcerpt, SensorVoltageExcerpt,
};
pub use leak_detection::{
    LeakDetection, LeakDetector, LeakDetectorExcerpt, LeakDetectorGroup, LeakDetectorType,
    ReactionType,
};
pub use outlet::Outlet;
pub use outlet_group::OutletGroup;
pub use power::{
    InputRange, Power, PowerControl, PowerLimit, PowerLimitException, PowerMetrics, PowerSupply,
    PowerSupplyType, ResetType, Voltage,
};
pub use power_distribution::{
    PowerDistribution, PowerEquipmentType, TransferConfiguration, TransferCriteria,
    TransferSensitivity,
};
pub use sensor::{
    ImplementationType, ReadingBasisType, Sensor, Threshold, ThresholdActivation, Thresholds,
};
pub use task::{Payload, Task, TaskState};
pub use thermal::{Temperature, Thermal, ThermalFan};
