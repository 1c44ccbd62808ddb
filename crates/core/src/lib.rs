//! ina219-battery-core: Core traits, errors and status policy.
//!
//! This crate contains the seams between the sensor driver, the polling
//! loop and whatever consumes the published status (the `BatterySensor`,
//! `StatusSink` and `PercentageSink` traits), the error taxonomy, and the
//! pure voltage -> percentage -> icon policy.

pub mod constants;
mod error;
mod policy;
mod sensor;
mod sink;

pub use constants::{DEFAULT_POLL_INTERVAL, PERCENT_ICON_THRESHOLDS};
pub use error::{ConfigurationError, SensorError, SinkError, TransportError};
pub use policy::{evaluate, icon_for_percentage, icon_for_voltage, StatusPolicy};
pub use sensor::BatterySensor;
pub use sink::{PercentageSink, StatusSink};

// Re-export types used in trait signatures for convenience
pub use ina219_battery_types::{
    BatteryConfig, BatteryIcon, IconPolicy, Reading, StatusEvent, StatusResult,
};
