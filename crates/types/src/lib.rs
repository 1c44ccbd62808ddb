//! ina219-battery-types: Shared data types for the ina219-battery monitor.
//!
//! This crate contains pure data types (icons, status results, readings and
//! sensor/battery configuration) shared by every crate in the workspace.
//! Nothing here touches the bus or the filesystem.

pub mod battery;
pub mod icon;
pub mod reading;
pub mod sensor;
pub mod status;

// Re-export commonly used types at the crate root for convenience
pub use battery::{BatteryConfig, IconPolicy};
pub use icon::BatteryIcon;
pub use reading::{BusVoltageSample, Reading};
pub use sensor::SensorConfig;
pub use status::{StatusEvent, StatusResult};
