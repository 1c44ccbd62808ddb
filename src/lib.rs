//! ina219-battery: battery state-of-charge monitor for INA219 sensors
//!
//! This library ties the workspace crates together:
//! - `config`: on-disk application configuration
//! - `core`: the polling loop and its halt handle
//! - `sinks`: log, percentage-file and watch-channel consumers

pub mod config;
pub mod core;
pub mod sinks;

// Re-export commonly used types
pub use crate::config::AppConfig;
pub use crate::core::{HaltHandle, LoopState, PollStats, PollingLoop};
pub use ina219_battery_core::{BatterySensor, StatusPolicy};
pub use ina219_battery_types::{BatteryIcon, StatusEvent, StatusResult};
