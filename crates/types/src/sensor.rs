//! Sensor hardware configuration.

use serde::{Deserialize, Serialize};

fn default_i2c_address() -> u8 {
    0x41
}

fn default_bus_id() -> u8 {
    1 // Raspberry Pi header bus
}

fn default_shunt_resistance_ohms() -> f64 {
    0.1
}

fn default_max_expected_amps() -> f64 {
    3.2
}

fn default_calibrate() -> bool {
    true
}

/// Configuration for an INA219 sensor.
///
/// Immutable once a driver is built from it; the calibration constant is
/// derived from `shunt_resistance_ohms` and `max_expected_amps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// 7-bit device address (0x40..=0x4F depending on A0/A1 strapping)
    #[serde(default = "default_i2c_address")]
    pub i2c_address: u8,
    /// Linux bus number, opened as /dev/i2c-<bus_id>
    #[serde(default = "default_bus_id")]
    pub bus_id: u8,
    #[serde(default = "default_shunt_resistance_ohms")]
    pub shunt_resistance_ohms: f64,
    #[serde(default = "default_max_expected_amps")]
    pub max_expected_amps: f64,
    /// Program configuration and calibration registers at startup.
    /// When false only the bus voltage register is read.
    #[serde(default = "default_calibrate")]
    pub calibrate: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_address: default_i2c_address(),
            bus_id: default_bus_id(),
            shunt_resistance_ohms: default_shunt_resistance_ohms(),
            max_expected_amps: default_max_expected_amps(),
            calibrate: default_calibrate(),
        }
    }
}
