//! Raw sensor readings in physical units.

use chrono::{DateTime, Local};

/// Bus voltage register decoded together with its status flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusVoltageSample {
    pub volts: f64,
    /// CNVR: a conversion finished since the last power register read
    pub conversion_ready: bool,
    /// OVF: power or current calculation overflowed
    pub math_overflow: bool,
}

/// One sample taken by a battery sensor. Produced fresh on every poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub bus_voltage_volts: f64,
    pub shunt_voltage_volts: Option<f64>,
    pub current_amps: Option<f64>,
    pub power_watts: Option<f64>,
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// Reading holding only a bus voltage, stamped now
    pub fn bus_voltage(volts: f64) -> Self {
        Self {
            bus_voltage_volts: volts,
            shunt_voltage_volts: None,
            current_amps: None,
            power_watts: None,
            timestamp: Local::now(),
        }
    }
}
