//! Error types shared by the driver, the polling loop and the sinks

use std::path::PathBuf;

/// Bus-level failure: NACK, timeout, missing device or unusable bus
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The bus device could not be opened
    #[error("Cannot open I2C bus {path}: {reason}")]
    Open { path: String, reason: String },

    /// Word read failed
    #[error("I2C read of register {register:#04x} at address {address:#04x} failed: {reason}")]
    Read {
        address: u8,
        register: u8,
        reason: String,
    },

    /// Word write failed
    #[error("I2C write of register {register:#04x} at address {address:#04x} failed: {reason}")]
    Write {
        address: u8,
        register: u8,
        reason: String,
    },
}

/// Invalid settings detected before the loop starts
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Shunt resistance must be a positive number of ohms, got {0}")]
    InvalidShuntResistance(f64),

    #[error("Maximum expected current must be a positive number of amps, got {0}")]
    InvalidMaxCurrent(f64),

    /// The computed calibration does not fit the 16-bit register or is zero
    #[error("Calibration value {0} is outside 1..=65535; check shunt resistance and maximum current")]
    CalibrationOutOfRange(f64),

    #[error("Voltage window is invalid: min {min} V must be below max {max} V")]
    InvalidVoltageWindow { min: f64, max: f64 },

    #[error("Icon voltage thresholds must be finite and ascending: {0:?}")]
    InvalidIconThresholds([f64; 7]),

    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("I2C address {0:#04x} is not a 7-bit address")]
    InvalidAddress(u8),
}

/// Failure to obtain a measurement
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Current and power need the calibration register to be programmed
    #[error("Sensor was built without calibration; {0} is unavailable")]
    NotCalibrated(&'static str),
}

/// Failure to deliver a status or percentage to a consumer
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The receiving side has gone away
    #[error("Status consumer disconnected")]
    Disconnected,
}
