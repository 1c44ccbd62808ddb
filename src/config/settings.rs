//! Application configuration

use anyhow::Result;
use ina219_battery_core::{ConfigurationError, StatusPolicy};
use ina219_battery_types::{BatteryConfig, SensorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::defaults::{
    default_fallback_path, default_percentage_file_enabled, default_percentage_path,
    default_poll_interval_ms, default_version,
};

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    /// Sensor wiring and calibration inputs
    #[serde(default)]
    pub sensor: SensorConfig,
    /// Voltage window and icon policy
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Time between polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Where the whole percentage is written
    #[serde(default)]
    pub percentage_file: PercentageFileConfig,
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "ina219-battery", "ina219-battery")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Build the status policy, rejecting an unusable voltage window
    pub fn status_policy(&self) -> Result<StatusPolicy, ConfigurationError> {
        StatusPolicy::from_config(&self.battery)
    }

    /// Check everything that can be checked without touching the bus.
    ///
    /// Calibration inputs are validated again by the driver itself.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigurationError::ZeroPollInterval);
        }
        if self.sensor.i2c_address > 0x7F {
            return Err(ConfigurationError::InvalidAddress(self.sensor.i2c_address));
        }
        if self.sensor.calibrate {
            let shunt = self.sensor.shunt_resistance_ohms;
            if !shunt.is_finite() || shunt <= 0.0 {
                return Err(ConfigurationError::InvalidShuntResistance(shunt));
            }
            let amps = self.sensor.max_expected_amps;
            if !amps.is_finite() || amps <= 0.0 {
                return Err(ConfigurationError::InvalidMaxCurrent(amps));
            }
        }
        self.status_policy().map(|_| ())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            sensor: SensorConfig::default(),
            battery: BatteryConfig::default(),
            poll_interval_ms: default_poll_interval_ms(),
            percentage_file: PercentageFileConfig::default(),
        }
    }
}

/// Percentage file output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageFileConfig {
    #[serde(default = "default_percentage_file_enabled")]
    pub enabled: bool,
    /// Primary target, usually a sysfs capacity attribute
    #[serde(default = "default_percentage_path")]
    pub path: PathBuf,
    /// Used when the primary target is missing or not writable
    #[serde(default = "default_fallback_path")]
    pub fallback_path: Option<PathBuf>,
}

impl Default for PercentageFileConfig {
    fn default() -> Self {
        Self {
            enabled: default_percentage_file_enabled(),
            path: default_percentage_path(),
            fallback_path: default_fallback_path(),
        }
    }
}
