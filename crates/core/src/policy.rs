//! Voltage -> percentage -> icon mapping
//!
//! Everything here is pure: no I/O, no clocks, no shared state.

use crate::constants::PERCENT_ICON_THRESHOLDS;
use crate::error::ConfigurationError;
use ina219_battery_types::{BatteryConfig, BatteryIcon, IconPolicy, StatusResult};

/// Evaluate a voltage against a linear `[min_voltage, max_voltage]` window
/// using the percentage icon table.
pub fn evaluate(voltage: f64, min_voltage: f64, max_voltage: f64) -> StatusResult {
    let percentage = percentage_of(voltage, min_voltage, max_voltage);
    StatusResult {
        icon: icon_for_percentage(percentage),
        voltage,
        percentage,
    }
}

/// Charge-level icon for a percentage.
///
/// | percentage | icon |
/// |------------|------|
/// | < 15       | 0    |
/// | 15 - 29    | 1    |
/// | 30 - 44    | 2    |
/// | 45 - 59    | 3    |
/// | 60 - 74    | 4    |
/// | 75 - 84    | 5    |
/// | 85 - 94    | 6    |
/// | >= 95      | 7    |
pub fn icon_for_percentage(percentage: f64) -> BatteryIcon {
    bucket(percentage, &PERCENT_ICON_THRESHOLDS)
}

/// Charge-level icon for a raw voltage using explicit cut points.
///
/// This is the older thresholding scheme; its boundaries do not move with
/// the configured voltage window, so the same reading can map to a
/// different icon than [`icon_for_percentage`] would pick.
pub fn icon_for_voltage(voltage: f64, thresholds: &[f64; 7]) -> BatteryIcon {
    bucket(voltage, thresholds)
}

/// Linear interpolation clamped to [0, 100]. NaN input reads as empty.
fn percentage_of(voltage: f64, min_voltage: f64, max_voltage: f64) -> f64 {
    let span = max_voltage - min_voltage;
    if !(span > 0.0) {
        // Degenerate window: a step at max_voltage
        return if voltage >= max_voltage { 100.0 } else { 0.0 };
    }

    let raw = (voltage - min_voltage) / span * 100.0;
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

fn bucket(value: f64, ascending_cuts: &[f64; 7]) -> BatteryIcon {
    let level = ascending_cuts.iter().take_while(|&&cut| value >= cut).count();
    BatteryIcon::LEVELS[level]
}

/// Validated status policy for one battery pack
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPolicy {
    min_voltage: f64,
    max_voltage: f64,
    icon_policy: IconPolicy,
}

impl StatusPolicy {
    pub fn new(
        min_voltage: f64,
        max_voltage: f64,
        icon_policy: IconPolicy,
    ) -> Result<Self, ConfigurationError> {
        if !min_voltage.is_finite() || !max_voltage.is_finite() || min_voltage >= max_voltage {
            return Err(ConfigurationError::InvalidVoltageWindow {
                min: min_voltage,
                max: max_voltage,
            });
        }

        if let IconPolicy::LegacyVoltage { thresholds } = &icon_policy {
            let finite = thresholds.iter().all(|t| t.is_finite());
            let ascending = thresholds.windows(2).all(|pair| pair[0] < pair[1]);
            if !finite || !ascending {
                return Err(ConfigurationError::InvalidIconThresholds(*thresholds));
            }
            log::info!("Using legacy voltage icon thresholds {:?}", thresholds);
        }

        Ok(Self {
            min_voltage,
            max_voltage,
            icon_policy,
        })
    }

    pub fn from_config(config: &BatteryConfig) -> Result<Self, ConfigurationError> {
        Self::new(config.min_voltage, config.max_voltage, config.icon_policy.clone())
    }

    pub fn min_voltage(&self) -> f64 {
        self.min_voltage
    }

    pub fn max_voltage(&self) -> f64 {
        self.max_voltage
    }

    pub fn icon_policy(&self) -> &IconPolicy {
        &self.icon_policy
    }

    pub fn evaluate(&self, voltage: f64) -> StatusResult {
        let percentage = percentage_of(voltage, self.min_voltage, self.max_voltage);
        let icon = match &self.icon_policy {
            IconPolicy::Percentage => icon_for_percentage(percentage),
            IconPolicy::LegacyVoltage { thresholds } => icon_for_voltage(voltage, thresholds),
        };
        StatusResult {
            icon,
            voltage,
            percentage,
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        let battery = BatteryConfig::default();
        Self {
            min_voltage: battery.min_voltage,
            max_voltage: battery.max_voltage,
            icon_policy: battery.icon_policy,
        }
    }
}
