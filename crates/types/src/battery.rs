//! Battery pack configuration: voltage window and icon policy.

use serde::{Deserialize, Serialize};

fn default_min_voltage() -> f64 {
    9.0 // 3S Li-ion, empty
}

fn default_max_voltage() -> f64 {
    12.6 // 3S Li-ion, full
}

/// Voltage cut points for the legacy icon policy (3S Li-ion resting voltages)
pub fn default_voltage_thresholds() -> [f64; 7] {
    [10.5, 10.8, 11.1, 11.4, 11.7, 12.0, 12.3]
}

/// How a reading is turned into a charge-level icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IconPolicy {
    /// Threshold on the computed percentage. Independent of the pack voltage.
    #[default]
    Percentage,
    /// Threshold on raw bus voltage. Cut points must be ascending; icon N is
    /// chosen when the voltage reaches `thresholds[N - 1]` but not `thresholds[N]`.
    LegacyVoltage {
        #[serde(default = "default_voltage_thresholds")]
        thresholds: [f64; 7],
    },
}

/// Battery pack description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryConfig {
    /// Voltage reported as 0%
    #[serde(default = "default_min_voltage")]
    pub min_voltage: f64,
    /// Voltage reported as 100%
    #[serde(default = "default_max_voltage")]
    pub max_voltage: f64,
    #[serde(default)]
    pub icon_policy: IconPolicy,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            min_voltage: default_min_voltage(),
            max_voltage: default_max_voltage(),
            icon_policy: IconPolicy::default(),
        }
    }
}
