//! Status values published once per poll.

use crate::icon::BatteryIcon;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of evaluating one voltage reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusResult {
    pub icon: BatteryIcon,
    /// Bus voltage in volts
    pub voltage: f64,
    /// State of charge, always within [0, 100]
    pub percentage: f64,
}

impl StatusResult {
    /// Percentage as a whole number for integer-only consumers.
    ///
    /// Truncates toward zero after clamping, so 99.9% reports 99.
    pub fn whole_percent(&self) -> u8 {
        if self.percentage.is_nan() {
            return 0;
        }
        self.percentage.clamp(0.0, 100.0) as u8
    }
}

impl fmt::Display for StatusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}% ({:.2}V)", self.percentage, self.voltage)
    }
}

/// Outcome of a single poll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusEvent {
    /// The sensor answered and the reading was evaluated
    Measured(StatusResult),
    /// The sensor could not be read this cycle
    ReadFailed,
}

impl StatusEvent {
    pub fn icon(&self) -> BatteryIcon {
        match self {
            StatusEvent::Measured(result) => result.icon,
            StatusEvent::ReadFailed => BatteryIcon::Alert,
        }
    }

    pub fn result(&self) -> Option<&StatusResult> {
        match self {
            StatusEvent::Measured(result) => Some(result),
            StatusEvent::ReadFailed => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StatusEvent::ReadFailed)
    }

    /// `(icon_index, voltage, percentage)` as emitted by the old tray signal.
    ///
    /// A failed read maps to the `(9, 0.0, 0.0)` sentinel.
    pub fn legacy_triple(&self) -> (u8, f64, f64) {
        match self {
            StatusEvent::Measured(result) => (result.icon.index(), result.voltage, result.percentage),
            StatusEvent::ReadFailed => (BatteryIcon::Alert.index(), 0.0, 0.0),
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Measured(result) => write!(f, "Icon: {} => {}", result.icon, result),
            StatusEvent::ReadFailed => write!(f, "Icon: {} => sensor read failed", BatteryIcon::Alert),
        }
    }
}
