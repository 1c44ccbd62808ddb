//! Battery display icons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Icon shown by the presentation layer.
///
/// The discriminant is the icon index consumers use to pick an image.
/// `Empty`..=`Full` are produced by the status policy, `Alert` marks a failed
/// sensor read and `Unknown` is the state before the first sample completes.
/// `Charging` is reserved; nothing in this workspace emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatteryIcon {
    Empty = 0,
    Low = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
    Level5 = 5,
    Level6 = 6,
    Full = 7,
    Charging = 8,
    Alert = 9,
    #[default]
    Unknown = 10,
}

impl BatteryIcon {
    /// Every icon, ordered by index
    pub const ALL: [BatteryIcon; 11] = [
        BatteryIcon::Empty,
        BatteryIcon::Low,
        BatteryIcon::Level2,
        BatteryIcon::Level3,
        BatteryIcon::Level4,
        BatteryIcon::Level5,
        BatteryIcon::Level6,
        BatteryIcon::Full,
        BatteryIcon::Charging,
        BatteryIcon::Alert,
        BatteryIcon::Unknown,
    ];

    /// Charge-level icons in ascending order
    pub const LEVELS: [BatteryIcon; 8] = [
        BatteryIcon::Empty,
        BatteryIcon::Low,
        BatteryIcon::Level2,
        BatteryIcon::Level3,
        BatteryIcon::Level4,
        BatteryIcon::Level5,
        BatteryIcon::Level6,
        BatteryIcon::Full,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Short label used in tooltips and log lines
    pub fn name(self) -> &'static str {
        match self {
            BatteryIcon::Empty => "Empty",
            BatteryIcon::Low => "Low",
            BatteryIcon::Level2 => "29%",
            BatteryIcon::Level3 => "43%",
            BatteryIcon::Level4 => "57%",
            BatteryIcon::Level5 => "71%",
            BatteryIcon::Level6 => "86%",
            BatteryIcon::Full => "Full",
            BatteryIcon::Charging => "Charging",
            BatteryIcon::Alert => "Alert",
            BatteryIcon::Unknown => "Unknown",
        }
    }

    /// Image file name a tray front end is expected to ship for this icon
    pub fn file_name(self) -> &'static str {
        match self {
            BatteryIcon::Empty => "battery_0.png",
            BatteryIcon::Low => "battery_1.png",
            BatteryIcon::Level2 => "battery_2.png",
            BatteryIcon::Level3 => "battery_3.png",
            BatteryIcon::Level4 => "battery_4.png",
            BatteryIcon::Level5 => "battery_5.png",
            BatteryIcon::Level6 => "battery_6.png",
            BatteryIcon::Full => "battery_7.png",
            BatteryIcon::Charging => "battery_charging.png",
            BatteryIcon::Alert => "battery_alert.png",
            BatteryIcon::Unknown => "battery_unknown.png",
        }
    }
}

impl fmt::Display for BatteryIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for icon in BatteryIcon::ALL {
            assert_eq!(BatteryIcon::from_index(icon.index()), Some(icon));
        }
        assert_eq!(BatteryIcon::from_index(11), None);
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(BatteryIcon::default().index(), 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(BatteryIcon::Level6.to_string(), "6 (86%)");
        assert_eq!(BatteryIcon::Alert.to_string(), "9 (Alert)");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&BatteryIcon::Level3).unwrap();
        assert_eq!(json, "\"level3\"");
    }
}
