//! Default values for configuration fields
//!
//! Kept as free functions so they can be named in `#[serde(default = "...")]`.

use std::path::PathBuf;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Capacity attribute of a power_supply device
pub const DEFAULT_SYSFS_CAPACITY_PATH: &str = "/sys/class/power_supply/BAT0/capacity";

/// Written when the sysfs attribute is missing or read-only
pub const DEFAULT_FALLBACK_PATH: &str = "/tmp/battery_status";

pub(crate) fn default_version() -> u32 {
    CONFIG_VERSION
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    ina219_battery_core::DEFAULT_POLL_INTERVAL.as_millis() as u64
}

pub(crate) fn default_percentage_file_enabled() -> bool {
    true
}

pub(crate) fn default_percentage_path() -> PathBuf {
    PathBuf::from(DEFAULT_SYSFS_CAPACITY_PATH)
}

pub(crate) fn default_fallback_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_FALLBACK_PATH))
}
