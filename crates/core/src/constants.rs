//! Shared constants

use std::time::Duration;

/// Time between two sensor polls when nothing else is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Lower bounds (in percent) of icons 1..=7.
/// Anything below the first entry is icon 0.
pub const PERCENT_ICON_THRESHOLDS: [f64; 7] = [15.0, 30.0, 45.0, 60.0, 75.0, 85.0, 95.0];
