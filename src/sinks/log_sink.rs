//! Human-readable status lines through the `log` facade

use chrono::{DateTime, Local};
use ina219_battery_core::{SinkError, StatusEvent, StatusSink};
use log::{info, warn};

/// `2025-01-31 18:04:11 Icon: 6 (86%) => 88.2% (12.17V)`
pub fn format_status_line(event: &StatusEvent, at: DateTime<Local>) -> String {
    format!("{} {}", at.format("%Y-%m-%d %H:%M:%S"), event)
}

/// Logs every event: measurements at info, failures at warn
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl StatusSink for LogSink {
    fn publish(&mut self, event: &StatusEvent) -> Result<(), SinkError> {
        let line = format_status_line(event, Local::now());
        if event.is_failure() {
            warn!("{}", line);
        } else {
            info!("{}", line);
        }
        Ok(())
    }

    fn finished(&mut self) {
        info!("Battery status updates stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ina219_battery_core::{BatteryIcon, StatusResult};

    #[test]
    fn test_status_line() {
        let at = Local.with_ymd_and_hms(2025, 1, 31, 18, 4, 11).unwrap();
        let event = StatusEvent::Measured(StatusResult {
            icon: BatteryIcon::Level6,
            voltage: 12.172,
            percentage: 88.222,
        });
        assert_eq!(
            format_status_line(&event, at),
            "2025-01-31 18:04:11 Icon: 6 (86%) => 88.2% (12.17V)"
        );

        assert_eq!(
            format_status_line(&StatusEvent::ReadFailed, at),
            "2025-01-31 18:04:11 Icon: 9 (Alert) => sensor read failed"
        );
    }
}
