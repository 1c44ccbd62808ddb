//! Consumer boundaries for published status

use crate::error::SinkError;
use ina219_battery_types::StatusEvent;

/// Receives one event per poll, successful or not.
///
/// Errors are logged by the caller and never stop polling.
pub trait StatusSink: Send {
    fn publish(&mut self, event: &StatusEvent) -> Result<(), SinkError>;

    /// Called once after the loop has halted
    fn finished(&mut self) {}
}

/// Best-effort side channel receiving the clamped whole percentage
pub trait PercentageSink: Send {
    fn persist(&mut self, percent: u8) -> Result<(), SinkError>;
}
