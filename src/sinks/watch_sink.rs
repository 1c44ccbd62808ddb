//! Latest-value channel for a presentation layer

use ina219_battery_core::{BatteryIcon, SinkError, StatusEvent, StatusSink};
use tokio::sync::watch;

/// What a tray or panel should currently show
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayState {
    /// No poll has completed yet
    #[default]
    Unknown,
    Status(StatusEvent),
}

impl DisplayState {
    pub fn icon(&self) -> BatteryIcon {
        match self {
            DisplayState::Unknown => BatteryIcon::Unknown,
            DisplayState::Status(event) => event.icon(),
        }
    }

    pub fn tooltip(&self) -> String {
        match self {
            DisplayState::Unknown => "Waiting for first reading".to_string(),
            DisplayState::Status(StatusEvent::Measured(result)) => result.to_string(),
            DisplayState::Status(StatusEvent::ReadFailed) => "Battery sensor not responding".to_string(),
        }
    }
}

/// Publishes into a `tokio::sync::watch` channel.
///
/// Receivers start at [`DisplayState::Unknown`] and see the channel close
/// when the loop halts and drops this sink.
#[derive(Debug)]
pub struct WatchSink {
    sender: watch::Sender<DisplayState>,
}

impl WatchSink {
    pub fn channel() -> (Self, watch::Receiver<DisplayState>) {
        let (sender, receiver) = watch::channel(DisplayState::Unknown);
        (Self { sender }, receiver)
    }
}

impl StatusSink for WatchSink {
    fn publish(&mut self, event: &StatusEvent) -> Result<(), SinkError> {
        self.sender
            .send(DisplayState::Status(*event))
            .map_err(|_| SinkError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ina219_battery_core::StatusResult;

    #[test]
    fn test_starts_unknown_then_tracks_latest() {
        let (mut sink, receiver) = WatchSink::channel();
        assert_eq!(receiver.borrow().icon(), BatteryIcon::Unknown);
        assert_eq!(receiver.borrow().icon().index(), 10);

        sink.publish(&StatusEvent::ReadFailed).unwrap();
        assert_eq!(receiver.borrow().icon(), BatteryIcon::Alert);

        let result = StatusResult {
            icon: BatteryIcon::Level4,
            voltage: 11.4,
            percentage: 66.7,
        };
        sink.publish(&StatusEvent::Measured(result)).unwrap();
        assert_eq!(*receiver.borrow(), DisplayState::Status(StatusEvent::Measured(result)));
        assert_eq!(receiver.borrow().tooltip(), "66.7% (11.40V)");
    }

    #[test]
    fn test_dropped_receiver_is_disconnected() {
        let (mut sink, receiver) = WatchSink::channel();
        drop(receiver);
        assert!(matches!(
            sink.publish(&StatusEvent::ReadFailed),
            Err(SinkError::Disconnected)
        ));
    }
}
