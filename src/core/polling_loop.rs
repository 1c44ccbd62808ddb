//! Periodic sampling of a battery sensor

use super::HaltHandle;
use ina219_battery_core::{
    BatterySensor, ConfigurationError, PercentageSink, StatusEvent, StatusPolicy, StatusSink,
};
use log::{debug, error, info, trace, warn};
use std::time::Duration;
use tokio::time::Instant;

/// Lifecycle of a [`PollingLoop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal: no further ticks or publishes
    Halted,
}

/// Counters returned when the loop halts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub ticks: u64,
    pub failed_reads: u64,
}

/// Samples the sensor every `poll_interval`, publishes each outcome and
/// stops once a halt is requested.
///
/// A failed read is never fatal: it is published as
/// [`StatusEvent::ReadFailed`] and polling continues at the normal cadence.
/// Shutdown latency is bounded by one in-flight tick, because the sleep
/// between ticks wakes as soon as the halt is requested.
pub struct PollingLoop<S> {
    sensor: S,
    policy: StatusPolicy,
    poll_interval: Duration,
    halt: HaltHandle,
    sinks: Vec<Box<dyn StatusSink>>,
    percentage_sink: Option<Box<dyn PercentageSink>>,
    state: LoopState,
}

impl<S: BatterySensor> PollingLoop<S> {
    /// Fails on a zero `poll_interval`, which would hammer the bus.
    pub fn new(
        sensor: S,
        policy: StatusPolicy,
        poll_interval: Duration,
        halt: HaltHandle,
    ) -> Result<Self, ConfigurationError> {
        if poll_interval.is_zero() {
            return Err(ConfigurationError::ZeroPollInterval);
        }
        Ok(Self {
            sensor,
            policy,
            poll_interval,
            halt,
            sinks: Vec::new(),
            percentage_sink: None,
            state: LoopState::Running,
        })
    }

    /// Add a consumer of status events
    pub fn with_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Set the consumer of whole percentages
    pub fn with_percentage_sink(mut self, sink: impl PercentageSink + 'static) -> Self {
        self.percentage_sink = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Take one sample and deliver it to every sink
    pub fn poll_once(&mut self) -> StatusEvent {
        let event = match self.sensor.sample() {
            Ok(reading) => {
                trace!(
                    "Sample: bus={:.3} V shunt={:?} current={:?} power={:?}",
                    reading.bus_voltage_volts,
                    reading.shunt_voltage_volts,
                    reading.current_amps,
                    reading.power_watts
                );
                StatusEvent::Measured(self.policy.evaluate(reading.bus_voltage_volts))
            }
            Err(e) => {
                warn!("INA219 read error: {}", e);
                StatusEvent::ReadFailed
            }
        };

        self.publish(&event);

        if let (StatusEvent::Measured(result), Some(sink)) = (&event, self.percentage_sink.as_mut()) {
            if let Err(e) = sink.persist(result.whole_percent()) {
                warn!("Failed to persist battery percentage: {}", e);
            }
        }

        event
    }

    fn publish(&mut self, event: &StatusEvent) {
        for sink in self.sinks.iter_mut() {
            if let Err(e) = sink.publish(event) {
                error!("Failed to publish battery status: {}", e);
            }
        }
    }

    /// Run until a halt is requested.
    ///
    /// The halt flag is checked before every tick; a request arriving
    /// mid-tick lets that tick finish and publish, then nothing more is sent.
    pub async fn run(mut self) -> PollStats {
        let mut stats = PollStats::default();
        info!("Battery polling started (interval {:?})", self.poll_interval);

        while self.state == LoopState::Running {
            if self.halt.is_halt_requested() {
                self.state = LoopState::Halted;
                break;
            }

            let start = Instant::now();
            let event = self.poll_once();
            stats.ticks += 1;
            if event.is_failure() {
                stats.failed_reads += 1;
            }
            trace!("Poll cycle took {:?}", start.elapsed());

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = self.halt.halted() => {
                    debug!("Halt requested while waiting for next poll");
                }
            }
        }

        for sink in self.sinks.iter_mut() {
            sink.finished();
        }
        info!(
            "Battery polling halted after {} polls ({} failed reads)",
            stats.ticks, stats.failed_reads
        );
        stats
    }
}
