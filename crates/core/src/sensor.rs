//! Battery sensor trait

use crate::error::SensorError;
use ina219_battery_types::Reading;

/// A device able to measure the battery's bus voltage.
///
/// The polling loop owns its sensor exclusively and calls it from a single
/// task, so implementations need no internal locking. Failed reads are
/// reported, never retried; the loop's poll interval rate-limits attempts.
pub trait BatterySensor: Send {
    /// Bus voltage in volts
    fn read_bus_voltage(&mut self) -> Result<f64, SensorError>;

    /// Take a full sample.
    ///
    /// Only the bus voltage is mandatory. Sensors with extra channels
    /// override this and fill the optional fields.
    fn sample(&mut self) -> Result<Reading, SensorError> {
        self.read_bus_voltage().map(Reading::bus_voltage)
    }
}

impl<S: BatterySensor + ?Sized> BatterySensor for Box<S> {
    fn read_bus_voltage(&mut self) -> Result<f64, SensorError> {
        (**self).read_bus_voltage()
    }

    fn sample(&mut self) -> Result<Reading, SensorError> {
        (**self).sample()
    }
}
