//! INA219 driver
//!
//! One driver covers both ways the chip is used on battery HATs:
//!
//! - calibrated ([`Ina219::new`]): the configuration and calibration
//!   registers are programmed at construction and shunt voltage, current
//!   and power become available;
//! - voltage only ([`Ina219::voltage_only`]): nothing is written and only
//!   the bus voltage register is read.

use crate::register_io::RegisterIo;
use crate::registers::{
    Configuration, Register, BUS_VOLTAGE_CNVR, BUS_VOLTAGE_LSB, BUS_VOLTAGE_OVF,
    BUS_VOLTAGE_SHIFT, CALIBRATION_SCALE, CURRENT_LSB_DIVISOR, POWER_LSB_FACTOR,
    SHUNT_VOLTAGE_LSB,
};
use crate::transport::WordTransport;
use ina219_battery_core::{BatterySensor, ConfigurationError, SensorError, TransportError};
use ina219_battery_types::{BusVoltageSample, Reading, SensorConfig};
use log::{debug, info, warn};

/// Calibration derived from the shunt and the expected maximum current.
///
/// `current_lsb` is recomputed from the truncated register value, since the
/// chip scales the current register by what is actually stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    current_lsb: f64,
    register_value: u16,
}

impl Calibration {
    pub fn compute(shunt_ohms: f64, max_expected_amps: f64) -> Result<Self, ConfigurationError> {
        if !shunt_ohms.is_finite() || shunt_ohms <= 0.0 {
            return Err(ConfigurationError::InvalidShuntResistance(shunt_ohms));
        }
        if !max_expected_amps.is_finite() || max_expected_amps <= 0.0 {
            return Err(ConfigurationError::InvalidMaxCurrent(max_expected_amps));
        }

        let ideal_lsb = max_expected_amps / CURRENT_LSB_DIVISOR;
        let register = (CALIBRATION_SCALE / (ideal_lsb * shunt_ohms)).floor();
        if !(1.0..=u16::MAX as f64).contains(&register) {
            return Err(ConfigurationError::CalibrationOutOfRange(register));
        }

        let register_value = register as u16;
        Ok(Self {
            current_lsb: CALIBRATION_SCALE / (register_value as f64 * shunt_ohms),
            register_value,
        })
    }

    /// Amps per current register LSB
    pub fn current_lsb(&self) -> f64 {
        self.current_lsb
    }

    /// Watts per power register LSB
    pub fn power_lsb(&self) -> f64 {
        self.current_lsb * POWER_LSB_FACTOR
    }

    /// Value written to the calibration register
    pub fn register_value(&self) -> u16 {
        self.register_value
    }
}

/// INA219 current/voltage sensor
#[derive(Debug)]
pub struct Ina219<T> {
    io: RegisterIo<T>,
    calibration: Option<Calibration>,
}

impl<T: WordTransport> Ina219<T> {
    /// Configure and calibrate the chip.
    ///
    /// Calibration inputs are validated before anything is written, so a bad
    /// configuration never touches the bus.
    pub fn new(transport: T, config: &SensorConfig) -> Result<Self, SensorError> {
        check_address(config.i2c_address)?;
        let calibration =
            Calibration::compute(config.shunt_resistance_ohms, config.max_expected_amps)?;

        let mut io = RegisterIo::new(transport, config.i2c_address);
        write_configuration(&mut io, Configuration::BATTERY_MONITOR)?;
        write_calibration(&mut io, &calibration)?;

        info!(
            "INA219 at {:#04x} calibrated: register={} current_lsb={:.3e} A",
            config.i2c_address,
            calibration.register_value(),
            calibration.current_lsb()
        );
        Ok(Self {
            io,
            calibration: Some(calibration),
        })
    }

    /// Bus voltage only. Leaves the chip's registers as they are.
    pub fn voltage_only(transport: T, address: u8) -> Result<Self, ConfigurationError> {
        check_address(address)?;
        info!("INA219 at {:#04x} opened in voltage-only mode", address);
        Ok(Self {
            io: RegisterIo::new(transport, address),
            calibration: None,
        })
    }

    /// Pick the mode from `config.calibrate`
    pub fn from_config(transport: T, config: &SensorConfig) -> Result<Self, SensorError> {
        if config.calibrate {
            Self::new(transport, config)
        } else {
            Ok(Self::voltage_only(transport, config.i2c_address)?)
        }
    }

    /// Fixed for the driver's lifetime. Recalibrating means building a new driver.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn address(&self) -> u8 {
        self.io.address()
    }

    /// Release the transport
    pub fn destroy(self) -> T {
        self.io.into_transport()
    }

    /// Bus voltage with the CNVR/OVF flags that share its register
    pub fn read_bus_voltage_sample(&mut self) -> Result<BusVoltageSample, SensorError> {
        let raw = self.io.read_u16(Register::BusVoltage.addr())?;
        Ok(BusVoltageSample {
            volts: (raw >> BUS_VOLTAGE_SHIFT) as f64 * BUS_VOLTAGE_LSB,
            conversion_ready: raw & BUS_VOLTAGE_CNVR != 0,
            math_overflow: raw & BUS_VOLTAGE_OVF != 0,
        })
    }

    /// Shunt voltage in volts, assuming gain /1
    pub fn read_shunt_voltage(&mut self) -> Result<f64, SensorError> {
        let raw = self.io.read_i16(Register::ShuntVoltage.addr())?;
        Ok(raw as f64 * SHUNT_VOLTAGE_LSB)
    }

    /// Current in amps; negative while the battery is charging
    pub fn read_current(&mut self) -> Result<f64, SensorError> {
        let calibration = self.calibration.ok_or(SensorError::NotCalibrated("current"))?;
        let raw = self.io.read_i16(Register::Current.addr())?;
        Ok(raw as f64 * calibration.current_lsb())
    }

    /// Power in watts
    pub fn read_power(&mut self) -> Result<f64, SensorError> {
        let calibration = self.calibration.ok_or(SensorError::NotCalibrated("power"))?;
        let raw = self.io.read_u16(Register::Power.addr())?;
        Ok(raw as f64 * calibration.power_lsb())
    }
}

impl<T: WordTransport + Send> BatterySensor for Ina219<T> {
    fn read_bus_voltage(&mut self) -> Result<f64, SensorError> {
        let sample = self.read_bus_voltage_sample()?;
        if sample.math_overflow {
            warn!("INA219 reports math overflow; current and power readings are out of range");
        }
        Ok(sample.volts)
    }

    fn sample(&mut self) -> Result<Reading, SensorError> {
        let mut reading = Reading::bus_voltage(self.read_bus_voltage()?);

        if self.calibration.is_some() {
            reading.shunt_voltage_volts = optional(self.read_shunt_voltage(), "shunt voltage");
            reading.current_amps = optional(self.read_current(), "current");
            reading.power_watts = optional(self.read_power(), "power");
        }

        Ok(reading)
    }
}

fn optional(result: Result<f64, SensorError>, what: &str) -> Option<f64> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Skipping {} this cycle: {}", what, e);
            None
        }
    }
}

fn write_configuration<T: WordTransport>(
    io: &mut RegisterIo<T>,
    configuration: Configuration,
) -> Result<(), TransportError> {
    let bits = configuration.bits();
    debug!("Writing INA219 configuration {:#06x}", bits);
    io.write_u16(Register::Configuration.addr(), bits)
}

fn write_calibration<T: WordTransport>(
    io: &mut RegisterIo<T>,
    calibration: &Calibration,
) -> Result<(), TransportError> {
    io.write_u16(Register::Calibration.addr(), calibration.register_value())
}

fn check_address(address: u8) -> Result<(), ConfigurationError> {
    if address > 0x7F {
        return Err(ConfigurationError::InvalidAddress(address));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register_io::tests::FakeChip;
    use crate::transport::I2cTransport;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn config() -> SensorConfig {
        SensorConfig {
            i2c_address: 0x41,
            bus_id: 1,
            shunt_resistance_ohms: 0.1,
            max_expected_amps: 3.2,
            calibrate: true,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_calibration_closed_form() {
        let calibration = Calibration::compute(0.1, 3.2).unwrap();

        let ideal_lsb: f64 = 3.2 / 32767.0;
        let expected_register = (0.04096 / (ideal_lsb * 0.1)).floor();
        assert_eq!(calibration.register_value() as f64, expected_register);
        assert_eq!(calibration.register_value(), 4194);

        // Scaled by the stored integer, not the ideal LSB
        assert_eq!(calibration.current_lsb(), 0.04096 / (expected_register * 0.1));
        assert!(calibration.current_lsb() > ideal_lsb);
        assert_close(calibration.power_lsb(), 20.0 * calibration.current_lsb());
    }

    #[test]
    fn test_calibration_rejects_zero_inputs() {
        assert_eq!(
            Calibration::compute(0.0, 3.2),
            Err(ConfigurationError::InvalidShuntResistance(0.0))
        );
        assert_eq!(
            Calibration::compute(0.1, 0.0),
            Err(ConfigurationError::InvalidMaxCurrent(0.0))
        );
        assert!(Calibration::compute(-0.1, 3.2).is_err());
        assert!(Calibration::compute(f64::NAN, 3.2).is_err());
        // 0.04096 / (1e-6 * 1e-3) overflows the 16-bit register
        assert!(matches!(
            Calibration::compute(0.001, 0.032767),
            Err(ConfigurationError::CalibrationOutOfRange(_))
        ));
    }

    #[test]
    fn test_construction_writes_configuration_then_calibration() {
        let expectations = [
            I2cTransaction::write(0x41, vec![0x00, 0x07, 0xFF]),
            I2cTransaction::write(0x41, vec![0x05, 0x10, 0x62]),
            I2cTransaction::write_read(0x41, vec![0x02], vec![0x5D, 0xC2]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut ina = Ina219::new(I2cTransport::new(i2c), &config()).unwrap();
        let sample = ina.read_bus_voltage_sample().unwrap();
        assert_close(sample.volts, 12.0);
        assert!(sample.conversion_ready);
        assert!(!sample.math_overflow);

        i2c_clone.done();
    }

    #[test]
    fn test_bad_configuration_never_touches_bus() {
        for (shunt, amps) in [(0.0, 3.2), (0.1, 0.0)] {
            let i2c = I2cMock::new(&[]);
            let mut i2c_clone = i2c.clone();

            let mut bad = config();
            bad.shunt_resistance_ohms = shunt;
            bad.max_expected_amps = amps;
            let err = Ina219::new(I2cTransport::new(i2c), &bad).err().unwrap();
            assert!(matches!(err, SensorError::Configuration(_)));

            i2c_clone.done();
        }
    }

    #[test]
    fn test_voltage_only_reads_without_writes() {
        let expectations = [I2cTransaction::write_read(0x40, vec![0x02], vec![0x2E, 0xE0])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut ina = Ina219::voltage_only(I2cTransport::new(i2c), 0x40).unwrap();
        // 0x2EE0 >> 3 = 1500 LSB = 6.0 V
        assert_close(ina.read_bus_voltage().unwrap(), 6.0);
        assert_eq!(ina.read_current(), Err(SensorError::NotCalibrated("current")));

        i2c_clone.done();
    }

    #[test]
    fn test_bus_read_failure_is_sensor_error() {
        let expectations = [I2cTransaction::write_read(0x40, vec![0x02], vec![0x00, 0x00])
            .with_error(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ))];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut ina = Ina219::voltage_only(I2cTransport::new(i2c), 0x40).unwrap();
        assert!(matches!(
            ina.read_bus_voltage(),
            Err(SensorError::Transport(TransportError::Read { register: 0x02, .. }))
        ));

        i2c_clone.done();
    }

    #[test]
    fn test_signed_channels_and_power() {
        let mut chip = FakeChip::default();
        chip.registers.insert(Register::BusVoltage.addr(), 0x5DC0);
        chip.registers.insert(Register::ShuntVoltage.addr(), 0xF060); // -4000
        chip.registers.insert(Register::Current.addr(), 0xFC18); // -1000
        chip.registers.insert(Register::Power.addr(), 100);

        let mut ina = Ina219::new(&mut chip, &config()).unwrap();
        let lsb = ina.calibration().unwrap().current_lsb();

        assert_close(ina.read_shunt_voltage().unwrap(), -0.04);
        assert_close(ina.read_current().unwrap(), -1000.0 * lsb);
        assert_close(ina.read_power().unwrap(), 100.0 * 20.0 * lsb);

        let reading = ina.sample().unwrap();
        assert_close(reading.bus_voltage_volts, 12.0);
        assert_close(reading.current_amps.unwrap(), -1000.0 * lsb);
        assert!(reading.shunt_voltage_volts.is_some());
        assert!(reading.power_watts.is_some());

        drop(ina);
        assert_eq!(chip.writes, vec![(0x00, 0x07FF), (0x05, 4194)]);
    }

    #[test]
    fn test_calibration_fixed_after_construction() {
        let mut chip = FakeChip::default();
        chip.registers.insert(Register::BusVoltage.addr(), 0x5DC0);
        chip.registers.insert(Register::Current.addr(), 500);

        let expected = Calibration::compute(0.1, 3.2).unwrap();
        let mut ina = Ina219::from_config(&mut chip, &config()).unwrap();
        assert_eq!(ina.calibration(), Some(&expected));

        for _ in 0..3 {
            ina.sample().unwrap();
            ina.read_current().unwrap();
        }
        assert_eq!(ina.calibration(), Some(&expected));

        drop(ina);
        // Only construction writes CONFIG and CALIBRATION
        assert_eq!(chip.writes, vec![(0x00, 0x07FF), (0x05, 4194)]);
    }

    #[test]
    fn test_sample_degrades_optional_channels() {
        let mut chip = FakeChip::default();
        chip.registers.insert(Register::BusVoltage.addr(), 0x5DC0);
        chip.failing_reads.push_back(Register::ShuntVoltage.addr());

        let mut ina = Ina219::new(&mut chip, &config()).unwrap();
        let reading = ina.sample().unwrap();
        assert_close(reading.bus_voltage_volts, 12.0);
        assert_eq!(reading.shunt_voltage_volts, None);
        assert_eq!(reading.current_amps, Some(0.0));
    }

    #[test]
    fn test_voltage_only_sample_has_no_optional_channels() {
        let mut chip = FakeChip::default();
        chip.registers.insert(Register::BusVoltage.addr(), 0x5DC0);

        let mut ina = Ina219::voltage_only(&mut chip, 0x41).unwrap();
        let reading = ina.sample().unwrap();
        assert_eq!(reading.current_amps, None);
        assert_eq!(reading.shunt_voltage_volts, None);
        assert!(chip.writes.is_empty());
    }

    #[test]
    fn test_rejects_eight_bit_address() {
        assert!(matches!(
            Ina219::voltage_only(FakeChip::default(), 0x82),
            Err(ConfigurationError::InvalidAddress(0x82))
        ));
    }
}
