//! Word-oriented transports
//!
//! The INA219 is addressed with SMBus-style word transfers: a 7-bit device
//! address, an 8-bit register offset and a 16-bit payload. SMBus moves the
//! low byte first while the chip's registers are big-endian, so callers of
//! [`WordTransport`] see byte-swapped values; [`crate::RegisterIo`] undoes that.

use embedded_hal::i2c::{Error as _, I2c};
use ina219_battery_core::TransportError;

/// Raw SMBus word access
pub trait WordTransport {
    /// Read a word, low byte first on the wire
    fn read_word(&mut self, address: u8, register: u8) -> Result<u16, TransportError>;

    /// Write a word, low byte first on the wire
    fn write_word(&mut self, address: u8, register: u8, value: u16) -> Result<(), TransportError>;
}

impl<T: WordTransport + ?Sized> WordTransport for &mut T {
    fn read_word(&mut self, address: u8, register: u8) -> Result<u16, TransportError> {
        (**self).read_word(address, register)
    }

    fn write_word(&mut self, address: u8, register: u8, value: u16) -> Result<(), TransportError> {
        (**self).write_word(address, register, value)
    }
}

impl<T: WordTransport + ?Sized> WordTransport for Box<T> {
    fn read_word(&mut self, address: u8, register: u8) -> Result<u16, TransportError> {
        (**self).read_word(address, register)
    }

    fn write_word(&mut self, address: u8, register: u8, value: u16) -> Result<(), TransportError> {
        (**self).write_word(address, register, value)
    }
}

/// SMBus word transfers on top of any `embedded-hal` I2C bus
#[derive(Debug)]
pub struct I2cTransport<I> {
    i2c: I,
}

impl<I: I2c> I2cTransport<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn into_inner(self) -> I {
        self.i2c
    }
}

impl<I: I2c> WordTransport for I2cTransport<I> {
    fn read_word(&mut self, address: u8, register: u8) -> Result<u16, TransportError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(address, &[register], &mut buf)
            .map_err(|e| TransportError::Read {
                address,
                register,
                reason: format!("{:?}", e.kind()),
            })?;
        Ok(u16::from_le_bytes(buf))
    }

    fn write_word(&mut self, address: u8, register: u8, value: u16) -> Result<(), TransportError> {
        let [low, high] = value.to_le_bytes();
        self.i2c
            .write(address, &[register, low, high])
            .map_err(|e| TransportError::Write {
                address,
                register,
                reason: format!("{:?}", e.kind()),
            })
    }
}

/// Open `/dev/i2c-<bus_id>`
#[cfg(target_os = "linux")]
pub fn open_i2c_bus(
    bus_id: u8,
) -> Result<I2cTransport<linux_embedded_hal::I2cdev>, TransportError> {
    let path = format!("/dev/i2c-{}", bus_id);
    let device = linux_embedded_hal::I2cdev::new(&path).map_err(|e| TransportError::Open {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    log::info!("Opened I2C bus {}", path);
    Ok(I2cTransport::new(device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_read_word_is_low_byte_first() {
        let expectations = [I2cTransaction::write_read(0x41, vec![0x02], vec![0x5D, 0xC2])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut transport = I2cTransport::new(i2c);
        assert_eq!(transport.read_word(0x41, 0x02), Ok(0xC25D));
        i2c_clone.done();
    }

    #[test]
    fn test_write_word_is_low_byte_first() {
        let expectations = [I2cTransaction::write(0x40, vec![0x05, 0x62, 0x10])];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut transport = I2cTransport::new(i2c);
        assert_eq!(transport.write_word(0x40, 0x05, 0x1062), Ok(()));
        i2c_clone.done();
    }

    #[test]
    fn test_bus_error_is_reported_not_retried() {
        let expectations = [I2cTransaction::write_read(0x41, vec![0x02], vec![0x00, 0x00])
            .with_error(ErrorKind::Other)];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut transport = I2cTransport::new(i2c);
        let err = transport.read_word(0x41, 0x02).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Read {
                address: 0x41,
                register: 0x02,
                ..
            }
        ));
        // A second transaction would panic the mock: exactly one attempt was made
        i2c_clone.done();
    }
}
