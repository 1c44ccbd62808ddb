//! ina219-battery-sources: INA219 driver and I2C transports.

mod ina219;
mod register_io;
pub mod registers;
mod transport;

pub use ina219::{Calibration, Ina219};
pub use register_io::{decode_signed, swap_bytes, RegisterIo};
pub use transport::{I2cTransport, WordTransport};

#[cfg(target_os = "linux")]
pub use transport::open_i2c_bus;
