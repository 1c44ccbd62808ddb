//! 16-bit register access with INA219 byte order

use crate::transport::WordTransport;
use ina219_battery_core::TransportError;

/// Exchange the high and low byte of a word
pub const fn swap_bytes(word: u16) -> u16 {
    ((word << 8) & 0xFF00) | (word >> 8)
}

/// Decode a 16-bit twos-complement field.
///
/// Written out explicitly rather than via an `as i16` cast so the register
/// layout is visible at the call site.
pub const fn decode_signed(raw: u16) -> i16 {
    if raw & 0x8000 != 0 {
        -(((raw ^ 0xFFFF) as i32) + 1) as i16
    } else {
        raw as i16
    }
}

/// Register reader/writer bound to one device address
#[derive(Debug)]
pub struct RegisterIo<T> {
    transport: T,
    address: u8,
}

impl<T: WordTransport> RegisterIo<T> {
    pub fn new(transport: T, address: u8) -> Self {
        Self { transport, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn read_u16(&mut self, register: u8) -> Result<u16, TransportError> {
        let word = self.transport.read_word(self.address, register)?;
        Ok(swap_bytes(word))
    }

    pub fn read_i16(&mut self, register: u8) -> Result<i16, TransportError> {
        self.read_u16(register).map(decode_signed)
    }

    pub fn write_u16(&mut self, register: u8, value: u16) -> Result<(), TransportError> {
        self.transport
            .write_word(self.address, register, swap_bytes(value))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    /// In-memory chip: registers hold big-endian values, the transport
    /// presents them the way SMBus does (byte-swapped)
    #[derive(Debug, Default)]
    pub(crate) struct FakeChip {
        pub registers: HashMap<u8, u16>,
        pub writes: Vec<(u8, u16)>,
        pub failing_reads: VecDeque<u8>,
    }

    impl WordTransport for FakeChip {
        fn read_word(&mut self, address: u8, register: u8) -> Result<u16, TransportError> {
            if self.failing_reads.front() == Some(&register) {
                self.failing_reads.pop_front();
                return Err(TransportError::Read {
                    address,
                    register,
                    reason: "NoAcknowledge".to_string(),
                });
            }
            let value = self.registers.get(&register).copied().unwrap_or(0);
            Ok(swap_bytes(value))
        }

        fn write_word(&mut self, _address: u8, register: u8, value: u16) -> Result<(), TransportError> {
            let value = swap_bytes(value);
            self.writes.push((register, value));
            self.registers.insert(register, value);
            Ok(())
        }
    }

    #[test]
    fn test_swap_bytes_involution() {
        for word in [0x0000, 0x00FF, 0xFF00, 0x1234, 0x8001, 0xFFFF, 0x07FF] {
            assert_eq!(swap_bytes(swap_bytes(word)), word);
        }
        assert_eq!(swap_bytes(0x1234), 0x3412);
        let mut word = 0u16;
        loop {
            assert_eq!(swap_bytes(swap_bytes(word)), word);
            if word == u16::MAX {
                break;
            }
            word += 1;
        }
    }

    #[test]
    fn test_signed_decode() {
        assert_eq!(decode_signed(0x0000), 0);
        assert_eq!(decode_signed(0x7FFF), 32767);
        assert_eq!(decode_signed(0x8000), -32768);
        assert_eq!(decode_signed(0xFFFF), -1);
        assert_eq!(decode_signed(0xF060), -4000);

        for raw in 0x8000u16..=0xFFFF {
            assert_eq!(decode_signed(raw) as i32, raw as i32 - 65536);
        }
    }

    #[test]
    fn test_read_and_write_through_transport() {
        let mut chip = FakeChip::default();
        chip.registers.insert(0x01, 0xFF38);

        let mut io = RegisterIo::new(&mut chip, 0x41);
        assert_eq!(io.read_u16(0x01), Ok(0xFF38));
        assert_eq!(io.read_i16(0x01), Ok(-200));

        io.write_u16(0x05, 0x1062).unwrap();
        assert_eq!(io.read_u16(0x05), Ok(0x1062));
        assert_eq!(chip.writes, vec![(0x05, 0x1062)]);
    }
}
