//! INA219 register map and configuration word layout

/// Register offsets
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Configuration = 0x00,
    ShuntVoltage = 0x01,
    BusVoltage = 0x02,
    Power = 0x03,
    Current = 0x04,
    Calibration = 0x05,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Bus voltage full-scale range (BRNG, bit 13)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum BusVoltageRange {
    Fsr16V = 0,
    Fsr32V = 1,
}

/// Shunt PGA gain and range (PG, bits 11-12)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum ShuntGain {
    /// /1, +/-40 mV
    Div1 = 0,
    /// /2, +/-80 mV
    Div2 = 1,
    /// /4, +/-160 mV
    Div4 = 2,
    /// /8, +/-320 mV
    Div8 = 3,
}

/// ADC resolution / averaging (BADC bits 7-10, SADC bits 3-6)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum AdcResolution {
    Bits9 = 0x0,
    Bits10 = 0x1,
    Bits11 = 0x2,
    /// 12-bit, the power-on default encoding
    Bits12 = 0x3,
    /// 12-bit, single sample (MSB set)
    Bits12Sample = 0x8,
    Average2 = 0x9,
    Average4 = 0xA,
    Average8 = 0xB,
    Average16 = 0xC,
    Average32 = 0xD,
    Average64 = 0xE,
    Average128 = 0xF,
}

/// Operating mode (MODE, bits 0-2)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum OperatingMode {
    PowerDown = 0b000,
    ShuntTriggered = 0b001,
    BusTriggered = 0b010,
    ShuntAndBusTriggered = 0b011,
    AdcOff = 0b100,
    ShuntContinuous = 0b101,
    BusContinuous = 0b110,
    ShuntAndBusContinuous = 0b111,
}

const BRNG_SHIFT: u16 = 13;
const BRNG_MASK: u16 = 0x1;
const PG_SHIFT: u16 = 11;
const PG_MASK: u16 = 0x3;
const BADC_SHIFT: u16 = 7;
const BADC_MASK: u16 = 0xF;
const SADC_SHIFT: u16 = 3;
const SADC_MASK: u16 = 0xF;
const MODE_MASK: u16 = 0x7;

/// Configuration register contents
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub bus_voltage_range: BusVoltageRange,
    pub shunt_gain: ShuntGain,
    pub bus_adc: AdcResolution,
    pub shunt_adc: AdcResolution,
    pub mode: OperatingMode,
}

impl Configuration {
    /// 16 V range, gain /1, ADC code 0xF (12-bit) on both channels,
    /// continuous shunt and bus conversions. Encodes to 0x07FF.
    pub const BATTERY_MONITOR: Configuration = Configuration {
        bus_voltage_range: BusVoltageRange::Fsr16V,
        shunt_gain: ShuntGain::Div1,
        bus_adc: AdcResolution::Average128,
        shunt_adc: AdcResolution::Average128,
        mode: OperatingMode::ShuntAndBusContinuous,
    };

    pub const fn bits(&self) -> u16 {
        ((self.bus_voltage_range as u16 & BRNG_MASK) << BRNG_SHIFT)
            | ((self.shunt_gain as u16 & PG_MASK) << PG_SHIFT)
            | ((self.bus_adc as u16 & BADC_MASK) << BADC_SHIFT)
            | ((self.shunt_adc as u16 & SADC_MASK) << SADC_SHIFT)
            | (self.mode as u16 & MODE_MASK)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::BATTERY_MONITOR
    }
}

/// Bus voltage register: data in bits 3-15
pub const BUS_VOLTAGE_SHIFT: u16 = 3;
/// Conversion ready flag in the bus voltage register
pub const BUS_VOLTAGE_CNVR: u16 = 0x0002;
/// Math overflow flag in the bus voltage register
pub const BUS_VOLTAGE_OVF: u16 = 0x0001;

/// Volts per bus voltage LSB
pub const BUS_VOLTAGE_LSB: f64 = 0.004;
/// Volts per shunt voltage LSB at gain /1
pub const SHUNT_VOLTAGE_LSB: f64 = 0.00001;
/// Fixed scaling constant from the calibration equation
pub const CALIBRATION_SCALE: f64 = 0.04096;
/// Current register full scale used to derive the current LSB
pub const CURRENT_LSB_DIVISOR: f64 = 32767.0;
/// Power LSB as a multiple of the current LSB
pub const POWER_LSB_FACTOR: f64 = 20.0;
