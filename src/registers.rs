//! Register definitions and bitfield structures for the DS3231 RTC.
//!
//! This module contains the register addresses, the two-wire bus addresses,
//! and the bitfield wrappers for the control/status/aging registers. The
//! time, date, and alarm registers are plain packed-BCD bytes and go through
//! [`crate::bcd`] instead of a bitfield wrapper.

use bitfield::bitfield;

/// Seven-bit device address of the DS3231.
pub const DEVICE_ADDRESS: u8 = 0x68;
/// Address byte for a write transaction (address shifted left, R/W = 0).
pub(crate) const ADDR_WRITE: u8 = 0xD0;
/// Address byte for a read transaction (address shifted left, R/W = 1).
pub(crate) const ADDR_READ: u8 = 0xD1;

/// Register addresses for the DS3231 RTC.
#[allow(unused)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds register (0-59)
    Seconds = 0x00,
    /// Minutes register (0-59)
    Minutes = 0x01,
    /// Hours register (1-12 + AM/PM or 0-23)
    Hours = 0x02,
    /// Day register (1-7)
    Day = 0x03,
    /// Date register (1-31)
    Date = 0x04,
    /// Month register (1-12)
    Month = 0x05,
    /// Year register (0-99)
    Year = 0x06,
    /// Alarm 1 seconds register
    Alarm1Seconds = 0x07,
    /// Alarm 1 minutes register
    Alarm1Minutes = 0x08,
    /// Alarm 1 hours register
    Alarm1Hours = 0x09,
    /// Alarm 1 day/date register
    Alarm1DayDate = 0x0A,
    /// Alarm 2 minutes register
    Alarm2Minutes = 0x0B,
    /// Alarm 2 hours register
    Alarm2Hours = 0x0C,
    /// Alarm 2 day/date register
    Alarm2DayDate = 0x0D,
    /// Control register
    Control = 0x0E,
    /// Control/Status register
    ControlStatus = 0x0F,
    /// Aging offset register
    AgingOffset = 0x10,
    /// Temperature MSB register
    MSBTemp = 0x11,
    /// Temperature LSB register
    LSBTemp = 0x12,
}

/// Oscillator enable state (EOSC bit, inverted sense).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ocillator {
    /// Oscillator runs (EOSC = 0)
    Enabled = 0,
    /// Oscillator stops on battery power (EOSC = 1)
    Disabled = 1,
}
impl From<u8> for Ocillator {
    fn from(v: u8) -> Self {
        match v {
            0 => Ocillator::Enabled,
            1 => Ocillator::Disabled,
            _ => panic!("Invalid value for Ocillator: {}", v),
        }
    }
}
impl From<Ocillator> for u8 {
    fn from(v: Ocillator) -> Self {
        v as u8
    }
}

/// INTCN bit: route the INT/SQW pin to the square wave or the alarms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptControl {
    /// INT/SQW outputs the square wave (INTCN = 0)
    SquareWave = 0,
    /// INT/SQW asserts on alarm match (INTCN = 1)
    Interrupt = 1,
}
impl From<u8> for InterruptControl {
    fn from(v: u8) -> Self {
        match v {
            0 => InterruptControl::SquareWave,
            1 => InterruptControl::Interrupt,
            _ => panic!("Invalid value for InterruptControl: {}", v),
        }
    }
}
impl From<InterruptControl> for u8 {
    fn from(v: InterruptControl) -> Self {
        v as u8
    }
}

/// Square wave output frequency (RS2:RS1 bits).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveFrequency {
    /// 1 Hz
    Hz1 = 0b00,
    /// 1.024 kHz
    Hz1024 = 0b01,
    /// 4.096 kHz
    Hz4096 = 0b10,
    /// 8.192 kHz
    Hz8192 = 0b11,
}
impl From<u8> for SquareWaveFrequency {
    fn from(v: u8) -> Self {
        match v {
            0b00 => SquareWaveFrequency::Hz1,
            0b01 => SquareWaveFrequency::Hz1024,
            0b10 => SquareWaveFrequency::Hz4096,
            0b11 => SquareWaveFrequency::Hz8192,
            _ => panic!("Invalid value for SquareWaveFrequency: {}", v),
        }
    }
}
impl From<SquareWaveFrequency> for u8 {
    fn from(v: SquareWaveFrequency) -> Self {
        v as u8
    }
}

// This macro generates the From<u8> and Into<u8> implementations for the
// register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Control register (0x0E).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// EOSC: enable oscillator (inverted sense)
    pub from into Ocillator, oscillator_enable, set_oscillator_enable: 7, 7;
    /// BBSQW: battery-backed square wave enable
    pub battery_backed_square_wave, set_battery_backed_square_wave: 6;
    /// CONV: force temperature conversion
    pub convert_temperature, set_convert_temperature: 5;
    /// RS2:RS1: square wave frequency select
    pub from into SquareWaveFrequency, square_wave_frequency, set_square_wave_frequency: 4, 3;
    /// INTCN: interrupt control
    pub from into InterruptControl, interrupt_control, set_interrupt_control: 2, 2;
    /// A2IE: alarm 2 interrupt enable
    pub alarm2_interrupt_enable, set_alarm2_interrupt_enable: 1;
    /// A1IE: alarm 1 interrupt enable
    pub alarm1_interrupt_enable, set_alarm1_interrupt_enable: 0;
}
from_register_u8!(Control);

bitfield! {
    /// Control/Status register (0x0F).
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Status(u8);
    impl Debug;
    /// OSF: oscillator stop flag
    pub oscillator_stop_flag, set_oscillator_stop_flag: 7;
    /// BB32KHZ: battery-backed 32kHz output enable
    pub battery_backed_32khz, set_battery_backed_32khz: 6;
    /// CRATE1:CRATE0: temperature conversion rate select
    pub temperature_conversion_rate, set_temperature_conversion_rate: 5, 4;
    /// EN32KHZ: 32kHz output enable
    pub enable_32khz_output, set_enable_32khz_output: 3;
    /// BSY: device busy with TCXO functions
    pub busy, set_busy: 2;
    /// A2F: alarm 2 fired flag
    pub alarm2_flag, set_alarm2_flag: 1;
    /// A1F: alarm 1 fired flag
    pub alarm1_flag, set_alarm1_flag: 0;
}
from_register_u8!(Status);

bitfield! {
    /// Aging offset register (0x10), a signed crystal trim value.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AgingOffset(u8);
    impl Debug;
    pub i8, aging_offset, set_aging_offset: 7, 0;
}
from_register_u8!(AgingOffset);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_register_conversions() {
        let control = Control::from(0xFF);
        assert_eq!(control.oscillator_enable(), Ocillator::Disabled);
        assert!(control.battery_backed_square_wave());
        assert!(control.convert_temperature());
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz8192);
        assert_eq!(control.interrupt_control(), InterruptControl::Interrupt);
        assert!(control.alarm2_interrupt_enable());
        assert!(control.alarm1_interrupt_enable());
        assert_eq!(u8::from(control), 0xFF);

        let control = Control::from(0x00);
        assert_eq!(control.oscillator_enable(), Ocillator::Enabled);
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz1);
        assert_eq!(control.interrupt_control(), InterruptControl::SquareWave);
        assert_eq!(u8::from(control), 0x00);
    }

    #[test]
    fn test_control_square_wave_frequency_bits() {
        let mut control = Control::default();
        control.set_square_wave_frequency(SquareWaveFrequency::Hz4096);
        // RS2:RS1 occupy bits 4:3
        assert_eq!(u8::from(control), 0b10 << 3);
    }

    #[test]
    fn test_status_register_conversions() {
        let status = Status::from(0x8F);
        assert!(status.oscillator_stop_flag());
        assert!(!status.battery_backed_32khz());
        assert_eq!(status.temperature_conversion_rate(), 0);
        assert!(status.enable_32khz_output());
        assert!(status.busy());
        assert!(status.alarm2_flag());
        assert!(status.alarm1_flag());
        assert_eq!(u8::from(status), 0x8F);

        let status = Status::from(0x70);
        assert!(!status.oscillator_stop_flag());
        assert!(status.battery_backed_32khz());
        assert_eq!(status.temperature_conversion_rate(), 0b11);
        assert!(!status.alarm1_flag());
    }

    #[test]
    fn test_aging_offset_sign() {
        let aging = AgingOffset::from(0xFF);
        assert_eq!(aging.aging_offset(), -1);
        let aging = AgingOffset::from(0x7F);
        assert_eq!(aging.aging_offset(), 127);
    }
}
