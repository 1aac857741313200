//! Alarm selector types and register encoding for the DS3231's two alarms.
//!
//! Each alarm register carries its BCD value in the low bits and a
//! "don't-care" mask in bit 7; the day/date register additionally selects
//! day-of-week matching in bit 6. An [`AlarmType`] packs the whole mask
//! combination into one selector, mirroring the chip's documented match
//! modes: bit 0 masks seconds, bit 1 minutes, bit 2 hours, bit 3 the
//! day/date byte, bit 4 selects day-of-week mode, and bit 7 selects the
//! Alarm 2 register block.
//!
//! Alarm 2 has no seconds register and always fires at second 00 of the
//! matching minute; its seconds argument is ignored.

/// Match bit (A1M1-A1M4, A2M2-A2M4): set means "don't care".
const MATCH_BIT: u8 = 1 << 7;
/// DY/DT bit: set selects day-of-week matching in the day/date register.
const DAY_SELECT_BIT: u8 = 1 << 6;
/// Selector flag for the Alarm 2 register block.
const ALARM2_FLAG: u8 = 1 << 7;

/// Alarm match modes, one per mask combination the chip supports.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmType {
    /// Alarm 1: fire once per second
    Alarm1EverySecond = 0x0F,
    /// Alarm 1: fire when seconds match
    Alarm1MatchSeconds = 0x0E,
    /// Alarm 1: fire when minutes and seconds match
    Alarm1MatchMinutes = 0x0C,
    /// Alarm 1: fire when hours, minutes, and seconds match
    Alarm1MatchHours = 0x08,
    /// Alarm 1: fire when date, hours, minutes, and seconds match
    Alarm1MatchDate = 0x00,
    /// Alarm 1: fire when day of week, hours, minutes, and seconds match
    Alarm1MatchDay = 0x10,
    /// Alarm 2: fire once per minute (at 00 seconds)
    Alarm2EveryMinute = 0x8E,
    /// Alarm 2: fire when minutes match
    Alarm2MatchMinutes = 0x8C,
    /// Alarm 2: fire when hours and minutes match
    Alarm2MatchHours = 0x88,
    /// Alarm 2: fire when date, hours, and minutes match
    Alarm2MatchDate = 0x80,
    /// Alarm 2: fire when day of week, hours, and minutes match
    Alarm2MatchDay = 0x90,
}

impl AlarmType {
    /// Whether this selector targets the Alarm 2 register block.
    pub fn is_alarm2(self) -> bool {
        self as u8 & ALARM2_FLAG != 0
    }
}

/// Which alarms fired, as reported by the status register gated by the
/// interrupt enables in the control register.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmsFired {
    /// Alarm 1 was armed and its flag was set
    pub alarm1: bool,
    /// Alarm 2 was armed and its flag was set
    pub alarm2: bool,
}

impl AlarmsFired {
    /// Whether either alarm fired.
    pub fn any(self) -> bool {
        self.alarm1 || self.alarm2
    }
}

/// Encodes the four alarm register bytes (seconds, minutes, hours,
/// day/date) for the given match mode.
///
/// Values are BCD-encoded as-is; like the chip itself, out-of-range values
/// are not rejected here. For Alarm 2 the seconds byte is computed but has
/// no register to land in.
pub(crate) fn encode_alarm(
    alarm_type: AlarmType,
    sec: u8,
    min: u8,
    hour: u8,
    daydate: u8,
) -> [u8; 4] {
    let selector = alarm_type as u8;
    let mut sec = crate::bcd::encode(sec);
    let mut min = crate::bcd::encode(min);
    let mut hour = crate::bcd::encode(hour);
    let mut daydate = crate::bcd::encode(daydate);

    if selector & 0x01 != 0 {
        sec |= MATCH_BIT;
    }
    if selector & 0x02 != 0 {
        min |= MATCH_BIT;
    }
    if selector & 0x04 != 0 {
        hour |= MATCH_BIT;
    }
    if selector & 0x10 != 0 {
        daydate |= DAY_SELECT_BIT;
    }
    if selector & 0x08 != 0 {
        daydate |= MATCH_BIT;
    }

    [sec, min, hour, daydate]
}
