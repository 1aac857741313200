//! Software two-wire bus transport for the DS3231.
//!
//! The chip speaks a standard two-wire protocol, but this driver drives it
//! with two general-purpose pins instead of a hardware bus controller: every
//! start/stop condition, data bit, and acknowledge is produced by toggling
//! the clock and data lines directly, with the platform's microsecond delay
//! used for bit pacing.
//!
//! # Pin model
//!
//! The data line follows the open-drain convention: driving it high releases
//! the line so the device can pull it low, which is when the master samples.
//! `SDA` therefore has to implement both [`OutputPin`] and [`InputPin`];
//! `SCL` is only ever driven by the master.
//!
//! # Blocking behavior
//!
//! Every operation is a blocking sequence of pin toggles. The only wait with
//! data-dependent length is the acknowledge poll after each transmitted
//! byte, which is bounded by a configurable microsecond budget and fails
//! with [`BusError::AckTimeout`] when the device does not respond.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::registers::{ADDR_READ, ADDR_WRITE, RegAddr};

/// Default acknowledge poll budget in microseconds.
pub const DEFAULT_ACK_TIMEOUT_US: u32 = 100;

/// Errors produced by the bus transport.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// A pin operation failed
    Pin(E),
    /// The device did not acknowledge within the configured budget
    AckTimeout,
}

impl<E> From<E> for BusError<E> {
    fn from(e: E) -> Self {
        BusError::Pin(e)
    }
}

/// Bit-banged two-wire master bound to one DS3231.
pub(crate) struct SoftI2c<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    ack_timeout_us: u32,
}

impl<SCL, SDA, D, E> SoftI2c<SCL, SDA, D>
where
    SCL: OutputPin<Error = E>,
    SDA: OutputPin<Error = E> + InputPin<Error = E>,
    D: DelayNs,
{
    pub(crate) fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        Self {
            scl,
            sda,
            delay,
            ack_timeout_us: DEFAULT_ACK_TIMEOUT_US,
        }
    }

    pub(crate) fn set_ack_timeout(&mut self, micros: u32) {
        self.ack_timeout_us = micros;
    }

    pub(crate) fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    /// Issues a start condition followed by the address byte.
    ///
    /// The start condition is the data line falling while the clock is high;
    /// the address byte carries the read/write direction in its low bit.
    fn send_start(&mut self, addr: u8) -> Result<(), BusError<E>> {
        self.sda.set_high()?;
        self.scl.set_high()?;
        self.sda.set_low()?;
        self.scl.set_low()?;
        self.write_byte(addr)
    }

    /// Issues a stop condition: data rising while the clock is high, then
    /// the data line is left released.
    fn send_stop(&mut self) -> Result<(), BusError<E>> {
        self.sda.set_low()?;
        self.scl.set_high()?;
        self.sda.set_high()?;
        Ok(())
    }

    /// Acknowledges a received byte by holding data low for one clock pulse,
    /// then releases the line.
    fn send_ack(&mut self) -> Result<(), BusError<E>> {
        self.scl.set_low()?;
        self.sda.set_low()?;
        self.scl.set_high()?;
        self.scl.set_low()?;
        self.sda.set_high()?;
        Ok(())
    }

    /// Leaves data high for one clock pulse, signaling the device to stop
    /// sending after the current byte.
    fn send_nack(&mut self) -> Result<(), BusError<E>> {
        self.scl.set_low()?;
        self.sda.set_high()?;
        self.scl.set_high()?;
        self.scl.set_low()?;
        Ok(())
    }

    /// Waits for the device to pull data low after a transmitted byte.
    ///
    /// Polls at roughly 1 µs intervals; gives up with
    /// [`BusError::AckTimeout`] once `ack_timeout_us` polls have seen the
    /// line high.
    fn wait_for_ack(&mut self) -> Result<(), BusError<E>> {
        self.sda.set_high()?;
        self.scl.set_high()?;
        let mut waited = 0;
        while self.sda.is_high()? {
            if waited >= self.ack_timeout_us {
                return Err(BusError::AckTimeout);
            }
            self.delay.delay_us(1);
            waited += 1;
        }
        self.scl.set_low()?;
        Ok(())
    }

    /// Shifts in one byte, most significant bit first. The device puts each
    /// bit on the line while the clock is low; the master samples it high.
    fn read_byte(&mut self) -> Result<u8, BusError<E>> {
        self.sda.set_high()?;
        let mut value = 0;
        for i in 0..8 {
            self.scl.set_high()?;
            if self.sda.is_high()? {
                value |= 1 << (7 - i);
            }
            self.delay.delay_us(1);
            self.scl.set_low()?;
        }
        Ok(value)
    }

    /// Shifts out one byte, most significant bit first, one clock pulse per
    /// bit.
    fn write_byte(&mut self, value: u8) -> Result<(), BusError<E>> {
        for i in (0..8).rev() {
            if value & (1 << i) != 0 {
                self.sda.set_high()?;
            } else {
                self.sda.set_low()?;
            }
            self.scl.set_high()?;
            self.scl.set_low()?;
        }
        Ok(())
    }

    /// Reads a single register: address it in write mode, then repeated
    /// start in read mode, read one byte, nack, stop.
    pub(crate) fn read_register(&mut self, reg: u8) -> Result<u8, BusError<E>> {
        self.send_start(ADDR_WRITE)?;
        self.wait_for_ack()?;
        self.write_byte(reg)?;
        self.wait_for_ack()?;
        self.send_start(ADDR_READ)?;
        self.wait_for_ack()?;
        let value = self.read_byte()?;
        self.send_nack()?;
        self.send_stop()?;
        Ok(value)
    }

    /// Writes a single register.
    pub(crate) fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BusError<E>> {
        self.send_start(ADDR_WRITE)?;
        self.wait_for_ack()?;
        self.write_byte(reg)?;
        self.wait_for_ack()?;
        self.write_byte(value)?;
        self.wait_for_ack()?;
        self.send_stop()?;
        Ok(())
    }

    /// Reads the seven time/date registers in one transaction.
    ///
    /// The chip latches its time registers on the first access of a
    /// transaction, so this is the only tear-free view of the clock; the
    /// last byte is nacked to terminate the read.
    pub(crate) fn burst_read(&mut self) -> Result<[u8; 7], BusError<E>> {
        let mut data = [0; 7];
        self.send_start(ADDR_WRITE)?;
        self.wait_for_ack()?;
        self.write_byte(RegAddr::Seconds as u8)?;
        self.wait_for_ack()?;
        self.send_start(ADDR_READ)?;
        self.wait_for_ack()?;
        for i in 0..7 {
            data[i] = self.read_byte()?;
            if i < 6 {
                self.send_ack()?;
            } else {
                self.send_nack()?;
            }
        }
        self.send_stop()?;
        Ok(data)
    }
}
