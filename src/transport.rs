//! Bus transport seam
//!
//! The driver only ever writes: it opens a transaction to a device address,
//! pushes bytes and closes it. [`Transport`] is that capability, and
//! [`I2cTransport`] provides it on top of any `embedded-hal` I2C bus.

use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use heapless::Vec;

use crate::registers::{BYTES_PER_CHANNEL, CHANNEL_COUNT};

/// Longest transaction the driver emits: start register plus every channel
pub const MAX_TRANSACTION_LEN: usize = 1 + (CHANNEL_COUNT as usize) * (BYTES_PER_CHANNEL as usize);

/// Failure reported by the bus when a transaction is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The device did not acknowledge its address or a data byte
    NoAcknowledge,
    /// Another controller won bus arbitration
    ArbitrationLoss,
    /// Misplaced start/stop or other bus level fault
    Bus,
    /// More bytes were written than one transaction can carry
    Overflow,
    /// Any other transport specific failure
    Other,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NoAcknowledge => "device did not acknowledge",
            Self::ArbitrationLoss => "bus arbitration lost",
            Self::Bus => "bus error",
            Self::Overflow => "transaction buffer overflow",
            Self::Other => "transport error",
        };
        f.write_str(message)
    }
}

impl core::error::Error for TransportError {}

impl From<ErrorKind> for TransportError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::NoAcknowledge,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Bus => Self::Bus,
            _ => Self::Other,
        }
    }
}

/// Byte oriented, addressed, write-only bus transaction
///
/// Implement this trait to drive the chip over any bus.
/// `begin` always precedes the `write`s of a transaction and `end` closes it.
pub trait Transport {
    /// Open a transaction to the device at `address`
    fn begin(&mut self, address: u8);

    /// Queue one byte of the open transaction
    fn write(&mut self, byte: u8);

    /// Close the transaction, reporting whether the device took it
    fn end(&mut self) -> Result<(), TransportError>;

    /// Queue several bytes of the open transaction
    fn write_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write(byte);
        }
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn begin(&mut self, address: u8) {
        T::begin(self, address);
    }

    fn write(&mut self, byte: u8) {
        T::write(self, byte);
    }

    fn end(&mut self) -> Result<(), TransportError> {
        T::end(self)
    }

    fn write_all(&mut self, bytes: &[u8]) {
        T::write_all(self, bytes);
    }
}

/// [`Transport`] over an `embedded-hal` I2C bus
///
/// Bytes are buffered until `end`, which sends them in a single
/// `I2c::write`, so each transaction is one START ... STOP on the wire.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
    buffer: Vec<u8, MAX_TRANSACTION_LEN>,
    overflowed: bool,
}

impl<I2C: I2c> I2cTransport<I2C> {
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    fn begin(&mut self, address: u8) {
        self.address = address;
        self.buffer.clear();
        self.overflowed = false;
    }

    fn write(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    fn end(&mut self) -> Result<(), TransportError> {
        if self.overflowed {
            self.buffer.clear();
            return Err(TransportError::Overflow);
        }
        let result = self.i2c.write(self.address, &self.buffer);
        self.buffer.clear();
        result.map_err(|error| TransportError::from(error.kind()))
    }
}

