//! Frame decoder: 40 bits to a checksum-verified [`Reading`].
//!
//! ```text
//! ┌─────────┬──────────┬─────────┬──────────┬──────────┐
//! │ RH int  │ RH frac  │ T int   │ T frac   │ checksum │
//! │ byte 0  │ byte 1   │ byte 2  │ byte 3   │ byte 4   │
//! └─────────┴──────────┴─────────┴──────────┴──────────┘
//! ```
//!
//! The checksum is the low byte of the sum of bytes 0-3. Fractional bytes
//! are read as tenths, so a fractional byte of 12 adds 1.2; DHT11 parts do
//! emit such values and they are passed through untouched.

use core::fmt;

use log::warn;
use serde::Serialize;

use super::bits::{FRAME_BITS, FRAME_BYTES, FrameBits};
use crate::error::DecodeError;

/// The five raw bytes of one DHT11 transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_BYTES]);

impl Frame {
    pub const fn from_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        Self(bytes)
    }

    /// Build a frame from the four data bytes with a correct checksum.
    pub const fn with_checksum(data: [u8; 4]) -> Self {
        let sum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        Self([data[0], data[1], data[2], data[3], sum])
    }

    pub const fn bytes(&self) -> [u8; FRAME_BYTES] {
        self.0
    }

    pub const fn humidity_int(&self) -> u8 {
        self.0[0]
    }

    pub const fn humidity_frac(&self) -> u8 {
        self.0[1]
    }

    pub const fn temperature_int(&self) -> u8 {
        self.0[2]
    }

    pub const fn temperature_frac(&self) -> u8 {
        self.0[3]
    }

    pub const fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// `(byte0 + byte1 + byte2 + byte3) mod 256`.
    pub const fn expected_checksum(&self) -> u8 {
        self.0[0]
            .wrapping_add(self.0[1])
            .wrapping_add(self.0[2])
            .wrapping_add(self.0[3])
    }

    pub const fn checksum_valid(&self) -> bool {
        self.expected_checksum() == self.checksum()
    }

    /// Convert to physical units, refusing frames whose checksum fails.
    pub fn reading(&self) -> Result<Reading, DecodeError> {
        let expected = self.expected_checksum();
        let actual = self.checksum();
        if expected != actual {
            warn!("frame: checksum mismatch (expected {expected}, got {actual}), bytes={:?}", self.0);
            return Err(DecodeError::ChecksumMismatch { expected, actual });
        }
        Ok(Reading {
            humidity: combine(self.humidity_int(), self.humidity_frac()),
            temperature: combine(self.temperature_int(), self.temperature_frac()),
        })
    }
}

impl TryFrom<FrameBits> for Frame {
    type Error = DecodeError;

    /// The first 40 bits as a frame; fewer than 40 is `IncompleteFrame`.
    fn try_from(bits: FrameBits) -> Result<Self, Self::Error> {
        match bits.bytes() {
            Some(bytes) => Ok(Self(bytes)),
            None => {
                warn!("frame: only {} of {FRAME_BITS} bits assembled", bits.received());
                Err(DecodeError::IncompleteFrame {
                    bits_available: bits.received(),
                })
            }
        }
    }
}

fn combine(int: u8, tenths: u8) -> f32 {
    f32::from(int) + f32::from(tenths) / 10.0
}

/// Decoded humidity (%RH) and temperature (°C).
///
/// Only ever built from a checksum-valid frame, so a zero reading is a real
/// measurement and never stands in for "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub humidity: f32,
    pub temperature: f32,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RH = {:.1}%, T = {:.1}\u{00b0}C",
            self.humidity, self.temperature
        )
    }
}

/// Validate a bit accumulator and convert it to a reading.
pub fn decode_frame(bits: FrameBits) -> Result<Reading, DecodeError> {
    Frame::try_from(bits)?.reading()
}
