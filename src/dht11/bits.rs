//! Bit assembler: pulse widths to bits, packed into a 40-bit accumulator.
//!
//! No validation happens here. Short or long pulse streams are accepted as-is
//! and the frame decoder decides what to make of them.

use log::debug;

use super::segmenter::{Pulse, Pulses};

/// Bits in one DHT11 frame.
pub const FRAME_BITS: usize = 40;
/// Bytes in one DHT11 frame.
pub const FRAME_BYTES: usize = FRAME_BITS / 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Classify a pulse: wider than `threshold` samples is a 1, otherwise 0.
    pub const fn classify(pulse: Pulse, threshold: u32) -> Self {
        if pulse.width() > threshold { Self::One } else { Self::Zero }
    }
}

/// Fixed-capacity, MSB-first bit accumulator for one frame.
///
/// Holds at most 40 bits; any further bits are counted but not stored. The
/// count is what the frame decoder reports when the frame is short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameBits {
    bytes: [u8; FRAME_BYTES],
    received: usize,
}

impl FrameBits {
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
            received: 0,
        }
    }

    /// Append one bit. Returns `false` once the frame is full and the bit was
    /// only counted.
    pub fn push(&mut self, bit: Bit) -> bool {
        let index = self.received;
        self.received = self.received.saturating_add(1);
        if index >= FRAME_BITS {
            return false;
        }
        if bit == Bit::One {
            self.bytes[index / 8] |= 0x80 >> (index % 8);
        }
        true
    }

    /// Total bits pushed, including any beyond the 40th.
    pub const fn received(&self) -> usize {
        self.received
    }

    pub const fn is_complete(&self) -> bool {
        self.received >= FRAME_BITS
    }

    /// Bits pushed past the end of the frame.
    pub const fn overflow(&self) -> usize {
        self.received.saturating_sub(FRAME_BITS)
    }

    /// The five frame bytes, or `None` while fewer than 40 bits are held.
    pub const fn bytes(&self) -> Option<[u8; FRAME_BYTES]> {
        if self.is_complete() { Some(self.bytes) } else { None }
    }

    /// Bit `index` (0 = MSB of byte 0), if it has been stored.
    pub fn get(&self, index: usize) -> Option<Bit> {
        if index >= FRAME_BITS.min(self.received) {
            return None;
        }
        let set = self.bytes[index / 8] & (0x80 >> (index % 8)) != 0;
        Some(if set { Bit::One } else { Bit::Zero })
    }
}

impl FromIterator<Bit> for FrameBits {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        let mut bits = Self::new();
        for bit in iter {
            bits.push(bit);
        }
        bits
    }
}

/// Classify every pulse against `threshold`, preserving order.
pub fn assemble(pulses: Pulses, threshold: u32) -> FrameBits {
    let bits: FrameBits = pulses
        .into_iter()
        .map(|pulse| Bit::classify(pulse, threshold))
        .collect();

    debug!(
        "assembler: {} bits (threshold {} samples, {} past frame end)",
        bits.received(),
        threshold,
        bits.overflow()
    );
    bits
}
