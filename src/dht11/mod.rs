//! DHT11 pulse-train decoding.
//!
//! Three pure stages, each consuming the previous stage's output:
//!
//! ```text
//!   &[Level] ──segment──▶ Pulses ──assemble──▶ FrameBits ──decode_frame──▶ Reading
//! ```
//!
//! Nothing here blocks or keeps state between calls, so captures may be
//! decoded concurrently on any thread.

pub mod bits;
pub mod frame;
pub mod segmenter;

use log::debug;

use crate::config::{DEFAULT_PULSE_THRESHOLD, DecoderConfig};
use crate::error::DecodeError;
use crate::line::Level;

pub use bits::{Bit, FRAME_BITS, FrameBits, assemble};
pub use frame::{Frame, Reading, decode_frame};
pub use segmenter::{Pulse, Pulses, segment};

/// Decode with an explicit pulse-width threshold (in samples).
pub fn decode(samples: &[Level], pulse_threshold: u32) -> Result<Reading, DecodeError> {
    decode_frame(assemble(segment(samples), pulse_threshold))
}

/// Decode using a [`DecoderConfig`].
pub fn decode_with(samples: &[Level], config: &DecoderConfig) -> Result<Reading, DecodeError> {
    decode(samples, config.pulse_threshold)
}

/// What the pipeline saw on the way to its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeReport {
    /// Samples in the capture.
    pub samples: usize,
    /// Pulses closed by a falling edge.
    pub pulses: usize,
    /// The capture ended inside a high run, which was dropped.
    pub truncated: bool,
    /// Bits past the 40th that were ignored.
    pub excess_bits: usize,
    /// The raw frame, when 40 bits were available.
    pub frame: Option<Frame>,
}

/// Like [`decode_with`], also returning a [`DecodeReport`]. An acquisition
/// layer can use `truncated` to decide whether to widen its capture window.
pub fn decode_with_report(
    samples: &[Level],
    config: &DecoderConfig,
) -> (Result<Reading, DecodeError>, DecodeReport) {
    let pulses = segment(samples);
    let mut report = DecodeReport {
        samples: samples.len(),
        pulses: pulses.len(),
        truncated: pulses.truncated(),
        ..DecodeReport::default()
    };

    let bits = assemble(pulses, config.pulse_threshold);
    report.excess_bits = bits.overflow();

    let result = Frame::try_from(bits).and_then(|frame| {
        report.frame = Some(frame);
        frame.reading()
    });

    debug!("decode: {report:?} -> {result:?}");
    (result, report)
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Pulse widths used to synthesize a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseShape {
    /// High samples for a 0 bit.
    pub zero: u32,
    /// High samples for a 1 bit.
    pub one: u32,
    /// Low samples before each pulse.
    pub gap: u32,
}

impl PulseShape {
    /// Widths that decode unambiguously against `threshold`.
    ///
    /// `None` for `u32::MAX`, since no pulse width can exceed it. A threshold
    /// of 0 is treated as 1.
    pub fn for_threshold(threshold: u32) -> Option<Self> {
        let threshold = threshold.max(1);
        let one = threshold.saturating_mul(2);
        (one > threshold).then_some(Self {
            zero: threshold.div_ceil(2),
            one,
            gap: 2,
        })
    }
}

impl Default for PulseShape {
    /// Shape for [`DEFAULT_PULSE_THRESHOLD`]: 2-sample zeros, 6-sample ones.
    fn default() -> Self {
        Self {
            zero: DEFAULT_PULSE_THRESHOLD.div_ceil(2),
            one: DEFAULT_PULSE_THRESHOLD * 2,
            gap: 2,
        }
    }
}

/// Render `frame` as line samples, one pulse per bit MSB-first, ending low.
pub fn synthesize(frame: &Frame, shape: &PulseShape) -> Vec<Level> {
    let mut samples = Vec::new();
    for byte in frame.bytes() {
        for i in (0..8).rev() {
            let width = if (byte >> i) & 1 == 1 { shape.one } else { shape.zero };
            push_pulse(&mut samples, width, shape.gap);
        }
    }
    samples.extend(std::iter::repeat_n(Level::Low, shape.gap.max(1) as usize));
    samples
}

fn push_pulse(samples: &mut Vec<Level>, width: u32, gap: u32) {
    samples.extend(std::iter::repeat_n(Level::Low, gap as usize));
    samples.extend(std::iter::repeat_n(Level::High, width as usize));
}
