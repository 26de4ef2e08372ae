//! Pulse segmenter: raw line samples to high-pulse widths.
//!
//! A pulse is a run of high samples closed by a falling edge. A run that is
//! still open when the capture ends is dropped, since the capture window may
//! legitimately stop mid-pulse.

use log::debug;

use crate::line::Level;

/// Width of one high pulse, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pulse(pub u32);

impl Pulse {
    pub const fn width(self) -> u32 {
        self.0
    }
}

/// Ordered pulses of one capture, plus whether a trailing open run was cut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pulses {
    widths: Vec<Pulse>,
    truncated: bool,
}

impl Pulses {
    pub fn as_slice(&self) -> &[Pulse] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// True if the capture ended inside a high run that was discarded.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl IntoIterator for Pulses {
    type Item = Pulse;
    type IntoIter = std::vec::IntoIter<Pulse>;

    fn into_iter(self) -> Self::IntoIter {
        self.widths.into_iter()
    }
}

/// Scan `samples` and emit one [`Pulse`] per falling edge.
///
/// The line is assumed low before the first sample, so a capture that starts
/// high opens a run on sample 0.
pub fn segment(samples: &[Level]) -> Pulses {
    let mut widths = Vec::new();
    let mut previous = Level::Low;
    let mut count: u32 = 0;

    for &current in samples {
        match (previous, current) {
            (Level::Low, Level::High) => count = 1,
            (Level::High, Level::Low) => widths.push(Pulse(count)),
            (Level::High, Level::High) => count = count.saturating_add(1),
            (Level::Low, Level::Low) => {}
        }
        previous = current;
    }

    let truncated = previous.is_high();
    if truncated {
        debug!("segmenter: dropped open high run of {count} samples at end of capture");
    }

    Pulses { widths, truncated }
}
