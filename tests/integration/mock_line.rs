//! Mock data line for integration tests.
//!
//! Replays a scripted sequence of levels through the `embedded-hal`
//! `InputPin` trait and records how many times it was read.

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use piweather::line::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFault;

impl embedded_hal::digital::Error for LineFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ── MockLine ──────────────────────────────────────────────────

pub struct MockLine {
    script: Vec<Level>,
    pub reads: usize,
    /// Once the script runs out: hold the line low, or fail the read.
    pub fail_when_exhausted: bool,
}

#[allow(dead_code)]
impl MockLine {
    pub fn new(script: Vec<Level>) -> Self {
        Self {
            script,
            reads: 0,
            fail_when_exhausted: false,
        }
    }

    pub fn failing_after(script: Vec<Level>) -> Self {
        Self {
            fail_when_exhausted: true,
            ..Self::new(script)
        }
    }
}

impl ErrorType for MockLine {
    type Error = LineFault;
}

impl InputPin for MockLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = match self.script.get(self.reads) {
            Some(&level) => level,
            None if self.fail_when_exhausted => return Err(LineFault),
            None => Level::Low,
        };
        self.reads += 1;
        Ok(level.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
