//! Unified error types for the decoder.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! binary's error handling uniform. All variants are `Copy` so a failed
//! decode can be logged, counted and returned without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The captured samples did not decode to a valid frame.
    Decode(DecodeError),
    /// A sample file could not be parsed.
    Samples(SampleParseError),
    /// The line could not be sampled.
    Capture(CaptureError),
    /// Decoder configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode: {e}"),
            Self::Samples(e) => write!(f, "samples: {e}"),
            Self::Capture(e) => write!(f, "capture: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// Terminal failure of a single decode call.
///
/// Neither variant carries a partial reading: a caller that sees one of these
/// re-acquires and decodes again, or gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer than 40 bits were assembled from the capture.
    IncompleteFrame { bits_available: usize },
    /// All 40 bits arrived but the checksum byte disagrees with the data.
    ChecksumMismatch { expected: u8, actual: u8 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteFrame { bits_available } => {
                write!(f, "incomplete frame: {bits_available} of 40 bits")
            }
            Self::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl core::error::Error for DecodeError {}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

// ---------------------------------------------------------------------------
// Sample file errors
// ---------------------------------------------------------------------------

/// Errors from [`crate::samples`]. Positions are 1-based token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleParseError {
    /// A token is not an integer.
    InvalidToken { position: usize },
    /// A line value other than 0 or 1.
    InvalidLevel { position: usize, value: i64 },
    /// A timestamp with no value after it.
    MissingValue { position: usize },
    /// Timestamps go backwards.
    NonMonotonicTime { position: usize },
}

impl fmt::Display for SampleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { position } => write!(f, "token {position} is not an integer"),
            Self::InvalidLevel { position, value } => {
                write!(f, "token {position}: line level must be 0 or 1, got {value}")
            }
            Self::MissingValue { position } => {
                write!(f, "timestamp at token {position} has no value")
            }
            Self::NonMonotonicTime { position } => {
                write!(f, "timestamp at token {position} goes backwards")
            }
        }
    }
}

impl core::error::Error for SampleParseError {}

impl From<SampleParseError> for Error {
    fn from(e: SampleParseError) -> Self {
        Self::Samples(e)
    }
}

// ---------------------------------------------------------------------------
// Capture errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// GPIO read returned an error.
    Pin(embedded_hal::digital::ErrorKind),
    /// The fixed-capacity capture buffer has no room left.
    BufferFull { capacity: usize },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(kind) => write!(f, "GPIO read failed: {kind}"),
            Self::BufferFull { capacity } => {
                write!(f, "capture buffer full ({capacity} samples)")
            }
        }
    }
}

impl core::error::Error for CaptureError {}

impl From<CaptureError> for Error {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero threshold would classify every pulse as a 1 bit.
    ZeroThreshold,
    /// The sample period is zero, negative or not finite.
    InvalidSamplePeriod,
    /// The sample period is too coarse to tell a 0 bit from a 1 bit.
    SamplePeriodTooCoarse,
    /// The threshold disagrees with the one the sample period implies.
    ThresholdMismatch { threshold: u32, calibrated: u32 },
    /// Calibration from the capture was asked for, but it has no timestamps.
    NoCapturePeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroThreshold => write!(f, "pulse threshold must be at least 1 sample"),
            Self::InvalidSamplePeriod => write!(f, "sample period must be positive and finite"),
            Self::SamplePeriodTooCoarse => {
                write!(f, "sample period too coarse to resolve DHT11 bit timing")
            }
            Self::ThresholdMismatch { threshold, calibrated } => write!(
                f,
                "pulse threshold {threshold} contradicts sample period (implies {calibrated})"
            ),
            Self::NoCapturePeriod => {
                write!(f, "capture has fewer than two distinct timestamps")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
