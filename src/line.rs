//! Line level of one captured sample.

use serde::{Deserialize, Serialize};

/// State of the sensor's data line at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level as u8
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(other),
        }
    }
}

/// Convert a slice of 0/1 bytes into levels; `None` if any byte is not 0 or 1.
#[cfg(test)]
pub(crate) fn levels_from_bits(bits: &[u8]) -> Option<Vec<Level>> {
    bits.iter().map(|&b| Level::try_from(b).ok()).collect()
}
