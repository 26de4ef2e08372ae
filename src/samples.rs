//! Captured sample file parsing.
//!
//! Capture tooling writes whitespace-separated `timestamp value` pairs, one
//! pair per sample, timestamps in microseconds:
//!
//! ```text
//! 0 0
//! 12 1
//! 25 1
//! ```
//!
//! Only the value column feeds the decoder. The timestamps give the sample
//! period, which is what the pulse threshold has to be calibrated against.

use crate::error::SampleParseError;
use crate::line::Level;

/// Line samples loaded from a capture file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Capture {
    pub levels: Vec<Level>,
    /// Mean spacing between timestamps (microseconds), when there are any.
    pub sample_period_us: Option<f32>,
}

/// Parse a `timestamp value` pair file.
pub fn parse_pairs(text: &str) -> Result<Capture, SampleParseError> {
    let mut levels = Vec::new();
    let mut first: Option<i64> = None;
    let mut last: Option<i64> = None;
    let mut tokens = text.split_whitespace().enumerate();

    while let Some((index, token)) = tokens.next() {
        let position = index + 1;
        let time = parse_int(token, position)?;
        if last.is_some_and(|prev| time < prev) {
            return Err(SampleParseError::NonMonotonicTime { position });
        }
        if first.is_none() {
            first = Some(time);
        }
        last = Some(time);

        let Some((index, token)) = tokens.next() else {
            return Err(SampleParseError::MissingValue { position });
        };
        levels.push(parse_level(token, index + 1)?);
    }

    let sample_period_us = match (first, last) {
        (Some(first), Some(last)) if levels.len() > 1 && last > first => {
            Some(last.abs_diff(first) as f32 / (levels.len() - 1) as f32)
        }
        _ => None,
    };

    Ok(Capture {
        levels,
        sample_period_us,
    })
}

/// Parse a bare whitespace-separated list of 0/1 values.
pub fn parse_levels(text: &str) -> Result<Vec<Level>, SampleParseError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| parse_level(token, index + 1))
        .collect()
}

fn parse_int(token: &str, position: usize) -> Result<i64, SampleParseError> {
    token
        .parse()
        .map_err(|_| SampleParseError::InvalidToken { position })
}

fn parse_level(token: &str, position: usize) -> Result<Level, SampleParseError> {
    let value = parse_int(token, position)?;
    u8::try_from(value)
        .ok()
        .and_then(|v| Level::try_from(v).ok())
        .ok_or(SampleParseError::InvalidLevel { position, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_value_column_only() {
        let c = parse_pairs("0 0\n10 1\n20 1\n30 0\n").unwrap();
        assert_eq!(c.levels, vec![Level::Low, Level::High, Level::High, Level::Low]);
        assert_eq!(c.sample_period_us, Some(10.0));
    }

    #[test]
    fn pairs_may_share_a_line() {
        let c = parse_pairs("0 1 5 0 10 1").unwrap();
        assert_eq!(c.levels.len(), 3);
        assert_eq!(c.sample_period_us, Some(5.0));
    }

    #[test]
    fn empty_file_is_an_empty_capture() {
        assert_eq!(parse_pairs("  \n").unwrap(), Capture::default());
    }

    #[test]
    fn dangling_timestamp_is_an_error() {
        assert_eq!(
            parse_pairs("0 0 10"),
            Err(SampleParseError::MissingValue { position: 3 })
        );
    }

    #[test]
    fn bad_tokens_report_their_position() {
        assert_eq!(
            parse_pairs("0 0 x 1"),
            Err(SampleParseError::InvalidToken { position: 3 })
        );
        assert_eq!(
            parse_pairs("0 0 10 2"),
            Err(SampleParseError::InvalidLevel { position: 4, value: 2 })
        );
        assert_eq!(
            parse_pairs("10 0 5 1"),
            Err(SampleParseError::NonMonotonicTime { position: 3 })
        );
    }

    #[test]
    fn bare_levels() {
        assert_eq!(parse_levels("0 1\n1 0").unwrap().len(), 4);
        assert_eq!(
            parse_levels("0 1 -1"),
            Err(SampleParseError::InvalidLevel { position: 3, value: -1 })
        );
    }
}
