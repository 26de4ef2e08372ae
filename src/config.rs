//! Decoder configuration parameters
//!
//! The pulse-width threshold is the only tunable of the decode pipeline.
//! It is a sample count, so it only means something relative to the rate
//! at which the line was sampled. When the sampling period is known the
//! threshold follows from it, and the two must agree.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// DHT11 holds the line high ~26-28 us for a 0 bit and ~70 us for a 1 bit.
/// Pulses longer than this are 1 bits.
pub const BIT_BOUNDARY_US: f32 = 50.0;

/// Threshold used by the reference capture tooling.
pub const DEFAULT_PULSE_THRESHOLD: u32 = 3;

/// Core decoder configuration
///
/// In a config document either field may be omitted. A period on its own
/// sets the threshold; a threshold on its own leaves the period unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigDocument")]
pub struct DecoderConfig {
    /// Pulses wider than this many samples decode as bit 1; the rest as bit 0.
    pub pulse_threshold: u32,
    /// Sampling period of the capture (microseconds), when known.
    pub sample_period_us: Option<f32>,
}

/// On-disk form, before the threshold is resolved.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigDocument {
    pulse_threshold: Option<u32>,
    sample_period_us: Option<f32>,
}

impl TryFrom<ConfigDocument> for DecoderConfig {
    type Error = ConfigError;

    fn try_from(doc: ConfigDocument) -> Result<Self, Self::Error> {
        let config = match (doc.pulse_threshold, doc.sample_period_us) {
            (None, None) => Self::default(),
            (Some(threshold), None) => Self::with_threshold(threshold)?,
            (None, Some(period)) => Self::calibrated(period)?,
            (Some(threshold), Some(period)) => Self {
                pulse_threshold: threshold,
                sample_period_us: Some(period),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            pulse_threshold: DEFAULT_PULSE_THRESHOLD,
            sample_period_us: None,
        }
    }
}

/// Threshold for a sampling period: the 50 us bit boundary in samples.
pub fn threshold_for_period(sample_period_us: f32) -> Result<u32, ConfigError> {
    if !sample_period_us.is_finite() || sample_period_us <= 0.0 {
        return Err(ConfigError::InvalidSamplePeriod);
    }
    let threshold = (BIT_BOUNDARY_US / sample_period_us).floor();
    if threshold < 1.0 {
        return Err(ConfigError::SamplePeriodTooCoarse);
    }
    Ok(threshold.min(u32::MAX as f32) as u32)
}

/// Where a command-line threshold override comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdOverride {
    /// An explicit sample count.
    Samples(u32),
    /// A sampling period in microseconds.
    PeriodUs(f32),
    /// The period measured from the capture's own timestamps.
    FromCapture,
}

impl DecoderConfig {
    /// Use an explicit threshold.
    pub fn with_threshold(pulse_threshold: u32) -> Result<Self, ConfigError> {
        let config = Self {
            pulse_threshold,
            sample_period_us: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Derive the threshold from the sampling period so that the 50 us bit
    /// boundary falls between the two pulse widths.
    pub fn calibrated(sample_period_us: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            pulse_threshold: threshold_for_period(sample_period_us)?,
            sample_period_us: Some(sample_period_us),
        })
    }

    /// Reject values that would make every decode meaningless, including a
    /// threshold that contradicts the stated sampling period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if let Some(period) = self.sample_period_us {
            let calibrated = threshold_for_period(period)?;
            if calibrated != self.pulse_threshold {
                return Err(ConfigError::ThresholdMismatch {
                    threshold: self.pulse_threshold,
                    calibrated,
                });
            }
        }
        Ok(())
    }

    /// Parse a JSON config document and validate it.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply a command-line override on top of this config. An override
    /// replaces the threshold and period outright.
    pub fn apply_override(
        self,
        over: Option<ThresholdOverride>,
        capture_period_us: Option<f32>,
    ) -> Result<Self, ConfigError> {
        let config = match over {
            None => self,
            Some(ThresholdOverride::Samples(threshold)) => Self::with_threshold(threshold)?,
            Some(ThresholdOverride::PeriodUs(period)) => Self::calibrated(period)?,
            Some(ThresholdOverride::FromCapture) => {
                Self::calibrated(capture_period_us.ok_or(ConfigError::NoCapturePeriod)?)?
            }
        };
        config.validate()?;
        Ok(config)
    }
}
