//! Fuzz target: `dht11::decode_with_report`
//!
//! The first byte picks the pulse threshold; every remaining bit is one line
//! sample. Asserts that decoding never panics and that the report agrees
//! with the result.
//!
//! cargo fuzz run fuzz_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use piweather::config::DecoderConfig;
use piweather::dht11::decode_with_report;
use piweather::error::DecodeError;
use piweather::line::Level;

fuzz_target!(|data: &[u8]| {
    let Some((&threshold, rest)) = data.split_first() else {
        return;
    };
    let Ok(config) = DecoderConfig::with_threshold(u32::from(threshold.max(1))) else {
        return;
    };

    let samples: Vec<Level> = rest
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| Level::from((byte >> i) & 1 == 1)))
        .collect();

    let (result, report) = decode_with_report(&samples, &config);
    assert_eq!(report.samples, samples.len());
    assert!(report.pulses <= samples.len() / 2 + 1);

    match result {
        Ok(_) => {
            let frame = report.frame.expect("a reading implies a frame");
            assert!(frame.checksum_valid());
        }
        Err(DecodeError::IncompleteFrame { bits_available }) => {
            assert!(bits_available < 40);
            assert_eq!(bits_available, report.pulses);
            assert!(report.frame.is_none());
        }
        Err(DecodeError::ChecksumMismatch { expected, actual }) => {
            assert_ne!(expected, actual);
            assert!(report.pulses >= 40);
        }
    }
});
