//! Fuzz target: `samples::parse_pairs` / `samples::parse_levels`
//!
//! Arbitrary text must parse or fail with a typed error, never panic, and
//! a successful parse must decode without panicking.
//!
//! cargo fuzz run fuzz_samples

#![no_main]

use libfuzzer_sys::fuzz_target;
use piweather::dht11::decode;
use piweather::samples::{parse_levels, parse_pairs};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(capture) = parse_pairs(text) {
        if let Some(period) = capture.sample_period_us {
            assert!(period > 0.0);
        }
        let _ = decode(&capture.levels, 3);
    }

    if let Ok(levels) = parse_levels(text) {
        let _ = decode(&levels, 3);
    }
});
