//! Integration tests: capture file text → decode.

use piweather::config::DecoderConfig;
use piweather::dht11::{Frame, PulseShape, decode_with, synthesize};
use piweather::error::DecodeError;
use piweather::line::Level;
use piweather::samples::{parse_levels, parse_pairs};

/// Write `levels` the way the capture tool does: one `timestamp value` pair
/// per line, `period_us` apart.
fn render_pairs(levels: &[Level], period_us: u32) -> String {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| format!("{} {}\n", i as u32 * period_us, u8::from(level)))
        .collect()
}

#[test]
fn pair_file_decodes_with_calibrated_threshold() {
    let frame = Frame::with_checksum([48, 0, 23, 4]);
    // 10 us sampling: ~3 samples for a 0 bit, ~7 for a 1 bit.
    let levels = synthesize(&frame, &PulseShape { zero: 3, one: 7, gap: 5 });
    let text = render_pairs(&levels, 10);

    let capture = parse_pairs(&text).unwrap();
    assert_eq!(capture.levels, levels);
    let period = capture.sample_period_us.unwrap();
    assert!((period - 10.0).abs() < 1e-3);

    let config = DecoderConfig::calibrated(period).unwrap();
    assert_eq!(config.pulse_threshold, 5);
    let reading = decode_with(&capture.levels, &config).unwrap();
    assert!((reading.humidity - 48.0).abs() < 1e-4);
    assert!((reading.temperature - 23.4).abs() < 1e-4);
}

#[test]
fn bare_level_file_decodes() {
    let levels = synthesize(&Frame::with_checksum([60, 5, 26, 2]), &PulseShape::default());
    let text: String = levels
        .iter()
        .map(|&l| if l.is_high() { "1 " } else { "0 " })
        .collect();

    let parsed = parse_levels(&text).unwrap();
    assert!(decode_with(&parsed, &DecoderConfig::default()).is_ok());
}

#[test]
fn noise_only_file_is_incomplete() {
    let capture = parse_pairs("0 0\n10 1\n20 0\n30 1\n40 1\n").unwrap();
    assert_eq!(
        decode_with(&capture.levels, &DecoderConfig::default()),
        Err(DecodeError::IncompleteFrame { bits_available: 1 })
    );
}

#[test]
fn config_period_alone_calibrates_decoding() {
    let frame = Frame::with_checksum([48, 0, 23, 4]);
    // 5 us sampling: ~5 samples for a 0 bit, ~14 for a 1 bit.
    let levels = synthesize(&frame, &PulseShape { zero: 5, one: 14, gap: 10 });

    let config = DecoderConfig::from_json(r#"{"sample_period_us": 5.0}"#).unwrap();
    assert_eq!(config.pulse_threshold, 10);
    let reading = decode_with(&levels, &config).unwrap();
    assert!((reading.humidity - 48.0).abs() < 1e-4);
    assert!((reading.temperature - 23.4).abs() < 1e-4);
}
