//! Integration tests: LineSampler → decode.

use embedded_hal::digital::ErrorKind;
use piweather::capture::LineSampler;
use piweather::config::DecoderConfig;
use piweather::dht11::{Frame, PulseShape, decode_with, decode_with_report, synthesize};
use piweather::error::{CaptureError, DecodeError};

use super::mock_line::MockLine;

#[test]
fn sampled_line_decodes() {
    let frame = Frame::with_checksum([60, 5, 26, 2]);
    let script = synthesize(&frame, &PulseShape::default());
    let script_len = script.len();

    let mut sampler: LineSampler<_, 512> = LineSampler::new(MockLine::new(script));
    let samples = sampler.capture().unwrap();
    assert_eq!(samples.len(), 512);

    let reading = decode_with(samples, &DecoderConfig::default()).unwrap();
    assert!((reading.humidity - 60.5).abs() < 1e-4);
    assert!((reading.temperature - 26.2).abs() < 1e-4);

    let line = sampler.release();
    assert_eq!(line.reads, 512);
    assert!(script_len < 512);
}

#[test]
fn window_too_short_is_incomplete() {
    let frame = Frame::with_checksum([60, 5, 26, 2]);
    let script = synthesize(&frame, &PulseShape::default());

    // Every pulse takes at least 4 samples, so 80 cannot hold 40 of them.
    let mut sampler: LineSampler<_, 80> = LineSampler::new(MockLine::new(script));
    let samples = sampler.capture().unwrap();
    let (result, report) = decode_with_report(samples, &DecoderConfig::default());

    match result {
        Err(DecodeError::IncompleteFrame { bits_available }) => {
            assert_eq!(bits_available, report.pulses);
            assert!(bits_available < 40);
        }
        other => panic!("expected IncompleteFrame, got {other:?}"),
    }
}

#[test]
fn pin_fault_stops_capture() {
    let mut sampler: LineSampler<_, 64> =
        LineSampler::new(MockLine::failing_after(vec![Default::default(); 10]));
    assert_eq!(sampler.capture(), Err(CaptureError::Pin(ErrorKind::Other)));
    assert_eq!(sampler.samples().len(), 10);
}

#[test]
fn take_allows_back_to_back_captures() {
    let frame = Frame::with_checksum([33, 0, 19, 0]);
    let mut script = synthesize(&frame, &PulseShape::default());
    script.resize(400, Default::default());
    script.extend(synthesize(&Frame::with_checksum([34, 0, 19, 0]), &PulseShape::default()));

    let config = DecoderConfig::default();
    let mut sampler: LineSampler<_, 400> = LineSampler::new(MockLine::new(script));

    sampler.capture().unwrap();
    let first = sampler.take();
    sampler.capture().unwrap();
    let second = sampler.take();

    assert!((decode_with(&first, &config).unwrap().humidity - 33.0).abs() < 1e-4);
    assert!((decode_with(&second, &config).unwrap().humidity - 34.0).abs() < 1e-4);
}
