//! Fixed-capacity line sampler over an `embedded-hal` input pin.
//!
//! This is the acquisition side of the decoder: it reads the data line once
//! per call and keeps the levels in a `heapless` buffer so that a capture
//! never allocates. Pacing the calls at a fixed interval, and the start
//! handshake that makes the sensor transmit, belong to the caller.

use embedded_hal::digital::{Error as _, InputPin};
use heapless::Vec;
use log::warn;

use crate::error::CaptureError;
use crate::line::Level;

/// A DHT11 transmission is ~4 ms; at 10 us per sample that fits in 512.
pub const DEFAULT_CAPTURE_LEN: usize = 512;

pub struct LineSampler<P, const N: usize = DEFAULT_CAPTURE_LEN> {
    pin: P,
    buffer: Vec<Level, N>,
}

impl<P: InputPin, const N: usize> LineSampler<P, N> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            buffer: Vec::new(),
        }
    }

    /// Read the pin once and append the level. A full buffer is reported
    /// without touching the pin.
    pub fn sample(&mut self) -> Result<Level, CaptureError> {
        if self.buffer.is_full() {
            return Err(CaptureError::BufferFull { capacity: N });
        }
        let level = self
            .pin
            .is_high()
            .map(Level::from)
            .map_err(|e| {
                warn!("capture: pin read failed after {} samples", self.buffer.len());
                CaptureError::Pin(e.kind())
            })?;
        self.buffer
            .push(level)
            .map_err(|_| CaptureError::BufferFull { capacity: N })?;
        Ok(level)
    }

    /// Sample until the buffer is full, calling `pace` before every read.
    pub fn capture_with<F: FnMut()>(&mut self, mut pace: F) -> Result<&[Level], CaptureError> {
        while !self.buffer.is_full() {
            pace();
            self.sample()?;
        }
        Ok(&self.buffer)
    }

    /// Sample until the buffer is full, as fast as the pin can be read.
    pub fn capture(&mut self) -> Result<&[Level], CaptureError> {
        self.capture_with(|| {})
    }

    pub fn samples(&self) -> &[Level] {
        &self.buffer
    }

    /// Hand over the captured levels and start a fresh buffer.
    pub fn take(&mut self) -> Vec<Level, N> {
        core::mem::take(&mut self.buffer)
    }

    pub fn release(self) -> P {
        self.pin
    }
}
