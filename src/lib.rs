//! PiWeather DHT11 decoder library.
//!
//! Turns a captured sequence of line samples from a single-wire DHT11-class
//! sensor into a checksum-verified humidity/temperature [`Reading`].
//!
//! ```text
//!   LineSampler / samples file
//!          │ &[Level]
//!          ▼
//!   segment ─▶ assemble ─▶ decode_frame ─▶ Result<Reading, DecodeError>
//! ```

#![deny(unused_must_use)]

pub mod capture;
pub mod config;
pub mod dht11;
pub mod error;
pub mod line;
pub mod samples;

pub use config::DecoderConfig;
pub use dht11::{DecodeReport, Frame, Reading, decode, decode_with, decode_with_report};
pub use error::{DecodeError, Error, Result};
pub use line::Level;
