//! PiWeather — decode a captured DHT11 sample file.
//!
//! ```text
//!   samples file ──▶ samples::parse_* ──▶ dht11::decode_with_report ──▶ stdout
//!                                              ▲
//!                   --config / --threshold / --period-us / --calibrate
//! ```
#![deny(unused_must_use)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};

use piweather::config::{DecoderConfig, ThresholdOverride};
use piweather::dht11::decode_with_report;
use piweather::line::Level;
use piweather::samples;

#[derive(Parser, Debug)]
#[command(name = "piweather", version)]
#[command(about = "Decode a DHT11 pulse-train capture into humidity and temperature")]
#[command(after_help = "FILE FORMAT:\n  \
    Whitespace-separated `timestamp value` pairs, timestamps in microseconds,\n  \
    values 0 (line low) or 1 (line high). With --levels, a bare list of 0/1.")]
struct Args {
    /// Capture file to decode
    file: PathBuf,

    /// JSON decoder config (e.g. {\"pulse_threshold\": 3})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pulse width (samples) above which a bit is 1
    #[arg(short, long)]
    threshold: Option<u32>,

    /// Sample period in microseconds; derives the threshold
    #[arg(long, conflicts_with = "threshold")]
    period_us: Option<f32>,

    /// Derive the threshold from the file's own timestamps
    #[arg(long, conflicts_with_all = ["threshold", "period_us", "levels"])]
    calibrate: bool,

    /// File holds only 0/1 values, no timestamps
    #[arg(long)]
    levels: bool,

    /// Print the reading as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ── 1. Logging ────────────────────────────────────────────
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // ── 2. Load the capture ───────────────────────────────────
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let (levels, file_period_us): (Vec<Level>, Option<f32>) = if args.levels {
        let levels = samples::parse_levels(&text)
            .with_context(|| format!("parsing {}", args.file.display()))?;
        (levels, None)
    } else {
        let capture = samples::parse_pairs(&text)
            .with_context(|| format!("parsing {}", args.file.display()))?;
        (capture.levels, capture.sample_period_us)
    };
    info!("Loaded {} samples from {}", levels.len(), args.file.display());

    // ── 3. Resolve decoder config ─────────────────────────────
    let config = resolve_config(&args, file_period_us)?;
    info!("Pulse threshold: {} samples", config.pulse_threshold);

    // ── 4. Decode ─────────────────────────────────────────────
    let (result, report) = decode_with_report(&levels, &config);
    if report.truncated {
        warn!("Capture ends mid-pulse; the last high run was dropped");
    }
    if report.excess_bits > 0 {
        warn!("{} bits past the 40-bit frame were ignored", report.excess_bits);
    }

    let reading = match result {
        Ok(reading) => reading,
        Err(e) => {
            if let Some(frame) = report.frame {
                warn!("Raw frame: {:?}", frame.bytes());
            }
            bail!("{}: {e}", args.file.display());
        }
    };

    // ── 5. Report ─────────────────────────────────────────────
    if args.json {
        println!("{}", serde_json::to_string(&reading)?);
    } else {
        println!("{reading}");
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &Args, file_period_us: Option<f32>) -> Result<DecoderConfig> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            DecoderConfig::from_json(&text)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => DecoderConfig::default(),
    };

    let over = if let Some(threshold) = args.threshold {
        Some(ThresholdOverride::Samples(threshold))
    } else if let Some(period) = args.period_us {
        Some(ThresholdOverride::PeriodUs(period))
    } else if args.calibrate {
        if let Some(period) = file_period_us {
            info!("Estimated sample period: {period:.2} us");
        }
        Some(ThresholdOverride::FromCapture)
    } else {
        None
    };

    Ok(config.apply_override(over, file_period_us)?)
}
