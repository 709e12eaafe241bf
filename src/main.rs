//! tapmeasure - point-to-point distance measurement over an AR tracking feed
//!
//! Headless driver: replays a recorded tracking trace through a measurement
//! session and reports the distance text the UI would show.

mod config;
mod headless;
mod trace;

use anyhow::Result;
use clap::Parser;
use config::DisplayConfig;
use headless::HeadlessConfig;
use std::path::PathBuf;
use tapmeasure_core::UnitStyle;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay an AR tracking trace and measure distances", long_about = None)]
struct Args {
    /// Recorded tracking trace (JSON)
    #[arg(short, long)]
    trace: PathBuf,

    /// Display config (TOML); defaults to config/display.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write every measurement change as JSONL
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Override the unit label style (short, medium, long)
    #[arg(long)]
    unit_style: Option<UnitStyle>,

    /// Override the number of fraction digits
    #[arg(long)]
    fraction_digits: Option<usize>,

    /// Save the effective display config to this path
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var).
    // Logs go to stderr; stdout carries the measurement result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting tapmeasure v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut display = match args.config.as_deref() {
        Some(path) => DisplayConfig::load_from_path(path),
        None => DisplayConfig::load(),
    };
    if let Some(style) = args.unit_style {
        display.unit_style = style;
    }
    if let Some(digits) = args.fraction_digits {
        display.fraction_digits = digits;
    }
    if let Some(path) = args.write_config.as_deref() {
        display.save_to_path(path)?;
        info!(path = %path.display(), "display config written");
    }

    let summary = headless::run(HeadlessConfig {
        trace: args.trace,
        display,
        event_log: args.event_log,
        max_frames: args.max_frames,
    })?;

    println!("{}", summary.distance_text);
    println!(
        "frames={} hits={} misses={} changes={} measuring={}",
        summary.frames, summary.hits, summary.misses, summary.changes, summary.is_measuring
    );
    Ok(())
}
