//! mapsync scenario replay
//!
//! Replays a JSON scenario of declarations and style events against the
//! in-memory engine and prints the resulting engine calls.
//!
//! Usage:
//!   mapsync-replay --scenario scenarios/end_to_end.json

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mapsync_replay::{load_scenario, render_text, run_scenario};
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mapsync-replay")]
#[command(about = "Replay a mapsync scenario against the in-memory engine")]
struct Args {
    /// Path to the scenario file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let scenario = load_scenario(&args.scenario)
        .with_context(|| format!("loading {}", args.scenario.display()))?;
    info!("Replaying {} steps", scenario.steps.len());

    let report = run_scenario(&scenario).context("replay failed")?;
    match args.format {
        Format::Text => print!("{}", render_text(&report)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let diagnostics = report.diagnostics().count();
    if diagnostics > 0 {
        info!("{} diagnostics reported", diagnostics);
    }
    Ok(())
}
