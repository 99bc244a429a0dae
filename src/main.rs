//! Command-line driver for the turbulent kinetic energy average.
//!
//! Discovers the output-time directories under a case root, applies the
//! requested time selection, and runs the accumulation pass over them.
//! Exit code is zero on success; any failed field resolution terminates
//! the run with a diagnostic and a non-zero status.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tkepost::{discover_times, run_tke_average, CaseStore, TimeSelection, TkeOptions};

/// Compute a time-averaged turbulent kinetic energy field from stored
/// velocity snapshots.
#[derive(Parser)]
#[command(name = "tkepost")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Time-averaged turbulent kinetic energy post-processor", long_about = None)]
struct Cli {
    /// Case directory containing the output-time subdirectories
    #[arg(short, long, default_value = ".")]
    case: PathBuf,

    /// Only process times >= this value
    #[arg(long)]
    from: Option<f64>,

    /// Only process times <= this value
    #[arg(long)]
    to: Option<f64>,

    /// Process every n-th selected time
    #[arg(long, default_value_t = 1)]
    every: usize,

    /// Process only the latest selected time
    #[arg(long)]
    latest: bool,

    /// Instantaneous velocity field name
    #[arg(long, default_value = "U")]
    velocity: String,

    /// Mean velocity field name
    #[arg(long, default_value = "UMean")]
    mean: String,

    /// Eddy-viscosity field name checked for presence per snapshot
    #[arg(long, default_value = "nut")]
    viscosity: String,

    /// Output field name
    #[arg(long, default_value = "kMean")]
    output: String,

    /// Skip the per-snapshot eddy-viscosity presence check
    #[arg(long)]
    no_viscosity_check: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let all_times = discover_times(&cli.case)
        .with_context(|| format!("Failed to scan case directory {}", cli.case.display()))?;
    tracing::info!(
        found = all_times.len(),
        case = %cli.case.display(),
        "discovered output times"
    );

    let selection = TimeSelection {
        from: cli.from,
        to: cli.to,
        every: cli.every,
        latest: cli.latest,
    };
    let times = selection.apply(&all_times);

    let options = TkeOptions {
        velocity_name: cli.velocity,
        mean_name: cli.mean,
        viscosity_name: cli.viscosity,
        output_name: cli.output,
        require_viscosity: !cli.no_viscosity_check,
    };

    let mut store = CaseStore::new(&cli.case);
    let report = run_tke_average(&mut store, &times, &options)
        .context("Turbulent kinetic energy accumulation failed")?;

    tracing::info!(
        samples = report.samples,
        time = %report.output_time,
        "done: {}",
        report.summary
    );
    Ok(())
}
