//! # Crane Simulation Binary
//!
//! Runs a crane scenario headless and writes one JSON object per sample to
//! stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Built-in demo scenario
//! crane_sim
//!
//! # Scenario file, different formulation, verbose logging
//! crane_sim scenarios/cart_to_stop.toml --model-type non_linear_original -v
//!
//! # JSON logs
//! crane_sim scenarios/hoist_and_swing.toml --json
//! ```

#![deny(warnings)]

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use crane_common::config::{ConfigError, ConfigLoader, LogLevel};
use crane_common::model::ModelType;
use crane_sim::{ScenarioConfig, SimError, run_scenario};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Crane Sim - headless runner for the 3D crane model
#[derive(Parser, Debug)]
#[command(name = "crane_sim")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Headless scenario runner for the 3D crane model")]
#[command(long_about = None)]
struct Args {
    /// Scenario file (TOML). The built-in demo runs when omitted.
    #[arg(value_name = "SCENARIO")]
    scenario: Option<PathBuf>,

    /// Override the dynamics formulation of the scenario
    #[arg(short = 'm', long, value_name = "TYPE")]
    model_type: Option<ModelType>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let scenario = load_scenario(&args);

    let level = scenario
        .as_ref()
        .map(|s| s.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    let result = scenario.map_err(SimError::from).and_then(|s| run(&args, s));
    if let Err(e) = result {
        error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig, ConfigError> {
    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::demo(),
    };
    if let Some(model_type) = args.model_type {
        scenario.model.model_type = model_type;
    }
    Ok(scenario)
}

fn run(args: &Args, scenario: ScenarioConfig) -> Result<(), SimError> {
    info!(
        "{} v{} starting ({})",
        scenario.shared.service_name,
        env!("CARGO_PKG_VERSION"),
        args.scenario
            .as_ref()
            .map_or_else(|| "demo".to_string(), |p| p.display().to_string())
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run_scenario(&scenario, |sample| {
        serde_json::to_writer(&mut out, sample)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;
    out.flush()?;

    info!(
        samples = summary.samples,
        dropped_time = summary.dropped_time,
        "Output complete"
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the scenario's level.
fn setup_tracing(args: &Args, level: LogLevel) {
    let filter = if args.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
    };

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
