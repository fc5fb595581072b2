//! Formicary - headless colony runner
//!
//! Loads a scenario, runs it for a number of turns (or until the queen
//! dies) and prints a summary, optionally as JSON and with an ASCII map.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use formicary::colony::render_map;
use formicary::core::error::Result;
use formicary::{ColonyConfig, Scenario, SimulationController};

/// Headless ant colony simulation
#[derive(Parser, Debug)]
#[command(name = "formicary")]
#[command(about = "Run an ant colony simulation and report the outcome")]
struct Args {
    /// Maximum number of turns to run
    #[arg(long, default_value_t = 1000)]
    turns: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Starting setup: normal, queen, scout, forager or soldier
    #[arg(long, default_value = "normal")]
    scenario: Scenario,

    /// TOML config file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print an ASCII map of the final state
    #[arg(long)]
    map: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formicary=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => ColonyConfig::load(path)?,
        None => ColonyConfig::default(),
    };
    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random);
    config.seed = Some(seed);
    tracing::info!(seed, scenario = args.scenario.name(), "formicary starting");

    let mut sim = SimulationController::new(config)?;
    sim.load_scenario(args.scenario)?;

    let mut delivered = 0;
    let processed = sim.run_for(args.turns, |report| {
        delivered += report.food_delivered();
        for event in report.deaths() {
            tracing::debug!(?event, "death");
        }
    })?;
    tracing::info!(processed, delivered, "run finished");

    let summary = sim.summary();
    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        println!("{}", summary.summary());
    }
    if args.map {
        println!("{}", render_map(&sim.colony().grid));
    }
    Ok(())
}
