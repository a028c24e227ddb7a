//! Command-line driver for the bubbles market model
//!
//! Loads a [`RunConfig`] (market parameters plus a step count), runs one
//! simulation and reports the aggregated metrics.

pub mod cli;
pub mod config;
pub mod report;

pub use cli::{CliArgs, Command};
pub use config::{RunConfig, RunnerError};
pub use report::{format_summary, metrics_json};

use bubbles_engine::{Simulation, SimulationMetrics};
use log::info;

/// Build the market described by `config` and run it to completion
pub fn run(config: &RunConfig) -> Result<SimulationMetrics, RunnerError> {
    let mut sim = Simulation::new(config.market.clone())?;
    info!("running {} steps (seed {})", config.steps, sim.seed());
    let metrics = sim.run(config.steps)?;
    if metrics.degenerated {
        info!("run ended in a degenerate price state");
    }
    Ok(metrics)
}
