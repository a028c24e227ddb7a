//! Simulation Framework
//!
//! [`Simulation`] owns the agents, the shared price history, the
//! fundamentalist overlay and the single random source. Each call to
//! [`Simulation::step`] advances the market by one time unit and returns a
//! [`StepReport`]; [`Simulation::run`] loops and returns the accumulated
//! [`SimulationMetrics`].

mod metrics;
mod runner;

pub use metrics::{SimulationMetrics, StepReport};
pub use runner::Simulation;
