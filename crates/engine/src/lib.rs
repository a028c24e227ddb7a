//! Agent-based market simulation engine
//!
//! A population of boundedly-rational traders picks between lookup-table
//! strategies scored on recent excess returns, a fundamentalist overlay pulls
//! toward the long-run average return, and the aggregate order flow moves the
//! price. Execution is rationed on whichever side of the market is in excess.
//!
//! ## Step pipeline
//!
//! ```text
//!   scores (previous signal, latest return)
//!        │
//!        ▼
//!   current signal ──► fundamentalist overlay (r̄, pf)
//!        │                     │
//!        ▼                     ▼
//!   per-agent decision: noise │ fundamentalist │ best strategy
//!        │
//!        ▼
//!   order sizing ──► aggregate flow ──► new price ──► rationing
//!        │
//!        ▼
//!   ledger (holdings + interest)
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Python bindings (optional, enabled with "python" feature)
#[cfg(feature = "python")]
mod python;

/// Python import name of the `python` feature build; equal to the lib name
pub const PYTHON_MODULE: &str = "bubbles_engine";

#[cfg(feature = "python")]
pub use python::*;

// Re-export key types at crate root
pub use application::agents::{Agent, Decision, DecisionSource};
pub use application::ledger::Ledger;
pub use application::simulation::{Simulation, SimulationMetrics, StepReport};
pub use domain::{
    ClearingOutcome, FundamentalistOverlay, FundamentalistSignal, Horizon, InformationEncoder,
    OrderFlow, Rationing, StrategyBook, StrategyTable,
};
pub use error::{SimulationError, SimulationResult};

pub use bubbles_core::{Action, Direction, Holdings, MarketConfig, PriceHistory, Signal};
