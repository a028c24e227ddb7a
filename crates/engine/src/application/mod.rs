//! Application layer: agents and the step loop
//!
//! Contains:
//! - **agents**: per-agent strategy scores and the decision rule
//! - **ledger**: settlement of executed quantities and interest accrual
//! - **simulation**: `Simulation`, which owns all state and the random source

pub mod agents;
pub mod ledger;
pub mod simulation;
