//! Agent Framework
//!
//! Every agent is the same kind of boundedly-rational trader. Each step it
//! either trades as noise, follows the market-wide fundamentalist signal, or
//! plays the strategy that has scored best so far.

mod agent;
mod decision;

pub use agent::Agent;
pub use decision::{Decision, DecisionSource, decide};
