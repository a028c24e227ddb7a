//! Domain layer: pure market mechanics
//!
//! Nothing here owns agents or the random source; callers pass them in.

mod clearing;
mod fundamentalist;
mod information;
mod strategy_table;

pub use clearing::{ClearingOutcome, OrderFlow, Rationing, clear, next_price, order_quantity};
pub use fundamentalist::{FundamentalistOverlay, FundamentalistSignal, weighted_average_return};
pub use information::{Horizon, InformationEncoder};
pub use strategy_table::{StrategyBook, StrategyTable};
