//! Bubbles Core Domain
//!
//! Pure domain types for the Bubbles market model.
//! This crate contains no randomness, no I/O, and is 100% unit testable.

pub mod config;
pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use config::{MAX_MEMORY, MarketConfig};
pub use entities::{Action, Direction, Holdings, PriceHistory};
pub use error::{ConfigError, HistoryError};
pub use values::{Price, Quantity, Signal};
