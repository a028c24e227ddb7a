//! Error types for the simulation engine

use bubbles_core::{ConfigError, HistoryError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Price history error: {0}")]
    History(#[from] HistoryError),
}

pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
