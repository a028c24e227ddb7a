use thiserror::Error;

/// Invalid market configuration, reported before any state is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Polarization must lie in [-1, 1], got {0}")]
    PolarizationOutOfRange(f64),

    #[error("{name} must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutsideUnitInterval { name: &'static str, value: f64 },

    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    OutsideOpenUnitInterval { name: &'static str, value: f64 },

    #[error("At least one agent is required")]
    NoAgents,

    #[error("At least one strategy slot is required")]
    NoStrategies,

    #[error("Memory depth must be between 1 and {max}, got {memory}")]
    MemoryOutOfRange { memory: usize, max: usize },
}

/// Price history too short for the requested lookback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Price history needs at least {required} entries, has {available}")]
    Insufficient { required: usize, available: usize },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
