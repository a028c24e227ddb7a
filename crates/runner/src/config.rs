//! Run configuration loading
//!
//! A run file is a JSON document with the market parameters and a step
//! count. Missing fields take their defaults:
//!
//! ```json
//! { "market": { "phi": 50.0, "alpha": 0.01, "rho": 0.001, "seed": 2 }, "steps": 500 }
//! ```

use bubbles_core::MarketConfig;
use bubbles_engine::SimulationError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

fn default_steps() -> u64 {
    1_000
}

/// One run: a market and how long to simulate it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default = "default_steps")]
    pub steps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            steps: default_steps(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RunnerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| RunnerError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, RunnerError> {
        serde_json::from_str(json).map_err(|e| RunnerError::Parse(e.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RunConfig::from_json("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.steps, 1_000);
    }

    #[test]
    fn test_partial_market() {
        let config =
            RunConfig::from_json(r#"{ "market": { "phi": 50.0, "seed": 2 }, "steps": 10 }"#)
                .unwrap();
        assert_eq!(config.market.phi, 50.0);
        assert_eq!(config.market.seed, Some(2));
        assert_eq!(config.market.num_agents, 1_001);
        assert_eq!(config.steps, 10);
    }

    #[test]
    fn test_malformed_json() {
        let err = RunConfig::from_json("{ steps: ").unwrap_err();
        assert!(matches!(err, RunnerError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RunConfig::from_file("/definitely/not/here.json").unwrap_err();
        match err {
            RunnerError::Io { path, .. } => assert_eq!(path, "/definitely/not/here.json"),
            other => panic!("expected Io error, got {other}"),
        }
    }
}
