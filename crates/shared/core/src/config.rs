//! Market configuration
//!
//! The six experiment parameters (polarization, g/lambda ratio, return memory,
//! interest rate, float, noise fraction) plus the structural constants of the
//! model. Every field has a default so partial JSON documents deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Largest supported memory depth (strategy tables hold `2^memory` entries)
pub const MAX_MEMORY: usize = 20;

/// Configuration for one simulated market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    // Experiment parameters
    /// Polarization P in [-1, 1]: +1 biases tables toward trend following,
    /// -1 toward mean reversion
    pub polarization: f64,
    /// Ratio g / lambda; the price-impact scale is `order_fraction / g_sur_l`
    pub g_sur_l: f64,
    /// Decay of the weighted average return, in (0, 1)
    pub alpha: f64,
    /// Interest rate paid on cash, also the excess-return threshold
    pub rho: f64,
    /// Shares outstanding; order flow is normalized by this float
    pub phi: f64,
    /// Fraction of noise-trading decisions, in [0, 1]
    pub pi: f64,

    // Structural constants
    /// Number of agents (N)
    pub num_agents: usize,
    /// Strategy slots per agent (S), the last one being "no trade"
    pub num_strategies: usize,
    /// Memory depth in returns (m)
    pub memory: usize,
    /// Fraction of cash or inventory committed per order (g)
    pub order_fraction: f64,
    /// Fundamentalist confidence (f)
    pub confidence: f64,
    /// Score smoothing weight on the latest payoff (beta), in (0, 1)
    pub score_memory: f64,

    // Initial conditions
    /// Base level of the seeded price window
    pub initial_price: f64,
    /// Width of the uniform jitter added to each seeded price
    pub initial_jitter: f64,
    /// Random seed (for reproducibility); `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            polarization: 0.0,
            g_sur_l: 0.1,
            alpha: 1.0 - 1e-4,
            rho: 0.02,
            phi: 3_003.0,
            pi: 0.0,
            num_agents: 1_001,
            num_strategies: 3,
            memory: 5,
            order_fraction: 0.005,
            confidence: 0.05,
            score_memory: 1.0 - 1e-2,
            initial_price: 5.0,
            initial_jitter: 1e-5,
            seed: None,
        }
    }
}

impl MarketConfig {
    /// Parameters of the reference bubble/crash experiment
    /// (P = 0, g/lambda = 0.1, phi = 50, alpha = 0.01, rho = 0.001, pi = 0)
    pub fn bubble_scenario() -> Self {
        Self {
            polarization: 0.0,
            g_sur_l: 0.1,
            phi: 50.0,
            alpha: 1e-2,
            rho: 1e-3,
            pi: 0.0,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_polarization(mut self, polarization: f64) -> Self {
        self.polarization = polarization;
        self
    }

    pub fn with_noise_fraction(mut self, pi: f64) -> Self {
        self.pi = pi;
        self
    }

    pub fn with_agents(mut self, num_agents: usize) -> Self {
        self.num_agents = num_agents;
        self
    }

    pub fn with_memory(mut self, memory: usize) -> Self {
        self.memory = memory;
        self
    }

    /// Price-impact scale lambda
    pub fn lambda(&self) -> f64 {
        self.order_fraction / self.g_sur_l
    }

    /// Check every constraint; the first violation is returned
    pub fn validate(&self) -> ConfigResult<()> {
        if !(-1.0..=1.0).contains(&self.polarization) {
            return Err(ConfigError::PolarizationOutOfRange(self.polarization));
        }
        positive("g_sur_l", self.g_sur_l)?;
        open_unit("alpha", self.alpha)?;
        positive("rho", self.rho)?;
        positive("phi", self.phi)?;
        closed_unit("pi", self.pi)?;

        if self.num_agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if self.num_strategies == 0 {
            return Err(ConfigError::NoStrategies);
        }
        if self.memory == 0 || self.memory > MAX_MEMORY {
            return Err(ConfigError::MemoryOutOfRange {
                memory: self.memory,
                max: MAX_MEMORY,
            });
        }
        positive("order_fraction", self.order_fraction)?;
        non_negative("confidence", self.confidence)?;
        open_unit("score_memory", self.score_memory)?;

        positive("initial_price", self.initial_price)?;
        non_negative("initial_jitter", self.initial_jitter)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    // NaN fails the comparison as well
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn closed_unit(name: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutsideUnitInterval { name, value })
    }
}

fn open_unit(name: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutsideOpenUnitInterval { name, value })
    }
}
