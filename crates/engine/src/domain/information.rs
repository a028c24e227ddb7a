//! Information Encoder
//!
//! Turns the last `m` log-returns into an `m`-bit signal: bit `i` is set when
//! the return `i` steps back beat the interest rate.

use bubbles_core::{HistoryError, PriceHistory, Signal};

/// Which step the signal describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// Including the newest price (used for trading)
    Current,
    /// As of one step earlier (used to score the return that just happened)
    Previous,
}

impl Horizon {
    fn lag(self) -> usize {
        match self {
            Horizon::Current => 0,
            Horizon::Previous => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationEncoder {
    memory: usize,
    rho: f64,
}

impl InformationEncoder {
    pub fn new(memory: usize, rho: f64) -> Self {
        Self { memory, rho }
    }

    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Encode the excess-return sign pattern.
    ///
    /// Needs `memory + 1` prices for [`Horizon::Current`] and `memory + 2`
    /// for [`Horizon::Previous`].
    pub fn encode(&self, history: &PriceHistory, horizon: Horizon) -> Result<Signal, HistoryError> {
        let lag = horizon.lag();
        let required = self.memory + 1 + lag;
        if history.len() < required {
            return Err(HistoryError::Insufficient {
                required,
                available: history.len(),
            });
        }

        let mut bits = 0u32;
        for i in 0..self.memory {
            if history.log_return(i + lag)? - self.rho > 0.0 {
                bits |= 1 << i;
            }
        }
        Ok(Signal::new(bits))
    }
}
