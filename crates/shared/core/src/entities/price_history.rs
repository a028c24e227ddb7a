use serde::Serialize;

use crate::error::HistoryError;
use crate::values::Price;

/// Append-only price series shared by all agents.
///
/// Always holds at least `memory + 2` prices, which is the deepest lookback
/// the information encoder needs (the previous step's signal).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistory {
    prices: Vec<Price>,
    memory: usize,
}

impl PriceHistory {
    /// Minimum number of prices for a given memory depth
    pub const fn required_len(memory: usize) -> usize {
        memory + 2
    }

    /// Create a history from a seed window
    pub fn new(prices: Vec<Price>, memory: usize) -> Result<Self, HistoryError> {
        let required = Self::required_len(memory);
        if prices.len() < required {
            return Err(HistoryError::Insufficient {
                required,
                available: prices.len(),
            });
        }
        Ok(Self { prices, memory })
    }

    /// Append the next price
    pub fn push(&mut self, price: Price) {
        self.prices.push(price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn memory(&self) -> usize {
        self.memory
    }

    pub fn as_slice(&self) -> &[Price] {
        &self.prices
    }

    /// Most recent price
    pub fn last(&self) -> Price {
        self.prices[self.prices.len() - 1]
    }

    /// Price one step before the most recent
    pub fn previous(&self) -> Price {
        self.prices[self.prices.len() - 2]
    }

    /// Latest realized log-return, `ln(X[-1] / X[-2])`
    pub fn latest_return(&self) -> f64 {
        (self.last() / self.previous()).ln()
    }

    /// Log-return `lag` steps back from the most recent one.
    ///
    /// `lag = 0` is `ln(X[-1] / X[-2])`, `lag = 1` is `ln(X[-2] / X[-3])`.
    pub fn log_return(&self, lag: usize) -> Result<f64, HistoryError> {
        let required = lag + 2;
        if self.prices.len() < required {
            return Err(HistoryError::Insufficient {
                required,
                available: self.prices.len(),
            });
        }
        let newer = self.prices[self.prices.len() - 1 - lag];
        let older = self.prices[self.prices.len() - 2 - lag];
        Ok((newer / older).ln())
    }

    /// All log-returns, oldest first
    pub fn log_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.prices.windows(2).map(|w| (w[1] / w[0]).ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn history() -> PriceHistory {
        PriceHistory::new(vec![1.0, 2.0, 4.0, 2.0, 3.0], 3).unwrap()
    }

    #[test]
    fn test_rejects_short_window() {
        let err = PriceHistory::new(vec![1.0, 2.0, 3.0], 3).unwrap_err();
        assert_eq!(
            err,
            HistoryError::Insufficient {
                required: 5,
                available: 3
            }
        );
    }

    #[test]
    fn test_push_grows_by_one() {
        let mut h = history();
        h.push(6.0);
        assert_eq!(h.len(), 6);
        assert_eq!(h.last(), 6.0);
        assert_eq!(h.previous(), 3.0);
    }

    #[test]
    fn test_log_return_lags() {
        let h = history();
        assert_relative_eq!(h.log_return(0).unwrap(), (3.0f64 / 2.0).ln());
        assert_relative_eq!(h.log_return(1).unwrap(), (2.0f64 / 4.0).ln());
        assert_relative_eq!(h.log_return(3).unwrap(), 2.0f64.ln());
        assert_relative_eq!(h.latest_return(), h.log_return(0).unwrap());
    }

    #[test]
    fn test_log_return_out_of_range() {
        let h = history();
        assert!(matches!(
            h.log_return(4),
            Err(HistoryError::Insufficient {
                required: 6,
                available: 5
            })
        ));
    }

    #[test]
    fn test_log_returns_oldest_first() {
        let returns: Vec<f64> = history().log_returns().collect();
        assert_eq!(returns.len(), 4);
        assert_relative_eq!(returns[0], 2.0f64.ln());
        assert_relative_eq!(returns[3], 1.5f64.ln());
    }
}
