//! Fundamentalist Overlay
//!
//! Market-wide probability of trading against the long-run average return.
//! The average is an alpha-geometric sum over every log-return in the history,
//! normalized by `1 / (1 - alpha)`:
//!
//! ```text
//! r̄ = Σ_{t'=0}^{t-2} alpha^(t - t' - 1) · ln(X[t'+1] / X[t']) / (1 - alpha)
//! pf = min(1, f · |r̄ - rho| / rho)
//! ```
//!
//! Appending a return multiplies every existing weight by alpha and gives the
//! new return weight alpha, so the sum is carried forward in O(1):
//! `S <- alpha · (S + r_new)`.

use bubbles_core::{Direction, Price, PriceHistory};
use serde::Serialize;

/// Snapshot of the overlay for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FundamentalistSignal {
    /// Weighted average log-return r̄
    pub average_return: f64,
    /// Probability pf of a fundamentalist decision
    pub probability: f64,
    /// Sell when r̄ exceeds the interest rate, buy otherwise
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalistOverlay {
    alpha: f64,
    rho: f64,
    confidence: f64,
    weighted_sum: f64,
}

impl FundamentalistOverlay {
    /// Build the running sum from an existing history
    pub fn new(alpha: f64, rho: f64, confidence: f64, history: &PriceHistory) -> Self {
        let weighted_sum = history
            .log_returns()
            .fold(0.0, |sum, r| alpha * (sum + r));
        Self {
            alpha,
            rho,
            confidence,
            weighted_sum,
        }
    }

    /// Fold in the return realized by the newest price
    pub fn observe(&mut self, log_return: f64) {
        self.weighted_sum = self.alpha * (self.weighted_sum + log_return);
    }

    pub fn average_return(&self) -> f64 {
        self.weighted_sum / (1.0 - self.alpha)
    }

    pub fn probability(&self) -> f64 {
        let excess = (self.average_return() - self.rho).abs();
        (self.confidence * excess / self.rho).min(1.0)
    }

    pub fn signal(&self) -> FundamentalistSignal {
        let average_return = self.average_return();
        let direction = if average_return > self.rho {
            Direction::Sell
        } else {
            Direction::Buy
        };
        FundamentalistSignal {
            average_return,
            probability: self.probability(),
            direction,
        }
    }
}

/// Full recomputation of r̄ over a price series
pub fn weighted_average_return(prices: &[Price], alpha: f64) -> f64 {
    let t = prices.len();
    let mut sum = 0.0;
    for t_ in 0..t.saturating_sub(1) {
        let weight = alpha.powi((t - t_ - 1) as i32);
        sum += weight * (prices[t_ + 1] / prices[t_]).ln();
    }
    sum / (1.0 - alpha)
}
