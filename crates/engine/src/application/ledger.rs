//! Settlement
//!
//! Executed quantities move inventory; cash accrues interest on the previous
//! balance and then pays for (or receives) the trade at the new price.

use super::agents::Agent;
use bubbles_core::{Holdings, Price, Quantity};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ledger {
    rho: f64,
}

impl Ledger {
    pub fn new(rho: f64) -> Self {
        Self { rho }
    }

    /// `risky += delta; cash = cash · (1 + rho) - delta · price`
    pub fn settle(&self, holdings: &mut Holdings, delta: Quantity, price: Price) {
        holdings.risky += delta;
        holdings.cash = holdings.cash * (1.0 + self.rho) - delta * price;
    }

    /// Settle every agent; interest accrues even when `delta` is zero
    pub fn settle_all(&self, agents: &mut [Agent], deltas: &[Quantity], price: Price) {
        debug_assert_eq!(agents.len(), deltas.len());
        for (agent, &delta) in agents.iter_mut().zip(deltas) {
            self.settle(agent.holdings_mut(), delta, price);
        }
    }
}
