//! Agent state: strategy book, scores, holdings.

use crate::domain::StrategyBook;
use bubbles_core::{Action, Holdings, Signal};

/// A single trader
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    book: StrategyBook,
    /// One score per slot; the no-trade slot stays at 0
    scores: Vec<f64>,
    holdings: Holdings,
}

impl Agent {
    pub fn new(book: StrategyBook, holdings: Holdings) -> Self {
        let scores = vec![0.0; book.slots()];
        Self {
            book,
            scores,
            holdings,
        }
    }

    pub fn book(&self) -> &StrategyBook {
        &self.book
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub(crate) fn holdings_mut(&mut self) -> &mut Holdings {
        &mut self.holdings
    }

    /// Score every table slot on the return just realized.
    ///
    /// `score = (1 - beta) · score + beta · direction(signal) · excess_return`,
    /// where `signal` is the information that was available before the return.
    pub fn update_scores(&mut self, signal: Signal, excess_return: f64, beta: f64) {
        for (slot, table) in self.book.tables().iter().enumerate() {
            let payoff = table.direction(signal).sign() * excess_return;
            self.scores[slot] = (1.0 - beta) * self.scores[slot] + beta * payoff;
        }
    }

    /// Slot with the highest score; ties go to the lowest index
    pub fn best_strategy(&self) -> usize {
        let mut best = 0;
        for (slot, &score) in self.scores.iter().enumerate().skip(1) {
            if score > self.scores[best] {
                best = slot;
            }
        }
        best
    }

    /// Action of the best strategy for the current signal
    pub fn best_action(&self, signal: Signal) -> Action {
        self.book.action(self.best_strategy(), signal)
    }
}
