//! Strategy Tables
//!
//! A strategy is a precomputed map from every possible information signal to
//! a trade direction. Each agent holds `S - 1` random tables plus a final
//! "no trade" slot that always holds.

use bubbles_core::{Action, Direction, Signal};
use rand::Rng;

/// Immutable lookup from signal to direction, `2^memory` entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    directions: Vec<Direction>,
}

impl StrategyTable {
    /// Draw a random table.
    ///
    /// For each signal the table buys with probability `(1 + P * M) / 2`,
    /// where `M` is the signal's trend strength. `P = 1` yields trend
    /// followers, `P = -1` contrarians, `P = 0` unbiased coins.
    pub fn generate<R: Rng + ?Sized>(memory: usize, polarization: f64, rng: &mut R) -> Self {
        let directions = (0..Signal::cardinality(memory))
            .map(|bits| {
                let trend = Signal::new(bits as u32).trend_strength(memory);
                let buy_probability = (1.0 + polarization * trend) / 2.0;
                if rng.r#gen::<f64>() < buy_probability {
                    Direction::Buy
                } else {
                    Direction::Sell
                }
            })
            .collect();

        Self { directions }
    }

    /// Build a table from explicit directions (index = signal bits)
    pub fn from_directions(directions: Vec<Direction>) -> Self {
        Self { directions }
    }

    pub fn direction(&self, signal: Signal) -> Direction {
        self.directions[signal.index()]
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Signals mapped to a buy
    pub fn buy_signals(&self) -> impl Iterator<Item = Signal> + '_ {
        self.directions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == Direction::Buy)
            .map(|(bits, _)| Signal::new(bits as u32))
    }
}

/// The strategy slots of one agent. Slot `tables.len()` is "no trade".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyBook {
    tables: Vec<StrategyTable>,
}

impl StrategyBook {
    /// Draw `num_strategies - 1` tables; the last slot is the no-trade slot
    pub fn generate<R: Rng + ?Sized>(
        num_strategies: usize,
        memory: usize,
        polarization: f64,
        rng: &mut R,
    ) -> Self {
        let tables = (0..num_strategies.saturating_sub(1))
            .map(|_| StrategyTable::generate(memory, polarization, rng))
            .collect();
        Self { tables }
    }

    pub fn from_tables(tables: Vec<StrategyTable>) -> Self {
        Self { tables }
    }

    /// Total slots, including the no-trade slot
    pub fn slots(&self) -> usize {
        self.tables.len() + 1
    }

    /// Slots backed by a lookup table (scored every step)
    pub fn table_slots(&self) -> usize {
        self.tables.len()
    }

    pub fn no_trade_slot(&self) -> usize {
        self.tables.len()
    }

    pub fn tables(&self) -> &[StrategyTable] {
        &self.tables
    }

    /// Direction of a table slot; `None` for the no-trade slot
    pub fn direction(&self, slot: usize, signal: Signal) -> Option<Direction> {
        self.tables.get(slot).map(|t| t.direction(signal))
    }

    /// What playing `slot` means for this signal
    pub fn action(&self, slot: usize, signal: Signal) -> Action {
        self.direction(slot, signal)
            .map(Action::from)
            .unwrap_or(Action::Hold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_table_covers_every_signal() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = StrategyTable::generate(5, 0.0, &mut rng);
        assert_eq!(table.len(), 32);
    }

    #[test]
    fn test_full_trend_polarization() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = StrategyTable::generate(5, 1.0, &mut rng);

        // All-up history always buys, all-down always sells
        assert_eq!(table.direction(Signal::new(0b11111)), Direction::Buy);
        assert_eq!(table.direction(Signal::new(0)), Direction::Sell);
    }

    #[test]
    fn test_full_contrarian_polarization() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = StrategyTable::generate(5, -1.0, &mut rng);

        assert_eq!(table.direction(Signal::new(0b11111)), Direction::Sell);
        assert_eq!(table.direction(Signal::new(0)), Direction::Buy);
    }

    #[test]
    fn test_lookup_is_stable() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = StrategyTable::generate(4, 0.3, &mut rng);
        for bits in 0..16 {
            let signal = Signal::new(bits);
            assert_eq!(table.direction(signal), table.direction(signal));
        }
    }

    #[test]
    fn test_same_seed_same_tables() {
        let book1 = StrategyBook::generate(3, 5, 0.0, &mut StdRng::seed_from_u64(11));
        let book2 = StrategyBook::generate(3, 5, 0.0, &mut StdRng::seed_from_u64(11));
        assert_eq!(book1, book2);
    }

    #[test]
    fn test_book_has_no_trade_slot() {
        let mut rng = StdRng::seed_from_u64(1);
        let book = StrategyBook::generate(3, 5, 0.0, &mut rng);

        assert_eq!(book.slots(), 3);
        assert_eq!(book.table_slots(), 2);
        assert_eq!(book.no_trade_slot(), 2);
        for bits in 0..32 {
            assert_eq!(book.action(2, Signal::new(bits)), Action::Hold);
            assert_eq!(book.direction(2, Signal::new(bits)), None);
        }
    }

    #[test]
    fn test_single_slot_book_only_holds() {
        let mut rng = StdRng::seed_from_u64(1);
        let book = StrategyBook::generate(1, 3, 0.0, &mut rng);
        assert_eq!(book.slots(), 1);
        assert_eq!(book.action(0, Signal::new(5)), Action::Hold);
    }

    #[test]
    fn test_buy_signals() {
        let table = StrategyTable::from_directions(vec![
            Direction::Sell,
            Direction::Buy,
            Direction::Buy,
            Direction::Sell,
        ]);
        let buys: Vec<u32> = table.buy_signals().map(|s| s.bits()).collect();
        assert_eq!(buys, vec![1, 2]);
    }
}
