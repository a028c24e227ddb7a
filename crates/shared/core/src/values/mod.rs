use serde::{Deserialize, Serialize};

/// Price of the risky asset, in cash units
pub type Price = f64;

/// Signed quantity of the risky asset (positive = bought, negative = sold)
pub type Quantity = f64;

/// Information signal: the sign pattern of the last `m` excess log-returns.
///
/// Bit `i` is set when the return `i` steps back (0 = most recent) exceeded
/// the interest rate. The value lies in `[0, 2^m)` and indexes strategy tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Signal(u32);

impl Signal {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Table index for this signal
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Number of distinct signals for a memory depth
    pub const fn cardinality(memory: usize) -> usize {
        1 << memory
    }

    /// Balance of up-moves versus down-moves, in `[-1, 1]`.
    ///
    /// `(ups - downs) / memory`, counting only the lowest `memory` bits.
    pub fn trend_strength(&self, memory: usize) -> f64 {
        let mask = if memory >= 32 { u32::MAX } else { (1u32 << memory) - 1 };
        let ups = (self.0 & mask).count_ones() as f64;
        let downs = memory as f64 - ups;
        (ups - downs) / memory as f64
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_trend_strength_extremes() {
        assert_abs_diff_eq!(Signal::new(0b11111).trend_strength(5), 1.0);
        assert_abs_diff_eq!(Signal::new(0).trend_strength(5), -1.0);
    }

    #[test]
    fn test_trend_strength_mixed() {
        // 3 ups, 2 downs
        assert_abs_diff_eq!(Signal::new(0b10101).trend_strength(5), 0.2);
        // 1 up, 3 downs
        assert_abs_diff_eq!(Signal::new(0b0100).trend_strength(4), -0.5);
    }

    #[test]
    fn test_trend_strength_ignores_high_bits() {
        assert_abs_diff_eq!(Signal::new(0b1_00000).trend_strength(5), -1.0);
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(Signal::cardinality(5), 32);
        assert_eq!(Signal::cardinality(1), 2);
    }
}
