use serde::{Deserialize, Serialize};

use crate::values::Price;

/// An agent's inventory: units of the risky asset and cash (bond) balance.
///
/// Either side may go negative; short positions and borrowed cash are part
/// of the model rather than error states.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Holdings {
    /// Units of the risky asset (theta)
    pub risky: f64,
    /// Cash / bond balance (B)
    pub cash: f64,
}

impl Holdings {
    pub fn new(risky: f64, cash: f64) -> Self {
        Self { risky, cash }
    }

    /// Mark-to-market wealth at the given price
    pub fn wealth(&self, price: Price) -> f64 {
        self.cash + self.risky * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wealth() {
        let holdings = Holdings::new(2.0, 1.5);
        assert_eq!(holdings.wealth(5.0), 11.5);
    }

    #[test]
    fn test_wealth_short_position() {
        let holdings = Holdings::new(-1.0, 10.0);
        assert_eq!(holdings.wealth(4.0), 6.0);
    }
}
