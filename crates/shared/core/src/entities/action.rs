use serde::{Deserialize, Serialize};

/// Trade direction produced by a strategy table (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// +1 for buy, -1 for sell
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Buy => 1.0,
            Direction::Sell => -1.0,
        }
    }
}

/// What an agent does in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Action {
    /// Map a uniform draw in `{0, 1, 2}` to `{Sell, Hold, Buy}` (i.e. `draw - 1`)
    pub fn from_offset(draw: u8) -> Self {
        match draw {
            0 => Action::Sell,
            1 => Action::Hold,
            _ => Action::Buy,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Buy => Action::Buy,
            Direction::Sell => Action::Sell,
        }
    }
}
