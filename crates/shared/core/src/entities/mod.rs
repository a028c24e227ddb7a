mod action;
mod holdings;
mod price_history;

pub use action::{Action, Direction};
pub use holdings::Holdings;
pub use price_history::PriceHistory;
