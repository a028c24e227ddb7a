//! Order Aggregation and Market Clearing
//!
//! Individual decisions become signed quantities, the normalized imbalance
//! moves the price, and the side of the market in excess is rationed so that
//! the cash buyers commit matches what sellers receive at the new price.

use bubbles_core::{Action, Holdings, Price, Quantity};
use serde::Serialize;

/// Size an order: buys commit a fraction of cash at the current price,
/// sells a fraction of inventory.
pub fn order_quantity(
    action: Action,
    holdings: &Holdings,
    price: Price,
    fraction: f64,
) -> Quantity {
    match action {
        Action::Buy => fraction * holdings.cash / price,
        Action::Sell => -fraction * holdings.risky,
        Action::Hold => 0.0,
    }
}

/// Aggregate buy and sell pressure per unit of float
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OrderFlow {
    /// Sum of positive quantities / phi
    pub q_plus: f64,
    /// Sum of |negative quantities| / phi
    pub q_moins: f64,
}

impl OrderFlow {
    /// Classify by the sign of each quantity (a buy sized on negative cash
    /// counts as selling pressure)
    pub fn aggregate(quantities: &[Quantity], phi: f64) -> Self {
        let mut q_plus = 0.0;
        let mut q_moins = 0.0;
        for &q in quantities {
            if q > 0.0 {
                q_plus += q;
            } else if q < 0.0 {
                q_moins -= q;
            }
        }
        Self {
            q_plus: q_plus / phi,
            q_moins: q_moins / phi,
        }
    }

    /// Net imbalance q = q_plus - q_moins
    pub fn imbalance(&self) -> f64 {
        self.q_plus - self.q_moins
    }
}

/// `(q / lambda + 1) · price`. Not clamped: a large enough sell imbalance
/// drives the price to zero or below.
pub fn next_price(price: Price, imbalance: f64, lambda: f64) -> Price {
    (imbalance / lambda + 1.0) * price
}

/// Fill fractions applied to each side
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rationing {
    /// Fraction of every buy that executes (phi_plus)
    pub buy_fill: f64,
    /// Fraction of every sell that executes (phi_moins)
    pub sell_fill: f64,
}

impl Rationing {
    pub const NONE: Rationing = Rationing {
        buy_fill: 1.0,
        sell_fill: 1.0,
    };

    /// Compare supply with the shares buyers' cash affords at the new price
    /// (`q_tilde = q_plus · old / new`) and scale down the larger side.
    pub fn compute(flow: &OrderFlow, old_price: Price, new_price: Price) -> Self {
        let q_tilde = flow.q_plus * old_price / new_price;
        let buy_fill = if flow.q_moins < q_tilde {
            flow.q_moins / q_tilde
        } else {
            1.0
        };
        let sell_fill = if q_tilde < flow.q_moins {
            q_tilde / flow.q_moins
        } else {
            1.0
        };
        Self {
            buy_fill,
            sell_fill,
        }
    }

    /// Scale a signed quantity by its side's fill fraction
    pub fn apply(&self, quantity: Quantity) -> Quantity {
        if quantity > 0.0 {
            quantity * self.buy_fill
        } else if quantity < 0.0 {
            quantity * self.sell_fill
        } else {
            0.0
        }
    }

    pub fn buyers_rationed(&self) -> bool {
        self.buy_fill < 1.0
    }

    pub fn sellers_rationed(&self) -> bool {
        self.sell_fill < 1.0
    }
}

/// Everything one clearing round produced
#[derive(Debug, Clone, PartialEq)]
pub struct ClearingOutcome {
    pub flow: OrderFlow,
    pub old_price: Price,
    pub new_price: Price,
    pub rationing: Rationing,
    /// Executed quantity per agent, same order as the input
    pub deltas: Vec<Quantity>,
    /// Cash committed by executed buys (sized at the old price)
    pub executed_buy_value: f64,
    /// Cash received by executed sells (at the new price)
    pub executed_sell_value: f64,
}

/// Run a full clearing round over per-agent quantities
pub fn clear(quantities: &[Quantity], price: Price, phi: f64, lambda: f64) -> ClearingOutcome {
    let flow = OrderFlow::aggregate(quantities, phi);
    let new_price = next_price(price, flow.imbalance(), lambda);
    let rationing = Rationing::compute(&flow, price, new_price);

    let deltas: Vec<Quantity> = quantities.iter().map(|&q| rationing.apply(q)).collect();

    let mut executed_buy_value = 0.0;
    let mut executed_sell_value = 0.0;
    for &delta in &deltas {
        if delta > 0.0 {
            executed_buy_value += delta * price;
        } else if delta < 0.0 {
            executed_sell_value -= delta * new_price;
        }
    }

    ClearingOutcome {
        flow,
        old_price: price,
        new_price,
        rationing,
        deltas,
        executed_buy_value,
        executed_sell_value,
    }
}
