use crate::application::agents::DecisionSource;
use bubbles_core::{Action, Price, Signal};
use serde::Serialize;

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Step number, starting at 0
    pub step: u64,
    pub old_price: Price,
    pub new_price: Price,
    /// `ln(new / old)`; NaN once the price has degenerated
    pub log_return: f64,
    /// Information signal the agents traded on
    pub signal: Signal,
    /// Weighted average return r̄ before the step
    pub average_return: f64,
    /// Fundamentalist probability pf before the step
    pub fundamentalist_probability: f64,
    pub q_plus: f64,
    pub q_moins: f64,
    /// phi_plus
    pub buy_fill: f64,
    /// phi_moins
    pub sell_fill: f64,
    pub executed_buy_value: f64,
    pub executed_sell_value: f64,
    /// Mean mark-to-market wealth after settlement, at the new price
    pub mean_wealth: f64,
    pub buys: usize,
    pub sells: usize,
    pub holds: usize,
    pub noise_decisions: usize,
    pub fundamentalist_decisions: usize,
    pub strategy_decisions: usize,
}

impl StepReport {
    pub(crate) fn count_action(&mut self, action: Action) {
        match action {
            Action::Buy => self.buys += 1,
            Action::Sell => self.sells += 1,
            Action::Hold => self.holds += 1,
        }
    }

    pub(crate) fn count_source(&mut self, source: DecisionSource) {
        match source {
            DecisionSource::Noise => self.noise_decisions += 1,
            DecisionSource::Fundamentalist => self.fundamentalist_decisions += 1,
            DecisionSource::Strategy => self.strategy_decisions += 1,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !self.new_price.is_finite() || self.new_price <= 0.0
    }
}

/// Simulation metrics aggregated over the run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    /// Total steps processed
    pub total_steps: u64,
    pub total_buys: u64,
    pub total_sells: u64,
    pub total_holds: u64,
    pub noise_decisions: u64,
    pub fundamentalist_decisions: u64,
    pub strategy_decisions: u64,
    /// Steps where phi_plus < 1
    pub buy_rationed_steps: u64,
    /// Steps where phi_moins < 1
    pub sell_rationed_steps: u64,
    /// Average of the post-step prices
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Standard deviation of per-step log-returns
    pub return_volatility: f64,
    /// Latest price seen
    pub final_price: f64,
    /// Mean agent wealth after the latest step
    pub final_mean_wealth: f64,
    /// Set once a price was non-positive or non-finite
    pub degenerated: bool,

    #[serde(skip)]
    return_sum: f64,
    #[serde(skip)]
    return_sq_sum: f64,
}

impl SimulationMetrics {
    pub(crate) fn record(&mut self, report: &StepReport) {
        let price = report.new_price;
        if self.total_steps == 0 {
            self.min_price = price;
            self.max_price = price;
        } else {
            self.min_price = self.min_price.min(price);
            self.max_price = self.max_price.max(price);
        }

        self.total_steps += 1;
        self.total_buys += report.buys as u64;
        self.total_sells += report.sells as u64;
        self.total_holds += report.holds as u64;
        self.noise_decisions += report.noise_decisions as u64;
        self.fundamentalist_decisions += report.fundamentalist_decisions as u64;
        self.strategy_decisions += report.strategy_decisions as u64;
        if report.buy_fill < 1.0 {
            self.buy_rationed_steps += 1;
        }
        if report.sell_fill < 1.0 {
            self.sell_rationed_steps += 1;
        }

        // Track running averages
        let n = self.total_steps as f64;
        self.avg_price = (self.avg_price * (n - 1.0) + price) / n;
        self.return_sum += report.log_return;
        self.return_sq_sum += report.log_return * report.log_return;
        let mean = self.return_sum / n;
        self.return_volatility = (self.return_sq_sum / n - mean * mean).max(0.0).sqrt();

        self.final_price = price;
        self.final_mean_wealth = report.mean_wealth;
        self.degenerated |= report.is_degenerate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report(step: u64, old_price: f64, new_price: f64) -> StepReport {
        StepReport {
            step,
            old_price,
            new_price,
            log_return: (new_price / old_price).ln(),
            signal: Signal::new(0),
            average_return: 0.0,
            fundamentalist_probability: 0.0,
            q_plus: 0.0,
            q_moins: 0.0,
            buy_fill: 1.0,
            sell_fill: 1.0,
            executed_buy_value: 0.0,
            executed_sell_value: 0.0,
            mean_wealth: 0.0,
            buys: 0,
            sells: 0,
            holds: 0,
            noise_decisions: 0,
            fundamentalist_decisions: 0,
            strategy_decisions: 0,
        }
    }

    #[test]
    fn test_price_statistics() {
        let mut metrics = SimulationMetrics::default();
        metrics.record(&report(0, 4.0, 5.0));
        metrics.record(&report(1, 5.0, 3.0));
        metrics.record(&report(2, 3.0, 4.0));

        assert_eq!(metrics.total_steps, 3);
        assert_relative_eq!(metrics.avg_price, 4.0);
        assert_eq!(metrics.min_price, 3.0);
        assert_eq!(metrics.max_price, 5.0);
        assert_eq!(metrics.final_price, 4.0);
        assert_eq!(metrics.final_mean_wealth, 0.0);
        assert!(!metrics.degenerated);
    }

    #[test]
    fn test_constant_returns_have_zero_volatility() {
        let mut metrics = SimulationMetrics::default();
        let mut price = 1.0;
        for step in 0..10 {
            metrics.record(&report(step, price, price * 1.01));
            price *= 1.01;
        }
        assert!(metrics.return_volatility < 1e-7);
    }

    #[test]
    fn test_counts_and_rationing() {
        let mut r = report(0, 5.0, 5.5);
        r.count_action(Action::Buy);
        r.count_action(Action::Buy);
        r.count_action(Action::Hold);
        r.count_source(DecisionSource::Strategy);
        r.count_source(DecisionSource::Noise);
        r.count_source(DecisionSource::Noise);
        r.buy_fill = 0.5;

        let mut metrics = SimulationMetrics::default();
        metrics.record(&r);

        assert_eq!(metrics.total_buys, 2);
        assert_eq!(metrics.total_holds, 1);
        assert_eq!(metrics.noise_decisions, 2);
        assert_eq!(metrics.strategy_decisions, 1);
        assert_eq!(metrics.buy_rationed_steps, 1);
        assert_eq!(metrics.sell_rationed_steps, 0);
    }

    #[test]
    fn test_degenerate_price_flags_run() {
        let mut metrics = SimulationMetrics::default();
        metrics.record(&report(0, 5.0, 2.0));
        metrics.record(&report(1, 2.0, -1.0));
        assert!(metrics.degenerated);
        assert_eq!(metrics.min_price, -1.0);
    }
}
