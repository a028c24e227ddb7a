//! Simulation Runner
//!
//! The step loop: score, encode, decide, clear, settle.

use super::metrics::{SimulationMetrics, StepReport};
use crate::application::agents::{Agent, decide};
use crate::application::ledger::Ledger;
use crate::domain::{
    FundamentalistOverlay, FundamentalistSignal, Horizon, InformationEncoder, StrategyBook, clear,
    order_quantity,
};
use crate::error::SimulationResult;
use bubbles_core::{Holdings, MarketConfig, Price, PriceHistory};
use log::{debug, info, warn};
use rand::prelude::*;

/// One simulated market
pub struct Simulation {
    config: MarketConfig,
    seed: u64,
    lambda: f64,
    agents: Vec<Agent>,
    history: PriceHistory,
    encoder: InformationEncoder,
    overlay: FundamentalistOverlay,
    ledger: Ledger,
    rng: StdRng,
    step: u64,
    degenerate: bool,
    metrics: SimulationMetrics,
}

impl Simulation {
    /// Validate `config`, then draw strategy tables, holdings and the seed
    /// price window from a single generator, in that order.
    pub fn new(config: MarketConfig) -> SimulationResult<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let books: Vec<StrategyBook> = (0..config.num_agents)
            .map(|_| {
                StrategyBook::generate(
                    config.num_strategies,
                    config.memory,
                    config.polarization,
                    &mut rng,
                )
            })
            .collect();
        let risky: Vec<f64> = (0..config.num_agents).map(|_| rng.r#gen()).collect();
        let cash: Vec<f64> = (0..config.num_agents).map(|_| rng.r#gen()).collect();
        let agents = books
            .into_iter()
            .zip(risky.into_iter().zip(cash))
            .map(|(book, (risky, cash))| Agent::new(book, Holdings::new(risky, cash)))
            .collect();

        let window: Vec<Price> = (0..PriceHistory::required_len(config.memory))
            .map(|_| config.initial_price + rng.r#gen::<f64>() * config.initial_jitter)
            .collect();
        let history = PriceHistory::new(window, config.memory)?;

        let encoder = InformationEncoder::new(config.memory, config.rho);
        let overlay =
            FundamentalistOverlay::new(config.alpha, config.rho, config.confidence, &history);
        let ledger = Ledger::new(config.rho);
        let lambda = config.lambda();

        info!(
            "market ready: agents={} strategies={} memory={} lambda={} seed={}",
            config.num_agents, config.num_strategies, config.memory, lambda, seed
        );

        Ok(Self {
            config,
            seed,
            lambda,
            agents,
            history,
            encoder,
            overlay,
            ledger,
            rng,
            step: 0,
            degenerate: false,
            metrics: SimulationMetrics::default(),
        })
    }

    /// Advance the market by one time unit
    pub fn step(&mut self) -> SimulationResult<StepReport> {
        let rho = self.config.rho;

        // 1. Score every table on the return that just happened, using the
        // signal agents saw before it
        let excess_return = self.history.latest_return() - rho;
        let previous = self.encoder.encode(&self.history, Horizon::Previous)?;
        for agent in &mut self.agents {
            agent.update_scores(previous, excess_return, self.config.score_memory);
        }

        // 2. Current information and the fundamentalist overlay
        let signal = self.encoder.encode(&self.history, Horizon::Current)?;
        let fundamentalist = self.overlay.signal();
        let old_price = self.history.last();

        let mut report = StepReport {
            step: self.step,
            old_price,
            new_price: old_price,
            log_return: 0.0,
            signal,
            average_return: fundamentalist.average_return,
            fundamentalist_probability: fundamentalist.probability,
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
        };

        // 3. Decisions and order sizes
        let mut quantities = Vec::with_capacity(self.agents.len());
        for agent in &self.agents {
            let decision = decide(agent, signal, &fundamentalist, self.config.pi, &mut self.rng);
            report.count_action(decision.action);
            report.count_source(decision.source);
            quantities.push(order_quantity(
                decision.action,
                agent.holdings(),
                old_price,
                self.config.order_fraction,
            ));
        }

        // 4. Price update and rationing
        let outcome = clear(&quantities, old_price, self.config.phi, self.lambda);

        // 5. Settlement at the new price
        self.ledger
            .settle_all(&mut self.agents, &outcome.deltas, outcome.new_price);

        self.history.push(outcome.new_price);
        let log_return = self.history.latest_return();
        self.overlay.observe(log_return);

        report.new_price = outcome.new_price;
        report.log_return = log_return;
        report.q_plus = outcome.flow.q_plus;
        report.q_moins = outcome.flow.q_moins;
        report.buy_fill = outcome.rationing.buy_fill;
        report.sell_fill = outcome.rationing.sell_fill;
        report.executed_buy_value = outcome.executed_buy_value;
        report.executed_sell_value = outcome.executed_sell_value;
        report.mean_wealth = self.mean_wealth();

        debug!(
            "step {}: price={:.6} q+={:.6} q-={:.6} phi+={:.4} phi-={:.4}",
            self.step,
            report.new_price,
            report.q_plus,
            report.q_moins,
            report.buy_fill,
            report.sell_fill
        );

        if report.is_degenerate() && !self.degenerate {
            self.degenerate = true;
            warn!(
                "price degenerated at step {}: {} (previous {})",
                self.step, report.new_price, old_price
            );
        }

        self.metrics.record(&report);
        self.step += 1;
        Ok(report)
    }

    /// Run `steps` steps and return the metrics accumulated so far
    pub fn run(&mut self, steps: u64) -> SimulationResult<SimulationMetrics> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(self.metrics.clone())
    }

    /// Rebuild from the same configuration and seed
    pub fn reset(&mut self) -> SimulationResult<()> {
        let config = self.config.clone().with_seed(self.seed);
        *self = Self::new(config)?;
        Ok(())
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Seed actually used (drawn from entropy when the config has none)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn prices(&self) -> &[Price] {
        self.history.as_slice()
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn holdings(&self, agent: usize) -> Option<&Holdings> {
        self.agents.get(agent).map(Agent::holdings)
    }

    pub fn scores(&self, agent: usize) -> Option<&[f64]> {
        self.agents.get(agent).map(Agent::scores)
    }

    /// Mean of `cash + risky * price` over all agents at the latest price
    pub fn mean_wealth(&self) -> f64 {
        let price = self.history.last();
        let total: f64 = self
            .agents
            .iter()
            .map(|agent| agent.holdings().wealth(price))
            .sum();
        total / self.agents.len() as f64
    }

    pub fn best_strategy(&self, agent: usize) -> Option<usize> {
        self.agents.get(agent).map(Agent::best_strategy)
    }

    /// r̄, pf and direction as the next step will see them
    pub fn fundamentalist_state(&self) -> FundamentalistSignal {
        self.overlay.signal()
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }

    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }

    /// True once any price has been non-positive or non-finite
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}
