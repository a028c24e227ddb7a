//! Per-step decision rule.
//!
//! One uniform draw `u` picks the regime:
//! - `u < pi`: noise, a uniform pick among sell / hold / buy (second draw)
//! - `u < (1 - pi) · pf`: fundamentalist, trade against r̄
//! - otherwise: the agent's best-scoring strategy

use super::Agent;
use crate::domain::FundamentalistSignal;
use bubbles_core::{Action, Signal};
use rand::Rng;
use serde::Serialize;

/// Which regime produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecisionSource {
    Noise,
    Fundamentalist,
    Strategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub source: DecisionSource,
}

/// Decide what `agent` does this step.
///
/// Both thresholds are compared against the same draw, so with `pi > 0`
/// the fundamentalist band is `[pi, (1 - pi) · pf)` and may be empty.
pub fn decide<R: Rng + ?Sized>(
    agent: &Agent,
    signal: Signal,
    fundamentalist: &FundamentalistSignal,
    pi: f64,
    rng: &mut R,
) -> Decision {
    let u = rng.r#gen::<f64>();
    if u < pi {
        Decision {
            action: Action::from_offset(rng.gen_range(0..3)),
            source: DecisionSource::Noise,
        }
    } else if u < (1.0 - pi) * fundamentalist.probability {
        Decision {
            action: fundamentalist.direction.into(),
            source: DecisionSource::Fundamentalist,
        }
    } else {
        Decision {
            action: agent.best_action(signal),
            source: DecisionSource::Strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StrategyBook, StrategyTable};
    use bubbles_core::{Direction, Holdings};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seller() -> Agent {
        let table = StrategyTable::from_directions(vec![Direction::Sell; 4]);
        Agent::new(StrategyBook::from_tables(vec![table]), Holdings::new(1.0, 1.0))
    }

    fn overlay(probability: f64, direction: Direction) -> FundamentalistSignal {
        FundamentalistSignal {
            average_return: 0.0,
            probability,
            direction,
        }
    }

    #[test]
    fn test_full_noise() {
        let mut rng = StdRng::seed_from_u64(7);
        let agent = seller();
        let fundamentalist = overlay(1.0, Direction::Buy);

        let mut seen = [false; 3];
        for _ in 0..300 {
            let d = decide(&agent, Signal::new(0), &fundamentalist, 1.0, &mut rng);
            assert_eq!(d.source, DecisionSource::Noise);
            let idx = match d.action {
                Action::Sell => 0,
                Action::Hold => 1,
                Action::Buy => 2,
            };
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_certain_fundamentalist() {
        let mut rng = StdRng::seed_from_u64(7);
        let agent = seller();
        let fundamentalist = overlay(1.0, Direction::Buy);

        for _ in 0..100 {
            let d = decide(&agent, Signal::new(0), &fundamentalist, 0.0, &mut rng);
            assert_eq!(d.source, DecisionSource::Fundamentalist);
            assert_eq!(d.action, Action::Buy);
        }
    }

    #[test]
    fn test_strategy_when_no_overlay() {
        let mut rng = StdRng::seed_from_u64(7);
        let agent = seller();
        let fundamentalist = overlay(0.0, Direction::Buy);

        for _ in 0..100 {
            let d = decide(&agent, Signal::new(1), &fundamentalist, 0.0, &mut rng);
            assert_eq!(d.source, DecisionSource::Strategy);
            // fresh scores tie, slot 0 is the all-sell table
            assert_eq!(d.action, Action::Sell);
        }
    }

    #[test]
    fn test_fundamentalist_band_can_be_empty() {
        // pi = 0.6, pf = 1: (1 - pi) · pf = 0.4 < pi
        let mut rng = StdRng::seed_from_u64(11);
        let agent = seller();
        let fundamentalist = overlay(1.0, Direction::Sell);

        for _ in 0..500 {
            let d = decide(&agent, Signal::new(0), &fundamentalist, 0.6, &mut rng);
            assert_ne!(d.source, DecisionSource::Fundamentalist);
        }
    }
}
