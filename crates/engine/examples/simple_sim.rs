//! Simple simulation example: the bubble/crash parameter set

use bubbles_engine::{MarketConfig, Simulation};

fn main() {
    println!("=== Bubbles Simulation ===\n");

    let config = MarketConfig::bubble_scenario().with_seed(2);
    println!(
        "P={} g/lambda={} phi={} alpha={} rho={} pi={}",
        config.polarization, config.g_sur_l, config.phi, config.alpha, config.rho, config.pi
    );

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return;
        }
    };
    println!(
        "{} agents, lambda = {:.4}\n",
        sim.agents().len(),
        sim.lambda()
    );

    println!("Running 200 steps...\n");
    for _ in 0..200 {
        let report = match sim.step() {
            Ok(report) => report,
            Err(err) => {
                eprintln!("step failed: {}", err);
                return;
            }
        };
        if report.step % 20 == 0 {
            println!(
                "step {:>4}  price {:>12.6}  buys {:>4}  sells {:>4}  phi+ {:.3}  phi- {:.3}",
                report.step,
                report.new_price,
                report.buys,
                report.sells,
                report.buy_fill,
                report.sell_fill
            );
        }
        if report.is_degenerate() {
            println!("\nPrice degenerated at step {}", report.step);
            break;
        }
    }

    let metrics = sim.metrics();
    println!("\n=== Results ===");
    println!("Steps:          {}", metrics.total_steps);
    println!("Avg price:      {:.6}", metrics.avg_price);
    println!("Min / max:      {:.6} / {:.6}", metrics.min_price, metrics.max_price);
    println!("Return vol:     {:.6}", metrics.return_volatility);
    println!(
        "Decisions:      noise {}  fundamentalist {}  strategy {}",
        metrics.noise_decisions, metrics.fundamentalist_decisions, metrics.strategy_decisions
    );
}
