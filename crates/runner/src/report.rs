//! Run summaries

use bubbles_core::MarketConfig;
use bubbles_engine::SimulationMetrics;
use std::fmt::Write;

/// Human-readable table of the run parameters and results
pub fn format_summary(market: &MarketConfig, metrics: &SimulationMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Parameters ===");
    let _ = writeln!(
        out,
        "P={}  g/lambda={}  alpha={}  rho={}  phi={}  pi={}",
        market.polarization, market.g_sur_l, market.alpha, market.rho, market.phi, market.pi
    );
    let _ = writeln!(
        out,
        "N={}  S={}  m={}  lambda={:.6}",
        market.num_agents,
        market.num_strategies,
        market.memory,
        market.lambda()
    );

    let _ = writeln!(out, "\n=== Results ===");
    let _ = writeln!(out, "Steps:            {}", metrics.total_steps);
    let _ = writeln!(out, "Final price:      {:.6}", metrics.final_price);
    let _ = writeln!(out, "Avg price:        {:.6}", metrics.avg_price);
    let _ = writeln!(
        out,
        "Min / max price:  {:.6} / {:.6}",
        metrics.min_price, metrics.max_price
    );
    let _ = writeln!(out, "Return vol:       {:.6}", metrics.return_volatility);
    let _ = writeln!(out, "Mean wealth:      {:.6}", metrics.final_mean_wealth);
    let _ = writeln!(
        out,
        "Actions:          buy {}  sell {}  hold {}",
        metrics.total_buys, metrics.total_sells, metrics.total_holds
    );
    let _ = writeln!(
        out,
        "Decisions:        noise {}  fundamentalist {}  strategy {}",
        metrics.noise_decisions, metrics.fundamentalist_decisions, metrics.strategy_decisions
    );
    let _ = writeln!(
        out,
        "Rationed steps:   buyers {}  sellers {}",
        metrics.buy_rationed_steps, metrics.sell_rationed_steps
    );
    if metrics.degenerated {
        let _ = writeln!(out, "Price degenerated (non-positive or non-finite)");
    }
    out
}

/// Metrics as pretty-printed JSON
pub fn metrics_json(metrics: &SimulationMetrics) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(metrics)
}
