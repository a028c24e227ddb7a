//! End-to-end: config file -> run -> metrics

use bubbles_runner::{CliArgs, Command, RunConfig, RunnerError, run};
use std::path::PathBuf;

fn write_config(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("bubbles-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_run_from_file() {
    let path = write_config(
        "small",
        r#"{ "market": { "num_agents": 41, "seed": 5 }, "steps": 25 }"#,
    );
    let config = RunConfig::from_file(&path).unwrap();
    let metrics = run(&config).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(metrics.total_steps, 25);
    assert_eq!(
        metrics.total_buys + metrics.total_sells + metrics.total_holds,
        41 * 25
    );
    assert!(metrics.min_price <= metrics.avg_price && metrics.avg_price <= metrics.max_price);
}

#[test]
fn test_cli_overrides_file() {
    let path = write_config(
        "override",
        r#"{ "market": { "num_agents": 21, "seed": 1 }, "steps": 1000 }"#,
    );
    let argv = vec![
        "bubbles".to_string(),
        "--config".to_string(),
        path.display().to_string(),
        "--steps".to_string(),
        "8".to_string(),
        "--seed".to_string(),
        "77".to_string(),
    ];
    let cli = match CliArgs::parse(argv).unwrap() {
        Command::Run(cli) => cli,
        Command::Help => panic!("expected a run command"),
    };
    let config = cli.resolve().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.steps, 8);
    assert_eq!(config.market.seed, Some(77));
    assert_eq!(config.market.num_agents, 21);
}

#[test]
fn test_seeded_runs_repeat() {
    let config =
        RunConfig::from_json(r#"{ "market": { "num_agents": 31, "seed": 9 }, "steps": 40 }"#)
            .unwrap();
    let a = run(&config).unwrap();
    let b = run(&config).unwrap();
    assert_eq!(a.final_price.to_bits(), b.final_price.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_invalid_market_is_a_simulation_error() {
    let config = RunConfig::from_json(r#"{ "market": { "pi": 2.0 }, "steps": 1 }"#).unwrap();
    assert!(matches!(run(&config), Err(RunnerError::Simulation(_))));
}
