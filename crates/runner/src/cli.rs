//! Argument parsing for the `bubbles` binary

use crate::config::{RunConfig, RunnerError};

pub const USAGE: &str = r#"Bubbles - agent-based market simulator

USAGE:
    bubbles [OPTIONS]

OPTIONS:
    --config <PATH>     Load run configuration from JSON file
    --steps <N>         Number of steps (overrides the file)
    --seed <SEED>       Random seed (overrides the file)
    --json              Print metrics as JSON instead of a table
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run the default market for 1000 steps
    bubbles

    # Run a config file with a fixed seed
    bubbles --config bubble.json --seed 2
"#;

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<String>,
    pub steps: Option<u64>,
    pub seed: Option<u64>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

impl CliArgs {
    /// Parse arguments, skipping the program name
    pub fn parse<I>(args: I) -> Result<Command, RunnerError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mut parsed = CliArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--config" | "-c" => {
                    parsed.config_path = Some(value(&args, &mut i, "--config")?.to_string());
                }
                "--steps" | "-n" => {
                    parsed.steps = Some(number(value(&args, &mut i, "--steps")?, "--steps")?);
                }
                "--seed" | "-s" => {
                    parsed.seed = Some(number(value(&args, &mut i, "--seed")?, "--seed")?);
                }
                "--json" => parsed.json = true,
                arg => return Err(RunnerError::Argument(format!("unknown argument: {}", arg))),
            }
            i += 1;
        }

        Ok(Command::Run(parsed))
    }

    /// Load the config file (or defaults) and apply overrides
    pub fn resolve(&self) -> Result<RunConfig, RunnerError> {
        let mut config = match &self.config_path {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(seed) = self.seed {
            config.market.seed = Some(seed);
        }
        Ok(config)
    }
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, RunnerError> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| RunnerError::Argument(format!("{} requires a value", flag)))
}

fn number(raw: &str, flag: &str) -> Result<u64, RunnerError> {
    raw.parse()
        .map_err(|_| RunnerError::Argument(format!("{} expects an integer, got {:?}", flag, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("bubbles")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(
            CliArgs::parse(args(&[])).unwrap(),
            Command::Run(CliArgs::default())
        );
    }

    #[test]
    fn test_all_options() {
        let cmd = CliArgs::parse(args(&[
            "--config", "run.json", "--steps", "50", "-s", "9", "--json",
        ]))
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(CliArgs {
                config_path: Some("run.json".into()),
                steps: Some(50),
                seed: Some(9),
                json: true,
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(
            CliArgs::parse(args(&["--steps", "5", "--help"])).unwrap(),
            Command::Help
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(
            CliArgs::parse(args(&["--steps"])),
            Err(RunnerError::Argument(_))
        ));
        assert!(matches!(
            CliArgs::parse(args(&["--seed", "abc"])),
            Err(RunnerError::Argument(_))
        ));
        assert!(matches!(
            CliArgs::parse(args(&["--frobnicate"])),
            Err(RunnerError::Argument(_))
        ));
    }

    #[test]
    fn test_overrides_apply_without_file() {
        let cli = CliArgs {
            steps: Some(12),
            seed: Some(3),
            ..Default::default()
        };
        let config = cli.resolve().unwrap();
        assert_eq!(config.steps, 12);
        assert_eq!(config.market.seed, Some(3));
    }
}
