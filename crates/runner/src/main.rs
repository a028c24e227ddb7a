use bubbles_runner::cli::USAGE;
use bubbles_runner::{CliArgs, Command, format_summary, metrics_json};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match CliArgs::parse(std::env::args()) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            eprintln!("{}", USAGE);
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {}\n", err);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Some(path) = &cli.config_path {
        log::info!("Loading configuration from: {}", path);
    }
    let config = cli.resolve()?;
    let metrics = bubbles_runner::run(&config)?;

    if cli.json {
        println!("{}", metrics_json(&metrics)?);
    } else {
        print!("{}", format_summary(&config.market, &metrics));
    }
    Ok(())
}
