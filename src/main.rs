//! flexfringe wrapper CLI

use clap::Parser;
use flexfringe_wrapper::{Config, Result, VERSION, cli, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config_path = args.config.clone().or_else(Config::find_file);
    let config = match &config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level);

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("flexfringe wrapper v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config).await?;

    Ok(())
}
