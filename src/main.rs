//! driver-outline CLI entry point.

use anyhow::Result;
use clap::Parser;

use driver_outline::cli::{Cli, Commands};
use driver_outline::infrastructure::config::ConfigLoader;
use driver_outline::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        driver_outline::cli::handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Generate(args) => {
            driver_outline::cli::commands::generate::execute(args, config, cli.json).await
        }
        Commands::Scan(args) => driver_outline::cli::commands::scan::execute(args, cli.json).await,
        Commands::Render(args) => {
            driver_outline::cli::commands::render::execute(args, cli.json).await
        }
    }
}
