use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::fs::OpenOptions;
use std::path::Path;

mod cli;
mod commands;
mod pages;

use cli::{Cli, Commands};
use commands::config::config_command;
use commands::demo::demo_command;
use commands::run::run_command;
use navaware::NavigationConfig;

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        // Truncate on each run
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    info!("Starting navaware");

    match cli.command {
        Commands::Demo => {
            let config = NavigationConfig::load(cli.config.as_deref())?;
            demo_command(&config).await
        }
        Commands::Run { script } => {
            let config = NavigationConfig::load(cli.config.as_deref())?;
            debug!("animate_back = {}", config.navigation.animate_back);
            run_command(&script, &config).await
        }
        Commands::Config(config) => config_command(config.command, cli.config.as_deref()).await,
    }
}
