use anyhow::Result;
use colored::*;
use log::info;
use std::path::Path;

use navaware::NavigationConfig;

use crate::cli::commands::ConfigSubcommands;

pub async fn config_command(command: ConfigSubcommands, path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => NavigationConfig::config_path()?,
    };

    match command {
        ConfigSubcommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("Config file {:?} already exists, use --force to overwrite it", path);
            }

            info!("Writing default config to {:?}", path);
            NavigationConfig::default().save_to(&path)?;
            println!(
                "{} Wrote default configuration to {}",
                "✓".bright_green().bold(),
                path.display().to_string().bright_green().bold()
            );
        }
        ConfigSubcommands::Show => {
            let config = NavigationConfig::load(Some(&path))?;
            let source = if path.exists() { "file" } else { "defaults, file not found" };
            println!("{} {} ({})", "Config:".bold(), path.display(), source.dimmed());
            println!();
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
