use super::commands::ConfigCommands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navaware")]
#[command(about = "Page-stack navigation with lifecycle notifications and view-model auto-wiring")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the sample pages on an in-memory navigation stack
    Demo,
    /// Execute a navigation script against the sample pages
    Run {
        /// Script file, one navigation step per line
        script: PathBuf,
    },
    /// Configuration management
    Config(ConfigCommands),
}
