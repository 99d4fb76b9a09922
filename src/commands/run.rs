use anyhow::{Context, Result};
use colored::*;
use log::info;
use std::fs;
use std::path::Path;

use navaware::NavigationConfig;
use navaware::script::parse_script;

use super::{print_host_calls, print_stack};
use crate::pages::build_app;

/// Run a navigation script against the sample pages
pub async fn run_command(script: &Path, config: &NavigationConfig) -> Result<()> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script file: {:?}", script))?;
    let steps = parse_script(&source)
        .with_context(|| format!("Failed to parse script: {:?}", script))?;
    info!("Running {} navigation steps from {:?}", steps.len(), script);

    let (app, host) = build_app(config);
    let navigation = app.navigation()?;

    for (index, step) in steps.iter().enumerate() {
        println!();
        println!("{} {}", format!("[{}]", index + 1).bright_blue().bold(), step.to_string().bold());

        step.run(&navigation)
            .await
            .with_context(|| format!("Step {} ({}) failed", index + 1, step))?;

        print_host_calls(&host);
        print_stack(&navigation);
    }

    println!();
    println!("{} {} steps completed", "✓".bright_green().bold(), steps.len());
    Ok(())
}
