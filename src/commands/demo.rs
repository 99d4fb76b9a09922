use anyhow::Result;
use chrono::Local;
use colored::*;
use log::info;

use navaware::{NavigationConfig, ParameterBag};

use super::{print_host_calls, print_stack};
use crate::pages::build_app;

fn heading(step: usize, title: &str) {
    println!();
    println!("{} {}", format!("[{}]", step).bright_blue().bold(), title.bold());
}

/// Scripted walkthrough of every navigation operation over the sample pages
pub async fn demo_command(config: &NavigationConfig) -> Result<()> {
    info!("Starting navigation demo");

    let (app, host) = build_app(config);
    let navigation = app.navigation()?;

    heading(1, "Open MainPage as the root page");
    navigation.navigate_to("MainPage", None).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    heading(2, "Navigate to SecondPage with a message and a timestamp");
    let parameters = ParameterBag::new()
        .with("message", "Hello from MainPage".to_string())
        .with("timestamp", Local::now());
    navigation.navigate_to("SecondPage", Some(&parameters)).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    heading(3, "Go back with a reply");
    let reply = ParameterBag::new().with("message", "Returning from SecondPage".to_string());
    navigation.go_back(Some(&reply)).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    heading(4, "Navigate along the path SecondPage/details");
    let parameters = ParameterBag::new().with("message", "Deep link".to_string());
    navigation.navigate("SecondPage/details", Some(&parameters)).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    heading(5, "Go back to MainPage");
    navigation.go_back_to("MainPage", None).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    heading(6, "Stack ThirdPage twice, then return to the root");
    navigation.navigate_to("ThirdPage", None).await?;
    navigation.navigate_to("details", None).await?;
    navigation.go_back_to_root(None).await?;
    print_host_calls(&host);
    print_stack(&navigation);

    println!();
    println!("{} Demo finished", "✓".bright_green().bold());
    Ok(())
}
