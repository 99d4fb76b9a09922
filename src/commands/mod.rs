pub mod config;
pub mod demo;
pub mod run;

use colored::*;
use navaware::navigation::HostCall;
use navaware::{MemoryHost, NavigationController};

use crate::pages::{page_label, view_model_status};

/// Print the stack root first, marking the visible page
pub fn print_stack(navigation: &NavigationController) {
    let stack = navigation.stack();
    if stack.is_empty() {
        println!("  {}", "(empty stack)".dimmed());
        return;
    }

    let top = stack.len() - 1;
    for (index, view) in stack.iter().enumerate() {
        let name = view.view_type().name();
        let marker = if index == top { "▶".bright_green().bold() } else { "·".dimmed() };
        let name = if index == top { name.bright_green().bold() } else { name.normal() };

        let mut line = format!("  {} {} {}", marker, index, name);
        if let Some(status) = view_model_status(&**view) {
            line.push_str(&format!("  {}", status.dimmed()));
        }
        if let Some(label) = page_label(&**view) {
            line.push_str(&format!("  [{}]", label.yellow()));
        }
        println!("{}", line);
    }
}

/// Print and forget the primitives the host received since the last call
pub fn print_host_calls(host: &MemoryHost) {
    let calls: Vec<String> = host
        .calls()
        .into_iter()
        .map(|call| match call {
            HostCall::Push(name) => format!("push({})", name),
            HostCall::Pop { animated } => format!("pop(animated: {})", animated),
            HostCall::PopToRoot => "pop_to_root()".to_string(),
        })
        .collect();
    host.clear_calls();

    if !calls.is_empty() {
        println!("  {} {}", "host:".dimmed(), calls.join(", ").dimmed());
    }
}
