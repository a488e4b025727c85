//! Show command - Display the current device identifiers

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::utils::{self, ConsolePrompt, Target};

/// Execute the show command
pub fn execute(target: &Target) -> Result<()> {
    let workflow = target.workflow()?;
    let mut prompt = ConsolePrompt {
        backup: Some(false),
    };

    let entries = workflow
        .view_current(&mut prompt)
        .context("Failed to read configuration")?;

    match entries {
        None => println!("{}", "Configuration file not found".yellow()),
        Some(entries) if entries.is_empty() => {
            println!("No device identifiers stored yet.");
        }
        Some(entries) => {
            println!("Current Device Identifiers:");
            let rows = entries
                .iter()
                .map(|(key, value)| (key.as_str(), utils::display_value(value)));
            println!("{}", utils::identifier_table(rows));
        }
    }

    Ok(())
}
