//! Reset command - Replace Windsurf device identifiers

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils::{self, ConsolePrompt, Target};

pub struct ResetOptions {
    /// Back up without asking (`Some(true)`), skip the backup (`Some(false)`),
    /// or ask (`None`)
    pub backup: Option<bool>,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// Execute the reset command
pub fn execute(target: &Target, options: &ResetOptions) -> Result<()> {
    if utils::is_windsurf_running() {
        println!(
            "{} Windsurf appears to be running and may overwrite storage.json on exit.",
            "Warning:".yellow()
        );
        println!("Close it completely before resetting for the change to stick.");
        println!();
    }

    if !options.yes {
        let confirmed = utils::ask_yes_no("Are you sure you want to reset the device identifiers?")?;
        if confirmed != Some(true) {
            println!("Aborted.");
            return Ok(());
        }
    }

    let workflow = target.workflow()?;
    let mut prompt = ConsolePrompt {
        backup: options.backup,
    };
    let ids = workflow.reset(&mut prompt)?;

    println!();
    println!(
        "{}",
        "Device identifiers have been successfully reset!".green()
    );
    println!("New Device Identifiers:");
    println!(
        "{}",
        utils::identifier_table(ids.entries().map(|(key, value)| (key, value.to_string())))
    );

    Ok(())
}
