//! Path command - Show where storage.json is expected

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils::Target;

/// Execute the path command
pub fn execute(target: &Target) -> Result<()> {
    let path = target.workflow()?.storage_path()?;

    if path.exists() {
        println!("{} {}", "Found:".green(), path.display());
    } else {
        println!("{} {}", "Not found:".yellow(), path.display());
    }

    Ok(())
}
