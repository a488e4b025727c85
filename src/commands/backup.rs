//! Backup command - Copy storage.json to a timestamped backup

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils::Target;
use windsurf_reset::windsurf::backup;

/// Execute the backup command
pub fn execute(target: &Target) -> Result<()> {
    let path = target.workflow()?.storage_path()?;

    match backup::create_backup(&path)? {
        Some(backup_path) => {
            println!("{} {}", "Created:".green(), backup_path.display());
        }
        None => {
            println!(
                "{} {} does not exist, nothing to back up",
                "Note:".yellow(),
                path.display()
            );
        }
    }

    Ok(())
}
