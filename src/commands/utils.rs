//! Shared utilities for commands

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
#[cfg(any(unix, windows))]
use std::process::Command;

use windsurf_reset::config::{self, BaseDirs};
use windsurf_reset::windsurf::{ResetEvent, ResetPrompt, ResetWorkflow, StorageLocator};

/// Where the commands find storage.json
#[derive(Debug, Clone, Default)]
pub struct Target {
    /// Explicit storage.json, skipping platform resolution
    pub storage_file: Option<PathBuf>,
    /// OS identifier to resolve for instead of the host
    pub platform: Option<String>,
}

impl Target {
    pub fn locator(&self) -> Result<StorageLocator> {
        if let Some(path) = &self.storage_file {
            return Ok(StorageLocator::Fixed(path.clone()));
        }

        let platform = match &self.platform {
            Some(os) => config::platform_for(os)?,
            None => config::host_platform()?,
        };
        Ok(StorageLocator::Platform {
            platform,
            dirs: BaseDirs::from_env(),
        })
    }

    pub fn workflow(&self) -> Result<ResetWorkflow> {
        Ok(ResetWorkflow::new(self.locator()?))
    }
}

/// Ask a yes/no question on stdin
///
/// Returns `None` when stdin is closed.
pub fn ask_yes_no(question: &str) -> Result<Option<bool>> {
    print!("{} (y/N) ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    if read == 0 {
        println!();
        return Ok(None);
    }

    Ok(Some(input.trim().eq_ignore_ascii_case("y")))
}

/// Terminal implementation of the reset prompt
pub struct ConsolePrompt {
    /// Fixed backup answer; asks interactively when unset
    pub backup: Option<bool>,
}

impl ResetPrompt for ConsolePrompt {
    fn confirm_backup(&mut self, _path: &Path) -> bool {
        match self.backup {
            Some(answer) => answer,
            None => ask_yes_no("Would you like to create a backup before continuing?")
                .ok()
                .flatten()
                .unwrap_or(false),
        }
    }

    fn notify(&mut self, event: ResetEvent<'_>) {
        match event {
            ResetEvent::MalformedConfig { path, reason } => {
                println!(
                    "{} {} is not valid ({}). Creating a new configuration.",
                    "Warning:".yellow(),
                    path.display(),
                    reason
                );
            }
            ResetEvent::BackupSkipped { path } => {
                if path.exists() {
                    println!("{} Continuing without creating a backup", "Warning:".yellow());
                }
            }
            ResetEvent::BackupCreated { backup } => {
                println!("{} {}", "Backup created:".green(), backup.display());
            }
            ResetEvent::ConfigSaved { path } => {
                println!("{} {}", "Saved:".green(), path.display());
            }
        }
    }
}

/// Render identifier key/value pairs as a table
pub fn identifier_table<'a, I>(entries: I) -> Table
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Key"), Cell::new("Value")]);

    for (key, value) in entries {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table
}

/// Display form of a stored JSON value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check if Windsurf is running
pub fn is_windsurf_running() -> bool {
    #[cfg(target_os = "macos")]
    {
        is_process_running("Windsurf")
    }

    #[cfg(target_os = "linux")]
    {
        is_process_running("windsurf")
    }

    #[cfg(target_os = "windows")]
    {
        is_process_running("Windsurf.exe")
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        false
    }
}

/// Look for a process by exact name (image name on Windows)
#[cfg(unix)]
fn is_process_running(name: &str) -> bool {
    Command::new("pgrep")
        .args(["-x", name])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(windows)]
fn is_process_running(image: &str) -> bool {
    Command::new("tasklist")
        .args(["/FI", &format!("IMAGENAME eq {}", image)])
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).contains(image))
        .unwrap_or(false)
}
