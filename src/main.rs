//! windsurf-reset: CLI that resets the device identifiers Windsurf stores locally
//!
//! This tool is not affiliated with or endorsed by Codeium or Windsurf.
//! It only modifies locally stored data on your machine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::utils::Target;

#[derive(Parser)]
#[command(name = "windsurf-reset")]
#[command(about = "Reset Windsurf device identifiers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Operate on this storage.json instead of the platform default
    #[arg(long, global = true, env = "WINDSURF_STORAGE_FILE")]
    storage_file: Option<PathBuf>,

    /// Resolve paths for another OS (windows, macos, linux)
    #[arg(long, global = true, env = "WINDSURF_RESET_PLATFORM")]
    platform: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the device identifiers with freshly generated ones
    Reset {
        /// Create a backup without asking
        #[arg(long, conflicts_with = "no_backup")]
        backup: bool,

        /// Do not create a backup
        #[arg(long)]
        no_backup: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the current device identifiers
    Show,

    /// Create a timestamped backup of storage.json
    Backup,

    /// Print the storage.json location
    Path,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let target = Target {
        storage_file: cli.storage_file,
        platform: cli.platform,
    };

    match cli.command {
        None => commands::menu::execute(&target)?,

        Some(Commands::Reset {
            backup,
            no_backup,
            yes,
        }) => {
            let backup = match (backup, no_backup) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let options = commands::reset::ResetOptions { backup, yes };
            commands::reset::execute(&target, &options)?;
        }

        Some(Commands::Show) => commands::show::execute(&target)?,

        Some(Commands::Backup) => commands::backup::execute(&target)?,

        Some(Commands::Path) => commands::path::execute(&target)?,
    }

    Ok(())
}
