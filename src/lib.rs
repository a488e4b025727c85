//! windsurf-reset library
//!
//! Core functionality for resetting the device identifiers Windsurf keeps in
//! its global `storage.json`.
//!
//! # Disclaimer
//!
//! This tool is not affiliated with or endorsed by Codeium or Windsurf.
//! It only modifies locally stored data files on your machine.

pub mod config;
pub mod windsurf;

pub use config::resolve_config_path;
