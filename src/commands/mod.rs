//! CLI commands

pub mod backup;
pub mod menu;
pub mod path;
pub mod reset;
pub mod show;
pub mod utils;
