//! Core Windsurf identifier-reset operations

pub mod backup;
pub mod error;
pub mod identifiers;
pub mod storage;
pub mod workflow;

// Re-exports for library consumers
pub use backup::create_backup;
pub use error::{ResetError, ResetStep, Result};
pub use identifiers::{generate_identifiers, IdentifierSet};
pub use storage::{load_config, save_config, ConfigDocument, LoadOutcome};
pub use workflow::{ResetEvent, ResetPrompt, ResetWorkflow, StorageLocator};
