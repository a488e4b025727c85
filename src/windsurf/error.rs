//! Error type for the identifier-reset core

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ResetError> = std::result::Result<T, E>;

/// Reset step a [`ResetError::ResetFailed`] happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    Locate,
    Backup,
    Load,
    Save,
}

impl fmt::Display for ResetStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            ResetStep::Locate => "locating configuration file",
            ResetStep::Backup => "creating backup",
            ResetStep::Load => "loading configuration",
            ResetStep::Save => "saving configuration",
        };
        f.write_str(step)
    }
}

#[derive(Debug, Error)]
pub enum ResetError {
    #[error("unsupported OS: {os}. Supported systems: {supported}")]
    UnsupportedPlatform { os: String, supported: String },

    #[error("cannot locate {platform} base directory: {hint}")]
    BaseDirectoryUnknown {
        platform: &'static str,
        hint: &'static str,
    },

    #[error("base directory does not exist: {}", path.display())]
    BaseDirectoryMissing { path: PathBuf },

    #[error("no write permission for directory: {}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create backup of {}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reset failed while {step}")]
    ResetFailed {
        step: ResetStep,
        #[source]
        source: Box<ResetError>,
    },
}

impl ResetError {
    pub(crate) fn during(self, step: ResetStep) -> Self {
        ResetError::ResetFailed {
            step,
            source: Box::new(self),
        }
    }
}
