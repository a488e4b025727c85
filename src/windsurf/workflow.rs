//! Reset and view operations
//!
//! The workflow never prints. Questions and notifications go through a
//! [`ResetPrompt`] supplied by the caller, and results come back as plain values.

use std::path::{Path, PathBuf};

use tracing::info;

use super::backup;
use super::error::{ResetStep, Result};
use super::identifiers::{IdentifierSet, SQM_ID_KEY, TELEMETRY_PREFIX};
use super::storage::{self, ConfigDocument, LoadOutcome, Malformed};
use crate::config::{self, BaseDirs, Platform};

/// Something the presentation layer may want to show
#[derive(Debug)]
pub enum ResetEvent<'a> {
    /// storage.json was unusable and is being replaced with a fresh document
    MalformedConfig { path: &'a Path, reason: &'a Malformed },
    /// No backup was made, either because there was no file or it was declined
    BackupSkipped { path: &'a Path },
    BackupCreated { backup: &'a Path },
    ConfigSaved { path: &'a Path },
}

/// Presentation boundary used by [`ResetWorkflow`]
pub trait ResetPrompt {
    /// Asked only when storage.json already exists
    fn confirm_backup(&mut self, path: &Path) -> bool;

    fn notify(&mut self, event: ResetEvent<'_>);
}

/// Where storage.json comes from
pub enum StorageLocator {
    /// Resolved for a platform on every operation
    Platform {
        platform: Box<dyn Platform>,
        dirs: BaseDirs,
    },
    /// Explicit path, used as-is
    Fixed(PathBuf),
}

impl StorageLocator {
    /// Host platform with the current user's directories
    pub fn host() -> Result<Self> {
        Ok(StorageLocator::Platform {
            platform: config::host_platform()?,
            dirs: BaseDirs::from_env(),
        })
    }

    pub fn locate(&self) -> Result<PathBuf> {
        match self {
            StorageLocator::Platform { platform, dirs } => {
                config::resolve_storage_file(platform.as_ref(), dirs)
            }
            StorageLocator::Fixed(path) => Ok(path.clone()),
        }
    }
}

pub struct ResetWorkflow {
    locator: StorageLocator,
}

impl ResetWorkflow {
    pub fn new(locator: StorageLocator) -> Self {
        Self { locator }
    }

    /// Workflow bound to a specific storage.json
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageLocator::Fixed(path.into()))
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        self.locator.locate()
    }

    /// Replace the device identifiers in storage.json
    ///
    /// Every failure is reported as `ResetFailed` with the step it happened in.
    /// A backup made before a failed save is kept.
    pub fn reset(&self, prompt: &mut dyn ResetPrompt) -> Result<IdentifierSet> {
        let path = self
            .locator
            .locate()
            .map_err(|e| e.during(ResetStep::Locate))?;

        if path.exists() && prompt.confirm_backup(&path) {
            match backup::create_backup(&path).map_err(|e| e.during(ResetStep::Backup))? {
                Some(backup) => prompt.notify(ResetEvent::BackupCreated { backup: &backup }),
                None => prompt.notify(ResetEvent::BackupSkipped { path: &path }),
            }
        } else {
            prompt.notify(ResetEvent::BackupSkipped { path: &path });
        }

        let mut document = load_reporting(&path, prompt).map_err(|e| e.during(ResetStep::Load))?;

        let ids = IdentifierSet::generate();
        ids.merge_into(&mut document);

        storage::save_config(&path, &document).map_err(|e| e.during(ResetStep::Save))?;
        prompt.notify(ResetEvent::ConfigSaved { path: &path });

        info!(path = %path.display(), "device identifiers reset");
        Ok(ids)
    }

    /// Current telemetry identifiers, or `None` when storage.json does not exist
    pub fn view_current(&self, prompt: &mut dyn ResetPrompt) -> Result<Option<ConfigDocument>> {
        let path = self.locator.locate()?;
        if !path.exists() {
            return Ok(None);
        }

        let document = load_reporting(&path, prompt)?;
        Ok(Some(telemetry_entries(document)))
    }
}

fn load_reporting(path: &Path, prompt: &mut dyn ResetPrompt) -> Result<ConfigDocument> {
    let outcome = storage::load_config(path)?;
    if let LoadOutcome::Malformed(reason) = &outcome {
        prompt.notify(ResetEvent::MalformedConfig { path, reason });
    }
    Ok(outcome.into_document())
}

/// Keys in the telemetry namespace, minus the ones never displayed
pub fn telemetry_entries(document: ConfigDocument) -> ConfigDocument {
    document
        .into_iter()
        .filter(|(key, _)| key.starts_with(TELEMETRY_PREFIX) && key != SQM_ID_KEY)
        .collect()
}

/// Reset the host platform's storage.json
pub fn reset(prompt: &mut dyn ResetPrompt) -> Result<IdentifierSet> {
    let locator = StorageLocator::host().map_err(|e| e.during(ResetStep::Locate))?;
    ResetWorkflow::new(locator).reset(prompt)
}

/// Telemetry identifiers of the host platform's storage.json
pub fn view_current(prompt: &mut dyn ResetPrompt) -> Result<Option<ConfigDocument>> {
    ResetWorkflow::new(StorageLocator::host()?).view_current(prompt)
}
