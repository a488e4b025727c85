//! storage.json load and save
//!
//! Handles ~/Library/Application Support/Windsurf/User/globalStorage/storage.json
//! (or the platform equivalent). The document is kept as a generic JSON object so
//! keys this tool does not manage round-trip untouched.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::error::{ResetError, Result};

/// The full storage.json object
pub type ConfigDocument = Map<String, Value>;

/// Why a document could not be used
#[derive(Debug)]
pub enum Malformed {
    /// Not valid JSON (or not UTF-8)
    Syntax(serde_json::Error),
    /// Valid JSON, but the top level is not an object
    NotAnObject,
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::Syntax(e) => write!(f, "invalid JSON: {}", e),
            Malformed::NotAnObject => f.write_str("top-level value is not a JSON object"),
        }
    }
}

/// Result of reading storage.json
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(ConfigDocument),
    /// No file yet (first run)
    Absent,
    /// The file exists but cannot be used; treated as an empty document
    Malformed(Malformed),
}

impl LoadOutcome {
    /// The document to work with, empty unless it was loaded
    pub fn into_document(self) -> ConfigDocument {
        match self {
            LoadOutcome::Loaded(doc) => doc,
            LoadOutcome::Absent | LoadOutcome::Malformed(_) => ConfigDocument::new(),
        }
    }
}

/// Read storage.json
///
/// A missing or malformed file is not an error. The malformed file is left on disk
/// until the next save replaces it.
pub fn load_config(path: &Path) -> Result<LoadOutcome> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "storage file absent");
            return Ok(LoadOutcome::Absent);
        }
        Err(source) => {
            return Err(ResetError::LoadFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let outcome = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(doc)) => LoadOutcome::Loaded(doc),
        Ok(_) => LoadOutcome::Malformed(Malformed::NotAnObject),
        Err(e) => LoadOutcome::Malformed(Malformed::Syntax(e)),
    };

    if let LoadOutcome::Malformed(reason) = &outcome {
        warn!(path = %path.display(), %reason, "malformed storage file, starting fresh");
    }
    Ok(outcome)
}

/// Write storage.json with 2-space indentation
///
/// Parent directories are created as needed. The content is written to a
/// temporary sibling and renamed over `path`, so the previous file stays intact
/// if anything fails.
pub fn save_config(path: &Path, document: &ConfigDocument) -> Result<()> {
    write_atomically(path, document).map_err(|source| ResetError::PersistFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = document.len(), "storage file saved");
    Ok(())
}

fn write_atomically(path: &Path, document: &ConfigDocument) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let content = serde_json::to_string_pretty(document)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(staged.path(), metadata.permissions())?;
    }

    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
