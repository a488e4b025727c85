//! Timestamped backups of storage.json
//!
//! A backup is a byte-for-byte copy next to the original, named
//! `<file name>.backup_<YYYYMMDD_HHMMSS>`. Backups are never rotated or removed.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::error::{ResetError, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Backup path for `path` taken at `timestamp`
pub fn backup_path_for(path: &Path, timestamp: NaiveDateTime) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(
        "{}.backup_{}",
        name,
        timestamp.format(TIMESTAMP_FORMAT)
    ))
}

/// Copy `path` to a timestamped sibling
///
/// Returns `Ok(None)` when there is nothing to back up. The copy is staged in a
/// temporary file and renamed into place, and never replaces an existing backup.
pub fn create_backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        debug!(path = %path.display(), "no file to back up");
        return Ok(None);
    }

    let backup_path = backup_path_for(path, Local::now().naive_local());
    copy_atomically(path, &backup_path).map_err(|source| ResetError::BackupFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!(backup = %backup_path.display(), "backup created");
    Ok(Some(backup_path))
}

fn copy_atomically(src: &Path, dst: &Path) -> io::Result<()> {
    let dir = dst
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "backup has no parent"))?;

    let mut source = File::open(src)?;
    let metadata = source.metadata()?;

    let mut staged = NamedTempFile::new_in(dir)?;
    io::copy(&mut source, staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.as_file().sync_all()?;

    fs::set_permissions(staged.path(), metadata.permissions())?;
    if let Ok(modified) = metadata.modified() {
        // mtime is informational only
        let _ = staged.as_file().set_modified(modified);
    }

    staged.persist_noclobber(dst).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn backups_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().contains(".backup_"))
            .collect()
    }

    #[test]
    fn test_backup_path_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        let path = backup_path_for(Path::new("/data/globalStorage/storage.json"), ts);
        assert_eq!(
            path,
            PathBuf::from("/data/globalStorage/storage.json.backup_20240309_070501")
        );
    }

    #[test]
    fn test_missing_file_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let result = create_backup(&tmp.path().join("storage.json")).unwrap();
        assert!(result.is_none());
        assert!(backups_in(tmp.path()).is_empty());
    }

    #[test]
    fn test_backup_is_exact_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("storage.json");
        let content = b"{\n  \"telemetry.machineId\": \"abc\",\n  \"x\": [1, 2]\n}";
        fs::write(&file, content).unwrap();

        let backup = create_backup(&file).unwrap().unwrap();

        assert_eq!(backups_in(tmp.path()), vec![backup.clone()]);
        assert_eq!(fs::read(&backup).unwrap(), content);
        assert_eq!(fs::read(&file).unwrap(), content);

        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        let stamp = name.strip_prefix("storage.json.backup_").unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_unreadable_source_fails_without_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("storage.json");
        fs::create_dir(&source).unwrap();

        let err = create_backup(&source).unwrap_err();
        assert!(matches!(err, ResetError::BackupFailed { .. }));

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_existing_backup_is_not_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("storage.json");
        fs::write(&file, "new").unwrap();
        let taken = tmp.path().join("storage.json.backup_20240101_000000");
        fs::write(&taken, "old").unwrap();

        let err = copy_atomically(&file, &taken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&taken).unwrap(), "old");
        assert_eq!(backups_in(tmp.path()).len(), 1);
    }
}
