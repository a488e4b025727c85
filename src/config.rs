//! Platform-specific configuration and paths
//!
//! Windsurf keeps its global state in `Windsurf/User/globalStorage/storage.json`
//! below a per-OS base directory:
//! - macOS: ~/Library/Application Support/
//! - Linux: ~/.config/
//! - Windows: %APPDATA%/

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::windsurf::error::{ResetError, Result};

/// OS identifiers accepted by [`platform_for`]
pub const SUPPORTED_PLATFORMS: &[&str] = &["windows", "macos", "linux"];

/// Directories a platform may root its base directory at
#[derive(Debug, Clone, Default)]
pub struct BaseDirs {
    pub home: Option<PathBuf>,
    pub appdata: Option<PathBuf>,
}

impl BaseDirs {
    /// Read the current user's directories from the environment
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir(),
            appdata: env::var_os("APPDATA")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

/// One supported operating system
pub trait Platform {
    /// Short display name, e.g. "macOS"
    fn name(&self) -> &'static str;

    /// The directory the Windsurf folder lives in
    fn base_dir(&self, dirs: &BaseDirs) -> Result<PathBuf>;
}

pub struct Windows;
pub struct MacOs;
pub struct Linux;

impl Platform for Windows {
    fn name(&self) -> &'static str {
        "Windows"
    }

    fn base_dir(&self, dirs: &BaseDirs) -> Result<PathBuf> {
        dirs.appdata.clone().ok_or(ResetError::BaseDirectoryUnknown {
            platform: self.name(),
            hint: "APPDATA is not set",
        })
    }
}

impl Platform for MacOs {
    fn name(&self) -> &'static str {
        "macOS"
    }

    fn base_dir(&self, dirs: &BaseDirs) -> Result<PathBuf> {
        let home = home_dir(self, dirs)?;
        Ok(home.join("Library").join("Application Support"))
    }
}

impl Platform for Linux {
    fn name(&self) -> &'static str {
        "Linux"
    }

    fn base_dir(&self, dirs: &BaseDirs) -> Result<PathBuf> {
        let home = home_dir(self, dirs)?;
        Ok(home.join(".config"))
    }
}

fn home_dir(platform: &dyn Platform, dirs: &BaseDirs) -> Result<PathBuf> {
    dirs.home.clone().ok_or(ResetError::BaseDirectoryUnknown {
        platform: platform.name(),
        hint: "could not determine home directory",
    })
}

/// Select the platform implementation for an OS identifier
///
/// Accepts the values of `std::env::consts::OS` plus `darwin`, case-insensitively.
pub fn platform_for(os: &str) -> Result<Box<dyn Platform>> {
    match os.to_ascii_lowercase().as_str() {
        "windows" => Ok(Box::new(Windows)),
        "macos" | "darwin" => Ok(Box::new(MacOs)),
        "linux" => Ok(Box::new(Linux)),
        _ => Err(ResetError::UnsupportedPlatform {
            os: os.to_string(),
            supported: SUPPORTED_PLATFORMS.join(", "),
        }),
    }
}

/// The platform this binary is running on
pub fn host_platform() -> Result<Box<dyn Platform>> {
    platform_for(env::consts::OS)
}

/// Location of storage.json relative to the platform base directory
pub fn storage_file_in(base: &Path) -> PathBuf {
    base.join("Windsurf")
        .join("User")
        .join("globalStorage")
        .join("storage.json")
}

/// Resolve the storage.json path for a platform
///
/// Nothing is created; the base directory must already exist and accept writes.
pub fn resolve_storage_file(platform: &dyn Platform, dirs: &BaseDirs) -> Result<PathBuf> {
    let base = platform.base_dir(dirs)?;

    if !base.is_dir() {
        return Err(ResetError::BaseDirectoryMissing { path: base });
    }
    check_writable(&base)?;

    let path = storage_file_in(&base);
    debug!(platform = platform.name(), path = %path.display(), "resolved storage file");
    Ok(path)
}

/// Resolve the storage.json path for the host OS and current user
pub fn resolve_config_path() -> Result<PathBuf> {
    resolve_storage_file(host_platform()?.as_ref(), &BaseDirs::from_env())
}

/// Probe a directory by creating (and immediately dropping) an anonymous temp file
fn check_writable(dir: &Path) -> Result<()> {
    tempfile::tempfile_in(dir)
        .map(drop)
        .map_err(|source| ResetError::PermissionDenied {
            path: dir.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dirs_in(root: &Path) -> BaseDirs {
        BaseDirs {
            home: Some(root.join("home")),
            appdata: Some(root.join("AppData").join("Roaming")),
        }
    }

    #[test]
    fn test_supported_platforms_resolve_under_base() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = dirs_in(tmp.path());

        let cases = [
            ("linux", tmp.path().join("home").join(".config")),
            (
                "macos",
                tmp.path()
                    .join("home")
                    .join("Library")
                    .join("Application Support"),
            ),
            ("windows", tmp.path().join("AppData").join("Roaming")),
        ];

        for (os, base) in cases {
            fs::create_dir_all(&base).unwrap();
            let platform = platform_for(os).unwrap();
            let path = resolve_storage_file(platform.as_ref(), &dirs).unwrap();

            assert!(path.starts_with(&base), "{os}: {}", path.display());
            assert!(path.ends_with("Windsurf/User/globalStorage/storage.json"));
        }
    }

    #[test]
    fn test_resolve_does_not_create_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = dirs_in(tmp.path());
        let base = tmp.path().join("home").join(".config");
        fs::create_dir_all(&base).unwrap();

        let path = resolve_storage_file(&Linux, &dirs).unwrap();
        assert!(!path.parent().unwrap().exists());
        assert!(!base.join("Windsurf").exists());
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!(platform_for("Darwin").unwrap().name(), "macOS");
        assert_eq!(platform_for("LINUX").unwrap().name(), "Linux");
        assert_eq!(platform_for("Windows").unwrap().name(), "Windows");
    }

    #[test]
    fn test_unsupported_platform() {
        let err = platform_for("freebsd").err().unwrap();
        match &err {
            ResetError::UnsupportedPlatform { os, supported } => {
                assert_eq!(os, "freebsd");
                assert_eq!(supported, "windows, macos, linux");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn test_missing_base_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = dirs_in(tmp.path());

        let err = resolve_storage_file(&MacOs, &dirs).unwrap_err();
        assert!(matches!(err, ResetError::BaseDirectoryMissing { .. }));
    }

    #[test]
    fn test_unknown_base_directory() {
        let err = Windows.base_dir(&BaseDirs::default()).unwrap_err();
        assert!(matches!(
            err,
            ResetError::BaseDirectoryUnknown {
                platform: "Windows",
                ..
            }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_base_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dirs = dirs_in(tmp.path());
        let base = tmp.path().join("home").join(".config");
        fs::create_dir_all(&base).unwrap();
        fs::set_permissions(&base, fs::Permissions::from_mode(0o555)).unwrap();

        // root ignores directory permissions; nothing to observe then
        let probe_allowed = tempfile::tempfile_in(&base).is_ok();
        let result = resolve_storage_file(&Linux, &dirs);
        fs::set_permissions(&base, fs::Permissions::from_mode(0o755)).unwrap();

        if probe_allowed {
            assert!(result.is_ok());
        } else {
            assert!(matches!(
                result,
                Err(ResetError::PermissionDenied { .. })
            ));
        }
    }
}
