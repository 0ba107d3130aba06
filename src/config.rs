//! Platform-specific paths and run configuration

use std::env;
use std::path::{Path, PathBuf};

use crate::courses::Semester;
use crate::error::{Error, IoResultExt, Result};
use crate::remote::DEFAULT_SCHEDULES_URL;

/// Overrides the discovered sync root
pub const ROOT_ENV: &str = "COURSE_SYNC_ROOT";
/// Overrides the archive destination
pub const ARCHIVE_DEST_ENV: &str = "COURSE_SYNC_ARCHIVE_DEST";
/// Overrides the schedules contents URL
pub const SCHEDULES_URL_ENV: &str = "COURSE_SYNC_SCHEDULES_URL";

/// Where finished semesters are archived unless overridden
pub const DEFAULT_ARCHIVE_DEST: &str = "/Volumes/Austin Disk/UT Austin/";

/// How deep below the home directory to look for the sync root
const SYNC_ROOT_SEARCH_DEPTH: usize = 3;

/// Everything a run needs to know, resolved once up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cloud-synced folder holding one directory per semester
    pub sync_root: PathBuf,
    /// Directory archives are written to
    pub archive_dest: PathBuf,
    /// Semester to synchronize, e.g. `Spring 2024`
    pub semester_label: String,
    /// Contents API URL listing schedule folders
    pub schedules_url: String,
    /// Remote folder holding this semester's schedule files
    pub schedule_folder: String,
}

impl Config {
    /// Config for the given sync root, everything else from env or defaults
    pub fn new(sync_root: PathBuf) -> Self {
        let semester_label = Semester::current().label();
        Self {
            sync_root,
            archive_dest: env::var_os(ARCHIVE_DEST_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_DEST)),
            schedules_url: env::var(SCHEDULES_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_SCHEDULES_URL.to_string()),
            schedule_folder: semester_label.clone(),
            semester_label,
        }
    }

    pub fn with_semester(mut self, label: impl Into<String>) -> Self {
        self.semester_label = label.into();
        self.schedule_folder = self.semester_label.clone();
        self
    }

    pub fn with_schedule_folder(mut self, folder: impl Into<String>) -> Self {
        self.schedule_folder = folder.into();
        self
    }

    pub fn with_archive_dest(mut self, dest: PathBuf) -> Self {
        self.archive_dest = dest;
        self
    }

    /// `<sync_root>/<semester_label>`
    pub fn semester_path(&self) -> PathBuf {
        self.sync_root.join(&self.semester_label)
    }
}

/// Sync root from the environment override, if set
pub fn sync_root_override() -> Option<PathBuf> {
    env::var_os(ROOT_ENV).map(PathBuf::from)
}

/// Directory the sync root is searched under
/// - Windows: %USERPROFILE%
/// - macOS: home directory
/// - anything else is unsupported
pub fn base_path() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("USERPROFILE")
            .map(PathBuf::from)
            .ok_or_else(|| Error::NotFound("USERPROFILE is not set".to_string()))
    }

    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .ok_or_else(|| Error::NotFound("Could not determine home directory".to_string()))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        Err(Error::NotFound(format!(
            "Unsupported operating system (set {} to the sync folder)",
            ROOT_ENV
        )))
    }
}

/// Directories directly under `base` whose name contains `OneDrive`
pub fn find_sync_roots(base: &Path) -> Result<Vec<PathBuf>> {
    let mut roots = Vec::new();
    for entry in std::fs::read_dir(base).fs_context("Failed to read", base)? {
        let entry = entry.fs_context("Failed to read", base)?;
        let name = entry.file_name();
        if name.to_string_lossy().contains("OneDrive") && entry.path().is_dir() {
            roots.push(entry.path());
        }
    }
    roots.sort();
    Ok(roots)
}

/// The shallowest directory below `base` whose name starts with `OneDrive`,
/// ignoring case
pub fn find_sync_root(base: &Path) -> Option<PathBuf> {
    walkdir::WalkDir::new(base)
        .min_depth(1)
        .max_depth(SYNC_ROOT_SEARCH_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping entry during sync root search");
                None
            }
        })
        .filter(|e| e.file_type().is_dir())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .to_lowercase()
                .starts_with("onedrive")
        })
        .min_by_key(|e| e.depth())
        .map(|e| e.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_base_path_does_not_panic() {
        let _ = base_path();
    }

    #[test]
    fn test_find_sync_roots() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir(home.path().join("OneDrive - UT Austin")).unwrap();
        fs::create_dir(home.path().join("OneDrive")).unwrap();
        fs::create_dir(home.path().join("Documents")).unwrap();
        fs::write(home.path().join("OneDrive.lnk"), "").unwrap();

        let roots = find_sync_roots(home.path()).unwrap();
        assert_eq!(
            roots,
            [
                home.path().join("OneDrive"),
                home.path().join("OneDrive - UT Austin")
            ]
        );
    }

    #[test]
    fn test_find_sync_root_prefers_shallowest() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join("Archive").join("onedrive-old")).unwrap();
        fs::create_dir_all(home.path().join("OneDrive - Personal")).unwrap();

        let root = find_sync_root(home.path()).unwrap();
        assert_eq!(root, home.path().join("OneDrive - Personal"));
    }

    #[test]
    fn test_find_sync_root_case_insensitive_prefix() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join("Library").join("CloudStorage").join("ONEDRIVE-UT"))
            .unwrap();
        fs::create_dir_all(home.path().join("MyOneDrive")).unwrap();

        let root = find_sync_root(home.path()).unwrap();
        assert_eq!(
            root,
            home.path().join("Library").join("CloudStorage").join("ONEDRIVE-UT")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_sync_root_skips_unreadable_entries() {
        use std::os::unix::fs::PermissionsExt;

        let home = tempfile::tempdir().unwrap();
        let locked = home.path().join("Locked");
        fs::create_dir(&locked).unwrap();
        fs::create_dir_all(home.path().join("Cloud").join("OneDrive - UT")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let root = find_sync_root(home.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(root, Some(home.path().join("Cloud").join("OneDrive - UT")));
    }

    #[test]
    fn test_find_sync_root_none() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir(home.path().join("Documents")).unwrap();
        assert!(find_sync_root(home.path()).is_none());
    }

    #[test]
    fn test_config_builders() {
        let config = Config::new(PathBuf::from("/od"))
            .with_semester("Fall 2024")
            .with_archive_dest(PathBuf::from("/backup"));

        assert_eq!(config.semester_path(), PathBuf::from("/od").join("Fall 2024"));
        assert_eq!(config.schedule_folder, "Fall 2024");
        assert_eq!(config.archive_dest, PathBuf::from("/backup"));

        let config = config.with_schedule_folder("Spring 2024");
        assert_eq!(config.semester_label, "Fall 2024");
        assert_eq!(config.schedule_folder, "Spring 2024");
    }
}
