//! Read-only queries against the local folder tree

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{Error, IoResultExt, Result};

/// Names of the directories directly under `path`, sorted
///
/// Names are kept as the OS returns them, so joining one back onto `path`
/// always reaches the same entry. Symlinks are not followed. A missing
/// `path` yields an empty list; a `path` that is not a directory is an error.
pub fn list_subdirectories(path: &Path) -> Result<Vec<OsString>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(path).fs_context("Failed to read", path)? {
        let entry = entry.fs_context("Failed to read", path)?;
        let file_type = entry
            .file_type()
            .fs_context("Failed to inspect", &entry.path())?;
        if file_type.is_dir() {
            names.push(entry.file_name());
        }
    }

    names.sort();
    Ok(names)
}

/// Whether the directory at `path` has no entries
///
/// A missing path counts as empty.
pub fn is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut entries = fs::read_dir(path).fs_context("Failed to read", path)?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_subdirectories_skips_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("M408D")).unwrap();
        fs::create_dir(dir.path().join("CS314")).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let names = list_subdirectories(dir.path()).unwrap();
        assert_eq!(names, ["CS314", "M408D"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_subdirectories_keeps_raw_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let raw = OsStr::from_bytes(b"OLD\xff101");
        fs::create_dir(dir.path().join(raw)).unwrap();

        let names = list_subdirectories(dir.path()).unwrap();
        assert_eq!(names, [raw.to_os_string()]);
        assert!(dir.path().join(&names[0]).is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_subdirectories_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(target.path(), dir.path().join("CS314")).unwrap();

        assert!(list_subdirectories(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_list_subdirectories_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let names = list_subdirectories(&dir.path().join("Fall 2024")).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_list_subdirectories_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Fall 2024");
        fs::write(&file, "").unwrap();

        let err = list_subdirectories(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_empty(dir.path()).unwrap());

        fs::create_dir(dir.path().join("sub")).unwrap();
        assert!(!is_empty(dir.path()).unwrap());
        assert!(is_empty(&dir.path().join("sub")).unwrap());
    }

    #[test]
    fn test_is_empty_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_empty(&dir.path().join("gone")).unwrap());
    }
}
