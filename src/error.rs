//! Error types shared by the library modules

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Something the run depends on could not be located
    #[error("{0}")]
    NotFound(String),

    /// The remote host answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    RemoteUnavailable { url: String, status: u16 },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid course record #{index}: {reason}")]
    InvalidCourse { index: usize, reason: String },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Wrap an I/O error with the operation and path it came from
    pub fn fs(action: &'static str, path: &Path, source: io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Attach filesystem context to an `io::Result`
pub(crate) trait IoResultExt<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| Error::fs(action, path, e))
    }
}
