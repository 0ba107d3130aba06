//! Folder archiving
//!
//! A folder `X` is zipped into `<dest>/X.zip`. Entry names are relative to
//! the folder's parent, so unpacking the archive recreates `X/...`.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, IoResultExt, Result};

/// Result of archiving a folder
#[derive(Debug)]
pub struct ArchiveSummary {
    /// Path of the written `.zip`
    pub archive_path: PathBuf,
    /// Number of files stored
    pub files: usize,
    /// Size of the archive in bytes
    pub size_bytes: u64,
}

/// Archive path for `dir` inside `dest`
pub fn archive_path_for(dir: &Path, dest: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| Error::NotFound(format!("Cannot archive: {}", dir.display())))?;
    Ok(dest.join(format!("{}.zip", name.to_string_lossy())))
}

/// Zip every file under `dir` into `dest/<name of dir>.zip`
///
/// An existing archive with the same name is overwritten. Empty directories
/// are not recorded.
pub fn archive_directory(dir: &Path, dest: &Path) -> Result<ArchiveSummary> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!(
            "Folder to archive does not exist: {}",
            dir.display()
        )));
    }
    if !dest.is_dir() {
        return Err(Error::NotFound(format!(
            "Archive destination does not exist: {}",
            dest.display()
        )));
    }

    let base = dir.parent().unwrap_or(dir);
    let archive_path = archive_path_for(dir, dest)?;

    // Written next to the final archive and renamed into place once complete
    let tmp =
        tempfile::NamedTempFile::new_in(dest).fs_context("Failed to create", &archive_path)?;
    let mut zip = ZipWriter::new(tmp);

    let mut files = 0;
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::fs("Failed to read", &path, io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let len = entry
            .metadata()
            .map_err(io::Error::from)
            .fs_context("Failed to read", path)?
            .len();
        let name = entry_name(base, path);
        tracing::debug!(entry = %name, len, "adding file");

        zip.start_file(name, entry_options(len))?;
        let mut source = File::open(path).fs_context("Failed to read", path)?;
        copy_into(&mut source, path, &mut zip, &archive_path)?;
        files += 1;
    }

    let tmp = zip.finish()?;
    tmp.persist(&archive_path)
        .map_err(|e| e.error)
        .fs_context("Failed to write", &archive_path)?;

    let size_bytes = fs::metadata(&archive_path)
        .fs_context("Failed to read", &archive_path)?
        .len();

    Ok(ArchiveSummary {
        archive_path,
        files,
        size_bytes,
    })
}

/// Entry options for a file of `len` bytes; entries past the 32-bit limit
/// need zip64 headers
fn entry_options(len: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(needs_zip64(len))
}

fn needs_zip64(len: u64) -> bool {
    len >= u32::MAX as u64
}

/// Copy `source` into `sink`, blaming read errors on the source file and
/// write errors on the archive
fn copy_into<R: Read, W: Write>(
    source: &mut R,
    source_path: &Path,
    sink: &mut W,
    archive_path: &Path,
) -> Result<()> {
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::fs("Failed to read", source_path, e)),
        };
        sink.write_all(&buf[..n])
            .fs_context("Failed to write", archive_path)?;
    }
}

/// `/`-separated path of `path` relative to `base`
fn entry_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
