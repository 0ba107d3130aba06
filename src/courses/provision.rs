//! Course folder creation

use std::fs;
use std::io::Write;
use std::path::Path;

use super::record::CourseRecord;
use crate::error::{IoResultExt, Result};

/// Name of the descriptor written into every new course folder
pub const DESCRIPTOR_FILE: &str = "course_info.txt";

/// What `create_course_folder` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    AlreadyExists,
}

/// Create `path` and write the course descriptor into it
///
/// Anything already at `path`, directory or not, is left untouched. The
/// descriptor goes through a temporary file in the new folder and is renamed
/// into place once fully written.
pub fn create_course_folder(path: &Path, record: &CourseRecord) -> Result<Provisioned> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "folder already exists");
        return Ok(Provisioned::AlreadyExists);
    }

    fs::create_dir_all(path).fs_context("Failed to create", path)?;
    tracing::info!(path = %path.display(), "folder created");

    let descriptor = path.join(DESCRIPTOR_FILE);
    let mut tmp = tempfile::NamedTempFile::new_in(path).fs_context("Failed to write", &descriptor)?;
    tmp.write_all(record.descriptor().as_bytes())
        .fs_context("Failed to write", &descriptor)?;
    tmp.persist(&descriptor)
        .map_err(|e| e.error)
        .fs_context("Failed to write", &descriptor)?;
    tracing::info!(path = %descriptor.display(), "info file created");

    Ok(Provisioned::Created)
}
