//! Shared utilities for commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use course_sync::config;

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Path relative to `base` for display, or the full path if outside it
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Sync root from `--root`, then the environment, then a search of the
/// home directory
pub fn resolve_sync_root(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = flag.or_else(config::sync_root_override) {
        anyhow::ensure!(root.is_dir(), "Sync root does not exist: {}", root.display());
        return Ok(root);
    }

    let base = config::base_path()?;
    config::find_sync_root(&base)
        .ok_or_else(|| course_sync::Error::NotFound("OneDrive directory not found".to_string()))
        .context("Could not locate the sync root")
}
