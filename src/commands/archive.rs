//! Archive command - Zip a semester folder from the sync root

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

use super::utils;
use course_sync::archive::{self, ArchiveSummary};
use course_sync::config::{self, Config};
use course_sync::courses::inspect;
use course_sync::prompt::{self, Prompt};

/// Options for the archive command
#[derive(Debug, Default)]
pub struct ArchiveOptions {
    /// Sync root to use instead of searching the home directory
    pub root: Option<PathBuf>,
    /// Semester folder to archive instead of asking
    pub folder: Option<String>,
    /// Destination directory for the `.zip`
    pub dest: Option<PathBuf>,
}

/// Execute the archive command
pub fn execute(options: &ArchiveOptions, prompt: &mut dyn Prompt) -> Result<ArchiveSummary> {
    let sync_root = match options.root.clone().or_else(config::sync_root_override) {
        Some(root) => root,
        None => select_sync_root(prompt)?,
    };

    let mut config = Config::new(sync_root);
    if let Some(dest) = &options.dest {
        config = config.with_archive_dest(dest.clone());
    }
    tracing::debug!(?config, "resolved configuration");

    let folder = select_semester(&config.sync_root, options.folder.as_deref(), prompt)?;
    archive_folder(&folder, &config.archive_dest)
}

/// Ask which OneDrive directory in the home directory to use
fn select_sync_root(prompt: &mut dyn Prompt) -> Result<PathBuf> {
    let base = config::base_path()?;
    let roots = config::find_sync_roots(&base)?;
    if roots.is_empty() {
        return Err(course_sync::Error::NotFound("No OneDrive directory found".to_string()).into());
    }

    let labels: Vec<String> = roots.iter().map(|p| p.display().to_string()).collect();
    let index = prompt.select("Select OneDrive directory", &labels)?;
    Ok(roots[index].clone())
}

/// Pick the semester folder to archive
fn select_semester(
    sync_root: &Path,
    preset: Option<&str>,
    prompt: &mut dyn Prompt,
) -> Result<PathBuf> {
    let semesters = inspect::list_subdirectories(sync_root)
        .with_context(|| format!("Failed to list {}", sync_root.display()))?;
    let labels: Vec<String> = semesters
        .iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    let index = prompt::choose(
        prompt,
        "Select semester directory to archive",
        &labels,
        preset,
    )?;
    Ok(sync_root.join(&semesters[index]))
}

fn archive_folder(folder: &Path, dest: &Path) -> Result<ArchiveSummary> {
    let source_size = fs_extra::dir::get_size(folder)
        .with_context(|| format!("Failed to read {}", folder.display()))?;
    println!(
        "Archiving {} ({})...",
        folder.display(),
        utils::format_size(source_size)
    );

    let summary = archive::archive_directory(folder, dest)?;

    println!(
        "{} '{}' to '{}' ({} file(s), {})",
        "Archived".green(),
        folder.display(),
        summary.archive_path.display(),
        summary.files,
        utils::format_size(summary.size_bytes)
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_sync::prompt::ScriptedPrompt;
    use std::fs;

    fn sync_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("Fall 2023").join("CS314")).unwrap();
        fs::write(
            root.path().join("Fall 2023").join("CS314").join("course_info.txt"),
            "coursename: CS314\n",
        )
        .unwrap();
        fs::create_dir_all(root.path().join("Spring 2024")).unwrap();
        root
    }

    #[test]
    fn test_execute_with_scripted_prompt() {
        let root = sync_root();
        let dest = tempfile::tempdir().unwrap();
        let options = ArchiveOptions {
            root: Some(root.path().to_path_buf()),
            folder: None,
            dest: Some(dest.path().to_path_buf()),
        };

        let summary = execute(&options, &mut ScriptedPrompt::new(["Fall 2023"])).unwrap();
        assert_eq!(summary.archive_path, dest.path().join("Fall 2023.zip"));
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn test_execute_with_preset_folder() {
        let root = sync_root();
        let dest = tempfile::tempdir().unwrap();
        let options = ArchiveOptions {
            root: Some(root.path().to_path_buf()),
            folder: Some("Spring 2024".to_string()),
            dest: Some(dest.path().to_path_buf()),
        };

        let summary = execute(&options, &mut ScriptedPrompt::default()).unwrap();
        assert_eq!(summary.files, 0);
        assert!(summary.archive_path.exists());
    }

    #[test]
    fn test_execute_unknown_folder() {
        let root = sync_root();
        let dest = tempfile::tempdir().unwrap();
        let options = ArchiveOptions {
            root: Some(root.path().to_path_buf()),
            folder: Some("Fall 1999".to_string()),
            dest: Some(dest.path().to_path_buf()),
        };

        assert!(execute(&options, &mut ScriptedPrompt::default()).is_err());
    }
}
