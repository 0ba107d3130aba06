//! Semester folder synchronization
//!
//! Brings `<root>/<semester>/` in line with a schedule:
//! - every scheduled course gets a folder (existing folders are never touched)
//! - folders of courses no longer scheduled are deleted, but only when empty
//!
//! Matching is by folder name only. Work is not transactional: the first
//! failure stops the run and whatever was done so far stays done.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use super::inspect;
use super::provision::{self, Provisioned};
use super::record::CourseRecord;
use crate::error::{Error, IoResultExt, Result};

/// What needs doing to bring a semester folder in line with a schedule
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// `<root>/<semester>`
    pub semester_path: PathBuf,
    /// Scheduled courses without a folder
    pub to_create: Vec<CourseRecord>,
    /// Scheduled courses that already have a folder
    pub already_present: Vec<String>,
    /// Folders whose course is no longer scheduled
    pub stale: Vec<OsString>,
}

impl SyncPlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.stale.is_empty()
    }
}

/// One thing that happened (or would happen, in a dry run) to a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Created(PathBuf),
    AlreadyExists(PathBuf),
    Deleted(PathBuf),
    /// Stale but not empty, left as found
    Retained(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub dry_run: bool,
    pub actions: Vec<SyncAction>,
}

impl SyncReport {
    pub fn created(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            SyncAction::Created(p) => Some(p.as_path()),
            _ => None,
        })
    }

    pub fn deleted(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            SyncAction::Deleted(p) => Some(p.as_path()),
            _ => None,
        })
    }

    pub fn retained(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|a| match a {
            SyncAction::Retained(p) => Some(p.as_path()),
            _ => None,
        })
    }

    /// Number of filesystem changes made (or planned, in a dry run)
    pub fn mutations(&self) -> usize {
        self.created().count() + self.deleted().count()
    }
}

/// Compare the schedule against what is on disk, without changing anything
pub fn plan(root: &Path, semester_label: &str, desired: &[CourseRecord]) -> Result<SyncPlan> {
    let semester_path = root.join(semester_label);
    let existing: HashSet<OsString> = inspect::list_subdirectories(&semester_path)?
        .into_iter()
        .collect();
    let desired_names: HashSet<&OsStr> = desired.iter().map(|c| OsStr::new(c.name())).collect();

    let mut to_create = Vec::new();
    let mut already_present = Vec::new();
    // Scheduled courses found on disk under a different listed name
    let mut resolved_elsewhere: Vec<&str> = Vec::new();

    for course in desired {
        if existing.contains(OsStr::new(course.name())) {
            already_present.push(course.name().to_string());
            continue;
        }

        // Not listed, but the path still resolves: a symlinked folder, or a
        // case-insensitive filesystem matching a differently cased name
        let course_path = semester_path.join(course.name());
        if course_path.is_dir() {
            tracing::debug!(path = %course_path.display(), "course folder found outside listing");
            already_present.push(course.name().to_string());
            resolved_elsewhere.push(course.name());
            continue;
        }
        if course_path.exists() {
            return Err(Error::NotADirectory(course_path));
        }
        to_create.push(course.clone());
    }

    let mut stale: Vec<OsString> = existing
        .into_iter()
        .filter(|name| !desired_names.contains(name.as_os_str()))
        .filter(|name| {
            let aliased = is_case_alias(name, &resolved_elsewhere);
            if aliased {
                tracing::debug!(name = %name.to_string_lossy(), "folder is held by a scheduled course");
            }
            !aliased
        })
        .collect();
    stale.sort();

    tracing::debug!(
        semester = %semester_path.display(),
        create = to_create.len(),
        present = already_present.len(),
        stale = stale.len(),
        "planned synchronization"
    );

    Ok(SyncPlan {
        semester_path,
        to_create,
        already_present,
        stale,
    })
}

/// Whether `name` differs only in case from a course that resolved to an
/// existing folder, i.e. it is that same folder on a case-insensitive
/// filesystem
fn is_case_alias(name: &OsStr, resolved: &[&str]) -> bool {
    let Some(name) = name.to_str() else {
        return false;
    };
    let lower = name.to_lowercase();
    resolved.iter().any(|course| course.to_lowercase() == lower)
}

/// Carry out a plan
///
/// With `dry_run` the report lists what would happen and nothing is changed.
pub fn apply(plan: &SyncPlan, dry_run: bool) -> Result<SyncReport> {
    let mut report = SyncReport {
        dry_run,
        actions: Vec::new(),
    };

    for name in &plan.already_present {
        report
            .actions
            .push(SyncAction::AlreadyExists(plan.semester_path.join(name)));
    }

    for course in &plan.to_create {
        let path = plan.semester_path.join(course.name());
        let action = if dry_run {
            SyncAction::Created(path)
        } else {
            match provision::create_course_folder(&path, course)? {
                Provisioned::Created => SyncAction::Created(path),
                Provisioned::AlreadyExists => SyncAction::AlreadyExists(path),
            }
        };
        report.actions.push(action);
    }

    for name in &plan.stale {
        let path = plan.semester_path.join(name);
        if !inspect::is_empty(&path)? {
            tracing::warn!(path = %path.display(), "directory is not empty and was not deleted");
            report.actions.push(SyncAction::Retained(path));
            continue;
        }

        if !dry_run {
            fs::remove_dir(&path).fs_context("Failed to delete", &path)?;
            tracing::info!(path = %path.display(), "deleted directory");
        }
        report.actions.push(SyncAction::Deleted(path));
    }

    Ok(report)
}

/// Plan and apply in one go
pub fn synchronize(
    root: &Path,
    semester_label: &str,
    desired: &[CourseRecord],
) -> Result<SyncReport> {
    let plan = plan(root, semester_label, desired)?;
    apply(&plan, false)
}
