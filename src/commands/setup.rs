//! Setup command - Create and prune course folders from a remote schedule

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use super::utils;
use course_sync::config::Config;
use course_sync::courses::sync::{self, SyncAction, SyncPlan, SyncReport};
use course_sync::prompt::{self, Prompt};
use course_sync::remote::{CourseSource, GithubSource};

/// Options for the setup command
#[derive(Debug, Default)]
pub struct SetupOptions {
    /// Schedule file to use instead of asking
    pub schedule: Option<String>,
    /// Report what would change without touching the disk
    pub dry_run: bool,
}

/// Execute the setup command against the GitHub schedule repository
pub fn execute(config: &Config, options: &SetupOptions, prompt: &mut dyn Prompt) -> Result<()> {
    let source = GithubSource::new(&config.schedules_url, &config.schedule_folder)?;
    tracing::info!(url = %source.listing_url(), "using schedule listing");
    run(config, options, &source, prompt).map(|_| ())
}

/// Pick a schedule from `source` and synchronize the semester folder with it
pub fn run(
    config: &Config,
    options: &SetupOptions,
    source: &dyn CourseSource,
    prompt: &mut dyn Prompt,
) -> Result<SyncReport> {
    let files = source
        .list_available()
        .context("Failed to get schedule files")?;
    let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();

    let index = prompt::choose(
        prompt,
        "Select a JSON file for course data",
        &names,
        options.schedule.as_deref(),
    )?;
    let selected = &files[index];
    println!("Selected JSON file: {}", selected.download_url);

    let courses = source
        .fetch(selected)
        .with_context(|| format!("Failed to download {}", selected.name))?;

    println!(
        "Synchronizing {} course(s) into: {}",
        courses.len(),
        config.semester_path().display()
    );
    println!();

    let plan = sync::plan(&config.sync_root, &config.semester_label, &courses)?;
    if plan.is_noop() {
        println!("Course folders are already up to date.");
        return Ok(sync::apply(&plan, options.dry_run)?);
    }

    println!("{}", format_plan(&plan));
    println!();

    let report = sync::apply(&plan, options.dry_run)?;
    print_report(&report, &plan);

    if options.dry_run {
        println!("\n{}", "(DRY-RUN) No changes made.".blue());
    } else {
        println!("\n{}", "Course folder synchronization complete.".green());
    }

    Ok(report)
}

/// Table of planned changes
fn format_plan(plan: &SyncPlan) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Course"), Cell::new("Change")]);

    for course in &plan.to_create {
        table.add_row(vec![Cell::new(course.name()), Cell::new("create")]);
    }
    for name in &plan.stale {
        table.add_row(vec![
            Cell::new(name.to_string_lossy()),
            Cell::new("remove if empty"),
        ]);
    }
    for name in &plan.already_present {
        table.add_row(vec![Cell::new(name), Cell::new("keep")]);
    }

    table.to_string()
}

fn print_report(report: &SyncReport, plan: &SyncPlan) {
    let base = &plan.semester_path;
    let (created, deleted) = if report.dry_run {
        ("Would create:", "Would delete:")
    } else {
        ("Created:", "Deleted:")
    };

    for action in &report.actions {
        match action {
            SyncAction::Created(path) => {
                println!("{} {}", created.green(), utils::display_relative(path, base))
            }
            SyncAction::Deleted(path) => {
                println!("{} {}", deleted.green(), utils::display_relative(path, base))
            }
            SyncAction::Retained(path) => println!(
                "{} '{}' is not empty and was not deleted",
                "Skipped:".yellow(),
                utils::display_relative(path, base)
            ),
            SyncAction::AlreadyExists(path) => println!(
                "{} {}",
                "Exists:".dimmed(),
                utils::display_relative(path, base)
            ),
        }
    }
}
