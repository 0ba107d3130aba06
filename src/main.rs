//! course-sync: keep semester course folders in line with a published schedule

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use course_sync::config::Config;
use course_sync::courses::Semester;
use course_sync::prompt::TerminalPrompt;

mod commands;

/// Environment variable holding the log filter
const LOG_ENV: &str = "COURSE_SYNC_LOG";

#[derive(Parser)]
#[command(name = "course-sync")]
#[command(about = "Set up and archive semester course folders", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and prune course folders from a remote schedule
    Setup {
        /// Sync root holding the semester folders (searched for if omitted)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Semester folder to synchronize (default: upcoming semester)
        #[arg(long)]
        semester: Option<String>,

        /// Remote folder to list schedules from (default: the semester)
        #[arg(long)]
        schedule_folder: Option<String>,

        /// Schedule file to use (prompts if omitted)
        #[arg(long)]
        schedule: Option<String>,

        /// Show what would be done without making changes
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Archive a semester folder into a .zip
    Archive {
        /// Sync root holding the semester folders (prompts if omitted)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Semester folder to archive (prompts if omitted)
        #[arg(long)]
        folder: Option<String>,

        /// Directory to write the archive to
        #[arg(long)]
        dest: Option<PathBuf>,
    },

    /// Print the semester folders are currently set up for
    Semester,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "An error occurred:".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Setup {
            root,
            semester,
            schedule_folder,
            schedule,
            dry_run,
        } => {
            if dry_run {
                println!("{}", "(DRY-RUN MODE - no changes will be made)".blue());
            }

            let sync_root = commands::utils::resolve_sync_root(root)?;
            let mut config = Config::new(sync_root);
            if let Some(label) = semester {
                config = config.with_semester(label);
            }
            if let Some(folder) = schedule_folder {
                config = config.with_schedule_folder(folder);
            }
            tracing::debug!(?config, "resolved configuration");

            let options = commands::setup::SetupOptions { schedule, dry_run };
            commands::setup::execute(&config, &options, &mut TerminalPrompt)?;
        }

        Commands::Archive { root, folder, dest } => {
            let options = commands::archive::ArchiveOptions { root, folder, dest };
            commands::archive::execute(&options, &mut TerminalPrompt)?;
        }

        Commands::Semester => {
            println!("{}", Semester::current());
        }
    }

    Ok(())
}
