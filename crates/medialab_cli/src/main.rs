//! MediaLab Assistant launcher.
//!
//! # Responsibility
//! - Load the JSON store, run one command, save when something changed.
//! - Start rolling file logging before touching data.

mod commands;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use medialab_core::{
    default_log_level, init_logging, JsonFileRepository, ReminderType, SystemClock, TaskManager,
    DEFAULT_DATA_DIR,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "medialab")]
#[command(about = "MediaLab Assistant: tasks, categories, priorities and reminders")]
#[command(version)]
pub struct Cli {
    /// Directory holding the JSON collections
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log directory (defaults to <data-dir>/logs)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show task counters (default if no subcommand)
    Summary,
    /// List categories
    Categories,
    /// List priorities
    Priorities,
    /// Create a category
    AddCategory { name: String },
    /// Create a priority
    AddPriority { name: String },
    /// Create a task
    AddTask {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Category id
        #[arg(long)]
        category: Option<String>,
        /// Priority id (Default when omitted)
        #[arg(long)]
        priority: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long, value_parser = commands::parse_date)]
        deadline: Option<chrono::NaiveDate>,
    },
    /// Search tasks
    Tasks {
        /// Case-insensitive title substring
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Mark a task completed (drops its reminders)
    CompleteTask { id: String },
    /// Delete a task and its reminders
    DeleteTask { id: String },
    /// Add a reminder to a task
    AddReminder {
        task_id: String,
        /// ONE_DAY_BEFORE | ONE_WEEK_BEFORE | ONE_MONTH_BEFORE | SPECIFIC_DATE
        #[arg(value_parser = commands::parse_reminder_type)]
        kind: ReminderType,
        /// Reminder date for SPECIFIC_DATE (YYYY-MM-DD)
        #[arg(long, value_parser = commands::parse_date)]
        date: Option<chrono::NaiveDate>,
    },
    /// List reminders
    Reminders,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_dir = absolute_log_dir(&cli.data_dir, cli.log_dir.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    init_logging(level, &log_dir).wrap_err("failed to start logging")?;
    info!(
        "event=cli_start module=cli status=ok data_dir={} version={}",
        cli.data_dir.display(),
        medialab_core::core_version()
    );

    let repo = JsonFileRepository::new(&cli.data_dir);
    let mut manager = TaskManager::open(repo, SystemClock)
        .wrap_err_with(|| format!("failed to load data from {}", cli.data_dir.display()))?;

    let command = cli.command.unwrap_or(Command::Summary);
    if commands::run(&mut manager, command)? {
        manager.save().wrap_err("failed to save data")?;
    }
    Ok(())
}

fn absolute_log_dir(data_dir: &Path, log_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => data_dir.join("logs"),
    };
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().wrap_err("failed to resolve working directory")?;
    Ok(cwd.join(dir))
}
