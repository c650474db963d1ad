//! Core domain logic for MediaLab Assistant.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId};
pub use model::priority::{Priority, PriorityId, DEFAULT_PRIORITY_NAME};
pub use model::reminder::{Reminder, ReminderId, ReminderType};
pub use model::task::{Task, TaskId, TaskStatus};
pub use repo::data_repo::{DataSnapshot, RepoError, RepoResult, TaskDataRepository};
pub use repo::json_repo::{
    JsonFileRepository, CATEGORIES_FILE, DEFAULT_DATA_DIR, PRIORITIES_FILE, REMINDERS_FILE,
    TASKS_FILE,
};
pub use repo::memory_repo::InMemoryRepository;
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::error::{CascadeReport, ManagerError, ManagerResult, PriorityChange};
pub use service::queries::TaskSummary;
pub use service::task_manager::TaskManager;
pub use service::tasks::TaskUpdate;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
