//! Repository contract shared by all storage backends.
//!
//! # Responsibility
//! - Define whole-snapshot load/save over the four collections.
//! - Report storage failures with the offending path.
//!
//! # Invariants
//! - Repositories never apply business rules; they only (de)serialize.
//! - A malformed document fails the load instead of yielding empty data.

use crate::model::category::Category;
use crate::model::priority::Priority;
use crate::model::reminder::Reminder;
use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for snapshot load/save.
#[derive(Debug)]
pub enum RepoError {
    /// File system access failed (read, write, rename, or mkdir).
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A collection file exists but is not valid for its schema.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A collection could not be encoded.
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to access `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed data in `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(f, "failed to serialize `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}

/// The four collections as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSnapshot {
    pub categories: Vec<Category>,
    pub priorities: Vec<Priority>,
    pub tasks: Vec<Task>,
    pub reminders: Vec<Reminder>,
}

impl DataSnapshot {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.priorities.is_empty()
            && self.tasks.is_empty()
            && self.reminders.is_empty()
    }
}

/// Whole-snapshot persistence contract.
pub trait TaskDataRepository {
    /// Loads every collection. Absent collections load as empty.
    fn load_all(&self) -> RepoResult<DataSnapshot>;

    /// Overwrites every collection with the given contents.
    fn save_all(
        &self,
        categories: &[Category],
        priorities: &[Priority],
        tasks: &[Task],
        reminders: &[Reminder],
    ) -> RepoResult<()>;
}

impl<R: TaskDataRepository + ?Sized> TaskDataRepository for &R {
    fn load_all(&self) -> RepoResult<DataSnapshot> {
        (**self).load_all()
    }

    fn save_all(
        &self,
        categories: &[Category],
        priorities: &[Priority],
        tasks: &[Task],
        reminders: &[Reminder],
    ) -> RepoResult<()> {
        (**self).save_all(categories, priorities, tasks, reminders)
    }
}
