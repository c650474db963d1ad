//! In-memory repository for tests and non-persistent sessions.

use super::data_repo::{DataSnapshot, RepoResult, TaskDataRepository};
use crate::model::category::Category;
use crate::model::priority::Priority;
use crate::model::reminder::Reminder;
use crate::model::task::Task;
use std::cell::{Cell, RefCell};

/// Keeps the most recently saved snapshot in memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    stored: RefCell<DataSnapshot>,
    saves: Cell<usize>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository so the next `load_all` returns `snapshot`.
    pub fn with_snapshot(snapshot: DataSnapshot) -> Self {
        Self {
            stored: RefCell::new(snapshot),
            saves: Cell::new(0),
        }
    }

    /// Returns a copy of the stored snapshot.
    pub fn stored(&self) -> DataSnapshot {
        self.stored.borrow().clone()
    }

    /// Number of successful `save_all` calls.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl TaskDataRepository for InMemoryRepository {
    fn load_all(&self) -> RepoResult<DataSnapshot> {
        Ok(self.stored.borrow().clone())
    }

    fn save_all(
        &self,
        categories: &[Category],
        priorities: &[Priority],
        tasks: &[Task],
        reminders: &[Reminder],
    ) -> RepoResult<()> {
        *self.stored.borrow_mut() = DataSnapshot {
            categories: categories.to_vec(),
            priorities: priorities.to_vec(),
            tasks: tasks.to_vec(),
            reminders: reminders.to_vec(),
        };
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
