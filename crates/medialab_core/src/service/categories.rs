//! Category operations.
//!
//! # Invariants
//! - Deleting a category deletes its tasks and their reminders, in the order
//!   reminders, tasks, category.

use super::clock::Clock;
use super::error::{CascadeReport, ManagerError, ManagerResult};
use super::task_manager::TaskManager;
use crate::model::category::Category;
use crate::model::task::TaskId;
use crate::repo::data_repo::TaskDataRepository;
use log::debug;
use std::collections::HashSet;

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Creates a category. Duplicate names are allowed.
    ///
    /// # Errors
    /// - `BlankName` when `name` is blank after trim.
    pub fn create_category(&mut self, name: impl Into<String>) -> ManagerResult<Category> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ManagerError::BlankName);
        }

        let category = Category::new(name);
        self.categories.push(category.clone());
        debug!(
            "event=category_create module=service status=ok category_id={}",
            category.id
        );
        Ok(category)
    }

    /// Renames a category in place.
    pub fn rename_category(&mut self, id: &str, new_name: impl Into<String>) -> ManagerResult<()> {
        let category = self
            .categories
            .iter_mut()
            .find(|category| category.id == id)
            .ok_or_else(|| ManagerError::CategoryNotFound(id.to_string()))?;
        category.name = new_name.into();
        debug!("event=category_rename module=service status=ok category_id={id}");
        Ok(())
    }

    /// Deletes a category together with its tasks and their reminders.
    pub fn delete_category(&mut self, id: &str) -> ManagerResult<CascadeReport> {
        let position = self
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| ManagerError::CategoryNotFound(id.to_string()))?;

        let doomed: HashSet<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.category_id.as_deref() == Some(id))
            .map(|task| task.id.clone())
            .collect();

        let reminders_before = self.reminders.len();
        self.reminders
            .retain(|reminder| !doomed.contains(&reminder.task_id));
        let tasks_before = self.tasks.len();
        self.tasks.retain(|task| !doomed.contains(&task.id));
        self.categories.remove(position);

        let report = CascadeReport {
            tasks_removed: tasks_before - self.tasks.len(),
            reminders_removed: reminders_before - self.reminders.len(),
        };
        debug!(
            "event=category_delete module=service status=ok category_id={} tasks_removed={} reminders_removed={}",
            id, report.tasks_removed, report.reminders_removed
        );
        Ok(report)
    }
}
