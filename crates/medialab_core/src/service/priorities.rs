//! Priority operations and the Default priority policy.
//!
//! # Invariants
//! - The Default priority is never renamed or deleted; such requests report
//!   `PriorityChange::DefaultProtected` and change nothing.
//! - Deleting a priority moves its tasks to the Default priority first.
//! - No second priority may take the name "Default".

use super::clock::Clock;
use super::error::{ManagerError, ManagerResult, PriorityChange};
use super::task_manager::TaskManager;
use crate::model::priority::{Priority, DEFAULT_PRIORITY_NAME};
use crate::repo::data_repo::TaskDataRepository;
use log::debug;

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Returns the Default priority. Always present after open.
    pub fn default_priority(&self) -> &Priority {
        &self.default_priority
    }

    pub fn default_priority_id(&self) -> &str {
        &self.default_priority.id
    }

    /// Creates a priority.
    ///
    /// # Errors
    /// - `BlankName` when `name` is blank after trim.
    /// - `ReservedPriorityName` when `name` equals "Default" ignoring case.
    pub fn create_priority(&mut self, name: impl Into<String>) -> ManagerResult<Priority> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ManagerError::BlankName);
        }
        if name.eq_ignore_ascii_case(DEFAULT_PRIORITY_NAME) {
            return Err(ManagerError::ReservedPriorityName(name));
        }

        let priority = Priority::new(name);
        self.priorities.push(priority.clone());
        debug!(
            "event=priority_create module=service status=ok priority_id={}",
            priority.id
        );
        Ok(priority)
    }

    /// Renames a priority; the Default priority is left untouched.
    pub fn rename_priority(
        &mut self,
        id: &str,
        new_name: impl Into<String>,
    ) -> ManagerResult<PriorityChange> {
        if id == self.default_priority.id {
            debug!("event=priority_rename module=service status=skip reason=default_protected");
            return Ok(PriorityChange::DefaultProtected);
        }

        let new_name = new_name.into();
        if new_name.eq_ignore_ascii_case(DEFAULT_PRIORITY_NAME) {
            return Err(ManagerError::ReservedPriorityName(new_name));
        }
        let priority = self
            .priorities
            .iter_mut()
            .find(|priority| priority.id == id)
            .ok_or_else(|| ManagerError::PriorityNotFound(id.to_string()))?;
        priority.name = new_name;
        debug!("event=priority_rename module=service status=ok priority_id={id}");
        Ok(PriorityChange::Applied)
    }

    /// Deletes a priority after moving its tasks to the Default priority.
    pub fn delete_priority(&mut self, id: &str) -> ManagerResult<PriorityChange> {
        if id == self.default_priority.id {
            debug!("event=priority_delete module=service status=skip reason=default_protected");
            return Ok(PriorityChange::DefaultProtected);
        }

        let position = self
            .priorities
            .iter()
            .position(|priority| priority.id == id)
            .ok_or_else(|| ManagerError::PriorityNotFound(id.to_string()))?;

        let mut reassigned = 0usize;
        for task in self.tasks.iter_mut().filter(|task| task.priority_id == id) {
            task.priority_id = self.default_priority.id.clone();
            reassigned += 1;
        }
        self.priorities.remove(position);
        debug!(
            "event=priority_delete module=service status=ok priority_id={id} tasks_reassigned={reassigned}"
        );
        Ok(PriorityChange::Applied)
    }
}
