//! Task operations.
//!
//! # Invariants
//! - A task always points at an existing priority; omitted priorities
//!   resolve to Default.
//! - Moving a task to `Completed` removes its reminders.
//! - Changing a deadline re-dates the task's relative reminders and drops any
//!   reminder the new deadline makes invalid.
//! - After an edit the delayed rule runs again, so a non-completed task past
//!   its deadline ends up `Delayed` whatever status was requested.

use super::clock::Clock;
use super::error::{ManagerError, ManagerResult};
use super::task_manager::TaskManager;
use crate::model::category::CategoryId;
use crate::model::priority::PriorityId;
use crate::model::task::{Task, TaskStatus};
use crate::repo::data_repo::TaskDataRepository;
use chrono::NaiveDate;
use log::debug;

/// Full replacement of a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    /// `None` clears the category.
    pub category_id: Option<CategoryId>,
    /// `None` selects the Default priority.
    pub priority_id: Option<PriorityId>,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
}

impl TaskUpdate {
    /// Starts from the task's current values.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            category_id: task.category_id.clone(),
            priority_id: Some(task.priority_id.clone()),
            deadline: task.deadline,
            status: task.status,
        }
    }
}

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Creates an `Open` task.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is blank after trim.
    /// - `CategoryNotFound` / `PriorityNotFound` for ids that do not resolve.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Option<&str>,
        priority_id: Option<&str>,
        deadline: Option<NaiveDate>,
    ) -> ManagerResult<Task> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ManagerError::BlankTitle);
        }
        let category_id = self.resolve_category_id(category_id)?;
        let priority_id = self.resolve_priority_id(priority_id)?;

        let task = Task::new(title, description, category_id, priority_id, deadline);
        self.tasks.push(task.clone());
        debug!("event=task_create module=service status=ok task_id={}", task.id);
        Ok(task)
    }

    /// Overwrites every mutable field of a task.
    ///
    /// # Errors
    /// - `TaskNotFound`, `CategoryNotFound`, `PriorityNotFound` for ids that
    ///   do not resolve.
    /// - `BlankTitle` when the new title is blank.
    /// - `InvalidStatusTransition` when the lifecycle forbids the edit.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> ManagerResult<Task> {
        let position = self.task_position(id)?;
        if update.title.trim().is_empty() {
            return Err(ManagerError::BlankTitle);
        }
        let category_id = self.resolve_category_id(update.category_id.as_deref())?;
        let priority_id = self.resolve_priority_id(update.priority_id.as_deref())?;
        let previous_status = self.tasks[position].status;
        let previous_deadline = self.tasks[position].deadline;
        if !previous_status.can_transition_to(update.status) {
            return Err(ManagerError::InvalidStatusTransition {
                from: previous_status,
                to: update.status,
            });
        }

        let today = self.clock.today();
        let task = &mut self.tasks[position];
        task.title = update.title;
        task.description = update.description;
        task.category_id = category_id;
        task.priority_id = priority_id;
        task.deadline = update.deadline;
        task.status = update.status;
        task.apply_delay_rule(today);
        let updated = task.clone();

        let mut reminders_removed = 0usize;
        let mut reminders_redated = 0usize;
        if previous_status != TaskStatus::Completed && updated.is_completed() {
            reminders_removed = self.remove_reminders_for(id);
        } else if previous_deadline != updated.deadline {
            (reminders_redated, reminders_removed) = self.realign_reminders_for(&updated);
        }
        debug!(
            "event=task_update module=service status=ok task_id={} task_status={} reminders_redated={} reminders_removed={}",
            id, updated.status, reminders_redated, reminders_removed
        );
        Ok(updated)
    }

    /// Deletes a task and its reminders.
    pub fn delete_task(&mut self, id: &str) -> ManagerResult<Task> {
        let position = self.task_position(id)?;
        let reminders_removed = self.remove_reminders_for(id);
        let removed = self.tasks.remove(position);
        debug!(
            "event=task_delete module=service status=ok task_id={id} reminders_removed={reminders_removed}"
        );
        Ok(removed)
    }

    pub(super) fn task_position(&self, id: &str) -> ManagerResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| ManagerError::TaskNotFound(id.to_string()))
    }

    /// Removes every reminder of a task and returns how many were removed.
    pub(super) fn remove_reminders_for(&mut self, task_id: &str) -> usize {
        let before = self.reminders.len();
        self.reminders.retain(|reminder| reminder.task_id != task_id);
        before - self.reminders.len()
    }

    fn resolve_category_id(&self, id: Option<&str>) -> ManagerResult<Option<CategoryId>> {
        match id {
            Some(id) => self
                .find_category(id)
                .map(|category| Some(category.id.clone()))
                .ok_or_else(|| ManagerError::CategoryNotFound(id.to_string())),
            None => Ok(None),
        }
    }

    fn resolve_priority_id(&self, id: Option<&str>) -> ManagerResult<PriorityId> {
        match id {
            Some(id) => self
                .find_priority(id)
                .map(|priority| priority.id.clone())
                .ok_or_else(|| ManagerError::PriorityNotFound(id.to_string())),
            None => Ok(self.default_priority.id.clone()),
        }
    }
}
