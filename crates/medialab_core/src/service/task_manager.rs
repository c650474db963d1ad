//! Task manager: owner of the four collections.
//!
//! # Responsibility
//! - Load a snapshot from a repository and normalize it.
//! - Serve as the only mutator of categories, priorities, tasks, reminders.
//! - Hand out read-only views and save snapshots on demand.
//!
//! # Invariants
//! - Exactly one priority is named "Default" (case-insensitive) and its id is
//!   kept in `default_priority` for the manager's whole lifetime. The Default
//!   priority is never renamed or deleted, so the copy never goes stale.
//! - Every task's `priority_id` resolves; every `category_id` resolves or is
//!   `None`; every reminder targets an existing, non-completed task.
//! - A failed operation leaves all collections unchanged.
//!
//! Operations are grouped by entity in sibling modules (`categories`,
//! `priorities`, `tasks`, `reminders`, `queries`).

use super::clock::{Clock, SystemClock};
use super::error::ManagerResult;
use crate::model::category::Category;
use crate::model::priority::{Priority, PriorityId};
use crate::model::reminder::Reminder;
use crate::model::task::Task;
use crate::repo::data_repo::{DataSnapshot, TaskDataRepository};
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::HashSet;

/// In-memory owner of all task data, backed by a repository for load/save.
pub struct TaskManager<R: TaskDataRepository, C: Clock = SystemClock> {
    pub(super) repo: R,
    pub(super) clock: C,
    pub(super) categories: Vec<Category>,
    pub(super) priorities: Vec<Priority>,
    pub(super) tasks: Vec<Task>,
    pub(super) reminders: Vec<Reminder>,
    pub(super) default_priority: Priority,
}

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Loads all collections from `repo` and normalizes them.
    ///
    /// # Errors
    /// - Returns `ManagerError::Repo` when any collection fails to load;
    ///   malformed data is never replaced by empty collections.
    pub fn open(repo: R, clock: C) -> ManagerResult<Self> {
        let snapshot = repo.load_all()?;
        Ok(Self::from_snapshot(repo, clock, snapshot))
    }

    /// Builds a manager from an already loaded snapshot.
    ///
    /// Normalization runs in this order: Default priority, reference repair,
    /// delayed-task reconciliation.
    pub fn from_snapshot(repo: R, clock: C, snapshot: DataSnapshot) -> Self {
        let DataSnapshot {
            categories,
            mut priorities,
            mut tasks,
            reminders,
        } = snapshot;
        let default_priority = settle_default_priority(&mut priorities, &mut tasks);

        let mut manager = Self {
            repo,
            clock,
            categories,
            priorities,
            tasks,
            reminders,
            default_priority,
        };
        manager.repair_references();
        let delayed = manager.reconcile_delayed_tasks();

        info!(
            "event=manager_open module=service status=ok categories={} priorities={} tasks={} reminders={} newly_delayed={}",
            manager.categories.len(),
            manager.priorities.len(),
            manager.tasks.len(),
            manager.reminders.len(),
            delayed
        );
        manager
    }

    /// Writes the current collections through the repository.
    pub fn save(&self) -> ManagerResult<()> {
        self.repo
            .save_all(&self.categories, &self.priorities, &self.tasks, &self.reminders)?;
        Ok(())
    }

    /// Copies the current collections.
    pub fn snapshot(&self) -> DataSnapshot {
        DataSnapshot {
            categories: self.categories.clone(),
            priorities: self.priorities.clone(),
            tasks: self.tasks.clone(),
            reminders: self.reminders.clone(),
        }
    }

    /// Makes sure a Default priority exists and returns it.
    ///
    /// Runs automatically on open; calling it again is harmless.
    pub fn ensure_default_priority(&mut self) -> &Priority {
        self.default_priority = settle_default_priority(&mut self.priorities, &mut self.tasks);
        &self.default_priority
    }

    /// Applies the delayed rule to every task.
    ///
    /// Returns how many tasks changed to `Delayed`; a second run right after
    /// the first returns 0.
    pub fn reconcile_delayed_tasks(&mut self) -> usize {
        let today = self.clock.today();
        let changed = self
            .tasks
            .iter_mut()
            .map(|task| task.apply_delay_rule(today))
            .filter(|changed| *changed)
            .count();
        if changed > 0 {
            info!("event=tasks_reconcile module=service status=ok newly_delayed={changed}");
        }
        changed
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn priorities(&self) -> &[Priority] {
        &self.priorities
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn find_priority(&self, id: &str) -> Option<&Priority> {
        self.priorities.iter().find(|priority| priority.id == id)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_reminder(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| reminder.id == id)
    }

    /// Fixes references that do not resolve after a load.
    fn repair_references(&mut self) {
        let category_ids: HashSet<&str> =
            self.categories.iter().map(|c| c.id.as_str()).collect();
        let priority_ids: HashSet<&str> =
            self.priorities.iter().map(|p| p.id.as_str()).collect();

        let mut reassigned = 0usize;
        let mut uncategorized = 0usize;
        for task in &mut self.tasks {
            if !priority_ids.contains(task.priority_id.as_str()) {
                task.priority_id = self.default_priority.id.clone();
                reassigned += 1;
            }
            if task
                .category_id
                .as_deref()
                .is_some_and(|id| !category_ids.contains(id))
            {
                task.category_id = None;
                uncategorized += 1;
            }
        }

        let live_task_ids: HashSet<&str> = self
            .tasks
            .iter()
            .filter(|task| !task.is_completed())
            .map(|task| task.id.as_str())
            .collect();
        let before = self.reminders.len();
        self.reminders
            .retain(|reminder| live_task_ids.contains(reminder.task_id.as_str()));
        let dropped = before - self.reminders.len();

        if reassigned + uncategorized + dropped > 0 {
            warn!(
                "event=references_repair module=service status=ok priority_reassigned={} category_cleared={} reminders_dropped={}",
                reassigned, uncategorized, dropped
            );
        }
    }
}

/// Finds or creates the Default priority and returns a copy of it.
///
/// Additional priorities named "Default" are merged into the first one:
/// their tasks are reassigned and the duplicates removed.
fn settle_default_priority(priorities: &mut Vec<Priority>, tasks: &mut [Task]) -> Priority {
    let Some(keep) = priorities
        .iter()
        .find(|priority| priority.has_default_name())
        .cloned()
    else {
        let created = Priority::default_priority();
        priorities.push(created.clone());
        info!(
            "event=default_priority module=service status=created priority_id={}",
            created.id
        );
        return created;
    };

    let mut kept = false;
    let mut duplicates: Vec<PriorityId> = Vec::new();
    priorities.retain(|priority| {
        if !priority.has_default_name() {
            return true;
        }
        if !kept {
            kept = true;
            return true;
        }
        duplicates.push(priority.id.clone());
        false
    });

    if !duplicates.is_empty() {
        for task in tasks.iter_mut() {
            if duplicates.contains(&task.priority_id) {
                task.priority_id = keep.id.clone();
            }
        }
        warn!(
            "event=default_priority module=service status=merged priority_id={} duplicates={}",
            keep.id,
            duplicates.len()
        );
    }
    keep
}
