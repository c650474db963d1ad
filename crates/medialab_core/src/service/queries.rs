//! Read-only task queries: search and dashboard counters.

use super::clock::Clock;
use super::task_manager::TaskManager;
use crate::model::task::{Task, TaskStatus};
use crate::repo::data_repo::TaskDataRepository;
use chrono::{Days, NaiveDate};

/// Counters shown on the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub delayed: usize,
    /// Non-completed tasks with a deadline from yesterday through a week
    /// from today, inclusive.
    pub due_within_week: usize,
}

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Returns tasks matching every supplied filter.
    ///
    /// - `title`: case-insensitive substring; `None` or `""` disables it.
    /// - `category_id` / `priority_id`: exact id match when `Some`.
    pub fn search_tasks(
        &self,
        title: Option<&str>,
        category_id: Option<&str>,
        priority_id: Option<&str>,
    ) -> Vec<&Task> {
        let needle = title
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);

        self.tasks
            .iter()
            .filter(|task| {
                needle
                    .as_deref()
                    .map_or(true, |needle| task.title.to_lowercase().contains(needle))
            })
            .filter(|task| category_id.map_or(true, |id| task.category_id.as_deref() == Some(id)))
            .filter(|task| priority_id.map_or(true, |id| task.priority_id == id))
            .collect()
    }

    pub fn delayed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Delayed)
            .count()
    }

    pub fn task_summary(&self) -> TaskSummary {
        let today = self.clock.today();
        TaskSummary {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|task| task.is_completed()).count(),
            delayed: self.delayed_task_count(),
            due_within_week: self
                .tasks
                .iter()
                .filter(|task| is_due_within_week(task, today))
                .count(),
        }
    }
}

fn is_due_within_week(task: &Task, today: NaiveDate) -> bool {
    if task.is_completed() {
        return false;
    }
    let Some(deadline) = task.deadline else {
        return false;
    };
    let from = today.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN);
    let until = today.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
    (from..=until).contains(&deadline)
}
