//! Task record and status lifecycle.
//!
//! # Responsibility
//! - Define the persisted task shape and its status enum.
//! - Provide the delayed-check rule and allowed status transitions.
//!
//! # Invariants
//! - `priority_id` is never empty; the manager resolves it to an existing
//!   priority (falling back to Default).
//! - A task is never both `Delayed` and `Completed`; the delayed rule never
//!   touches a completed task.

use super::category::CategoryId;
use super::new_entity_id;
use super::priority::PriorityId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier of a task.
pub type TaskId = String;

/// Task lifecycle state, serialized by symbolic name (`IN_PROGRESS`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created, no work recorded yet.
    #[default]
    Open,
    InProgress,
    Postponed,
    /// Done. Never changed by the automatic delayed rule.
    Completed,
    /// Deadline passed before completion.
    Delayed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::Postponed,
        TaskStatus::Completed,
        TaskStatus::Delayed,
    ];

    /// Symbolic name used on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Postponed => "POSTPONED",
            Self::Completed => "COMPLETED",
            Self::Delayed => "DELAYED",
        }
    }

    /// Parses a symbolic name, ignoring case and accepting `-` for `_`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
    }

    /// Returns whether an explicit edit may move a task from `self` to `next`.
    ///
    /// Keeping the current status is always allowed. `Completed` stays
    /// editable to any status; nothing else returns to `Open`.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Open => true,
            Self::InProgress => matches!(next, Self::Postponed | Self::Delayed | Self::Completed),
            Self::Postponed => matches!(next, Self::InProgress | Self::Delayed | Self::Completed),
            Self::Delayed => matches!(next, Self::InProgress | Self::Postponed | Self::Completed),
            Self::Completed => true,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `None` means uncategorized.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub priority_id: PriorityId,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Creates an `Open` task with a generated id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Option<CategoryId>,
        priority_id: impl Into<PriorityId>,
        deadline: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            description: description.into(),
            category_id,
            priority_id: priority_id.into(),
            deadline,
            status: TaskStatus::Open,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Returns whether the deadline is strictly before `today`.
    pub fn is_past_deadline(&self, today: NaiveDate) -> bool {
        self.deadline.is_some_and(|deadline| deadline < today)
    }

    /// Applies the delayed rule: a non-completed task past its deadline
    /// becomes `Delayed`.
    ///
    /// Returns `true` only when the status actually changed. The rule only
    /// ever sets `Delayed`; it never clears it.
    pub fn apply_delay_rule(&mut self, today: NaiveDate) -> bool {
        if self.is_completed() || self.status == TaskStatus::Delayed {
            return false;
        }
        if !self.is_past_deadline(today) {
            return false;
        }
        self.status = TaskStatus::Delayed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn delay_rule_sets_delayed_only_for_strictly_past_deadlines() {
        let today = date(2026, 5, 10);

        let mut due_today = Task::new("a", "", None, "p", Some(today));
        assert!(!due_today.apply_delay_rule(today));
        assert_eq!(due_today.status, TaskStatus::Open);

        let mut overdue = Task::new("b", "", None, "p", Some(date(2026, 5, 9)));
        assert!(overdue.apply_delay_rule(today));
        assert_eq!(overdue.status, TaskStatus::Delayed);
        assert!(!overdue.apply_delay_rule(today));

        let mut no_deadline = Task::new("c", "", None, "p", None);
        assert!(!no_deadline.apply_delay_rule(today));
    }

    #[test]
    fn delay_rule_never_touches_completed_tasks() {
        let mut task = Task::new("done", "", None, "p", Some(date(2020, 1, 1)));
        task.status = TaskStatus::Completed;
        assert!(!task.apply_delay_rule(date(2026, 1, 1)));
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn transitions_follow_lifecycle_table() {
        use TaskStatus::*;

        assert!(Open.can_transition_to(InProgress));
        assert!(Open.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Postponed));
        assert!(!InProgress.can_transition_to(Open));
        assert!(Postponed.can_transition_to(InProgress));
        assert!(!Postponed.can_transition_to(Open));
        assert!(Delayed.can_transition_to(Completed));
        assert!(!Delayed.can_transition_to(Open));
        assert!(Completed.can_transition_to(Open));
        assert!(Delayed.can_transition_to(Delayed));
    }

    #[test]
    fn parse_accepts_symbolic_and_loose_forms() {
        assert_eq!(TaskStatus::parse("IN_PROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse("in-progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse(" completed "), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse("finished"), None);
    }
}
