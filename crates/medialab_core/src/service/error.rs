//! Error and outcome types for task manager operations.

use crate::model::category::CategoryId;
use crate::model::priority::PriorityId;
use crate::model::reminder::{ReminderId, ReminderType};
use crate::model::task::{TaskId, TaskStatus};
use crate::repo::data_repo::RepoError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors from task manager operations.
///
/// Every variant except `Repo` is raised before any collection is touched.
#[derive(Debug)]
pub enum ManagerError {
    /// Category or priority name is blank after trim.
    BlankName,
    /// Task title is blank after trim.
    BlankTitle,
    /// Name collides with the reserved Default priority.
    ReservedPriorityName(String),
    /// Reminders cannot target a completed task.
    CompletedTaskReminder(TaskId),
    /// Relative reminder requested for a task without a deadline.
    MissingDeadline(TaskId),
    /// `SpecificDate` reminder requested without a date.
    MissingSpecificDate,
    /// Reminder date is strictly before today.
    ReminderDateInPast { date: NaiveDate, today: NaiveDate },
    /// `SpecificDate` reminder is not strictly before the task deadline.
    ReminderNotBeforeDeadline {
        date: NaiveDate,
        deadline: NaiveDate,
    },
    /// Offset arithmetic left the supported calendar range.
    ReminderDateOutOfRange {
        kind: ReminderType,
        deadline: NaiveDate,
    },
    /// Explicit status edit not allowed by the task lifecycle.
    InvalidStatusTransition { from: TaskStatus, to: TaskStatus },
    CategoryNotFound(CategoryId),
    PriorityNotFound(PriorityId),
    TaskNotFound(TaskId),
    ReminderNotFound(ReminderId),
    /// Load or save failure.
    Repo(RepoError),
}

impl ManagerError {
    /// Returns whether the caller can fix the input and retry.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::PriorityNotFound(_)
                | Self::TaskNotFound(_)
                | Self::ReminderNotFound(_)
                | Self::Repo(_)
        )
    }

    /// Returns whether a referenced entity id did not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound(_)
                | Self::PriorityNotFound(_)
                | Self::TaskNotFound(_)
                | Self::ReminderNotFound(_)
        )
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::BlankTitle => "blank_title",
            Self::ReservedPriorityName(_) => "reserved_priority_name",
            Self::CompletedTaskReminder(_) => "completed_task_reminder",
            Self::MissingDeadline(_) => "missing_deadline",
            Self::MissingSpecificDate => "missing_specific_date",
            Self::ReminderDateInPast { .. } => "reminder_date_in_past",
            Self::ReminderNotBeforeDeadline { .. } => "reminder_not_before_deadline",
            Self::ReminderDateOutOfRange { .. } => "reminder_date_out_of_range",
            Self::InvalidStatusTransition { .. } => "invalid_status_transition",
            Self::CategoryNotFound(_) => "category_not_found",
            Self::PriorityNotFound(_) => "priority_not_found",
            Self::TaskNotFound(_) => "task_not_found",
            Self::ReminderNotFound(_) => "reminder_not_found",
            Self::Repo(_) => "storage_failure",
        }
    }
}

impl Display for ManagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::ReservedPriorityName(name) => {
                write!(f, "priority name `{name}` is reserved for the Default priority")
            }
            Self::CompletedTaskReminder(id) => {
                write!(f, "cannot add a reminder to completed task {id}")
            }
            Self::MissingDeadline(id) => write!(
                f,
                "task {id} has no deadline; only SPECIFIC_DATE reminders are possible"
            ),
            Self::MissingSpecificDate => {
                write!(f, "SPECIFIC_DATE reminders require a reminder date")
            }
            Self::ReminderDateInPast { date, today } => {
                write!(f, "reminder date {date} is before today ({today})")
            }
            Self::ReminderNotBeforeDeadline { date, deadline } => write!(
                f,
                "reminder date {date} must be before the task deadline {deadline}"
            ),
            Self::ReminderDateOutOfRange { kind, deadline } => {
                write!(f, "cannot compute {kind} reminder for deadline {deadline}")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "task status cannot change from {from} to {to}")
            }
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::PriorityNotFound(id) => write!(f, "priority not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ReminderNotFound(id) => write!(f, "reminder not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ManagerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ManagerError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Outcome of a rename or delete aimed at a priority.
///
/// The Default priority is protected: such requests succeed without
/// changing anything and report `DefaultProtected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityChange {
    Applied,
    DefaultProtected,
}

/// Entities removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub tasks_removed: usize,
    pub reminders_removed: usize,
}
