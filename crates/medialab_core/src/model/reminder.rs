//! Reminder record and date-offset rules.
//!
//! # Invariants
//! - `task_id` always references an existing, non-completed task.
//! - For relative kinds, `reminder_date` is derived from the task deadline
//!   and never set independently.

use super::new_entity_id;
use super::task::TaskId;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier of a reminder.
pub type ReminderId = String;

/// How the reminder date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderType {
    OneDayBefore,
    OneWeekBefore,
    /// Calendar month; day-of-month is clamped (03-31 -> 02-28).
    OneMonthBefore,
    /// Caller supplies the date explicitly.
    SpecificDate,
}

impl ReminderType {
    pub const ALL: [ReminderType; 4] = [
        ReminderType::OneDayBefore,
        ReminderType::OneWeekBefore,
        ReminderType::OneMonthBefore,
        ReminderType::SpecificDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDayBefore => "ONE_DAY_BEFORE",
            Self::OneWeekBefore => "ONE_WEEK_BEFORE",
            Self::OneMonthBefore => "ONE_MONTH_BEFORE",
            Self::SpecificDate => "SPECIFIC_DATE",
        }
    }

    /// Parses a symbolic name, ignoring case and accepting `-` for `_`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|kind| kind.as_str() == normalized)
    }

    /// Returns whether the date is derived from the task deadline.
    pub fn is_relative(self) -> bool {
        !matches!(self, Self::SpecificDate)
    }

    /// Derives the reminder date from `deadline` for relative kinds.
    ///
    /// Returns `None` for `SpecificDate` and when the arithmetic leaves the
    /// supported calendar range.
    pub fn offset_from(self, deadline: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::OneDayBefore => deadline.checked_sub_days(Days::new(1)),
            Self::OneWeekBefore => deadline.checked_sub_days(Days::new(7)),
            Self::OneMonthBefore => deadline.checked_sub_months(Months::new(1)),
            Self::SpecificDate => None,
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub task_id: TaskId,
    /// Serialized as `type` to match the on-disk schema.
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub reminder_date: NaiveDate,
}

impl Reminder {
    /// Creates a reminder with a generated id. Performs no validation; the
    /// manager validates before constructing.
    pub fn new(task_id: impl Into<TaskId>, kind: ReminderType, reminder_date: NaiveDate) -> Self {
        Self {
            id: new_entity_id(),
            task_id: task_id.into(),
            kind,
            reminder_date,
        }
    }
}
