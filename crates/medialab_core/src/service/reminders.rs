//! Reminder operations and date validation.
//!
//! # Invariants
//! - A reminder date is never before today when created or updated.
//! - `SpecificDate` reminders fall strictly before the task deadline when the
//!   task has one.
//! - Relative reminders take their date from the task deadline; a caller
//!   supplied date is ignored for them.
//! - Completed tasks never receive reminders.
//! - A deadline edit re-applies these rules to the task's existing
//!   reminders, re-dating or removing them.

use super::clock::Clock;
use super::error::{ManagerError, ManagerResult};
use super::task_manager::TaskManager;
use crate::model::reminder::{Reminder, ReminderType};
use crate::model::task::Task;
use crate::repo::data_repo::TaskDataRepository;
use chrono::NaiveDate;
use log::debug;

impl<R: TaskDataRepository, C: Clock> TaskManager<R, C> {
    /// Creates a validated reminder for a task.
    ///
    /// # Errors
    /// - `TaskNotFound` when `task_id` does not resolve.
    /// - Any reminder validation failure; see [`ManagerError`].
    pub fn create_reminder(
        &mut self,
        task_id: &str,
        kind: ReminderType,
        custom_date: Option<NaiveDate>,
    ) -> ManagerResult<Reminder> {
        let position = self.task_position(task_id)?;
        let reminder_date = self.validated_reminder_date(&self.tasks[position], kind, custom_date)?;

        let reminder = Reminder::new(task_id, kind, reminder_date);
        self.reminders.push(reminder.clone());
        debug!(
            "event=reminder_create module=service status=ok reminder_id={} task_id={} kind={}",
            reminder.id, task_id, kind
        );
        Ok(reminder)
    }

    /// Re-targets and re-dates an existing reminder, keeping its id.
    ///
    /// Runs the same validation as [`Self::create_reminder`] on the new values.
    pub fn update_reminder(
        &mut self,
        reminder_id: &str,
        task_id: &str,
        kind: ReminderType,
        custom_date: Option<NaiveDate>,
    ) -> ManagerResult<Reminder> {
        let reminder_position = self
            .reminders
            .iter()
            .position(|reminder| reminder.id == reminder_id)
            .ok_or_else(|| ManagerError::ReminderNotFound(reminder_id.to_string()))?;
        let task_position = self.task_position(task_id)?;
        let reminder_date =
            self.validated_reminder_date(&self.tasks[task_position], kind, custom_date)?;

        let reminder = &mut self.reminders[reminder_position];
        reminder.task_id = task_id.to_string();
        reminder.kind = kind;
        reminder.reminder_date = reminder_date;
        debug!(
            "event=reminder_update module=service status=ok reminder_id={reminder_id} task_id={task_id} kind={kind}"
        );
        Ok(reminder.clone())
    }

    /// Deletes one reminder.
    pub fn delete_reminder(&mut self, reminder_id: &str) -> ManagerResult<Reminder> {
        let position = self
            .reminders
            .iter()
            .position(|reminder| reminder.id == reminder_id)
            .ok_or_else(|| ManagerError::ReminderNotFound(reminder_id.to_string()))?;
        let removed = self.reminders.remove(position);
        debug!("event=reminder_delete module=service status=ok reminder_id={reminder_id}");
        Ok(removed)
    }

    /// Reminders attached to one task, in creation order.
    pub fn reminders_for_task(&self, task_id: &str) -> Vec<&Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.task_id == task_id)
            .collect()
    }

    /// Re-validates every reminder of `task` against its current deadline.
    ///
    /// Relative reminders move to the offset from the new deadline; reminders
    /// that no longer pass validation are removed. Returns
    /// `(redated, removed)`.
    pub(super) fn realign_reminders_for(&mut self, task: &Task) -> (usize, usize) {
        let today = self.clock.today();
        let mut redated = 0usize;
        let mut removed = 0usize;
        self.reminders.retain_mut(|reminder| {
            if reminder.task_id != task.id {
                return true;
            }
            match resolve_reminder_date(task, reminder.kind, Some(reminder.reminder_date), today) {
                Ok(date) => {
                    if date != reminder.reminder_date {
                        reminder.reminder_date = date;
                        redated += 1;
                    }
                    true
                }
                Err(err) => {
                    debug!(
                        "event=reminder_realign module=service status=removed reminder_id={} task_id={} reason={}",
                        reminder.id,
                        task.id,
                        err.code()
                    );
                    removed += 1;
                    false
                }
            }
        });
        (redated, removed)
    }

    fn validated_reminder_date(
        &self,
        task: &Task,
        kind: ReminderType,
        custom_date: Option<NaiveDate>,
    ) -> ManagerResult<NaiveDate> {
        let result = resolve_reminder_date(task, kind, custom_date, self.clock.today());
        if let Err(err) = &result {
            debug!(
                "event=reminder_validate module=service status=rejected task_id={} kind={} reason={}",
                task.id,
                kind,
                err.code()
            );
        }
        result
    }
}

/// Computes and validates a reminder date against `today`.
fn resolve_reminder_date(
    task: &Task,
    kind: ReminderType,
    custom_date: Option<NaiveDate>,
    today: NaiveDate,
) -> ManagerResult<NaiveDate> {
    if task.is_completed() {
        return Err(ManagerError::CompletedTaskReminder(task.id.clone()));
    }

    let date = if kind.is_relative() {
        let deadline = task
            .deadline
            .ok_or_else(|| ManagerError::MissingDeadline(task.id.clone()))?;
        kind.offset_from(deadline)
            .ok_or(ManagerError::ReminderDateOutOfRange { kind, deadline })?
    } else {
        custom_date.ok_or(ManagerError::MissingSpecificDate)?
    };

    if date < today {
        return Err(ManagerError::ReminderDateInPast { date, today });
    }
    if !kind.is_relative() {
        if let Some(deadline) = task.deadline {
            if date >= deadline {
                return Err(ManagerError::ReminderNotBeforeDeadline { date, deadline });
            }
        }
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::resolve_reminder_date;
    use crate::model::reminder::ReminderType;
    use crate::model::task::{Task, TaskStatus};
    use crate::service::error::ManagerError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_due(deadline: Option<NaiveDate>) -> Task {
        Task::new("t", "", None, "p", deadline)
    }

    #[test]
    fn relative_kind_ignores_custom_date() {
        let today = date(2026, 6, 1);
        let task = task_due(Some(date(2026, 6, 20)));
        let resolved = resolve_reminder_date(
            &task,
            ReminderType::OneWeekBefore,
            Some(date(2026, 6, 2)),
            today,
        )
        .unwrap();
        assert_eq!(resolved, date(2026, 6, 13));
    }

    #[test]
    fn specific_date_on_deadline_is_rejected() {
        let today = date(2026, 6, 1);
        let deadline = date(2026, 6, 20);
        let task = task_due(Some(deadline));
        let err =
            resolve_reminder_date(&task, ReminderType::SpecificDate, Some(deadline), today)
                .unwrap_err();
        assert!(matches!(
            err,
            ManagerError::ReminderNotBeforeDeadline { date: d, .. } if d == deadline
        ));
    }

    #[test]
    fn specific_date_without_deadline_only_checks_today() {
        let today = date(2026, 6, 1);
        let task = task_due(None);
        let resolved =
            resolve_reminder_date(&task, ReminderType::SpecificDate, Some(today), today).unwrap();
        assert_eq!(resolved, today);
    }

    #[test]
    fn completed_check_runs_before_date_checks() {
        let mut task = task_due(None);
        task.status = TaskStatus::Completed;
        let err = resolve_reminder_date(&task, ReminderType::SpecificDate, None, date(2026, 6, 1))
            .unwrap_err();
        assert!(matches!(err, ManagerError::CompletedTaskReminder(_)));
    }
}
