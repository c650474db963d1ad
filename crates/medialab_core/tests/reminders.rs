use chrono::NaiveDate;
use medialab_core::{
    FixedClock, InMemoryRepository, ManagerError, ReminderType, TaskManager, TaskStatus,
    TaskUpdate,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 3, 15)
}

fn fresh_manager() -> TaskManager<InMemoryRepository, FixedClock> {
    TaskManager::open(InMemoryRepository::new(), FixedClock(today())).unwrap()
}

#[test]
fn relative_reminders_derive_from_deadline() {
    let mut manager = fresh_manager();
    let task = manager
        .create_task("t", "", None, None, Some(date(2026, 5, 31)))
        .unwrap();

    let day = manager
        .create_reminder(&task.id, ReminderType::OneDayBefore, None)
        .unwrap();
    let week = manager
        .create_reminder(&task.id, ReminderType::OneWeekBefore, Some(date(2026, 3, 20)))
        .unwrap();
    let month = manager
        .create_reminder(&task.id, ReminderType::OneMonthBefore, None)
        .unwrap();

    assert_eq!(day.reminder_date, date(2026, 5, 30));
    assert_eq!(week.reminder_date, date(2026, 5, 24));
    assert_eq!(month.reminder_date, date(2026, 4, 30));
    assert_eq!(manager.reminders_for_task(&task.id).len(), 3);
}

#[test]
fn reminder_dated_today_is_accepted_and_yesterday_rejected() {
    let mut manager = fresh_manager();
    let due_tomorrow = manager
        .create_task("t", "", None, None, Some(date(2026, 3, 16)))
        .unwrap();
    let reminder = manager
        .create_reminder(&due_tomorrow.id, ReminderType::OneDayBefore, None)
        .unwrap();
    assert_eq!(reminder.reminder_date, today());

    let due_today = manager
        .create_task("u", "", None, None, Some(today()))
        .unwrap();
    let err = manager
        .create_reminder(&due_today.id, ReminderType::OneDayBefore, None)
        .unwrap_err();
    assert!(matches!(
        err,
        ManagerError::ReminderDateInPast { date: d, today: t } if d == date(2026, 3, 14) && t == today()
    ));
    assert!(manager.reminders_for_task(&due_today.id).is_empty());
}

#[test]
fn relative_reminder_needs_deadline() {
    let mut manager = fresh_manager();
    let task = manager.create_task("t", "", None, None, None).unwrap();

    let err = manager
        .create_reminder(&task.id, ReminderType::OneWeekBefore, None)
        .unwrap_err();
    assert!(matches!(err, ManagerError::MissingDeadline(id) if id == task.id));
}

#[test]
fn specific_date_reminder_rules() {
    let mut manager = fresh_manager();
    let task = manager
        .create_task("t", "", None, None, Some(date(2026, 3, 25)))
        .unwrap();

    assert!(matches!(
        manager.create_reminder(&task.id, ReminderType::SpecificDate, None),
        Err(ManagerError::MissingSpecificDate)
    ));
    assert!(matches!(
        manager.create_reminder(&task.id, ReminderType::SpecificDate, Some(date(2026, 3, 25))),
        Err(ManagerError::ReminderNotBeforeDeadline { .. })
    ));
    assert!(matches!(
        manager.create_reminder(&task.id, ReminderType::SpecificDate, Some(date(2026, 3, 10))),
        Err(ManagerError::ReminderDateInPast { .. })
    ));

    let reminder = manager
        .create_reminder(&task.id, ReminderType::SpecificDate, Some(date(2026, 3, 24)))
        .unwrap();
    assert_eq!(reminder.reminder_date, date(2026, 3, 24));
    assert_eq!(manager.reminders().len(), 1);
}

#[test]
fn completed_task_cannot_get_reminders() {
    let mut manager = fresh_manager();
    let task = manager
        .create_task("t", "", None, None, Some(date(2026, 4, 1)))
        .unwrap();
    let update = TaskUpdate {
        status: TaskStatus::Completed,
        ..TaskUpdate::from_task(&task)
    };
    manager.update_task(&task.id, update).unwrap();

    let err = manager
        .create_reminder(&task.id, ReminderType::OneDayBefore, None)
        .unwrap_err();
    assert!(matches!(err, ManagerError::CompletedTaskReminder(_)));
    assert!(err.is_validation());
}

#[test]
fn unknown_task_or_reminder_is_not_found() {
    let mut manager = fresh_manager();
    assert!(matches!(
        manager.create_reminder("ghost", ReminderType::SpecificDate, Some(today())),
        Err(ManagerError::TaskNotFound(_))
    ));
    assert!(matches!(
        manager.delete_reminder("ghost"),
        Err(ManagerError::ReminderNotFound(_))
    ));
    assert!(matches!(
        manager.update_reminder("ghost", "ghost", ReminderType::OneDayBefore, None),
        Err(ManagerError::ReminderNotFound(_))
    ));
}

#[test]
fn update_reminder_keeps_id_and_revalidates() {
    let mut manager = fresh_manager();
    let first = manager
        .create_task("first", "", None, None, Some(date(2026, 4, 10)))
        .unwrap();
    let second = manager
        .create_task("second", "", None, None, Some(date(2026, 5, 10)))
        .unwrap();
    let reminder = manager
        .create_reminder(&first.id, ReminderType::OneDayBefore, None)
        .unwrap();

    let moved = manager
        .update_reminder(&reminder.id, &second.id, ReminderType::OneWeekBefore, None)
        .unwrap();
    assert_eq!(moved.id, reminder.id);
    assert_eq!(moved.task_id, second.id);
    assert_eq!(moved.kind, ReminderType::OneWeekBefore);
    assert_eq!(moved.reminder_date, date(2026, 5, 3));
    assert_eq!(manager.find_reminder(&reminder.id), Some(&moved));

    let err = manager
        .update_reminder(&reminder.id, &first.id, ReminderType::SpecificDate, None)
        .unwrap_err();
    assert!(matches!(err, ManagerError::MissingSpecificDate));
    assert_eq!(manager.find_reminder(&reminder.id), Some(&moved));
}

#[test]
fn delete_reminder_removes_only_that_reminder() {
    let mut manager = fresh_manager();
    let task = manager
        .create_task("t", "", None, None, Some(date(2026, 4, 10)))
        .unwrap();
    let day = manager
        .create_reminder(&task.id, ReminderType::OneDayBefore, None)
        .unwrap();
    let week = manager
        .create_reminder(&task.id, ReminderType::OneWeekBefore, None)
        .unwrap();

    let removed = manager.delete_reminder(&day.id).unwrap();
    assert_eq!(removed, day);
    assert_eq!(manager.reminders_for_task(&task.id), vec![&week]);
}
