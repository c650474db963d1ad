use chrono::NaiveDate;
use medialab_core::{
    CascadeReport, DataSnapshot, FixedClock, InMemoryRepository, ManagerError, Priority,
    PriorityChange, ReminderType, Task, TaskManager, DEFAULT_PRIORITY_NAME,
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
fn open_on_empty_store_creates_default_priority() {
    let manager = fresh_manager();

    assert_eq!(manager.priorities().len(), 1);
    assert_eq!(manager.default_priority().name, DEFAULT_PRIORITY_NAME);
    assert_eq!(manager.default_priority().id, manager.default_priority_id());
}

#[test]
fn open_recognizes_existing_default_ignoring_case() {
    let snapshot = DataSnapshot {
        priorities: vec![
            Priority::with_id("p-high", "High"),
            Priority::with_id("p-def", "default"),
        ],
        ..DataSnapshot::default()
    };
    let manager =
        TaskManager::open(InMemoryRepository::with_snapshot(snapshot), FixedClock(today()))
            .unwrap();

    assert_eq!(manager.priorities().len(), 2);
    assert_eq!(manager.default_priority_id(), "p-def");
}

#[test]
fn duplicate_default_priorities_are_merged_on_open() {
    let first = Priority::with_id("p-1", "Default");
    let second = Priority::with_id("p-2", "DEFAULT");
    let task = Task::new("Orphan", "", None, "p-2", None);
    let task_id = task.id.clone();
    let snapshot = DataSnapshot {
        priorities: vec![first, second],
        tasks: vec![task],
        ..DataSnapshot::default()
    };

    let manager =
        TaskManager::open(InMemoryRepository::with_snapshot(snapshot), FixedClock(today()))
            .unwrap();

    assert_eq!(manager.priorities().len(), 1);
    assert_eq!(manager.default_priority_id(), "p-1");
    assert_eq!(manager.find_task(&task_id).unwrap().priority_id, "p-1");
}

#[test]
fn ensure_default_priority_is_stable_across_calls() {
    let mut manager = fresh_manager();
    let id = manager.default_priority_id().to_string();

    assert_eq!(manager.ensure_default_priority().id, id);
    assert_eq!(manager.ensure_default_priority().id, id);
    assert_eq!(manager.priorities().len(), 1);
}

#[test]
fn category_create_and_rename() {
    let mut manager = fresh_manager();
    let category = manager.create_category("Work").unwrap();
    let duplicate = manager.create_category("Work").unwrap();
    assert_ne!(category.id, duplicate.id);

    manager.rename_category(&category.id, "Office").unwrap();
    assert_eq!(manager.find_category(&category.id).unwrap().name, "Office");
}

#[test]
fn category_blank_name_is_rejected() {
    let mut manager = fresh_manager();
    let err = manager.create_category("   ").unwrap_err();
    assert!(matches!(err, ManagerError::BlankName));
    assert!(err.is_validation());
    assert!(manager.categories().is_empty());
}

#[test]
fn category_unknown_id_is_not_found() {
    let mut manager = fresh_manager();
    assert!(matches!(
        manager.rename_category("missing", "x"),
        Err(ManagerError::CategoryNotFound(id)) if id == "missing"
    ));
    let err = manager.delete_category("missing").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn deleting_category_cascades_to_tasks_and_reminders() {
    let mut manager = fresh_manager();
    let work = manager.create_category("Work").unwrap();
    let home = manager.create_category("Home").unwrap();

    let report = manager
        .create_task("Report", "", Some(&work.id), None, Some(date(2026, 4, 1)))
        .unwrap();
    let slides = manager
        .create_task("Slides", "", Some(&work.id), None, Some(date(2026, 4, 2)))
        .unwrap();
    let dishes = manager
        .create_task("Dishes", "", Some(&home.id), None, Some(date(2026, 4, 3)))
        .unwrap();
    let loose = manager.create_task("Loose", "", None, None, None).unwrap();

    manager
        .create_reminder(&report.id, ReminderType::OneDayBefore, None)
        .unwrap();
    manager
        .create_reminder(&slides.id, ReminderType::OneWeekBefore, None)
        .unwrap();
    let kept_reminder = manager
        .create_reminder(&dishes.id, ReminderType::OneDayBefore, None)
        .unwrap();

    let cascade = manager.delete_category(&work.id).unwrap();

    assert_eq!(
        cascade,
        CascadeReport {
            tasks_removed: 2,
            reminders_removed: 2,
        }
    );
    assert!(manager.find_category(&work.id).is_none());
    assert!(manager.find_task(&report.id).is_none());
    assert!(manager.find_task(&slides.id).is_none());
    assert!(manager.find_task(&dishes.id).is_some());
    assert!(manager.find_task(&loose.id).is_some());
    assert_eq!(manager.reminders().len(), 1);
    assert_eq!(manager.reminders()[0], kept_reminder);
    assert!(manager
        .tasks()
        .iter()
        .all(|task| task.category_id.as_deref() != Some(work.id.as_str())));
}

#[test]
fn deleting_priority_reassigns_tasks_to_default() {
    let mut manager = fresh_manager();
    let high = manager.create_priority("High").unwrap();
    let task = manager
        .create_task("Urgent", "", None, Some(&high.id), None)
        .unwrap();
    assert_eq!(task.priority_id, high.id);

    let outcome = manager.delete_priority(&high.id).unwrap();

    assert_eq!(outcome, PriorityChange::Applied);
    assert!(manager.find_priority(&high.id).is_none());
    assert_eq!(
        manager.find_task(&task.id).unwrap().priority_id,
        manager.default_priority_id()
    );
}

#[test]
fn default_priority_cannot_be_renamed_or_deleted() {
    let mut manager = fresh_manager();
    let default_id = manager.default_priority_id().to_string();

    assert_eq!(
        manager.rename_priority(&default_id, "Normal").unwrap(),
        PriorityChange::DefaultProtected
    );
    assert_eq!(
        manager.delete_priority(&default_id).unwrap(),
        PriorityChange::DefaultProtected
    );
    assert_eq!(manager.default_priority().name, DEFAULT_PRIORITY_NAME);
    assert_eq!(manager.priorities().len(), 1);
}

#[test]
fn default_name_is_reserved_for_other_priorities() {
    let mut manager = fresh_manager();
    assert!(matches!(
        manager.create_priority("default"),
        Err(ManagerError::ReservedPriorityName(_))
    ));

    let low = manager.create_priority("Low").unwrap();
    assert!(matches!(
        manager.rename_priority(&low.id, "DEFAULT"),
        Err(ManagerError::ReservedPriorityName(_))
    ));
    assert_eq!(manager.find_priority(&low.id).unwrap().name, "Low");

    assert_eq!(
        manager.rename_priority(&low.id, "Minor").unwrap(),
        PriorityChange::Applied
    );
    assert_eq!(manager.find_priority(&low.id).unwrap().name, "Minor");
}

#[test]
fn priority_unknown_id_is_not_found() {
    let mut manager = fresh_manager();
    assert!(matches!(
        manager.rename_priority("nope", "x"),
        Err(ManagerError::PriorityNotFound(_))
    ));
    assert!(matches!(
        manager.delete_priority("nope"),
        Err(ManagerError::PriorityNotFound(_))
    ));
    assert!(matches!(
        manager.create_priority(""),
        Err(ManagerError::BlankName)
    ));
}

#[test]
fn default_priority_stays_resolvable_through_priority_churn() {
    let mut manager = fresh_manager();
    let default_id = manager.default_priority_id().to_string();
    let high = manager.create_priority("High").unwrap();
    let low = manager.create_priority("Low").unwrap();

    manager.rename_priority(&high.id, "Urgent").unwrap();
    manager.delete_priority(&low.id).unwrap();
    manager.delete_priority(&default_id).unwrap();

    assert_eq!(manager.default_priority().id, default_id);
    assert_eq!(
        manager.find_priority(&default_id),
        Some(manager.default_priority())
    );
}

#[test]
fn duplicate_defaults_sharing_an_id_collapse_to_one() {
    let snapshot = DataSnapshot {
        priorities: vec![
            Priority::with_id("p-1", "Default"),
            Priority::with_id("p-1", "Default"),
        ],
        ..DataSnapshot::default()
    };
    let manager =
        TaskManager::open(InMemoryRepository::with_snapshot(snapshot), FixedClock(today()))
            .unwrap();

    assert_eq!(manager.priorities().len(), 1);
    assert_eq!(manager.default_priority_id(), "p-1");
}
