//! Command handlers for the launcher.

use crate::Command;
use chrono::NaiveDate;
use color_eyre::Result;
use medialab_core::{
    Clock, ReminderType, Task, TaskDataRepository, TaskManager, TaskStatus, TaskUpdate,
};

/// Runs one command. Returns `true` when data changed and must be saved.
pub fn run<R: TaskDataRepository, C: Clock>(
    manager: &mut TaskManager<R, C>,
    command: Command,
) -> Result<bool> {
    match command {
        Command::Summary => {
            let summary = manager.task_summary();
            println!("Total tasks: {}", summary.total);
            println!("Completed tasks: {}", summary.completed);
            println!("Delayed tasks: {}", summary.delayed);
            println!("Due <= 7 days: {}", summary.due_within_week);
            if summary.delayed > 0 {
                println!("There are {} delayed tasks!", summary.delayed);
            }
            Ok(false)
        }
        Command::Categories => {
            for category in manager.categories() {
                println!("{}  {}", category.id, category.name);
            }
            Ok(false)
        }
        Command::Priorities => {
            let default_id = manager.default_priority_id().to_string();
            for priority in manager.priorities() {
                let marker = if priority.id == default_id { " *" } else { "" };
                println!("{}  {}{}", priority.id, priority.name, marker);
            }
            Ok(false)
        }
        Command::AddCategory { name } => {
            let category = manager.create_category(name)?;
            println!("Category created (ID: {})", category.id);
            Ok(true)
        }
        Command::AddPriority { name } => {
            let priority = manager.create_priority(name)?;
            println!("Priority created (ID: {})", priority.id);
            Ok(true)
        }
        Command::AddTask {
            title,
            description,
            category,
            priority,
            deadline,
        } => {
            let task = manager.create_task(
                title,
                description,
                category.as_deref(),
                priority.as_deref(),
                deadline,
            )?;
            println!("Task created (ID: {})", task.id);
            Ok(true)
        }
        Command::Tasks {
            title,
            category,
            priority,
        } => {
            let found = manager.search_tasks(
                title.as_deref(),
                category.as_deref(),
                priority.as_deref(),
            );
            for task in found {
                println!("{}", describe_task(manager, task));
            }
            Ok(false)
        }
        Command::CompleteTask { id } => {
            let task = manager
                .find_task(&id)
                .ok_or_else(|| medialab_core::ManagerError::TaskNotFound(id.clone()))?;
            let update = TaskUpdate {
                status: TaskStatus::Completed,
                ..TaskUpdate::from_task(task)
            };
            manager.update_task(&id, update)?;
            println!("Task {id} completed");
            Ok(true)
        }
        Command::DeleteTask { id } => {
            manager.delete_task(&id)?;
            println!("Task {id} deleted");
            Ok(true)
        }
        Command::AddReminder {
            task_id,
            kind,
            date,
        } => {
            let reminder = manager.create_reminder(&task_id, kind, date)?;
            println!(
                "Reminder created (ID: {}) for {}",
                reminder.id, reminder.reminder_date
            );
            Ok(true)
        }
        Command::Reminders => {
            for reminder in manager.reminders() {
                let title = manager
                    .find_task(&reminder.task_id)
                    .map(|task| task.title.as_str())
                    .unwrap_or("?");
                println!(
                    "{}  {}  {:<16}  {}",
                    reminder.id, reminder.reminder_date, reminder.kind, title
                );
            }
            Ok(false)
        }
    }
}

fn describe_task<R: TaskDataRepository, C: Clock>(
    manager: &TaskManager<R, C>,
    task: &Task,
) -> String {
    let deadline = task
        .deadline
        .map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string());
    let category = task
        .category_id
        .as_deref()
        .and_then(|id| manager.find_category(id))
        .map(|category| category.name.as_str())
        .unwrap_or("-");
    let priority = manager
        .find_priority(&task.priority_id)
        .map(|priority| priority.name.as_str())
        .unwrap_or("-");
    format!(
        "{}  {:<11}  {:<10}  {}  [{}] ({})",
        task.id, task.status, deadline, task.title, category, priority
    )
}

/// Parses a `YYYY-MM-DD` argument.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}` (expected YYYY-MM-DD): {err}"))
}

pub fn parse_reminder_type(value: &str) -> Result<ReminderType, String> {
    ReminderType::parse(value).ok_or_else(|| {
        format!(
            "unknown reminder type `{value}`; expected one of {}",
            ReminderType::ALL.map(ReminderType::as_str).join(", ")
        )
    })
}
