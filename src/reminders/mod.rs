//! Reminders and the calendar

pub mod calendar;
pub mod models;

use uuid::Uuid;

pub use calendar::{month_view, todays_focus_sessions, upcoming, CalendarDay, CalendarMonth};
pub use models::*;

use crate::notes::normalize_tags;
use crate::storage::{Result, StorageError};

/// Add a reminder keeping the list ordered by date.
/// Reminders on the same instant keep insertion order.
pub fn add_reminder(reminders: &mut Vec<Reminder>, mut input: ReminderInput) -> Result<Uuid> {
    input.title = input.title.trim().to_string();
    if input.title.is_empty() {
        return Err(StorageError::InvalidOperation("Reminder title cannot be empty".to_string()));
    }
    if let ReminderKind::Pomodoro { duration_minutes: 0 } = input.kind {
        return Err(StorageError::InvalidOperation(
            "Focus session duration must be at least one minute".to_string(),
        ));
    }
    input.tags = normalize_tags(input.tags);

    let reminder = Reminder::from_input(input);
    let id = reminder.id;
    let at = reminders.partition_point(|r| r.date <= reminder.date);
    reminders.insert(at, reminder);
    Ok(id)
}

pub fn toggle_reminder(reminders: &mut [Reminder], id: Uuid) -> Result<bool> {
    let reminder = reminders
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| StorageError::NotFound(format!("Reminder {} not found", id)))?;
    reminder.completed = !reminder.completed;
    Ok(reminder.completed)
}

pub fn delete_reminder(reminders: &mut Vec<Reminder>, id: Uuid) -> Result<()> {
    let before = reminders.len();
    reminders.retain(|r| r.id != id);
    if reminders.len() == before {
        return Err(StorageError::NotFound(format!("Reminder {} not found", id)));
    }
    Ok(())
}
