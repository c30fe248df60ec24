//! Reminder data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated reminder, optionally a scheduled focus session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub kind: ReminderKind,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// What the reminder schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReminderKind {
    Reminder,
    /// A focus session of the given length
    Pomodoro {
        #[serde(rename = "durationMinutes")]
        duration_minutes: u32,
    },
}

impl ReminderKind {
    pub fn is_focus_session(&self) -> bool {
        matches!(self, ReminderKind::Pomodoro { .. })
    }
}

/// Payload for creating a reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderInput {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ReminderKind,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Reminder {
    pub fn from_input(input: ReminderInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            date: input.date,
            completed: false,
            kind: input.kind,
            tags: input.tags,
        }
    }
}
