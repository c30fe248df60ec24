//! AI study companion chat history

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the reply recorded when the companion call fails
pub const APOLOGY_PREFIX: &str = "Sorry, I encountered an error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            timestamp,
        }
    }

    pub fn model(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            timestamp,
        }
    }

    /// Model-side message explaining a failed reply
    pub fn apology(error: &str, timestamp: DateTime<Utc>) -> Self {
        Self::model(format!("{}{}", APOLOGY_PREFIX, error), timestamp)
    }
}

/// The part of the app the user is looking at, sent to the companion as context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StudyView {
    #[default]
    Dashboard,
    Roadmap,
    Pomodoro,
    Reminders,
    Notes,
    Analytics,
    Calendar,
    Flashcards,
    Tags,
    Mindmap,
}

impl StudyView {
    pub fn as_str(self) -> &'static str {
        match self {
            StudyView::Dashboard => "dashboard",
            StudyView::Roadmap => "roadmap",
            StudyView::Pomodoro => "pomodoro",
            StudyView::Reminders => "reminders",
            StudyView::Notes => "notes",
            StudyView::Analytics => "analytics",
            StudyView::Calendar => "calendar",
            StudyView::Flashcards => "flashcards",
            StudyView::Tags => "tags",
            StudyView::Mindmap => "mindmap",
        }
    }
}

impl fmt::Display for StudyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let view = match s.trim().to_lowercase().as_str() {
            "dashboard" => StudyView::Dashboard,
            "roadmap" => StudyView::Roadmap,
            "pomodoro" => StudyView::Pomodoro,
            "reminders" => StudyView::Reminders,
            "notes" => StudyView::Notes,
            "analytics" => StudyView::Analytics,
            "calendar" => StudyView::Calendar,
            "flashcards" => StudyView::Flashcards,
            "tags" => StudyView::Tags,
            "mindmap" => StudyView::Mindmap,
            other => return Err(format!("Unknown view '{}'", other)),
        };
        Ok(view)
    }
}
