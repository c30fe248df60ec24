//! Note data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Versions kept per note, newest first
pub const MAX_NOTE_VERSIONS: usize = 20;

/// A study note. `content` may contain HTML from the rich-text editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub versions: Vec<NoteVersion>,
}

/// A previous title/content pair of a note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteVersion {
    pub title: String,
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String, tags: Vec<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            tags,
            last_modified: now,
            versions: Vec::new(),
        }
    }

    /// Replace title, content and tags, keeping the previous text as a version.
    /// Saving identical text does not create a version.
    pub fn update(&mut self, title: String, content: String, tags: Vec<String>, now: DateTime<Utc>) {
        if title != self.title || content != self.content {
            self.push_version(now);
        }
        self.title = title;
        self.content = content;
        self.tags = tags;
        self.last_modified = now;
    }

    /// Bring back a version by index (0 = most recent). The current text is
    /// versioned first so a restore can itself be undone.
    pub fn restore(&mut self, index: usize, now: DateTime<Utc>) -> Option<()> {
        let version = self.versions.get(index)?.clone();
        self.push_version(now);
        self.title = version.title;
        self.content = version.content;
        self.last_modified = now;
        Some(())
    }

    fn push_version(&mut self, now: DateTime<Utc>) {
        self.versions.insert(
            0,
            NoteVersion {
                title: self.title.clone(),
                content: self.content.clone(),
                saved_at: now,
            },
        );
        self.versions.truncate(MAX_NOTE_VERSIONS);
    }
}

/// Create-or-update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    /// `None` creates a new note
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Unsaved note produced from imported text, shown to the user for review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl From<NoteDraft> for NoteInput {
    fn from(draft: NoteDraft) -> Self {
        Self {
            id: None,
            title: draft.title,
            content: draft.content,
            tags: draft.tags,
        }
    }
}

/// Note listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: Uuid,
    pub title: String,
    pub tags: Vec<String>,
    pub last_modified: DateTime<Utc>,
    pub version_count: usize,
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            tags: note.tags.clone(),
            last_modified: note.last_modified,
            version_count: note.versions.len(),
        }
    }
}
