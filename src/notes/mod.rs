//! Study notes with version history

pub mod models;
pub mod text;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use models::*;
pub use text::{normalize_tags, parse_tags, strip_html, text_to_html};

use crate::ai::ImportedContent;
use crate::storage::{Result, StorageError};

/// Create or update a note. New notes go to the front of the list.
pub fn upsert_note(notes: &mut Vec<Note>, input: NoteInput, now: DateTime<Utc>) -> Result<Uuid> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(StorageError::InvalidOperation("Note title cannot be empty".to_string()));
    }
    let tags = normalize_tags(input.tags);

    match input.id {
        Some(id) => {
            let note = find_note_mut(notes, id)?;
            note.update(title, input.content, tags, now);
            Ok(id)
        }
        None => {
            let note = Note::new(title, input.content, tags, now);
            let id = note.id;
            notes.insert(0, note);
            Ok(id)
        }
    }
}

pub fn restore_version(notes: &mut [Note], note_id: Uuid, index: usize, now: DateTime<Utc>) -> Result<()> {
    find_note_mut(notes, note_id)?
        .restore(index, now)
        .ok_or_else(|| StorageError::NotFound(format!("Version {} of note {} not found", index, note_id)))
}

pub fn delete_note(notes: &mut Vec<Note>, note_id: Uuid) -> Result<()> {
    let before = notes.len();
    notes.retain(|n| n.id != note_id);
    if notes.len() == before {
        return Err(StorageError::NotFound(format!("Note {} not found", note_id)));
    }
    Ok(())
}

pub fn find_note(notes: &[Note], note_id: Uuid) -> Result<&Note> {
    notes
        .iter()
        .find(|n| n.id == note_id)
        .ok_or_else(|| StorageError::NotFound(format!("Note {} not found", note_id)))
}

fn find_note_mut(notes: &mut [Note], note_id: Uuid) -> Result<&mut Note> {
    notes
        .iter_mut()
        .find(|n| n.id == note_id)
        .ok_or_else(|| StorageError::NotFound(format!("Note {} not found", note_id)))
}

/// Turn AI-processed imported text into a draft note
pub fn draft_from_import(imported: ImportedContent) -> NoteDraft {
    NoteDraft {
        title: imported.title.trim().to_string(),
        content: text_to_html(&imported.summary),
        tags: normalize_tags(imported.tags),
    }
}
