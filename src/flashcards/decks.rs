//! Deck collection operations

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use super::algorithm::{review_card, ReviewResult};
use super::models::{Deck, Flashcard, Rating};
use crate::notes::Note;
use crate::storage::{Result, StorageError};

/// Highlights this short are rejected
const MIN_HIGHLIGHT_CHARS: usize = 5;

/// Save a flashcard created from highlighted note text.
///
/// The card goes into the deck linked to `note`; the deck is created (named
/// after the note) when the note has none yet. Returns `(deck_id, card_id)`.
pub fn add_card_from_highlight(
    decks: &mut Vec<Deck>,
    note: Option<&Note>,
    front: &str,
    back: &str,
    now: DateTime<Utc>,
) -> Result<(Uuid, Uuid)> {
    let front = front.trim();
    let back = back.trim();

    if front.chars().count() <= MIN_HIGHLIGHT_CHARS {
        return Err(StorageError::InvalidOperation(format!(
            "Highlighted text must be longer than {} characters",
            MIN_HIGHLIGHT_CHARS
        )));
    }
    if back.is_empty() {
        return Err(StorageError::InvalidOperation(
            "Flashcard answer cannot be empty".to_string(),
        ));
    }

    let note_id = note.map(|n| n.id);
    let card = Flashcard::new(front.to_string(), back.to_string(), now);
    let card_id = card.id;

    if let Some(deck) = decks.iter_mut().find(|d| d.note_id == note_id) {
        deck.flashcards.push(card);
        return Ok((deck.id, card_id));
    }

    let name = note
        .map(|n| n.title.trim())
        .filter(|title| !title.is_empty())
        .unwrap_or("New Deck")
        .to_string();
    let mut deck = Deck::new(name, note_id);
    deck.flashcards.push(card);
    let deck_id = deck.id;
    decks.push(deck);

    log::info!("Created deck {} for note {:?}", deck_id, note_id);
    Ok((deck_id, card_id))
}

/// Apply a rating to the stored card and return the new schedule
pub fn rate_card<Tz: TimeZone>(
    decks: &mut [Deck],
    deck_id: Uuid,
    card_id: Uuid,
    rating: Rating,
    now: &DateTime<Tz>,
) -> Result<ReviewResult> {
    let deck = find_deck_mut(decks, deck_id)?;
    let card = deck
        .card_mut(card_id)
        .ok_or_else(|| StorageError::NotFound(format!("Flashcard {} not found", card_id)))?;

    let result = review_card(card, rating, now);
    result.apply_to(card);
    Ok(result)
}

pub fn delete_card(decks: &mut [Deck], deck_id: Uuid, card_id: Uuid) -> Result<()> {
    let deck = find_deck_mut(decks, deck_id)?;
    let before = deck.flashcards.len();
    deck.flashcards.retain(|c| c.id != card_id);
    if deck.flashcards.len() == before {
        return Err(StorageError::NotFound(format!("Flashcard {} not found", card_id)));
    }
    Ok(())
}

pub fn delete_deck(decks: &mut Vec<Deck>, deck_id: Uuid) -> Result<()> {
    let before = decks.len();
    decks.retain(|d| d.id != deck_id);
    if decks.len() == before {
        return Err(StorageError::NotFound(format!("Deck {} not found", deck_id)));
    }
    Ok(())
}

pub fn rename_deck(decks: &mut [Deck], deck_id: Uuid, name: String) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StorageError::InvalidOperation("Deck name cannot be empty".to_string()));
    }
    find_deck_mut(decks, deck_id)?.name = name.to_string();
    Ok(())
}

pub fn find_deck(decks: &[Deck], deck_id: Uuid) -> Result<&Deck> {
    decks
        .iter()
        .find(|d| d.id == deck_id)
        .ok_or_else(|| StorageError::NotFound(format!("Deck {} not found", deck_id)))
}

fn find_deck_mut(decks: &mut [Deck], deck_id: Uuid) -> Result<&mut Deck> {
    decks
        .iter_mut()
        .find(|d| d.id == deck_id)
        .ok_or_else(|| StorageError::NotFound(format!("Deck {} not found", deck_id)))
}
