//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ease factor given to freshly created cards
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Interval given to freshly created cards (days)
pub const INITIAL_INTERVAL: u32 = 1;

/// A deck groups the flashcards created from one note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    /// Note the cards were highlighted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl Deck {
    pub fn new(name: String, note_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            note_id,
            flashcards: Vec::new(),
        }
    }

    /// Number of cards due at `now`
    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.flashcards.iter().filter(|c| c.is_due(now)).count()
    }

    pub fn card(&self, card_id: Uuid) -> Option<&Flashcard> {
        self.flashcards.iter().find(|c| c.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: Uuid) -> Option<&mut Flashcard> {
        self.flashcards.iter_mut().find(|c| c.id == card_id)
    }
}

/// A flashcard with question (front), answer (back) and its review schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    /// When the card is next due
    pub next_review: DateTime<Utc>,
    /// Current interval in days
    pub interval: u32,
    pub ease_factor: f64,
}

impl Flashcard {
    /// New cards are due immediately
    pub fn new(front: String, back: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
            next_review: now,
            interval: INITIAL_INTERVAL,
            ease_factor: DEFAULT_EASE_FACTOR,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// Rating given by the user after revealing the back of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Again,
    Good,
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Again, Rating::Good, Rating::Easy];

    /// SM-2 quality (0-5) used for the ease adjustment.
    /// `Again` leaves the ease factor alone and has no quality.
    pub fn quality(self) -> Option<u8> {
        match self {
            Rating::Again => None,
            Rating::Good => Some(4),
            Rating::Easy => Some(5),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Again => "again",
            Rating::Good => "good",
            Rating::Easy => "easy",
        };
        f.write_str(label)
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" | "a" | "1" => Ok(Rating::Again),
            "good" | "g" | "2" => Ok(Rating::Good),
            "easy" | "e" | "3" => Ok(Rating::Easy),
            other => Err(format!("Unknown rating '{}' (expected again, good or easy)", other)),
        }
    }
}

/// Deck listing entry with its due count
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    pub card_count: usize,
    pub due_count: usize,
}

impl DeckSummary {
    pub fn from_deck(deck: &Deck, now: DateTime<Utc>) -> Self {
        Self {
            id: deck.id,
            name: deck.name.clone(),
            note_id: deck.note_id,
            card_count: deck.flashcards.len(),
            due_count: deck.due_count(now),
        }
    }
}
