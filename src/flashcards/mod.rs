//! Flashcard decks and spaced repetition
//!
//! This module provides:
//! - Decks linked to the note their cards were highlighted from
//! - Simplified SM-2 scheduling (again / good / easy)
//! - Review queue selection and snapshot review sessions

pub mod algorithm;
pub mod decks;
pub mod models;
pub mod queue;

pub use algorithm::{calculate_next_review, preview_intervals, review_card, ReviewResult};
pub use models::*;
pub use queue::{review_queue, ReviewSession, SessionProgress, SessionStatus};
