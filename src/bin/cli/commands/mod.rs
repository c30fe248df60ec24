pub mod decks;
pub mod focus;
pub mod notes;
pub mod plan;
pub mod reminders;
pub mod review;
pub mod stats;
pub mod tags;
