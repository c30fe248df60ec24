//! Review queue selection and review sessions

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::ReviewResult;
use super::models::{Deck, Flashcard, Rating};
use crate::storage::{Result, StorageError};

/// Due cards of a deck, earliest due first.
///
/// The sort is stable, so cards due at the same instant keep deck order.
pub fn review_queue(deck: &Deck, now: DateTime<Utc>) -> Vec<Flashcard> {
    let mut due: Vec<Flashcard> = deck
        .flashcards
        .iter()
        .filter(|card| card.is_due(now))
        .cloned()
        .collect();
    due.sort_by_key(|card| card.next_review);
    due
}

/// A review session over a snapshot of the due queue taken at start.
///
/// Ratings are written to the stored cards; the snapshot itself is never
/// re-sorted, the session just walks it by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub deck_name: String,
    queue: Vec<Flashcard>,
    index: usize,
    finished: bool,
    pub started_at: DateTime<Utc>,
}

/// Where a session stands after a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionProgress {
    /// Moved to the card at this 1-based position
    Next { position: usize },
    Finished,
}

impl ReviewSession {
    /// Start a session, or `None` when nothing in the deck is due
    pub fn start(deck: &Deck, now: DateTime<Utc>) -> Option<Self> {
        let queue = review_queue(deck, now);
        if queue.is_empty() {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4(),
            deck_id: deck.id,
            deck_name: deck.name.clone(),
            queue,
            index: 0,
            finished: false,
            started_at: now,
        })
    }

    /// Card currently shown, `None` once the session has ended
    pub fn current(&self) -> Option<&Flashcard> {
        if self.finished {
            None
        } else {
            self.queue.get(self.index)
        }
    }

    /// 1-based position of the current card
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Move past the current card; rating the last card ends the session
    pub fn advance(&mut self) -> SessionProgress {
        if self.finished {
            return SessionProgress::Finished;
        }

        if self.index + 1 < self.queue.len() {
            self.index += 1;
            SessionProgress::Next {
                position: self.position(),
            }
        } else {
            self.finished = true;
            SessionProgress::Finished
        }
    }

    /// Rate the current card and move on. `apply_rating` writes the rating
    /// to the stored card, identified by (deck id, card id).
    pub fn rate<F>(&mut self, rating: Rating, apply_rating: F) -> Result<(ReviewResult, SessionProgress)>
    where
        F: FnOnce(Uuid, Uuid, Rating) -> Result<ReviewResult>,
    {
        let card_id = self
            .current()
            .map(|card| card.id)
            .ok_or_else(|| StorageError::InvalidOperation("Review session has ended".to_string()))?;
        let result = apply_rating(self.deck_id, card_id, rating)?;
        Ok((result, self.advance()))
    }

    /// Drop a deleted card from the snapshot. The session keeps pointing at
    /// the same card when possible; removing the last remaining card ends it.
    /// Returns `false` when the card was not in the snapshot.
    pub fn remove_card(&mut self, card_id: Uuid) -> bool {
        let Some(pos) = self.queue.iter().position(|card| card.id == card_id) else {
            return false;
        };
        self.queue.remove(pos);

        if pos < self.index {
            self.index -= 1;
        }
        if self.index >= self.queue.len() {
            self.index = self.queue.len().saturating_sub(1);
            self.finished = true;
        }
        true
    }

    /// Whether the session was started more than `max_age` before `now`
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.started_at > max_age
    }

    /// End the session early
    pub fn end(&mut self) {
        self.finished = true;
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            id: self.id,
            deck_id: self.deck_id,
            deck_name: self.deck_name.clone(),
            position: self.position().min(self.len()),
            total: self.len(),
            current: self.current().cloned(),
            finished: self.finished,
        }
    }
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub deck_name: String,
    pub position: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Flashcard>,
    pub finished: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap()
    }

    fn card_due(front: &str, due: DateTime<Utc>) -> Flashcard {
        Flashcard::new(front.to_string(), "answer".to_string(), due)
    }

    fn deck() -> Deck {
        let mut deck = Deck::new("Biology".to_string(), None);
        deck.flashcards = vec![
            card_due("today", now()),
            card_due("tomorrow", now() + Duration::days(1)),
            card_due("yesterday", now() - Duration::days(1)),
        ];
        deck
    }

    #[test]
    fn test_queue_contains_due_cards_earliest_first() {
        let queue = review_queue(&deck(), now());
        let fronts: Vec<&str> = queue.iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts, vec!["yesterday", "today"]);
    }

    #[test]
    fn test_due_boundary_is_inclusive() {
        let mut deck = Deck::new("Edge".to_string(), None);
        deck.flashcards.push(card_due("exact", now()));
        assert_eq!(review_queue(&deck, now()).len(), 1);
        assert_eq!(review_queue(&deck, now() - Duration::seconds(1)).len(), 0);
    }

    #[test]
    fn test_no_session_without_due_cards() {
        let mut deck = Deck::new("Empty".to_string(), None);
        deck.flashcards.push(card_due("later", now() + Duration::days(2)));
        assert!(ReviewSession::start(&deck, now()).is_none());
    }

    #[test]
    fn test_session_walks_snapshot_then_finishes() {
        let mut session = ReviewSession::start(&deck(), now()).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.position(), 1);
        assert_eq!(session.current().unwrap().front, "yesterday");

        assert_eq!(session.advance(), SessionProgress::Next { position: 2 });
        assert_eq!(session.current().unwrap().front, "today");

        assert_eq!(session.advance(), SessionProgress::Finished);
        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.advance(), SessionProgress::Finished);
    }

    #[test]
    fn test_end_session_early() {
        let mut session = ReviewSession::start(&deck(), now()).unwrap();
        session.end();
        assert!(session.current().is_none());
        assert!(session.status().finished);
    }

    #[test]
    fn test_rate_writes_to_stored_card_and_advances() {
        let mut decks = vec![deck()];
        let mut session = ReviewSession::start(&decks[0], now()).unwrap();
        let first = session.current().unwrap().id;

        let (result, progress) = session
            .rate(Rating::Good, |deck_id, card_id, rating| {
                crate::flashcards::decks::rate_card(&mut decks, deck_id, card_id, rating, &now())
            })
            .unwrap();
        assert_eq!(result.interval, 3);
        assert_eq!(progress, SessionProgress::Next { position: 2 });
        assert_eq!(decks[0].card(first).unwrap().interval, 3);

        session.end();
        let ended = session.rate(Rating::Easy, |_, _, _| panic!("must not rate after the end"));
        assert!(matches!(ended, Err(StorageError::InvalidOperation(_))));
    }

    #[test]
    fn test_removing_current_card_moves_to_next() {
        let mut session = ReviewSession::start(&deck(), now()).unwrap();
        let first = session.current().unwrap().id;

        assert!(session.remove_card(first));
        assert_eq!(session.len(), 1);
        assert_eq!(session.position(), 1);
        assert_eq!(session.current().unwrap().front, "today");
        assert!(!session.remove_card(first));
    }

    #[test]
    fn test_removing_earlier_card_keeps_current() {
        let mut session = ReviewSession::start(&deck(), now()).unwrap();
        let first = session.current().unwrap().id;
        session.advance();

        assert!(session.remove_card(first));
        assert_eq!(session.position(), 1);
        assert_eq!(session.current().unwrap().front, "today");
        assert!(!session.is_finished());
    }

    #[test]
    fn test_removing_last_remaining_card_ends_session() {
        let mut session = ReviewSession::start(&deck(), now()).unwrap();
        session.advance();
        let last = session.current().unwrap().id;

        assert!(session.remove_card(last));
        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.status().position, 1);
    }

    #[test]
    fn test_stale_after_max_age() {
        let session = ReviewSession::start(&deck(), now()).unwrap();
        assert!(!session.is_stale(now() + Duration::hours(1), Duration::hours(12)));
        assert!(session.is_stale(now() + Duration::hours(13), Duration::hours(12)));
    }
}
