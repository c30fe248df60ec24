use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use studyhub_lib::flashcards::{calculate_next_review, Rating, ReviewSession, MIN_EASE_FACTOR};
use studyhub_lib::notes::NoteInput;
use studyhub_lib::storage::FileStorage;
use studyhub_lib::store::{Action, ActionOutput, StudyStore};
use studyhub_lib::tags::TagIndex;

fn open(temp_dir: &TempDir) -> StudyStore {
    StudyStore::open(FileStorage::new(temp_dir.path().join("data"))).unwrap()
}

#[test]
fn test_note_to_reviewed_card_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();

    let (note_id, deck_id) = {
        let mut store = open(&temp_dir);
        let note_id = match store
            .dispatch_at(
                Action::UpsertNote(NoteInput {
                    id: None,
                    title: "Feature stores".to_string(),
                    content: "<p>Offline and online stores share definitions.</p>".to_string(),
                    tags: vec!["mlops".to_string()],
                }),
                &now,
            )
            .unwrap()
        {
            ActionOutput::Created { id } => id,
            other => panic!("unexpected output {:?}", other),
        };

        let deck_id = match store
            .dispatch_at(
                Action::AddCardFromHighlight {
                    note_id: Some(note_id),
                    front: "Offline and online stores".to_string(),
                    back: "Share feature definitions".to_string(),
                },
                &now,
            )
            .unwrap()
        {
            ActionOutput::CardAdded { deck_id, .. } => deck_id,
            other => panic!("unexpected output {:?}", other),
        };

        let deck = store.data().decks.iter().find(|d| d.id == deck_id).unwrap().clone();
        assert_eq!(deck.name, "Feature stores");

        let mut session = ReviewSession::start(&deck, now).unwrap();
        session
            .rate(Rating::Easy, |deck_id, card_id, rating| store.rate_card(deck_id, card_id, rating, &now))
            .unwrap();
        assert!(session.is_finished());

        (note_id, deck_id)
    };

    let store = open(&temp_dir);
    let deck = store.data().decks.iter().find(|d| d.id == deck_id).unwrap();
    assert_eq!(deck.note_id, Some(note_id));
    assert!(deck.flashcards[0].next_review > now);
    assert_eq!(deck.due_count(now), 0);

    let data = store.data();
    let index = TagIndex::build(&data.courses, &data.reminders, &data.notes);
    assert!(index.items("mlops").iter().any(|item| item.title() == "Feature stores"));
}

#[test]
fn test_ease_factor_floor_holds_for_any_rating_sequence() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let ratings = [Rating::Again, Rating::Good, Rating::Easy];

    let mut interval = 1;
    let mut ease = 2.5;
    for i in 0..200 {
        let rating = ratings[(i * 7 + i / 3) % 3];
        let result = calculate_next_review(interval, ease, rating, &now);
        assert!(result.ease_factor >= MIN_EASE_FACTOR);
        assert!(result.interval >= 1);
        assert!(result.next_review > now);
        if rating == Rating::Again {
            assert_eq!(result.interval, 1);
        }
        interval = result.interval.min(3650);
        ease = result.ease_factor;
    }
}
