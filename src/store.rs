//! Application state and the action reducer
//!
//! All study data lives in [`StudyData`]. It is only ever changed through
//! [`apply`], which takes a typed [`Action`] and reports which collections
//! changed so [`StudyStore`] can persist exactly those files.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::GeneratedStudyPlan;
use crate::analytics::{Achievement, Gamification, QuizAttempt, StudyProgress, PERFECT_QUIZ_XP};
use crate::companion::ChatMessage;
use crate::dashboard::{self, MoveDirection, Task, Widget, WidgetLayout};
use crate::flashcards::{decks, Deck, Rating, ReviewResult};
use crate::mindmap::{self, MindMap};
use crate::notes::{self, Note, NoteInput};
use crate::pomodoro::{self, PomodoroSequence, PomodoroSession};
use crate::reminders::{self, Reminder, ReminderInput};
use crate::roadmap::{self, seed, Course};
use crate::settings::{Settings, SettingsUpdate};
use crate::storage::{Collection, FileStorage, Result, StorageError};

/// Every collection the app keeps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyData {
    pub courses: Vec<Course>,
    pub reminders: Vec<Reminder>,
    pub notes: Vec<Note>,
    pub decks: Vec<Deck>,
    pub tasks: Vec<Task>,
    pub pomodoro_sessions: Vec<PomodoroSession>,
    pub pomodoro_sequences: Vec<PomodoroSequence>,
    pub mind_maps: Vec<MindMap>,
    pub chat_history: Vec<ChatMessage>,
    pub settings: Settings,
    pub widget_layout: WidgetLayout,
    pub gamification: Gamification,
    pub quiz_attempts: Vec<QuizAttempt>,
}

impl StudyData {
    /// Data for a fresh install: the MLOps plan and default sequences
    pub fn seeded<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            courses: vec![seed::mlops_course()],
            reminders: seed::mlops_reminders(now),
            pomodoro_sequences: pomodoro::default_sequences(),
            ..Self::default()
        }
    }

    pub fn progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> StudyProgress {
        StudyProgress::collect(&self.pomodoro_sessions, self.notes.len(), &self.quiz_attempts, now)
    }

    pub fn sequence(&self, id: Uuid) -> Result<&PomodoroSequence> {
        self.pomodoro_sequences
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::NotFound(format!("Sequence {} not found", id)))
    }
}

/// Every way the data can change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    // Flashcards
    #[serde(rename_all = "camelCase")]
    AddCardFromHighlight {
        note_id: Option<Uuid>,
        front: String,
        back: String,
    },
    #[serde(rename_all = "camelCase")]
    RateCard { deck_id: Uuid, card_id: Uuid, rating: Rating },
    #[serde(rename_all = "camelCase")]
    DeleteCard { deck_id: Uuid, card_id: Uuid },
    DeleteDeck(Uuid),
    #[serde(rename_all = "camelCase")]
    RenameDeck { deck_id: Uuid, name: String },

    // Roadmap
    AddCourseFromPlan { plan: GeneratedStudyPlan, tags: Vec<String> },
    #[serde(rename_all = "camelCase")]
    ToggleTopic { course_id: Uuid, topic_id: Uuid },
    DeleteCourse(Uuid),

    // Reminders
    AddReminder(ReminderInput),
    ToggleReminder(Uuid),
    DeleteReminder(Uuid),

    // Notes
    UpsertNote(NoteInput),
    #[serde(rename_all = "camelCase")]
    RestoreNoteVersion { note_id: Uuid, index: usize },
    DeleteNote(Uuid),

    // Dashboard
    AddTask(String),
    ToggleTask(Uuid),
    DeleteTask(Uuid),
    MoveWidget { widget: Widget, direction: MoveDirection },
    UpdateSettings(SettingsUpdate),

    // Pomodoro
    RecordFocusSession(PomodoroSession),
    SaveSequence(PomodoroSequence),
    DeleteSequence(Uuid),

    // Study aids
    RecordQuizAttempt(QuizAttempt),
    StoreMindMap(MindMap),
    DeleteMindMap(Uuid),
    AppendChat(ChatMessage),
    ClearChat,
}

/// What an action produced for the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ActionOutput {
    Done,
    Created { id: Uuid },
    Toggled { completed: bool },
    #[serde(rename_all = "camelCase")]
    CardAdded { deck_id: Uuid, card_id: Uuid },
    Reviewed(ReviewResult),
    #[serde(rename_all = "camelCase")]
    Progress {
        xp_awarded: u32,
        levels_gained: u32,
        unlocked: Vec<Achievement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub output: ActionOutput,
    pub changed: Vec<Collection>,
}

impl Applied {
    fn new(output: ActionOutput, changed: &[Collection]) -> Self {
        Self {
            output,
            changed: changed.to_vec(),
        }
    }

    fn touch(&mut self, collection: Collection) {
        if !self.changed.contains(&collection) {
            self.changed.push(collection);
        }
    }
}

/// Apply one action to the data. On error the data is left unchanged.
pub fn apply<Tz: TimeZone>(data: &mut StudyData, action: Action, now: &DateTime<Tz>) -> Result<Applied> {
    use ActionOutput::*;
    use Collection as C;

    let now_utc = now.with_timezone(&Utc);

    let applied = match action {
        Action::AddCardFromHighlight { note_id, front, back } => {
            let note = note_id.map(|id| notes::find_note(&data.notes, id)).transpose()?;
            let (deck_id, card_id) = decks::add_card_from_highlight(&mut data.decks, note, &front, &back, now_utc)?;
            Applied::new(CardAdded { deck_id, card_id }, &[C::Decks])
        }
        Action::RateCard { deck_id, card_id, rating } => {
            let result = decks::rate_card(&mut data.decks, deck_id, card_id, rating, now)?;
            Applied::new(Reviewed(result), &[C::Decks])
        }
        Action::DeleteCard { deck_id, card_id } => {
            decks::delete_card(&mut data.decks, deck_id, card_id)?;
            Applied::new(Done, &[C::Decks])
        }
        Action::DeleteDeck(deck_id) => {
            decks::delete_deck(&mut data.decks, deck_id)?;
            Applied::new(Done, &[C::Decks])
        }
        Action::RenameDeck { deck_id, name } => {
            decks::rename_deck(&mut data.decks, deck_id, name)?;
            Applied::new(Done, &[C::Decks])
        }

        Action::AddCourseFromPlan { plan, tags } => {
            let course = roadmap::course_from_plan(plan, tags);
            let id = course.id;
            data.courses.push(course);
            Applied::new(Created { id }, &[C::Courses])
        }
        Action::ToggleTopic { course_id, topic_id } => {
            let completed = roadmap::toggle_topic(&mut data.courses, course_id, topic_id)?;
            Applied::new(Toggled { completed }, &[C::Courses])
        }
        Action::DeleteCourse(id) => {
            roadmap::delete_course(&mut data.courses, id)?;
            Applied::new(Done, &[C::Courses])
        }

        Action::AddReminder(input) => {
            let id = reminders::add_reminder(&mut data.reminders, input)?;
            Applied::new(Created { id }, &[C::Reminders])
        }
        Action::ToggleReminder(id) => {
            let completed = reminders::toggle_reminder(&mut data.reminders, id)?;
            Applied::new(Toggled { completed }, &[C::Reminders])
        }
        Action::DeleteReminder(id) => {
            reminders::delete_reminder(&mut data.reminders, id)?;
            Applied::new(Done, &[C::Reminders])
        }

        Action::UpsertNote(input) => {
            let id = notes::upsert_note(&mut data.notes, input, now_utc)?;
            let mut applied = Applied::new(Created { id }, &[C::Notes]);
            if !unlock_achievements(data, now).is_empty() {
                applied.touch(C::Gamification);
            }
            applied
        }
        Action::RestoreNoteVersion { note_id, index } => {
            notes::restore_version(&mut data.notes, note_id, index, now_utc)?;
            Applied::new(Done, &[C::Notes])
        }
        Action::DeleteNote(id) => {
            notes::delete_note(&mut data.notes, id)?;
            let mut applied = Applied::new(Done, &[C::Notes]);
            // Cards survive their note; only the link is cleared
            for deck in data.decks.iter_mut().filter(|d| d.note_id == Some(id)) {
                deck.note_id = None;
                applied.touch(C::Decks);
            }
            let maps_before = data.mind_maps.len();
            data.mind_maps.retain(|m| m.note_id != id);
            if data.mind_maps.len() != maps_before {
                applied.touch(C::MindMaps);
            }
            applied
        }

        Action::AddTask(text) => {
            let id = dashboard::add_task(&mut data.tasks, &text)?;
            Applied::new(Created { id }, &[C::Tasks])
        }
        Action::ToggleTask(id) => {
            let completed = dashboard::toggle_task(&mut data.tasks, id)?;
            Applied::new(Toggled { completed }, &[C::Tasks])
        }
        Action::DeleteTask(id) => {
            dashboard::delete_task(&mut data.tasks, id)?;
            Applied::new(Done, &[C::Tasks])
        }
        Action::MoveWidget { widget, direction } => {
            if data.widget_layout.move_widget(widget, direction) {
                Applied::new(Done, &[C::WidgetLayout])
            } else {
                Applied::new(Done, &[])
            }
        }
        Action::UpdateSettings(update) => {
            data.settings.apply(update);
            Applied::new(Done, &[C::Settings])
        }

        Action::RecordFocusSession(session) => {
            let xp = session.duration_minutes;
            data.pomodoro_sessions.push(session);
            let levels_gained = data.gamification.award_xp(xp);
            let unlocked = unlock_achievements(data, now);
            Applied::new(
                Progress {
                    xp_awarded: xp,
                    levels_gained,
                    unlocked,
                },
                &[C::PomodoroSessions, C::Gamification],
            )
        }
        Action::SaveSequence(sequence) => {
            pomodoro::validate_sequence(&sequence)?;
            let id = sequence.id;
            match data.pomodoro_sequences.iter_mut().find(|s| s.id == id) {
                Some(existing) => *existing = sequence,
                None => data.pomodoro_sequences.push(sequence),
            }
            Applied::new(Created { id }, &[C::PomodoroSequences])
        }
        Action::DeleteSequence(id) => {
            if data.pomodoro_sequences.len() <= 1 {
                return Err(StorageError::InvalidOperation(
                    "At least one pomodoro sequence must remain".to_string(),
                ));
            }
            let before = data.pomodoro_sequences.len();
            data.pomodoro_sequences.retain(|s| s.id != id);
            if data.pomodoro_sequences.len() == before {
                return Err(StorageError::NotFound(format!("Sequence {} not found", id)));
            }
            Applied::new(Done, &[C::PomodoroSequences])
        }

        Action::RecordQuizAttempt(attempt) => {
            if attempt.score > attempt.total {
                return Err(StorageError::InvalidOperation(format!(
                    "Score {} exceeds question count {}",
                    attempt.score, attempt.total
                )));
            }
            let xp = if attempt.is_perfect() { PERFECT_QUIZ_XP } else { 0 };
            data.quiz_attempts.push(attempt);
            let levels_gained = data.gamification.award_xp(xp);
            let unlocked = unlock_achievements(data, now);
            Applied::new(
                Progress {
                    xp_awarded: xp,
                    levels_gained,
                    unlocked,
                },
                &[C::QuizAttempts, C::Gamification],
            )
        }
        Action::StoreMindMap(map) => {
            mindmap::store_map(&mut data.mind_maps, map);
            Applied::new(Done, &[C::MindMaps])
        }
        Action::DeleteMindMap(note_id) => {
            let before = data.mind_maps.len();
            data.mind_maps.retain(|m| m.note_id != note_id);
            if data.mind_maps.len() == before {
                return Err(StorageError::NotFound(format!("Mind map for note {} not found", note_id)));
            }
            Applied::new(Done, &[C::MindMaps])
        }
        Action::AppendChat(message) => {
            data.chat_history.push(message);
            Applied::new(Done, &[C::ChatHistory])
        }
        Action::ClearChat => {
            data.chat_history.clear();
            Applied::new(Done, &[C::ChatHistory])
        }
    };

    Ok(applied)
}

fn unlock_achievements<Tz: TimeZone>(data: &mut StudyData, now: &DateTime<Tz>) -> Vec<Achievement> {
    let progress = data.progress(now);
    data.gamification.unlock_earned(&progress)
}

/// Store shared between the HTTP handlers and the pomodoro runner
pub type SharedStore = Arc<Mutex<StudyStore>>;

pub fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, StudyStore>> {
    store
        .lock()
        .map_err(|_| StorageError::InvalidOperation("Study data lock poisoned".to_string()))
}

/// [`StudyData`] backed by JSON collection files
pub struct StudyStore {
    storage: FileStorage,
    data: StudyData,
}

impl StudyStore {
    /// Load every collection. A data directory that has never been written
    /// gets the seed data.
    pub fn open(storage: FileStorage) -> Result<Self> {
        storage.init()?;

        let fresh = Collection::ALL.iter().all(|c| !storage.exists(*c));
        let mut store = if fresh {
            log::info!("Initializing new data directory at {}", storage.base_path().display());
            Self {
                data: StudyData::seeded(&Local::now()),
                storage,
            }
        } else {
            Self {
                data: load_data(&storage)?,
                storage,
            }
        };

        if store.data.pomodoro_sequences.is_empty() {
            store.data.pomodoro_sequences = pomodoro::default_sequences();
        }
        if fresh {
            store.save_all()?;
        }

        Ok(store)
    }

    pub fn data(&self) -> &StudyData {
        &self.data
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutput> {
        self.dispatch_at(action, &Local::now())
    }

    /// Apply an action and persist the collections it changed.
    /// A failed action writes nothing.
    pub fn dispatch_at<Tz: TimeZone>(&mut self, action: Action, now: &DateTime<Tz>) -> Result<ActionOutput> {
        let mut next = self.data.clone();
        let applied = apply(&mut next, action, now)?;
        for collection in &applied.changed {
            save_collection(&self.storage, &next, *collection)?;
        }
        self.data = next;
        Ok(applied.output)
    }

    /// Rate a stored card, returning its new schedule
    pub fn rate_card<Tz: TimeZone>(
        &mut self,
        deck_id: Uuid,
        card_id: Uuid,
        rating: Rating,
        now: &DateTime<Tz>,
    ) -> Result<ReviewResult> {
        match self.dispatch_at(Action::RateCard { deck_id, card_id, rating }, now)? {
            ActionOutput::Reviewed(result) => Ok(result),
            other => Err(StorageError::InvalidOperation(format!("Unexpected rating output {:?}", other))),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn save_all(&self) -> Result<()> {
        for collection in Collection::ALL {
            save_collection(&self.storage, &self.data, collection)?;
        }
        Ok(())
    }
}

fn load_data(storage: &FileStorage) -> Result<StudyData> {
    Ok(StudyData {
        courses: storage.load_or_default(Collection::Courses)?,
        reminders: storage.load_or_default(Collection::Reminders)?,
        notes: storage.load_or_default(Collection::Notes)?,
        decks: storage.load_or_default(Collection::Decks)?,
        tasks: storage.load_or_default(Collection::Tasks)?,
        pomodoro_sessions: storage.load_or_default(Collection::PomodoroSessions)?,
        pomodoro_sequences: storage.load_or_default(Collection::PomodoroSequences)?,
        mind_maps: storage.load_or_default(Collection::MindMaps)?,
        chat_history: storage.load_or_default(Collection::ChatHistory)?,
        settings: storage.load_or_default(Collection::Settings)?,
        widget_layout: storage.load_or_default(Collection::WidgetLayout)?,
        gamification: storage.load_or_default(Collection::Gamification)?,
        quiz_attempts: storage.load_or_default(Collection::QuizAttempts)?,
    })
}

fn save_collection(storage: &FileStorage, data: &StudyData, collection: Collection) -> Result<()> {
    match collection {
        Collection::Courses => storage.save(collection, &data.courses),
        Collection::Reminders => storage.save(collection, &data.reminders),
        Collection::Notes => storage.save(collection, &data.notes),
        Collection::Decks => storage.save(collection, &data.decks),
        Collection::Tasks => storage.save(collection, &data.tasks),
        Collection::PomodoroSessions => storage.save(collection, &data.pomodoro_sessions),
        Collection::PomodoroSequences => storage.save(collection, &data.pomodoro_sequences),
        Collection::MindMaps => storage.save(collection, &data.mind_maps),
        Collection::ChatHistory => storage.save(collection, &data.chat_history),
        Collection::Settings => storage.save(collection, &data.settings),
        Collection::WidgetLayout => storage.save(collection, &data.widget_layout),
        Collection::Gamification => storage.save(collection, &data.gamification),
        Collection::QuizAttempts => storage.save(collection, &data.quiz_attempts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::ReminderKind;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_store() -> (StudyStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = StudyStore::open(FileStorage::new(temp_dir.path().to_path_buf())).unwrap();
        (store, temp_dir)
    }

    fn note_input(title: &str) -> NoteInput {
        NoteInput {
            id: None,
            title: title.to_string(),
            content: "<p>content</p>".to_string(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_fresh_store_is_seeded_and_persisted() {
        let (store, temp) = create_test_store();
        assert_eq!(store.data().courses.len(), 1);
        assert_eq!(store.data().reminders.len(), 10);
        assert_eq!(store.data().pomodoro_sequences.len(), 2);
        assert!(temp.path().join("courses.json").exists());

        let reopened = StudyStore::open(FileStorage::new(temp.path().to_path_buf())).unwrap();
        assert_eq!(reopened.data().courses, store.data().courses);
    }

    #[test]
    fn test_highlight_review_flow_persists() {
        let (mut store, temp) = create_test_store();

        let note_id = match store.dispatch(Action::UpsertNote(note_input("Cells"))).unwrap() {
            ActionOutput::Created { id } => id,
            other => panic!("unexpected output {:?}", other),
        };
        let (deck_id, card_id) = match store
            .dispatch(Action::AddCardFromHighlight {
                note_id: Some(note_id),
                front: "Powerhouse of the cell".to_string(),
                back: "Mitochondria".to_string(),
            })
            .unwrap()
        {
            ActionOutput::CardAdded { deck_id, card_id } => (deck_id, card_id),
            other => panic!("unexpected output {:?}", other),
        };

        let output = store
            .dispatch(Action::RateCard {
                deck_id,
                card_id,
                rating: Rating::Good,
            })
            .unwrap();
        assert!(matches!(output, ActionOutput::Reviewed(r) if r.interval == 3));

        let reopened = StudyStore::open(FileStorage::new(temp.path().to_path_buf())).unwrap();
        let deck = &reopened.data().decks[0];
        assert_eq!(deck.name, "Cells");
        assert_eq!(deck.flashcards[0].interval, 3);
    }

    #[test]
    fn test_failed_action_changes_nothing() {
        let (mut store, _temp) = create_test_store();
        let before = store.data().tasks.clone();
        let result = store.dispatch(Action::ToggleTask(Uuid::new_v4()));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert_eq!(store.data().tasks, before);
    }

    #[test]
    fn test_focus_session_awards_xp_and_first_session() {
        let mut data = StudyData::default();
        let now = Utc::now();
        let applied = apply(
            &mut data,
            Action::RecordFocusSession(PomodoroSession::new("Essay", 25, now)),
            &now,
        )
        .unwrap();

        match applied.output {
            ActionOutput::Progress { xp_awarded, unlocked, .. } => {
                assert_eq!(xp_awarded, 25);
                assert_eq!(unlocked, vec![Achievement::FirstSession]);
            }
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(data.gamification.xp, 25);
        assert!(applied.changed.contains(&Collection::Gamification));
    }

    #[test]
    fn test_quiz_attempts_award_xp_only_when_perfect() {
        let mut data = StudyData::default();
        let now = Utc::now();
        let attempt = |score| QuizAttempt {
            note_id: None,
            score,
            total: 4,
            taken_at: now,
        };

        apply(&mut data, Action::RecordQuizAttempt(attempt(3)), &now).unwrap();
        assert_eq!(data.gamification.xp, 0);
        apply(&mut data, Action::RecordQuizAttempt(attempt(4)), &now).unwrap();
        assert_eq!(data.gamification.xp, PERFECT_QUIZ_XP);
        assert!(apply(&mut data, Action::RecordQuizAttempt(attempt(5)), &now).is_err());
    }

    #[test]
    fn test_fifth_note_unlocks_note_master() {
        let mut data = StudyData::default();
        let now = Utc::now();
        for i in 0..5 {
            apply(&mut data, Action::UpsertNote(note_input(&format!("Note {}", i))), &now).unwrap();
        }
        assert!(data.gamification.unlocked_achievements.contains(&Achievement::NoteMaster));
    }

    #[test]
    fn test_deleting_note_unlinks_deck_and_drops_map() {
        let mut data = StudyData::default();
        let now = Utc::now();
        apply(&mut data, Action::UpsertNote(note_input("Cells")), &now).unwrap();
        let note = data.notes[0].clone();
        apply(
            &mut data,
            Action::AddCardFromHighlight {
                note_id: Some(note.id),
                front: "Some highlight".to_string(),
                back: "answer".to_string(),
            },
            &now,
        )
        .unwrap();
        data.mind_maps.push(MindMap {
            note_id: note.id,
            note_title: note.title.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
        });

        let applied = apply(&mut data, Action::DeleteNote(note.id), &now).unwrap();
        assert!(data.decks[0].note_id.is_none());
        assert_eq!(data.decks[0].flashcards.len(), 1);
        assert!(data.mind_maps.is_empty());
        assert!(applied.changed.contains(&Collection::Decks));
        assert!(applied.changed.contains(&Collection::MindMaps));
    }

    #[test]
    fn test_widget_edge_move_persists_nothing() {
        let mut data = StudyData::default();
        let applied = apply(
            &mut data,
            Action::MoveWidget {
                widget: Widget::Stats,
                direction: MoveDirection::Up,
            },
            &Utc::now(),
        )
        .unwrap();
        assert!(applied.changed.is_empty());
    }

    #[test]
    fn test_last_sequence_cannot_be_deleted() {
        let mut data = StudyData::seeded(&Utc::now());
        let first = data.pomodoro_sequences[0].id;
        let second = data.pomodoro_sequences[1].id;
        apply(&mut data, Action::DeleteSequence(first), &Utc::now()).unwrap();
        assert!(apply(&mut data, Action::DeleteSequence(second), &Utc::now()).is_err());
    }

    #[test]
    fn test_reminder_action_keeps_order() {
        let mut data = StudyData::default();
        let now = Utc::now();
        for hours in [5, 1, 3] {
            apply(
                &mut data,
                Action::AddReminder(ReminderInput {
                    title: format!("in {}h", hours),
                    date: now + Duration::hours(hours),
                    kind: ReminderKind::Reminder,
                    tags: Vec::new(),
                }),
                &now,
            )
            .unwrap();
        }
        let titles: Vec<&str> = data.reminders.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["in 1h", "in 3h", "in 5h"]);
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action = serde_json::from_value(serde_json::json!({
            "type": "rateCard",
            "payload": {
                "deckId": "6f1c2a4e-8d33-4b7a-9a55-0c7e1f9b2d10",
                "cardId": "6f1c2a4e-8d33-4b7a-9a55-0c7e1f9b2d11",
                "rating": "easy"
            }
        }))
        .unwrap();
        assert!(matches!(action, Action::RateCard { rating: Rating::Easy, .. }));
    }
}
