use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// One JSON file per collection under the data directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Courses,
    Reminders,
    Notes,
    Decks,
    Tasks,
    PomodoroSessions,
    PomodoroSequences,
    MindMaps,
    ChatHistory,
    Settings,
    WidgetLayout,
    Gamification,
    QuizAttempts,
}

impl Collection {
    pub const ALL: [Collection; 13] = [
        Collection::Courses,
        Collection::Reminders,
        Collection::Notes,
        Collection::Decks,
        Collection::Tasks,
        Collection::PomodoroSessions,
        Collection::PomodoroSequences,
        Collection::MindMaps,
        Collection::ChatHistory,
        Collection::Settings,
        Collection::WidgetLayout,
        Collection::Gamification,
        Collection::QuizAttempts,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Courses => "courses.json",
            Collection::Reminders => "reminders.json",
            Collection::Notes => "notes.json",
            Collection::Decks => "decks.json",
            Collection::Tasks => "tasks.json",
            Collection::PomodoroSessions => "pomodoro_sessions.json",
            Collection::PomodoroSequences => "pomodoro_sequences.json",
            Collection::MindMaps => "mind_maps.json",
            Collection::ChatHistory => "chat_history.json",
            Collection::Settings => "settings.json",
            Collection::WidgetLayout => "widget_layout.json",
            Collection::Gamification => "gamification.json",
            Collection::QuizAttempts => "quiz_attempts.json",
        }
    }
}

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("studyhub"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Create the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.base_path.join(collection.file_name())
    }

    /// Whether the collection has ever been written
    pub fn exists(&self, collection: Collection) -> bool {
        self.collection_path(collection).exists()
    }

    /// Load a whole collection. A missing file yields `None`.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Option<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    /// Load a collection, falling back to its default when missing
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, collection: Collection) -> Result<T> {
        Ok(self.load(collection)?.unwrap_or_default())
    }

    /// Replace a whole collection using atomic write (write to .tmp then rename)
    pub fn save<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) -> Result<()> {
        let path = self.collection_path(collection);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}
