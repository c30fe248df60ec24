use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

pub mod ai;
pub mod analytics;
pub mod commands;
pub mod companion;
pub mod config;
pub mod dashboard;
pub mod flashcards;
pub mod mindmap;
pub mod notes;
pub mod pomodoro;
pub mod reminders;
pub mod roadmap;
pub mod server;
pub mod settings;
pub mod storage;
pub mod store;
pub mod tags;

use ai::{GeminiClient, StudyAssistant};
use config::AppConfig;
use flashcards::ReviewSession;
use pomodoro::PomodoroRunner;
use storage::FileStorage;
use store::{SharedStore, StudyStore};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub assistant: Arc<dyn StudyAssistant>,
    /// Active flashcard review sessions by id
    pub reviews: Arc<Mutex<HashMap<Uuid, ReviewSession>>>,
    /// `None` when the background timer is disabled in the config
    pub pomodoro: Option<PomodoroRunner>,
}

impl AppState {
    pub fn new(store: SharedStore, assistant: Arc<dyn StudyAssistant>, pomodoro: Option<PomodoroRunner>) -> Self {
        Self {
            store,
            assistant,
            reviews: Arc::new(Mutex::new(HashMap::new())),
            pomodoro,
        }
    }
}

/// Open the data directory, start the pomodoro runner and serve the API
/// until Ctrl-C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let data_dir = config.resolve_data_dir()?;
    log::info!("Using data directory {}", data_dir.display());

    let store = StudyStore::open(FileStorage::new(data_dir))?.into_shared();
    let assistant: Arc<dyn StudyAssistant> = Arc::new(GeminiClient::new(&config.ai)?);

    let pomodoro = if config.server.pomodoro_runner {
        let runner = PomodoroRunner::spawn(Arc::clone(&store))?;
        log::info!("Pomodoro runner started");
        Some(runner)
    } else {
        None
    };

    let state = AppState::new(store, assistant, pomodoro.clone());
    server::serve(state, config.server.bind, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await?;

    if let Some(runner) = pomodoro {
        runner.shutdown();
    }
    Ok(())
}
