//! Local HTTP/JSON API server.
//!
//! Every route lives under `/api`. The server binds to localhost by default
//! and runs until the shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::commands;
use crate::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", commands::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on `bind` until `shutdown` resolves
pub async fn serve<F>(state: AppState, bind: SocketAddr, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind).await?;
    let addr = listener.local_addr()?;
    log::info!("StudyHub API listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            log::info!("StudyHub API shutting down");
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::ai::*;
    use crate::companion::{ChatMessage, StudyView};
    use crate::roadmap::Resource;
    use crate::storage::FileStorage;
    use crate::store::StudyStore;

    /// Answers chat messages by echoing them; everything else is unavailable
    struct EchoAssistant;

    fn unavailable<T>(operation: AiOperation) -> AiResult<T> {
        Err(AiFailure::new(operation, AiError::Timeout))
    }

    #[async_trait]
    impl StudyAssistant for EchoAssistant {
        async fn generate_study_plan(&self, subject: &str) -> AiResult<GeneratedStudyPlan> {
            Ok(GeneratedStudyPlan {
                course_name: subject.to_string(),
                description: String::new(),
                prerequisites: Vec::new(),
                phases: vec![GeneratedPhase {
                    title: "Basics".to_string(),
                    topics: vec![GeneratedTopic {
                        text: "Start".to_string(),
                        resources: Vec::new(),
                    }],
                }],
            })
        }

        async fn summarize(&self, _text: &str) -> AiResult<String> {
            unavailable(AiOperation::Summary)
        }

        async fn generate_quiz(&self, _text: &str) -> AiResult<Quiz> {
            unavailable(AiOperation::Quiz)
        }

        async fn explain_concept(&self, _concept: &str) -> AiResult<String> {
            unavailable(AiOperation::Explanation)
        }

        async fn critique_explanation(&self, _concept: &str, _explanation: &str) -> AiResult<String> {
            unavailable(AiOperation::Critique)
        }

        async fn generate_mind_map(&self, _title: &str, _text: &str) -> AiResult<GeneratedMindMap> {
            unavailable(AiOperation::MindMap)
        }

        async fn continue_conversation(
            &self,
            _history: &[ChatMessage],
            message: &str,
            _context: StudyView,
        ) -> AiResult<String> {
            if message == "fail" {
                unavailable(AiOperation::Conversation)
            } else {
                Ok(format!("echo: {}", message))
            }
        }

        async fn weekly_report(&self, _stats: &WeeklyStats) -> AiResult<String> {
            unavailable(AiOperation::WeeklyReport)
        }

        async fn process_imported_content(&self, _text: &str) -> AiResult<ImportedContent> {
            unavailable(AiOperation::Import)
        }

        async fn prerequisite_resources(&self, _skill: &str) -> AiResult<Vec<Resource>> {
            unavailable(AiOperation::PrerequisiteResources)
        }
    }

    fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = StudyStore::open(FileStorage::new(temp_dir.path().join("data"))).unwrap();
        let state = AppState::new(store.into_shared(), Arc::new(EchoAssistant), None);
        (state, temp_dir)
    }

    async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router(state.clone()).oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _temp) = test_state();
        let (status, body) = call(&state, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_course_is_json_404() {
        let (state, _temp) = test_state();
        let uri = format!("/api/courses/{}", uuid::Uuid::new_v4());
        let (status, body) = call(&state, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_add_card_then_review_it() {
        let (state, _temp) = test_state();

        let (status, added) = call(
            &state,
            "POST",
            "/api/cards",
            Some(json!({ "noteId": null, "front": "What is drift?", "back": "Changing input data" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(added["kind"], "cardAdded");
        let deck_id = added["deckId"].as_str().unwrap().to_string();

        let (_, decks) = call(&state, "GET", "/api/decks", None).await;
        assert_eq!(decks[0]["dueCount"], 1);

        let (status, session) = call(&state, "POST", &format!("/api/decks/{}/review", deck_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["total"], 1);
        let session_id = session["id"].as_str().unwrap().to_string();

        let (status, rated) = call(
            &state,
            "POST",
            &format!("/api/reviews/{}/rate", session_id),
            Some(json!({ "rating": "good" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rated["review"]["interval"], 3);
        assert_eq!(rated["progress"], "finished");

        // Finished sessions are dropped and the card is no longer due
        let (status, _) = call(&state, "GET", &format!("/api/reviews/{}", session_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&state, "POST", &format!("/api/decks/{}/review", deck_id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deleting_card_under_review_moves_session_on() {
        let (state, _temp) = test_state();

        let mut deck_id = String::new();
        for front in ["What is drift?", "What is a feature store?"] {
            let (_, added) = call(
                &state,
                "POST",
                "/api/cards",
                Some(json!({ "noteId": null, "front": front, "back": "An answer" })),
            )
            .await;
            deck_id = added["deckId"].as_str().unwrap().to_string();
        }

        let (_, session) = call(&state, "POST", &format!("/api/decks/{}/review", deck_id), None).await;
        assert_eq!(session["total"], 2);
        let session_id = session["id"].as_str().unwrap().to_string();
        let current = session["current"]["id"].as_str().unwrap().to_string();

        let (status, _) = call(&state, "DELETE", &format!("/api/decks/{}/cards/{}", deck_id, current), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, session) = call(&state, "GET", &format!("/api/reviews/{}", session_id), None).await;
        assert_eq!(session["total"], 1);
        assert_eq!(session["position"], 1);
        assert_ne!(session["current"]["id"].as_str().unwrap(), current);

        let (status, rated) = call(
            &state,
            "POST",
            &format!("/api/reviews/{}/rate", session_id),
            Some(json!({ "rating": "good" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rated["progress"], "finished");
    }

    #[tokio::test]
    async fn test_deleting_only_card_under_review_drops_session() {
        let (state, _temp) = test_state();

        let (_, added) = call(
            &state,
            "POST",
            "/api/cards",
            Some(json!({ "noteId": null, "front": "What is drift?", "back": "Changing input data" })),
        )
        .await;
        let deck_id = added["deckId"].as_str().unwrap().to_string();
        let card_id = added["cardId"].as_str().unwrap().to_string();

        let (_, session) = call(&state, "POST", &format!("/api/decks/{}/review", deck_id), None).await;
        let session_id = session["id"].as_str().unwrap().to_string();

        call(&state, "DELETE", &format!("/api/decks/{}/cards/{}", deck_id, card_id), None).await;
        let (status, _) = call(&state, "GET", &format!("/api/reviews/{}", session_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_stale_review_sessions_are_evicted() {
        use crate::flashcards::{Deck, Flashcard, ReviewSession};

        let (state, _temp) = test_state();
        let long_ago = chrono::Utc::now() - chrono::Duration::days(2);
        let mut old_deck = Deck::new("Old".to_string(), None);
        old_deck
            .flashcards
            .push(Flashcard::new("Forgotten".to_string(), "card".to_string(), long_ago));
        let stale = ReviewSession::start(&old_deck, long_ago).unwrap();
        let stale_id = stale.id;
        state.reviews.lock().unwrap().insert(stale_id, stale);

        let (_, added) = call(
            &state,
            "POST",
            "/api/cards",
            Some(json!({ "noteId": null, "front": "What is drift?", "back": "Changing input data" })),
        )
        .await;
        let deck_id = added["deckId"].as_str().unwrap().to_string();
        let (status, _) = call(&state, "POST", &format!("/api/decks/{}/review", deck_id), None).await;
        assert_eq!(status, StatusCode::OK);

        let reviews = state.reviews.lock().unwrap();
        assert_eq!(reviews.len(), 1);
        assert!(!reviews.contains_key(&stale_id));
    }

    #[tokio::test]
    async fn test_chat_failure_is_recorded_as_apology() {
        let (state, _temp) = test_state();

        let (status, reply) = call(&state, "POST", "/api/chat", Some(json!({ "message": "hello" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["text"], "echo: hello");

        let (status, body) = call(&state, "POST", "/api/chat", Some(json!({ "message": "fail" }))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], AiOperation::Conversation.failure_message());

        let (_, history) = call(&state, "GET", "/api/chat", None).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[3]["role"], "model");
        assert!(history[3]["text"]
            .as_str()
            .unwrap()
            .starts_with(crate::companion::APOLOGY_PREFIX));

        let (status, _) = call(&state, "POST", "/api/chat", Some(json!({ "message": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tasks_round_trip() {
        let (state, _temp) = test_state();

        let (_, created) = call(&state, "POST", "/api/tasks", Some(json!({ "text": "Read chapter 3" }))).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (_, toggled) = call(&state, "POST", &format!("/api/tasks/{}/toggle", id), None).await;
        assert_eq!(toggled["completed"], true);

        let (_, tasks) = call(&state, "GET", "/api/tasks", None).await;
        assert_eq!(tasks[0]["text"], "Read chapter 3");

        let (status, _) = call(&state, "DELETE", &format!("/api/tasks/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, tasks) = call(&state, "GET", "/api/tasks", None).await;
        assert_eq!(tasks.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_generated_course_is_added() {
        let (state, _temp) = test_state();

        let (_, before) = call(&state, "GET", "/api/courses", None).await;
        let (status, created) = call(
            &state,
            "POST",
            "/api/courses/generate",
            Some(json!({ "subject": "Linear Algebra", "tags": ["math"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, course) = call(&state, "GET", &format!("/api/courses/{}", created["id"].as_str().unwrap()), None).await;
        assert_eq!(course["name"], "Linear Algebra");
        assert_eq!(course["tags"], json!(["math"]));

        let (_, after) = call(&state, "GET", "/api/courses", None).await;
        assert_eq!(after.as_array().unwrap().len(), before.as_array().unwrap().len() + 1);
    }

    #[tokio::test]
    async fn test_timer_disabled_without_runner() {
        let (state, _temp) = test_state();
        let (status, _) = call(&state, "GET", "/api/pomodoro/timer", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
