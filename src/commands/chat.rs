//! Study companion chat routes

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use super::{dispatch, store, ApiError, ApiResult};
use crate::companion::{ChatMessage, StudyView};
use crate::store::{Action, ActionOutput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// View the user is on
    #[serde(default)]
    pub context: StudyView,
}

/// GET /api/chat
pub async fn history(State(state): State<AppState>) -> ApiResult<Json<Vec<ChatMessage>>> {
    Ok(Json(store(&state)?.data().chat_history.clone()))
}

/// POST /api/chat
///
/// The user message is stored first. A failed reply is stored as an
/// apology and the error is still returned.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatMessage>> {
    let message = request.message.trim().to_string();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message is empty".to_string()));
    }

    let history = store(&state)?.data().chat_history.clone();
    store(&state)?.dispatch(Action::AppendChat(ChatMessage::user(message.clone(), Utc::now())))?;

    match state
        .assistant
        .continue_conversation(&history, &message, request.context)
        .await
    {
        Ok(reply) => {
            let reply = ChatMessage::model(reply, Utc::now());
            store(&state)?.dispatch(Action::AppendChat(reply.clone()))?;
            Ok(Json(reply))
        }
        Err(failure) => {
            let apology = ChatMessage::apology(&failure.to_string(), Utc::now());
            store(&state)?.dispatch(Action::AppendChat(apology))?;
            Err(failure.into())
        }
    }
}

/// DELETE /api/chat
pub async fn clear(State(state): State<AppState>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::ClearChat)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", get(history).post(send_message).delete(clear))
}
