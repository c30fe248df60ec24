//! HTTP handlers, one module per domain
//!
//! Handlers lock the store only for synchronous work. AI calls are awaited
//! with the lock released and their results dispatched afterwards.

mod analytics;
mod chat;
mod dashboard;
mod flashcard;
mod notes;
mod pomodoro;
mod reminders;
mod roadmap;
mod tags;

use std::sync::MutexGuard;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;

use crate::ai::AiFailure;
use crate::storage::StorageError;
use crate::store::{lock_store, Action, ActionOutput, StudyStore};
use crate::AppState;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Ai(#[from] AiFailure),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(StorageError::InvalidOperation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ai(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            // Tell the user what to configure rather than "try again"
            ApiError::Ai(failure) if failure.is_unconfigured() => failure.cause.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub(crate) fn store(state: &AppState) -> ApiResult<MutexGuard<'_, StudyStore>> {
    Ok(lock_store(&state.store)?)
}

/// Apply an action and return what it produced
pub(crate) fn dispatch(state: &AppState, action: Action) -> ApiResult<Json<ActionOutput>> {
    let output = store(state)?.dispatch(action)?;
    Ok(Json(output))
}

/// All `/api` routes
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(analytics::router())
        .merge(chat::router())
        .merge(dashboard::router())
        .merge(flashcard::router())
        .merge(notes::router())
        .merge(pomodoro::router())
        .merge(reminders::router())
        .merge(roadmap::router())
        .merge(tags::router())
}
