//! Pomodoro sequences, session history and the running timer

use axum::extract::{Path, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::{dispatch, store, ApiError, ApiResult};
use crate::pomodoro::{PomodoroRunner, PomodoroSequence, PomodoroSession, PomodoroStep, RunnerCommand, TimerSnapshot};
use crate::storage::StorageError;
use crate::store::{Action, ActionOutput};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceInput {
    /// `None` creates a new sequence
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub steps: Vec<PomodoroStep>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum TimerRequest {
    Start,
    Pause,
    Reset,
    Skip,
    #[serde(rename_all = "camelCase")]
    Select { sequence_id: Uuid },
    SetTask { task: String },
}

impl From<TimerRequest> for RunnerCommand {
    fn from(request: TimerRequest) -> Self {
        match request {
            TimerRequest::Start => RunnerCommand::Start,
            TimerRequest::Pause => RunnerCommand::Pause,
            TimerRequest::Reset => RunnerCommand::Reset,
            TimerRequest::Skip => RunnerCommand::Skip,
            TimerRequest::Select { sequence_id } => RunnerCommand::Select(sequence_id),
            TimerRequest::SetTask { task } => RunnerCommand::SetTask(task),
        }
    }
}

/// GET /api/pomodoro/sequences
pub async fn list_sequences(State(state): State<AppState>) -> ApiResult<Json<Vec<PomodoroSequence>>> {
    Ok(Json(store(&state)?.data().pomodoro_sequences.clone()))
}

/// POST /api/pomodoro/sequences
pub async fn save_sequence(
    State(state): State<AppState>,
    Json(input): Json<SequenceInput>,
) -> ApiResult<Json<ActionOutput>> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Sequence name is required".to_string()));
    }
    let sequence = PomodoroSequence {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        name: name.to_string(),
        steps: input.steps,
    };
    dispatch(&state, Action::SaveSequence(sequence))
}

/// DELETE /api/pomodoro/sequences/{id}
pub async fn delete_sequence(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteSequence(id))
}

/// GET /api/pomodoro/sessions
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<Vec<PomodoroSession>>> {
    Ok(Json(store(&state)?.data().pomodoro_sessions.clone()))
}

fn runner(state: &AppState) -> ApiResult<&PomodoroRunner> {
    state
        .pomodoro
        .as_ref()
        .ok_or_else(|| StorageError::InvalidOperation("The pomodoro timer is disabled".to_string()).into())
}

/// GET /api/pomodoro/timer
pub async fn timer_status(State(state): State<AppState>) -> ApiResult<Json<TimerSnapshot>> {
    Ok(Json(runner(&state)?.status().await?))
}

/// POST /api/pomodoro/timer
pub async fn timer_command(
    State(state): State<AppState>,
    Json(request): Json<TimerRequest>,
) -> ApiResult<Json<TimerSnapshot>> {
    Ok(Json(runner(&state)?.send(request.into()).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pomodoro/sequences", get(list_sequences).post(save_sequence))
        .route("/pomodoro/sequences/{id}", delete(delete_sequence))
        .route("/pomodoro/sessions", get(list_sessions))
        .route("/pomodoro/timer", get(timer_status).post(timer_command))
}
