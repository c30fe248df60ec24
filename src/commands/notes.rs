//! Note routes and the AI study aids that work on a note

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{dispatch, store, ApiError, ApiResult};
use crate::ai::Quiz;
use crate::analytics::QuizAttempt;
use crate::mindmap::{find_map, MindMap};
use crate::notes::{draft_from_import, find_note, Note, NoteDraft, NoteInput, NoteSummary};
use crate::storage::StorageError;
use crate::store::{Action, ActionOutput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RestoreRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CritiqueRequest {
    pub concept: String,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswers {
    pub quiz: Quiz,
    pub answers: Vec<Option<usize>>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub progress: ActionOutput,
}

/// GET /api/notes
pub async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteSummary>>> {
    let store = store(&state)?;
    Ok(Json(store.data().notes.iter().map(NoteSummary::from).collect()))
}

/// GET /api/notes/{note_id}
pub async fn get_note(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<Note>> {
    let store = store(&state)?;
    Ok(Json(find_note(&store.data().notes, note_id)?.clone()))
}

/// POST /api/notes
/// Create a note, or update it when `id` is set
pub async fn save_note(State(state): State<AppState>, Json(input): Json<NoteInput>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::UpsertNote(input))
}

/// DELETE /api/notes/{note_id}
pub async fn delete_note(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteNote(note_id))
}

/// POST /api/notes/{note_id}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Json(request): Json<RestoreRequest>,
) -> ApiResult<Json<ActionOutput>> {
    dispatch(
        &state,
        Action::RestoreNoteVersion {
            note_id,
            index: request.index,
        },
    )
}

fn note_snapshot(state: &AppState, note_id: Uuid) -> ApiResult<Note> {
    let store = store(state)?;
    Ok(find_note(&store.data().notes, note_id)?.clone())
}

/// POST /api/notes/{note_id}/summary
pub async fn summarize_note(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<TextResponse>> {
    let note = note_snapshot(&state, note_id)?;
    let text = state.assistant.summarize(&note.content).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/notes/{note_id}/quiz
pub async fn generate_quiz(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<Quiz>> {
    let note = note_snapshot(&state, note_id)?;
    Ok(Json(state.assistant.generate_quiz(&note.content).await?))
}

/// POST /api/notes/{note_id}/quiz/grade
/// Grade the answers and record the attempt
pub async fn grade_quiz(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Json(submission): Json<QuizAnswers>,
) -> ApiResult<Json<QuizResult>> {
    let score = submission.quiz.grade(&submission.answers);
    let total = submission.quiz.questions.len() as u32;
    let Json(progress) = dispatch(
        &state,
        Action::RecordQuizAttempt(QuizAttempt {
            note_id: Some(note_id),
            score,
            total,
            taken_at: Utc::now(),
        }),
    )?;
    Ok(Json(QuizResult { score, total, progress }))
}

/// POST /api/explain
/// Explain highlighted text
pub async fn explain(State(state): State<AppState>, Json(request): Json<TextRequest>) -> ApiResult<Json<TextResponse>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Nothing to explain".to_string()));
    }
    let text = state.assistant.explain_concept(&request.text).await?;
    Ok(Json(TextResponse { text }))
}

/// POST /api/feynman
/// Tutor feedback on the user's own explanation of a concept
pub async fn critique(
    State(state): State<AppState>,
    Json(request): Json<CritiqueRequest>,
) -> ApiResult<Json<TextResponse>> {
    if request.explanation.trim().is_empty() {
        return Err(ApiError::BadRequest("Write an explanation first".to_string()));
    }
    let text = state
        .assistant
        .critique_explanation(&request.concept, &request.explanation)
        .await?;
    Ok(Json(TextResponse { text }))
}

/// GET /api/notes/{note_id}/mindmap
pub async fn get_mind_map(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<MindMap>> {
    let store = store(&state)?;
    find_map(&store.data().mind_maps, note_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| StorageError::NotFound(format!("Mind map for note {} not found", note_id)).into())
}

/// POST /api/notes/{note_id}/mindmap
/// Generate a mind map, replacing any earlier one
pub async fn generate_mind_map(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<MindMap>> {
    let note = note_snapshot(&state, note_id)?;
    let generated = state.assistant.generate_mind_map(&note.title, &note.content).await?;
    let map = MindMap::from_generated(&note, generated);
    store(&state)?.dispatch(Action::StoreMindMap(map.clone()))?;
    Ok(Json(map))
}

/// DELETE /api/notes/{note_id}/mindmap
pub async fn delete_mind_map(State(state): State<AppState>, Path(note_id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteMindMap(note_id))
}

/// POST /api/import
/// Turn pasted text into a draft note; nothing is saved
pub async fn import_text(State(state): State<AppState>, Json(request): Json<TextRequest>) -> ApiResult<Json<NoteDraft>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Paste some text to import".to_string()));
    }
    let imported = state.assistant.process_imported_content(&request.text).await?;
    Ok(Json(draft_from_import(imported)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(save_note))
        .route("/notes/{note_id}", get(get_note).delete(delete_note))
        .route("/notes/{note_id}/restore", post(restore_version))
        .route("/notes/{note_id}/summary", post(summarize_note))
        .route("/notes/{note_id}/quiz", post(generate_quiz))
        .route("/notes/{note_id}/quiz/grade", post(grade_quiz))
        .route(
            "/notes/{note_id}/mindmap",
            get(get_mind_map).post(generate_mind_map).delete(delete_mind_map),
        )
        .route("/explain", post(explain))
        .route("/feynman", post(critique))
        .route("/import", post(import_text))
}
