//! Deck, card and review session routes

use std::collections::HashMap;
use std::sync::MutexGuard;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Duration, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{dispatch, store, ApiError, ApiResult};
use crate::flashcards::{
    decks, preview_intervals, Deck, DeckSummary, Rating, ReviewResult, ReviewSession, SessionProgress, SessionStatus,
};
use crate::storage::StorageError;
use crate::store::{Action, ActionOutput};
use crate::AppState;

/// Sessions left open longer than this are dropped when a new one starts
const REVIEW_SESSION_MAX_AGE_HOURS: i64 = 12;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub note_id: Option<Uuid>,
    pub front: String,
    pub back: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameDeck {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: Rating,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalPreview {
    pub rating: Rating,
    pub interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub review: ReviewResult,
    pub progress: SessionProgress,
    pub session: SessionStatus,
}

/// GET /api/decks
pub async fn list_decks(State(state): State<AppState>) -> ApiResult<Json<Vec<DeckSummary>>> {
    let store = store(&state)?;
    let now = Utc::now();
    Ok(Json(
        store.data().decks.iter().map(|d| DeckSummary::from_deck(d, now)).collect(),
    ))
}

/// GET /api/decks/{deck_id}
pub async fn get_deck(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> ApiResult<Json<Deck>> {
    let store = store(&state)?;
    Ok(Json(decks::find_deck(&store.data().decks, deck_id)?.clone()))
}

/// POST /api/cards
/// Save a highlight from a note as a card
pub async fn add_card(State(state): State<AppState>, Json(card): Json<NewCard>) -> ApiResult<Json<ActionOutput>> {
    dispatch(
        &state,
        Action::AddCardFromHighlight {
            note_id: card.note_id,
            front: card.front,
            back: card.back,
        },
    )
}

/// PUT /api/decks/{deck_id}
pub async fn rename_deck(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(body): Json<RenameDeck>,
) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::RenameDeck { deck_id, name: body.name })
}

/// DELETE /api/decks/{deck_id}
pub async fn delete_deck(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    let output = dispatch(&state, Action::DeleteDeck(deck_id))?;
    reviews(&state)?.retain(|_, session| session.deck_id != deck_id);
    Ok(output)
}

/// DELETE /api/decks/{deck_id}/cards/{card_id}
/// The card also leaves every review session holding it
pub async fn delete_card(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ActionOutput>> {
    let output = dispatch(&state, Action::DeleteCard { deck_id, card_id })?;
    reviews(&state)?.retain(|_, session| {
        if session.deck_id == deck_id {
            session.remove_card(card_id);
        }
        !session.is_finished()
    });
    Ok(output)
}

/// GET /api/decks/{deck_id}/cards/{card_id}/preview
/// Interval each rating would give, without changing the card
pub async fn preview_card(
    State(state): State<AppState>,
    Path((deck_id, card_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Vec<IntervalPreview>>> {
    let store = store(&state)?;
    let deck = decks::find_deck(&store.data().decks, deck_id)?;
    let card = deck
        .card(card_id)
        .ok_or_else(|| StorageError::NotFound(format!("Flashcard {} not found", card_id)))?;
    Ok(Json(
        preview_intervals(card, &Local::now())
            .into_iter()
            .map(|(rating, interval)| IntervalPreview { rating, interval })
            .collect(),
    ))
}

/// POST /api/decks/{deck_id}/review
/// Snapshot the due queue and start a session
pub async fn start_review(State(state): State<AppState>, Path(deck_id): Path<Uuid>) -> ApiResult<Json<SessionStatus>> {
    let session = {
        let store = store(&state)?;
        let deck = decks::find_deck(&store.data().decks, deck_id)?;
        ReviewSession::start(deck, Utc::now())
            .ok_or_else(|| ApiError::BadRequest(format!("No cards due in '{}'", deck.name)))?
    };

    log::info!("Started review of '{}' with {} cards", session.deck_name, session.len());
    let status = session.status();
    let mut reviews = reviews(&state)?;
    let max_age = Duration::hours(REVIEW_SESSION_MAX_AGE_HOURS);
    reviews.retain(|_, old| !old.is_stale(session.started_at, max_age));
    reviews.insert(session.id, session);
    Ok(Json(status))
}

/// GET /api/reviews/{session_id}
pub async fn review_status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<SessionStatus>> {
    let reviews = reviews(&state)?;
    let session = reviews.get(&session_id).ok_or_else(|| session_not_found(session_id))?;
    Ok(Json(session.status()))
}

/// POST /api/reviews/{session_id}/rate
pub async fn rate_current(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<RateRequest>,
) -> ApiResult<Json<RateResponse>> {
    let mut reviews = reviews(&state)?;
    let session = reviews.get_mut(&session_id).ok_or_else(|| session_not_found(session_id))?;

    let now = Local::now();
    let (review, progress) = session.rate(body.rating, |deck_id, card_id, rating| {
        super::store(&state)
            .map_err(|_| StorageError::InvalidOperation("Study data unavailable".to_string()))?
            .rate_card(deck_id, card_id, rating, &now)
    })?;
    let status = session.status();

    if progress == SessionProgress::Finished {
        reviews.remove(&session_id);
    }
    Ok(Json(RateResponse {
        review,
        progress,
        session: status,
    }))
}

/// DELETE /api/reviews/{session_id}
pub async fn end_review(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> ApiResult<Json<SessionStatus>> {
    let mut session = reviews(&state)?
        .remove(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.end();
    Ok(Json(session.status()))
}

fn reviews(state: &AppState) -> ApiResult<MutexGuard<'_, HashMap<Uuid, ReviewSession>>> {
    state
        .reviews
        .lock()
        .map_err(|_| ApiError::Storage(StorageError::InvalidOperation("Review sessions lock poisoned".to_string())))
}

fn session_not_found(session_id: Uuid) -> ApiError {
    StorageError::NotFound(format!("Review session {} not found", session_id)).into()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/decks", get(list_decks))
        .route("/decks/{deck_id}", get(get_deck).put(rename_deck).delete(delete_deck))
        .route("/decks/{deck_id}/cards/{card_id}", delete(delete_card))
        .route("/decks/{deck_id}/cards/{card_id}/preview", get(preview_card))
        .route("/decks/{deck_id}/review", post(start_review))
        .route("/cards", post(add_card))
        .route("/reviews/{session_id}", get(review_status).delete(end_review))
        .route("/reviews/{session_id}/rate", post(rate_current))
}
