//! Reminder and calendar routes

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Datelike, Local, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{dispatch, store, ApiError, ApiResult};
use crate::reminders::{month_view, todays_focus_sessions, upcoming, CalendarMonth, Reminder, ReminderInput};
use crate::store::{Action, ActionOutput};
use crate::AppState;

const DEFAULT_UPCOMING: usize = 5;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
}

/// GET /api/reminders
pub async fn list_reminders(State(state): State<AppState>) -> ApiResult<Json<Vec<Reminder>>> {
    Ok(Json(store(&state)?.data().reminders.clone()))
}

/// POST /api/reminders
pub async fn add_reminder(
    State(state): State<AppState>,
    Json(input): Json<ReminderInput>,
) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::AddReminder(input))
}

/// POST /api/reminders/{id}/toggle
pub async fn toggle_reminder(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::ToggleReminder(id))
}

/// DELETE /api/reminders/{id}
pub async fn delete_reminder(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteReminder(id))
}

/// GET /api/reminders/upcoming?limit=
pub async fn upcoming_reminders(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> ApiResult<Json<Vec<Reminder>>> {
    let store = store(&state)?;
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING);
    Ok(Json(upcoming(&store.data().reminders, Utc::now(), limit)))
}

/// GET /api/reminders/today
/// Focus sessions scheduled for today
pub async fn todays_sessions(State(state): State<AppState>) -> ApiResult<Json<Vec<Reminder>>> {
    let store = store(&state)?;
    Ok(Json(todays_focus_sessions(&store.data().reminders, &Local::now())))
}

/// GET /api/calendar?year=&month=
pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<CalendarMonth>> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let store = store(&state)?;
    month_view(&store.data().reminders, year, month, &Local)
        .map(Json)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid month {}-{}", year, month)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reminders", get(list_reminders).post(add_reminder))
        .route("/reminders/upcoming", get(upcoming_reminders))
        .route("/reminders/today", get(todays_sessions))
        .route("/reminders/{id}", delete(delete_reminder))
        .route("/reminders/{id}/toggle", post(toggle_reminder))
        .route("/calendar", get(calendar))
}
