//! Analytics and weekly report routes

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;

use super::{store, ApiResult};
use crate::ai::WeeklyStats;
use crate::analytics::{overview, weekly_stats, AnalyticsOverview};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WeeklyReport {
    pub stats: WeeklyStats,
    pub report: String,
}

/// GET /api/analytics
pub async fn analytics(State(state): State<AppState>) -> ApiResult<Json<AnalyticsOverview>> {
    let store = store(&state)?;
    let data = store.data();
    let now = Local::now();
    let progress = data.progress(&now);
    Ok(Json(overview(
        &data.pomodoro_sessions,
        &data.courses,
        &data.gamification,
        &progress,
        &now,
    )))
}

/// POST /api/analytics/report
/// AI weekly review of the last seven days
pub async fn weekly_report(State(state): State<AppState>) -> ApiResult<Json<WeeklyReport>> {
    let stats = {
        let store = store(&state)?;
        let data = store.data();
        weekly_stats(&data.pomodoro_sessions, &data.tasks, &data.gamification, &Local::now())
    };
    let report = state.assistant.weekly_report(&stats).await?;
    Ok(Json(WeeklyReport { stats, report }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(analytics))
        .route("/analytics/report", post(weekly_report))
}
