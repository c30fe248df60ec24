//! Dashboard routes: daily tasks, focus goal, widget layout and settings

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{dispatch, store, ApiResult};
use crate::dashboard::{daily_goal, DailyGoal, MoveDirection, Task, Widget, WidgetLayout};
use crate::reminders::{upcoming, Reminder};
use crate::settings::{Settings, SettingsUpdate};
use crate::store::{Action, ActionOutput};
use crate::AppState;

const DASHBOARD_UPCOMING: usize = 3;

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub widget: Widget,
    pub direction: MoveDirection,
}

/// Everything the dashboard shows in one response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub layout: WidgetLayout,
    pub daily_goal: DailyGoal,
    pub level: u32,
    pub xp: u32,
    pub tasks: Vec<Task>,
    pub upcoming: Vec<Reminder>,
}

/// GET /api/dashboard
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardView>> {
    let store = store(&state)?;
    let data = store.data();
    Ok(Json(DashboardView {
        layout: data.widget_layout.clone(),
        daily_goal: daily_goal(&data.pomodoro_sessions, data.settings.daily_goal_minutes, &Local::now()),
        level: data.gamification.level,
        xp: data.gamification.xp,
        tasks: data.tasks.clone(),
        upcoming: upcoming(&data.reminders, Utc::now(), DASHBOARD_UPCOMING),
    }))
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(store(&state)?.data().tasks.clone()))
}

/// POST /api/tasks
pub async fn add_task(State(state): State<AppState>, Json(task): Json<NewTask>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::AddTask(task.text))
}

/// POST /api/tasks/{id}/toggle
pub async fn toggle_task(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::ToggleTask(id))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteTask(id))
}

/// POST /api/widgets/move
pub async fn move_widget(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> ApiResult<Json<WidgetLayout>> {
    store(&state)?.dispatch(Action::MoveWidget {
        widget: request.widget,
        direction: request.direction,
    })?;
    Ok(Json(store(&state)?.data().widget_layout.clone()))
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    Ok(Json(store(&state)?.data().settings.clone()))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> ApiResult<Json<Settings>> {
    store(&state)?.dispatch(Action::UpdateSettings(update))?;
    Ok(Json(store(&state)?.data().settings.clone()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/tasks", get(list_tasks).post(add_task))
        .route("/tasks/{id}", delete(delete_task))
        .route("/tasks/{id}/toggle", post(toggle_task))
        .route("/widgets/move", post(move_widget))
        .route("/settings", get(get_settings).put(update_settings))
}
