//! Course roadmap routes, including AI study plans

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::{dispatch, store, ApiError, ApiResult};
use crate::notes::normalize_tags;
use crate::roadmap::{find_course, Course, CourseSummary, Resource};
use crate::store::{Action, ActionOutput};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub subject: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub skill: String,
}

/// GET /api/courses
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<CourseSummary>>> {
    let store = store(&state)?;
    Ok(Json(store.data().courses.iter().map(CourseSummary::from).collect()))
}

/// GET /api/courses/{course_id}
pub async fn get_course(State(state): State<AppState>, Path(course_id): Path<Uuid>) -> ApiResult<Json<Course>> {
    let store = store(&state)?;
    Ok(Json(find_course(&store.data().courses, course_id)?.clone()))
}

/// POST /api/courses/{course_id}/topics/{topic_id}/toggle
pub async fn toggle_topic(
    State(state): State<AppState>,
    Path((course_id, topic_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::ToggleTopic { course_id, topic_id })
}

/// DELETE /api/courses/{course_id}
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> ApiResult<Json<ActionOutput>> {
    dispatch(&state, Action::DeleteCourse(course_id))
}

/// POST /api/courses/generate
/// Ask the assistant for a study plan and add it as a course
pub async fn generate_course(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> ApiResult<Json<ActionOutput>> {
    let subject = request.subject.trim();
    if subject.is_empty() {
        return Err(ApiError::BadRequest("Subject is required".to_string()));
    }

    let plan = state.assistant.generate_study_plan(subject).await?;
    log::info!("Generated study plan '{}' with {} phases", plan.course_name, plan.phases.len());
    dispatch(
        &state,
        Action::AddCourseFromPlan {
            plan,
            tags: normalize_tags(request.tags),
        },
    )
}

/// POST /api/resources
/// Learning resources for a prerequisite skill
pub async fn prerequisite_resources(
    State(state): State<AppState>,
    Json(request): Json<SkillRequest>,
) -> ApiResult<Json<Vec<Resource>>> {
    let skill = request.skill.trim();
    if skill.is_empty() {
        return Err(ApiError::BadRequest("Skill is required".to_string()));
    }
    Ok(Json(state.assistant.prerequisite_resources(skill).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/generate", post(generate_course))
        .route("/courses/{course_id}", get(get_course).delete(delete_course))
        .route("/courses/{course_id}/topics/{topic_id}/toggle", post(toggle_topic))
        .route("/resources", post(prerequisite_resources))
}
