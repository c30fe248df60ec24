//! Tag browser routes

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::{store, ApiResult};
use crate::tags::{TagIndex, TaggedItem};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

fn build_index(state: &AppState) -> ApiResult<TagIndex> {
    let store = store(state)?;
    let data = store.data();
    Ok(TagIndex::build(&data.courses, &data.reminders, &data.notes))
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TagCount>>> {
    let index = build_index(&state)?;
    Ok(Json(
        index
            .counts()
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect(),
    ))
}

/// GET /api/tags/{tag}
/// Courses, reminders and notes carrying the tag
pub async fn tagged_items(State(state): State<AppState>, Path(tag): Path<String>) -> ApiResult<Json<Vec<TaggedItem>>> {
    let index = build_index(&state)?;
    Ok(Json(index.items(&tag).to_vec()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags))
        .route("/tags/{tag}", get(tagged_items))
}
