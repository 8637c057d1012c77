//! Public read-only content.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use folio_core::{Error, Profile, Project};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/profile", get(get_profile))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The profile, or `null` before one is saved.
async fn get_profile(State(state): State<AppState>) -> Result<Json<Option<Profile>>, ApiError> {
    Ok(Json(state.run_store(|store| store.get_profile()).await?))
}

/// All projects, newest first.
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.run_store(|store| store.list_projects()).await?))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let lookup = id.clone();
    state
        .run_store(move |store| store.get_project(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| Error::project_not_found(id).into())
}
