//! Admin content editing. Every handler requires an [`AdminSession`].

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{post, put},
};
use folio_core::{Profile, ProfileUpdate, Project, ProjectInput};
use serde_json::{Value, json};
use tracing::info;

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/profile", put(update_profile))
        .route("/api/admin/projects", post(create_project))
        .route(
            "/api/admin/projects/{id}",
            put(update_project).delete(delete_project),
        )
}

async fn update_profile(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Json(update) = payload?;
    let update = update.normalize()?;
    let profile = state
        .run_store(move |store| store.upsert_profile(update))
        .await?;
    Ok(Json(profile))
}

async fn create_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(input) = payload?;
    let input = input.validate()?;
    let project = state
        .run_store(move |store| store.create_project(input))
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn update_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let Json(input) = payload?;
    let input = input.validate()?;
    let project = state
        .run_store(move |store| store.update_project(&id, input))
        .await?;
    Ok(Json(project))
}

async fn delete_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let target = id.clone();
    state
        .run_store(move |store| store.delete_project(&target))
        .await?;
    info!("Project {} deleted by admin", id);
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, header};
    use chrono::Utc;
    use folio_core::Error;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::MockAuthenticator;
    use crate::storage::MockFileStorage;
    use crate::store::MockPortfolioStore;

    fn state(store: MockPortfolioStore, authorized: bool) -> AppState {
        let mut auth = MockAuthenticator::new();
        auth.expect_is_authenticated().return_const(authorized);
        AppState {
            store: Arc::new(store),
            auth: Arc::new(auth),
            files: Arc::new(MockFileStorage::new()),
            session_ttl_secs: 3600,
            secure_cookies: false,
        }
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer t0k")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_never_touches_store() {
        // no expectations: any store call would panic
        let app = routes().with_state(state(MockPortfolioStore::new(), false));

        let response = app
            .oneshot(request("DELETE", "/api/admin/projects/p1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_validates_before_store() {
        let app = routes().with_state(state(MockPortfolioStore::new(), true));

        let response = app
            .oneshot(request(
                "POST",
                "/api/admin/projects",
                r#"{"title":"  ","description":"x"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_passes_trimmed_input() {
        let mut store = MockPortfolioStore::new();
        store
            .expect_create_project()
            .withf(|input| input.title == "Folio" && input.image.is_none())
            .times(1)
            .returning(|input| Ok(Project::new("p1", input, Utc::now())));
        let app = routes().with_state(state(store, true));

        let response = app
            .oneshot(request(
                "POST",
                "/api/admin/projects",
                r#"{"title":" Folio ","description":"Site","image":""}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_update_missing_project_is_404() {
        let mut store = MockPortfolioStore::new();
        store
            .expect_update_project()
            .withf(|id, _| id == "ghost")
            .returning(|id, _| Err(Error::project_not_found(id)));
        let app = routes().with_state(state(store, true));

        let response = app
            .oneshot(request(
                "PUT",
                "/api/admin/projects/ghost",
                r#"{"title":"T","description":"D"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let mut store = MockPortfolioStore::new();
        store
            .expect_upsert_profile()
            .returning(|_| Err(Error::storage("database is locked")));
        let app = routes().with_state(state(store, true));

        let response = app
            .oneshot(request(
                "PUT",
                "/api/admin/profile",
                r#"{"name":"Linh","email":"linh@example.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = routes().with_state(state(MockPortfolioStore::new(), true));

        let response = app
            .oneshot(request("PUT", "/api/admin/profile", "{oops"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
