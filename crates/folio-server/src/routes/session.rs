//! Admin login and logout.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{clear_session_cookie, session_cookie, session_token};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(session_status))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(credentials) = payload?;
    let session = state
        .auth
        .login(&credentials.email, &credentials.password)
        .ok_or_else(ApiError::unauthorized)?;

    let cookie = session_cookie(&session.token, state.session_ttl_secs, state.secure_cookies);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "success": true,
            "token": session.token,
            "expiresAt": session.expires_at,
        })),
    ))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.auth.logout(&token);
    }
    (
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        Json(json!({ "success": true })),
    )
}

async fn session_status(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let authenticated =
        session_token(&headers).is_some_and(|token| state.auth.is_authenticated(&token));
    Json(json!({ "authenticated": authenticated }))
}
