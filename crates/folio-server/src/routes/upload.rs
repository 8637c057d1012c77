//! Multipart file upload for images, audio and the logo.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use folio_core::{MAX_AUDIO_BYTES, UploadError, UploadKind};
use serde_json::{Value, json};
use tracing::debug;

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::state::AppState;

/// Largest file plus room for multipart framing and the other fields.
const BODY_LIMIT: usize = MAX_AUDIO_BYTES as usize + 64 * 1024;

struct FilePart {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

/// Form fields: `file` (required) and `fileType` (`image`, `audio` or
/// `logo`, default `image`). Responds with `{"url": "/uploads/<name>"}`.
async fn upload(
    _admin: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file = None;
    let mut kind = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?.to_vec();
                file = Some(FilePart {
                    filename,
                    mime,
                    bytes,
                });
            }
            Some("fileType") => {
                let raw = field.text().await?;
                kind = Some(raw.parse::<UploadKind>()?);
            }
            other => debug!("Ignoring form field {:?}", other),
        }
    }

    let file = file
        .filter(|f| !f.bytes.is_empty() || !f.filename.is_empty())
        .ok_or(UploadError::MissingFile)?;
    let kind = kind.unwrap_or(UploadKind::Image);

    let url = state
        .run_files(move |files| files.store(kind, &file.filename, &file.mime, &file.bytes))
        .await?;
    Ok(Json(json!({ "url": url })))
}
