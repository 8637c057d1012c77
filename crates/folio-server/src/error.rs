//! HTTP error mapping.

use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_core::{Error, ErrorKind, UploadError};
use serde::Serialize;
use tracing::{error, warn};

/// Body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Message for the caller.
    pub error: String,
    /// Error category for programmatic handling.
    pub kind: ErrorKind,
}

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Missing or invalid admin session.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            kind: ErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    /// Rejected input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message sent to the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status for the error category.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let kind = e.kind();
        if e.is_user_facing() {
            warn!("Request rejected [kind={:?}]: {}", kind, e);
            Self {
                kind,
                message: e.to_string(),
            }
        } else {
            // backend details stay in the log
            error!("Request failed [kind={:?}]: {}", kind, e);
            Self {
                kind,
                message: "Internal server error".to_string(),
            }
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        Error::from(e).into()
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        warn!("Malformed upload: {}", e.body_text());
        Self::bad_request("Invalid multipart form data")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        warn!("Malformed JSON body: {}", e.body_text());
        Self::bad_request("Invalid request body")
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        error!("Blocking task failed: {}", e);
        Self {
            kind: ErrorKind::Internal,
            message: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.message,
            kind: self.kind,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(Error::validation("Title is required")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::project_not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(Error::storage("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_facing_message_is_kept() {
        let err = ApiError::from(UploadError::TooLarge { limit_mb: 10 });
        assert_eq!(err.message(), "File size exceeds 10MB limit.");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = ApiError::from(Error::FileSystem {
            path: PathBuf::from("/srv/secret"),
            message: "permission denied".to_string(),
        });
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse {
            error: "Unauthorized".to_string(),
            kind: ErrorKind::Unauthorized,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"Unauthorized","kind":"unauthorized"}"#
        );
    }
}
