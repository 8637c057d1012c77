//! Error types for Folio core operations.
//!
//! Media resolution and image classification never fail: they degrade to a
//! silent player or a placeholder. Errors here belong to the content side
//! (form validation, uploads, persistence, authentication).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error category, used to pick an HTTP status or a UI message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input was rejected before anything was stored.
    Validation,
    /// The requested record does not exist.
    NotFound,
    /// No valid admin session.
    Unauthorized,
    /// Backend (database, disk) failure.
    Internal,
}

/// Reasons an uploaded file is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No file part was sent.
    #[error("No file provided")]
    MissingFile,

    /// The `fileType` field is not one of image, audio or logo.
    #[error("Unknown upload type: {0}")]
    UnknownKind(String),

    /// A logo upload whose MIME type is not an image.
    #[error("Logo must be an image file")]
    LogoNotImage,

    /// An audio upload whose MIME type is not audio.
    #[error("File must be an audio file (mp3, wav, ogg, m4a, flac, aac)")]
    NotAudio,

    /// An image upload whose MIME type is not an image.
    #[error("File must be an image file (jpg, png, gif, webp, svg)")]
    NotImage,

    /// Extension outside the allow-list for the media family.
    #[error("Invalid {family} format. Allowed: {allowed}")]
    InvalidExtension {
        /// "image" or "audio".
        family: &'static str,
        /// Comma separated list of accepted extensions.
        allowed: String,
    },

    /// File exceeds the size limit for its family.
    #[error("File size exceeds {limit_mb}MB limit.")]
    TooLarge {
        /// Limit in mebibytes.
        limit_mb: u64,
    },
}

/// Errors that can occur in Folio core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// Upload rejected.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record ("Project", "Profile").
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Missing or expired admin session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Persistence backend failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// File system operation failed.
    #[error("File system error at {path}: {message}")]
    FileSystem {
        /// Path where the error occurred.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a not-found error for a project id.
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Project",
            id: id.into(),
        }
    }

    /// Build a storage error from any displayable backend error.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Upload(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Storage(_)
            | Self::FileSystem { .. }
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Whether the message is safe and useful to show to the admin as-is.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Internal)
    }
}
