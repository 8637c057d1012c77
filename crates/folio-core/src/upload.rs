//! Upload validation rules and stored file naming.
//!
//! Shared by the server (authoritative check) and usable by any client that
//! wants to reject a file before sending it.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// Image extensions accepted for uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Audio extensions accepted for uploads.
pub const ALLOWED_AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "ogg", "m4a", "flac", "aac"];

/// Maximum image size in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum audio size in bytes (10 MiB).
pub const MAX_AUDIO_BYTES: u64 = 10 * 1024 * 1024;

/// Length of the random part of stored file names.
pub const RANDOM_NAME_LEN: usize = 16;

/// Public URL prefix under which stored files are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// What the admin is uploading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    /// Avatar or project image.
    Image,
    /// Background music file.
    Audio,
    /// Site logo.
    Logo,
}

impl FromStr for UploadKind {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "audio" => Ok(Self::Audio),
            "logo" => Ok(Self::Logo),
            other => Err(UploadError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Audio => write!(f, "audio"),
            Self::Logo => write!(f, "logo"),
        }
    }
}

/// Lowercased extension after the last dot, or empty.
#[must_use]
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Check an upload against the rules for `kind`.
///
/// Returns the normalized extension on success. Checks run in order: MIME
/// family for the kind, extension allow-list for the detected family, size.
pub fn validate_upload(
    kind: UploadKind,
    filename: &str,
    mime: &str,
    size: u64,
) -> Result<String, UploadError> {
    let extension = file_extension(filename);
    let is_image = mime.starts_with("image/");
    let is_audio = mime.starts_with("audio/");

    match kind {
        UploadKind::Logo if !is_image => return Err(UploadError::LogoNotImage),
        UploadKind::Audio if !is_audio => return Err(UploadError::NotAudio),
        UploadKind::Image if !is_image => return Err(UploadError::NotImage),
        _ => {}
    }

    if is_image && !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::InvalidExtension {
            family: "image",
            allowed: ALLOWED_IMAGE_EXTENSIONS.join(", "),
        });
    }
    if is_audio && !ALLOWED_AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::InvalidExtension {
            family: "audio",
            allowed: ALLOWED_AUDIO_EXTENSIONS.join(", "),
        });
    }

    let limit = if is_image {
        MAX_IMAGE_BYTES
    } else {
        MAX_AUDIO_BYTES
    };
    if size > limit {
        return Err(UploadError::TooLarge {
            limit_mb: limit / (1024 * 1024),
        });
    }

    Ok(extension)
}

/// Name under which an upload is stored.
///
/// Logos get `logo_<unix millis>.<ext>`; everything else gets the random
/// alphanumeric `token` (trimmed to [`RANDOM_NAME_LEN`]).
#[must_use]
pub fn stored_filename(kind: UploadKind, extension: &str, now: DateTime<Utc>, token: &str) -> String {
    match kind {
        UploadKind::Logo => format!("logo_{}.{extension}", now.timestamp_millis()),
        UploadKind::Image | UploadKind::Audio => {
            let random: String = token
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(RANDOM_NAME_LEN)
                .collect();
            format!("{random}.{extension}")
        }
    }
}

/// Public URL for a stored file name.
#[must_use]
pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("image".parse::<UploadKind>().unwrap(), UploadKind::Image);
        assert_eq!(" Audio ".parse::<UploadKind>().unwrap(), UploadKind::Audio);
        assert_eq!("logo".parse::<UploadKind>().unwrap(), UploadKind::Logo);
        assert_eq!(
            "video".parse::<UploadKind>().unwrap_err(),
            UploadError::UnknownKind("video".to_string())
        );
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_extension("Cover.JPG"), "jpg");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "");
    }

    #[test]
    fn test_valid_uploads() {
        assert_eq!(
            validate_upload(UploadKind::Image, "a.png", "image/png", 1024).unwrap(),
            "png"
        );
        assert_eq!(
            validate_upload(UploadKind::Audio, "song.MP3", "audio/mpeg", MAX_AUDIO_BYTES).unwrap(),
            "mp3"
        );
        assert_eq!(
            validate_upload(UploadKind::Logo, "logo.svg", "image/svg+xml", 10).unwrap(),
            "svg"
        );
    }

    #[test]
    fn test_mime_mismatch() {
        assert_eq!(
            validate_upload(UploadKind::Logo, "logo.mp3", "audio/mpeg", 10).unwrap_err(),
            UploadError::LogoNotImage
        );
        assert_eq!(
            validate_upload(UploadKind::Audio, "a.png", "image/png", 10).unwrap_err(),
            UploadError::NotAudio
        );
        assert_eq!(
            validate_upload(UploadKind::Image, "a.txt", "text/plain", 10).unwrap_err(),
            UploadError::NotImage
        );
    }

    #[test]
    fn test_extension_not_allowed() {
        let err = validate_upload(UploadKind::Image, "a.bmp", "image/bmp", 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid image format. Allowed: jpg, jpeg, png, gif, webp, svg"
        );
        assert!(matches!(
            validate_upload(UploadKind::Audio, "a.opus", "audio/opus", 10),
            Err(UploadError::InvalidExtension { family: "audio", .. })
        ));
    }

    #[test]
    fn test_size_limits() {
        assert_eq!(
            validate_upload(UploadKind::Image, "a.jpg", "image/jpeg", MAX_IMAGE_BYTES + 1)
                .unwrap_err(),
            UploadError::TooLarge { limit_mb: 5 }
        );
        assert_eq!(
            validate_upload(UploadKind::Audio, "a.wav", "audio/wav", MAX_AUDIO_BYTES + 1)
                .unwrap_err(),
            UploadError::TooLarge { limit_mb: 10 }
        );
    }

    #[test]
    fn test_stored_filenames() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            stored_filename(UploadKind::Logo, "png", now, "ignored"),
            "logo_1700000000123.png"
        );
        assert_eq!(
            stored_filename(
                UploadKind::Image,
                "jpg",
                now,
                "3f2a9c1e-77b0-4d2e-9a51-0c6f1b2d3e4f"
            ),
            "3f2a9c1e77b04d2e.jpg"
        );
        assert_eq!(public_url("a.jpg"), "/uploads/a.jpg");
    }
}
