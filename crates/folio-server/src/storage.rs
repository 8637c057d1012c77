//! Upload storage.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use folio_core::{Error, Result, UploadKind, public_url, stored_filename, validate_upload};
use tracing::info;
use uuid::Uuid;

/// File storage collaborator for uploads.
#[cfg_attr(test, mockall::automock)]
pub trait FileStorage: Send + Sync {
    /// Validate and persist an upload, returning its public URL.
    fn store(&self, kind: UploadKind, filename: &str, mime: &str, bytes: &[u8]) -> Result<String>;
}

/// Stores uploads as flat files in one directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Storage rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Upload directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| Error::FileSystem {
                path: self.root.clone(),
                message: format!("Failed to create upload directory: {e}"),
            })?;
        }
        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn store(&self, kind: UploadKind, filename: &str, mime: &str, bytes: &[u8]) -> Result<String> {
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        let extension = validate_upload(kind, filename, mime, size)?;

        self.ensure_root()?;
        let token = Uuid::new_v4().simple().to_string();
        let name = stored_filename(kind, &extension, Utc::now(), &token);
        let path = self.root.join(&name);

        fs::write(&path, bytes).map_err(|e| Error::FileSystem {
            path: path.clone(),
            message: format!("Failed to write upload: {e}"),
        })?;

        info!("Stored {} upload {} ({} bytes)", kind, name, bytes.len());
        Ok(public_url(&name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use folio_core::{ErrorKind, MAX_IMAGE_BYTES};

    use super::*;

    #[test]
    fn test_store_image() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let url = storage
            .store(UploadKind::Image, "Holiday.PNG", "image/png", b"\x89PNG")
            .unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));
        let name = url.trim_start_matches("/uploads/");
        assert_eq!(name.len(), 16 + ".png".len());
        assert_eq!(fs::read(storage.root().join(name)).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_store_logo_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        let url = storage
            .store(UploadKind::Logo, "brand.svg", "image/svg+xml", b"<svg/>")
            .unwrap();
        assert!(url.starts_with("/uploads/logo_"));
        assert!(url.ends_with(".svg"));
    }

    #[test]
    fn test_rejected_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        let err = storage
            .store(UploadKind::Audio, "song.mp3", "image/png", b"x")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!storage.root().exists());
    }

    #[test]
    fn test_oversized_image() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        let big = vec![0_u8; usize::try_from(MAX_IMAGE_BYTES).unwrap() + 1];

        let err = storage
            .store(UploadKind::Image, "big.jpg", "image/jpeg", &big)
            .unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds 5MB limit.");
    }
}
