//! Shared application state.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{Authenticator, SessionAuth};
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::storage::{FileStorage, LocalFileStorage};
use crate::store::PortfolioStore;

/// Ten years; longer lifetimes are clamped.
const MAX_SESSION_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Content persistence.
    pub store: Arc<dyn PortfolioStore>,
    /// Admin sessions.
    pub auth: Arc<dyn Authenticator>,
    /// Upload storage.
    pub files: Arc<dyn FileStorage>,
    /// Session cookie lifetime in seconds.
    pub session_ttl_secs: i64,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
}

impl AppState {
    /// Wire up the production collaborators from config.
    pub fn from_config(config: &ServerConfig, store: Arc<dyn PortfolioStore>) -> Self {
        let ttl_secs = i64::try_from(config.session_ttl_secs)
            .unwrap_or(MAX_SESSION_TTL_SECS)
            .min(MAX_SESSION_TTL_SECS);
        Self {
            store,
            auth: Arc::new(SessionAuth::new(
                &config.admin_email,
                &config.admin_password,
                Duration::seconds(ttl_secs),
            )),
            files: Arc::new(LocalFileStorage::new(&config.uploads_directory)),
            session_ttl_secs: ttl_secs,
            secure_cookies: config.secure_cookies,
        }
    }
}

impl AppState {
    /// Run a store operation on the blocking pool.
    pub async fn run_store<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn PortfolioStore) -> folio_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || op(store.as_ref())).await?;
        Ok(result?)
    }

    /// Run a file-storage operation on the blocking pool.
    pub async fn run_files<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn FileStorage) -> folio_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let files = Arc::clone(&self.files);
        let result = tokio::task::spawn_blocking(move || op(files.as_ref())).await?;
        Ok(result?)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("secure_cookies", &self.secure_cookies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::thread;

    use folio_core::{Error, ErrorKind, UploadKind};

    use super::*;
    use crate::auth::MockAuthenticator;
    use crate::storage::MockFileStorage;
    use crate::store::MockPortfolioStore;

    fn state(store: MockPortfolioStore, files: MockFileStorage) -> AppState {
        AppState {
            store: Arc::new(store),
            auth: Arc::new(MockAuthenticator::new()),
            files: Arc::new(files),
            session_ttl_secs: 60,
            secure_cookies: false,
        }
    }

    #[tokio::test]
    async fn test_store_calls_leave_the_async_thread() {
        let caller = thread::current().id();
        let mut store = MockPortfolioStore::new();
        store.expect_list_projects().returning(move || {
            assert_ne!(thread::current().id(), caller);
            Ok(Vec::new())
        });

        let projects = state(store, MockFileStorage::new())
            .run_store(|store| store.list_projects())
            .await
            .unwrap();
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_file_calls_leave_the_async_thread() {
        let caller = thread::current().id();
        let mut files = MockFileStorage::new();
        files.expect_store().returning(move |_, _, _, _| {
            assert_ne!(thread::current().id(), caller);
            Ok("/uploads/a.png".to_string())
        });

        let url = state(MockPortfolioStore::new(), files)
            .run_files(|files| files.store(UploadKind::Image, "a.png", "image/png", b"png"))
            .await
            .unwrap();
        assert_eq!(url, "/uploads/a.png");
    }

    #[tokio::test]
    async fn test_store_errors_keep_their_kind() {
        let mut store = MockPortfolioStore::new();
        store
            .expect_get_project()
            .returning(|id| Err(Error::project_not_found(id)));

        let err = state(store, MockFileStorage::new())
            .run_store(|store| store.get_project("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_panicking_store_is_internal_error() {
        let mut store = MockPortfolioStore::new();
        store
            .expect_get_profile()
            .returning(|| panic!("connection lost"));

        let err = state(store, MockFileStorage::new())
            .run_store(|store| store.get_profile())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.message(), "Internal server error");
    }
}
