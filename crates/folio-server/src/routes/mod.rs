//! HTTP routes.
//!
//! - `/api/...` JSON endpoints (public content, session, admin, upload)
//! - `/uploads/...` stored files
//! - everything else is the site bundle, with `index.html` as SPA fallback

mod admin;
mod content;
mod session;
mod upload;

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::state::AppState;

/// JSON API routes without state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::routes())
        .merge(session::routes())
        .merge(admin::routes())
        .merge(upload::routes())
}

/// Full application router.
pub fn router(state: AppState, uploads_dir: &Path, site_dir: Option<&Path>) -> Router {
    let mut app = api_routes().nest_service("/uploads", ServeDir::new(uploads_dir));

    match site_dir {
        Some(dir) if dir.join("index.html").exists() => {
            info!("Serving site bundle from {}", dir.display());
            let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            app = app.fallback_service(spa);
        }
        Some(dir) => warn!(
            "Site directory {} has no index.html, serving the API only",
            dir.display()
        ),
        None => info!("No site directory configured, serving the API only"),
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
