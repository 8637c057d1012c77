//! `Folio` HTTP server.
//!
//! Serves the public content API, the session-protected admin API, uploaded
//! files and the built site bundle. Domain rules live in `folio-core`; this
//! crate supplies persistence ([`store`]), authentication ([`auth`]) and
//! file storage ([`storage`]) behind traits so the routes can be tested with
//! mocks.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;

pub use auth::{AdminSession, Authenticator, Session, SessionAuth};
pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use logging::{LoggingConfig, LoggingGuard, LoggingSettings};
pub use routes::router;
pub use state::AppState;
pub use storage::{FileStorage, LocalFileStorage};
pub use store::{PortfolioStore, SqliteStore};
