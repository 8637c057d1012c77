//! Folio - personal portfolio server.
//!
//! Entry point: load config, start logging, open the database and serve.

use std::process::ExitCode;
use std::sync::Arc;

use folio_server::{AppState, LoggingConfig, ServerConfig, SqliteStore, logging, router};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_environment() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("folio: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match logging::init(&LoggingConfig::from_settings(&config.logging)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("folio: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server stopped: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Folio server");
    info!("Database: {}", config.database_path.display());
    info!("Uploads directory: {}", config.uploads_directory.display());

    let store = Arc::new(SqliteStore::open(&config.database_path)?);
    let state = AppState::from_config(&config, store);
    let app = router(
        state,
        &config.uploads_directory,
        config.site_directory.as_deref(),
    );

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
