//! Server configuration.
//!
//! Settings come from a JSON file (`FOLIO_CONFIG`, or `folio/config.json`
//! under the platform config directory) and are then overridden by
//! environment variables. Missing files fall back to defaults.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::logging::LoggingSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Thirty days, matching a typical remember-me session.
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

const fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

/// Everything the server needs to start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Where uploaded files are written and served from.
    pub uploads_directory: PathBuf,
    /// Built front-end bundle; `None` serves the API only.
    pub site_directory: Option<PathBuf>,
    /// Admin login email.
    pub admin_email: String,
    /// Admin login password.
    pub admin_password: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Mark the session cookie `Secure` (serve over HTTPS).
    pub secure_cookies: bool,
    /// Logging options.
    pub logging: LoggingSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let data_dir = default_data_directory();
        Self {
            bind_address: default_bind_address(),
            database_path: data_dir.join("folio.db"),
            uploads_directory: data_dir.join("uploads"),
            site_directory: Some(PathBuf::from("dist")),
            admin_email: String::new(),
            admin_password: String::new(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            secure_cookies: false,
            logging: LoggingSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `path`, or defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileSystem {
            path: path.to_path_buf(),
            message: format!("Failed to read config file: {e}"),
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {e}")))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file named by `FOLIO_CONFIG` (or the default location),
    /// apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the result is invalid.
    pub fn from_environment() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV).map_or_else(config_file_path, PathBuf::from);
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Recognized keys: `FOLIO_BIND`, `DATABASE_URL`, `FOLIO_UPLOADS_DIR`,
    /// `FOLIO_SITE_DIR`, `ADMIN_EMAIL`, `ADMIN_PASSWORD`. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("FOLIO_BIND") {
            self.bind_address = bind;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database_path = PathBuf::from(strip_sqlite_scheme(&url));
        }
        if let Some(dir) = get("FOLIO_UPLOADS_DIR") {
            self.uploads_directory = PathBuf::from(dir);
        }
        if let Some(dir) = get("FOLIO_SITE_DIR") {
            self.site_directory = Some(PathBuf::from(dir));
        }
        if let Some(email) = get("ADMIN_EMAIL") {
            self.admin_email = email;
        }
        if let Some(password) = get("ADMIN_PASSWORD") {
            self.admin_password = password;
        }
    }

    /// Check the settings can actually run a server.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.admin_email.trim().is_empty() || self.admin_password.is_empty() {
            return Err(Error::Configuration(
                "Admin credentials are not set (ADMIN_EMAIL / ADMIN_PASSWORD)".to_string(),
            ));
        }
        if self.session_ttl_secs == 0 {
            return Err(Error::Configuration(
                "session_ttl_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the address does not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            Error::Configuration(format!("Invalid bind address {}: {e}", self.bind_address))
        })
    }
}

/// `file:./dev.db` and `sqlite://x.db` style URLs become plain paths.
fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url)
}

/// Default config file location.
#[must_use]
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join("config.json")
}

/// Default directory for the database and uploads.
#[must_use]
pub fn default_data_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}
