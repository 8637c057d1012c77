//! Structured logging using tracing.
//!
//! The console layer is always on. A JSON file layer with rotation is added
//! when a log directory is configured, which is the default outside tests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Crates whose events are shown at the configured level.
const OWN_TARGETS: [&str; 3] = ["folio", "folio_server", "folio_core"];

/// Logging preset selected in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogProfile {
    /// Development in debug builds, production in release builds.
    #[default]
    Auto,
    /// Verbose console, hourly files.
    Development,
    /// Quiet console, daily files.
    Production,
}

/// Log rotation frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogRotation {
    /// New file every hour.
    Hourly,
    /// New file every day.
    #[default]
    Daily,
    /// Single file.
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

/// Resolved logging options.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Where rotated JSON logs go; `None` disables file output.
    pub log_directory: Option<PathBuf>,
    /// Log file name prefix ("folio" -> "folio.2024-01-15").
    pub log_file_prefix: String,
    /// Level for our own crates on the console.
    pub console_level: Level,
    /// Level for our own crates in the file.
    pub file_level: Level,
    /// File rotation.
    pub rotation: LogRotation,
    /// Emit ANSI colors on the console.
    pub console_ansi: bool,
    /// Include source file and line.
    pub include_file_line: bool,
    /// Log span open/close events (request spans).
    pub log_span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose settings for local work.
    #[must_use]
    pub fn development() -> Self {
        Self {
            log_directory: Some(default_log_directory()),
            log_file_prefix: "folio".to_string(),
            console_level: Level::DEBUG,
            file_level: Level::TRACE,
            rotation: LogRotation::Hourly,
            console_ansi: true,
            include_file_line: true,
            log_span_events: true,
        }
    }

    /// Settings for a deployed server.
    #[must_use]
    pub fn production() -> Self {
        Self {
            log_directory: Some(default_log_directory()),
            log_file_prefix: "folio".to_string(),
            console_level: Level::INFO,
            file_level: Level::DEBUG,
            rotation: LogRotation::Daily,
            console_ansi: false,
            include_file_line: false,
            log_span_events: false,
        }
    }

    /// Pick a preset from the build type.
    #[must_use]
    pub fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Build from the `logging` section of the server config.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        let mut config = match settings.profile {
            LogProfile::Auto => Self::auto(),
            LogProfile::Development => Self::development(),
            LogProfile::Production => Self::production(),
        };
        if let Some(rotation) = settings.rotation {
            config.rotation = rotation;
        }
        config.log_directory = if settings.file_output {
            Some(
                settings
                    .directory
                    .clone()
                    .unwrap_or_else(default_log_directory),
            )
        } else {
            None
        };
        config
    }

    /// Turn file output off.
    #[must_use]
    pub fn without_file_output(mut self) -> Self {
        self.log_directory = None;
        self
    }

    /// Set the console level.
    #[must_use]
    pub const fn with_console_level(mut self, level: Level) -> Self {
        self.console_level = level;
        self
    }
}

/// The `logging` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct LoggingSettings {
    /// Preset.
    pub profile: LogProfile,
    /// Write rotated JSON logs.
    pub file_output: bool,
    /// Override the log directory.
    pub directory: Option<PathBuf>,
    /// Override the preset's rotation.
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            profile: LogProfile::Auto,
            file_output: true,
            directory: None,
            rotation: None,
        }
    }
}

/// Keeps the file writer alive. Dropping it flushes pending entries.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the console filter.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let span_events = if config.log_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config.console_level)));

    let console_layer = fmt::layer()
        .with_ansi(config.console_ansi)
        .with_target(config.include_file_line)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events.clone())
        .with_filter(console_filter);

    let (file_layer, file_guard) = match &config.log_directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).map_err(|e| {
                LoggingError::DirectoryCreationFailed {
                    path: directory.clone(),
                    reason: e.to_string(),
                }
            })?;

            let appender = RollingFileAppender::new(
                config.rotation.into(),
                directory,
                &config.log_file_prefix,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(span_events)
                .json()
                .with_filter(EnvFilter::new(filter_directives(config.file_level)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `~/.local/share/folio/logs` or the platform equivalent.
#[must_use]
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
        .join("logs")
}

/// Dependencies at warn, our crates at `level`.
fn filter_directives(level: Level) -> String {
    let level = level_to_directive(level);
    let mut directives = String::from("warn,tower_http=info");
    for target in OWN_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Errors during logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory {path}: {reason}")]
    DirectoryCreationFailed {
        /// The path that could not be created.
        path: PathBuf,
        /// The reason for the failure.
        reason: String,
    },

    /// A global subscriber was already set.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_production() {
        let config = LoggingConfig::default();
        assert_eq!(config.console_level, Level::INFO);
        assert_eq!(config.rotation, LogRotation::Daily);
        assert!(!config.log_span_events);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.console_level, Level::DEBUG);
        assert_eq!(config.file_level, Level::TRACE);
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert!(config.include_file_line);
    }

    #[test]
    fn test_from_settings_overrides() {
        let settings = LoggingSettings {
            profile: LogProfile::Production,
            file_output: true,
            directory: Some(PathBuf::from("/var/log/folio")),
            rotation: Some(LogRotation::Never),
        };
        let config = LoggingConfig::from_settings(&settings);
        assert_eq!(config.log_directory, Some(PathBuf::from("/var/log/folio")));
        assert_eq!(config.rotation, LogRotation::Never);
        assert_eq!(config.console_level, Level::INFO);
    }

    #[test]
    fn test_file_output_disabled() {
        let settings = LoggingSettings {
            file_output: false,
            ..LoggingSettings::default()
        };
        assert!(LoggingConfig::from_settings(&settings).log_directory.is_none());
        assert!(LoggingConfig::production().without_file_output().log_directory.is_none());
    }

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("folio_core=debug"));
        assert!(directives.contains("folio_server=debug"));
        assert!(directives.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_settings_deserialize_defaults() {
        let settings: LoggingSettings = serde_json::from_str(r#"{"profile":"development"}"#).unwrap();
        assert_eq!(settings.profile, LogProfile::Development);
        assert!(settings.file_output);
        assert!(settings.rotation.is_none());
    }

    #[test]
    fn test_default_log_directory() {
        let dir = default_log_directory();
        assert!(dir.to_string_lossy().contains("folio"));
        assert!(dir.ends_with("logs"));
    }
}
