//! View-model types for the public page.

use folio_core::{Profile, Project, partition_featured, sort_newest_first};
use serde::{Deserialize, Serialize};

// =============================================================================
// Page content
// =============================================================================

/// Everything the public page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteContent {
    /// Owner profile, if one exists.
    pub profile: Option<Profile>,
    /// Featured projects, newest first.
    pub featured: Vec<Project>,
    /// Remaining projects, newest first.
    pub others: Vec<Project>,
}

impl SiteContent {
    /// Arrange fetched content for display.
    #[must_use]
    pub fn new(profile: Option<Profile>, mut projects: Vec<Project>) -> Self {
        sort_newest_first(&mut projects);
        let (featured, others) = partition_featured(projects);
        Self {
            profile,
            featured,
            others,
        }
    }

    /// Whether there are no projects at all.
    #[must_use]
    pub fn has_no_projects(&self) -> bool {
        self.featured.is_empty() && self.others.is_empty()
    }

    /// Page title: the owner's name, or the product name.
    #[must_use]
    pub fn site_title(&self) -> String {
        self.profile
            .as_ref()
            .map_or_else(|| "Portfolio".to_string(), |p| p.name.clone())
    }

    /// Background music URL and its enabled flag.
    #[must_use]
    pub fn music(&self) -> (Option<String>, bool) {
        self.profile.as_ref().map_or((None, false), |p| {
            (p.background_music.clone(), p.enable_background_music)
        })
    }
}

/// Loading state of the page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Request in flight.
    #[default]
    Loading,
    /// Content loaded.
    Loaded,
    /// Request failed.
    Error,
}

// =============================================================================
// Notification Types
// =============================================================================

/// Type of notification to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NotificationType {
    /// Informational message.
    #[default]
    Info,
    /// Error message.
    Error,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique identifier for this notification.
    pub id: u64,
    /// The notification type.
    pub notification_type: NotificationType,
    /// The message to display.
    pub message: String,
    /// Milliseconds before auto-dismiss.
    pub duration_ms: u32,
}

impl Notification {
    /// Create a notification with a unique ID.
    #[must_use]
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);

        Self {
            id: COUNTER.fetch_add(1, Ordering::Relaxed),
            notification_type,
            message: message.into(),
            duration_ms: 5000,
        }
    }

    /// Create an info notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationType::Info, message)
    }

    /// Create an error notification. Errors stay longer.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        let mut notification = Self::new(NotificationType::Error, message);
        notification.duration_ms = 8000;
        notification
    }
}
