//! Empty state components for when there is nothing to show.

use leptos::prelude::*;

/// Icon types for empty states.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EmptyStateIcon {
    /// Folder icon (default).
    #[default]
    Folder,
    /// Error/warning icon.
    Error,
}

/// Size variants for empty state displays.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EmptyStateSize {
    /// Small size for inline displays.
    Small,
    /// Medium size (default).
    #[default]
    Medium,
}

impl EmptyStateSize {
    const fn icon_size(&self) -> &'static str {
        match self {
            Self::Small => "40",
            Self::Medium => "64",
        }
    }

    const fn class(&self) -> &'static str {
        match self {
            Self::Small => "empty-state-small",
            Self::Medium => "empty-state-medium",
        }
    }
}

#[component]
fn EmptyStateIconSvg(icon: EmptyStateIcon, size: &'static str) -> impl IntoView {
    match icon {
        EmptyStateIcon::Folder => view! {
            <svg viewBox="0 0 24 24" width=size height=size fill="var(--text-disabled)">
                <path d="M10 4H4c-1.1 0-1.99.9-1.99 2L2 18c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V8c0-1.1-.9-2-2-2h-8l-2-2z"/>
            </svg>
        }.into_any(),
        EmptyStateIcon::Error => view! {
            <svg viewBox="0 0 24 24" width=size height=size fill="var(--accent-error)">
                <path d="M1 21h22L12 2 1 21zm12-3h-2v-2h2v2zm0-4h-2v-4h2v4z"/>
            </svg>
        }.into_any(),
    }
}

/// Base empty state with icon, title and message.
#[component]
pub fn EmptyState(
    /// The icon to display.
    #[prop(default = EmptyStateIcon::Folder)]
    icon: EmptyStateIcon,
    /// The main heading.
    title: &'static str,
    /// The descriptive message.
    #[prop(into)]
    message: String,
    /// Size variant.
    #[prop(default = EmptyStateSize::Medium)]
    size: EmptyStateSize,
) -> impl IntoView {
    let full_class = format!("empty-state {}", size.class());

    view! {
        <div class=full_class data-testid="empty-state">
            <div class="empty-state-icon">
                <EmptyStateIconSvg icon=icon size=size.icon_size() />
            </div>
            <h3 class="empty-state-title">{title}</h3>
            <p class="empty-state-message">{message}</p>
        </div>
    }
}

/// Shown when the owner has not published any project.
#[component]
pub fn NoProjectsEmptyState() -> impl IntoView {
    view! {
        <EmptyState
            title="Nothing here yet"
            message="No projects yet. Check back soon!"
        />
    }
}

/// Shown when the page content could not be loaded.
#[component]
pub fn LoadErrorEmptyState(
    /// The error message to display.
    message: String,
) -> impl IntoView {
    view! {
        <EmptyState
            icon=EmptyStateIcon::Error
            title="Something went wrong"
            message=message
            size=EmptyStateSize::Small
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_size_icon_size() {
        assert_eq!(EmptyStateSize::Small.icon_size(), "40");
        assert_eq!(EmptyStateSize::Medium.icon_size(), "64");
    }

    #[test]
    fn test_empty_state_size_class() {
        assert_eq!(EmptyStateSize::Small.class(), "empty-state-small");
        assert_eq!(EmptyStateSize::Medium.class(), "empty-state-medium");
    }
}
