//! Light/dark theme switch.
//!
//! The choice is kept in `localStorage` under `darkMode`; without a stored
//! choice the system color scheme decides.

use leptos::prelude::*;

const STORAGE_KEY: &str = "darkMode";

/// Dark mode from the stored choice, falling back to the system preference.
fn resolve_dark(stored: Option<&str>, prefers_dark: bool) -> bool {
    match stored {
        Some("true") => true,
        Some("false") => false,
        _ => prefers_dark,
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches())
}

fn apply_theme(dark: bool) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let result = if dark {
        root.set_attribute("data-theme", "dark")
    } else {
        root.remove_attribute("data-theme")
    };
    if let Err(e) = result {
        leptos::logging::warn!("Could not switch theme: {:?}", e);
    }
}

/// Round button switching between the light and dark palettes.
#[component]
pub fn DarkModeToggle() -> impl IntoView {
    let stored = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    let (is_dark, set_is_dark) = signal(resolve_dark(stored.as_deref(), system_prefers_dark()));

    Effect::new(move |_| apply_theme(is_dark.get()));

    let toggle = move |_| {
        let next = !is_dark.get_untracked();
        if let Some(storage) = storage()
            && let Err(e) = storage.set_item(STORAGE_KEY, &next.to_string())
        {
            leptos::logging::warn!("Could not store theme choice: {:?}", e);
        }
        set_is_dark.set(next);
    };

    let label = move || if is_dark.get() { "Light mode" } else { "Dark mode" };

    view! {
        <button
            class="theme-toggle"
            class:dark=move || is_dark.get()
            on:click=toggle
            aria-label="Toggle dark mode"
            title=label
            data-testid="theme-toggle"
        >
            <svg class="theme-icon sun" viewBox="0 0 20 20" width="20" height="20" fill="currentColor">
                <path d="M10 2a1 1 0 011 1v1a1 1 0 11-2 0V3a1 1 0 011-1zm4 8a4 4 0 11-8 0 4 4 0 018 0zm-.46 4.54l.7.7a1 1 0 001.42-1.41l-.71-.71a1 1 0 00-1.41 1.42zm2.82-9.9a1 1 0 010 1.42l-.7.7a1 1 0 11-1.42-1.41l.71-.71a1 1 0 011.41 0zM18 10a1 1 0 01-1 1h-1a1 1 0 110-2h1a1 1 0 011 1zM5.05 6.46a1 1 0 001.41-1.41l-.7-.71a1 1 0 00-1.42 1.42l.71.7zM5 10a1 1 0 01-1 1H3a1 1 0 110-2h1a1 1 0 011 1zm1.46 3.95a1 1 0 00-1.41 0l-.71.7a1 1 0 101.42 1.42l.7-.71a1 1 0 000-1.41zM10 16a1 1 0 011 1v1a1 1 0 11-2 0v-1a1 1 0 011-1z"/>
            </svg>
            <svg class="theme-icon moon" viewBox="0 0 20 20" width="20" height="20" fill="currentColor">
                <path d="M17.29 13.29A8 8 0 016.71 2.71a8 8 0 1010.58 10.58z"/>
            </svg>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_choice_wins() {
        assert!(resolve_dark(Some("true"), false));
        assert!(!resolve_dark(Some("false"), true));
    }

    #[test]
    fn test_system_preference_without_choice() {
        assert!(resolve_dark(None, true));
        assert!(!resolve_dark(None, false));
        assert!(resolve_dark(Some("garbage"), true));
    }
}
