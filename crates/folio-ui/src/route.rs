//! Client-side routes over the History API.
//!
//! The server answers every unknown path with `index.html`, so deep links and
//! reloads land here and are resolved from `location.pathname`.

use leptos::prelude::*;

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Public portfolio page.
    #[default]
    Home,
    /// Admin sign-in.
    Login,
    /// Profile editor.
    AdminProfile,
    /// Project list with the create form.
    AdminProjects,
    /// Project list with the edit form for one project.
    AdminProject(String),
}

impl Route {
    /// Resolve a path. Unknown paths fall back to the public page.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["admin"] => Self::AdminProfile,
            ["admin", "projects"] => Self::AdminProjects,
            ["admin", "projects", id] => Self::AdminProject(
                urlencoding::decode(id).map_or_else(|_| (*id).to_string(), |id| id.into_owned()),
            ),
            _ => Self::Home,
        }
    }

    /// Path to push for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::AdminProfile => "/admin".to_string(),
            Self::AdminProjects => "/admin/projects".to_string(),
            Self::AdminProject(id) => format!("/admin/projects/{}", urlencoding::encode(id)),
        }
    }
}

/// Top-level view for a route. Project routes share one screen so moving
/// between the list and an edit form keeps the loaded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Public portfolio page.
    Public,
    /// Admin sign-in.
    Login,
    /// Profile editor.
    Profile,
    /// Project list and forms.
    Projects,
}

impl Route {
    /// Screen that renders this route.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        match self {
            Self::Home => Screen::Public,
            Self::Login => Screen::Login,
            Self::AdminProfile => Screen::Profile,
            Self::AdminProjects | Self::AdminProject(_) => Screen::Projects,
        }
    }

    /// Project id for the edit form, if this route has one.
    #[must_use]
    pub fn editing_project(&self) -> Option<String> {
        match self {
            Self::AdminProject(id) => Some(id.clone()),
            _ => None,
        }
    }
}

/// Shared handle to the current route.
#[derive(Clone, Copy)]
pub struct Navigator {
    route: RwSignal<Route>,
}

impl Navigator {
    /// Start at the browser's current location and follow back/forward.
    #[must_use]
    pub fn from_location() -> Self {
        let route = RwSignal::new(Route::parse(&current_path()));

        // the navigator lives as long as the page
        let _popstate = window_event_listener(leptos::ev::popstate, move |_| {
            route.set(Route::parse(&current_path()));
        });

        Self { route }
    }

    /// Current route, tracked.
    #[must_use]
    pub fn current(&self) -> Route {
        self.route.get()
    }

    /// Push `route` onto the history stack and render it.
    pub fn go(&self, route: Route) {
        let path = route.path();
        let pushed = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|history| history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)));
        if let Some(Err(e)) = pushed {
            leptos::logging::warn!("Could not push {}: {:?}", path, e);
        }
        self.route.set(route);
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// The navigator provided at the app root.
#[must_use]
pub fn use_navigator() -> Navigator {
    expect_context::<Navigator>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/admin"), Route::AdminProfile);
        assert_eq!(Route::parse("/admin/"), Route::AdminProfile);
        assert_eq!(Route::parse("/admin/projects"), Route::AdminProjects);
        assert_eq!(
            Route::parse("/admin/projects/3f2a"),
            Route::AdminProject("3f2a".to_string())
        );
    }

    #[test]
    fn test_unknown_paths_show_the_public_page() {
        assert_eq!(Route::parse("/about"), Route::Home);
        assert_eq!(Route::parse("/admin/settings"), Route::Home);
        assert_eq!(Route::parse("/admin/projects/a/b"), Route::Home);
    }

    #[test]
    fn test_path_parses_back() {
        for route in [
            Route::Home,
            Route::Login,
            Route::AdminProfile,
            Route::AdminProjects,
            Route::AdminProject("id with space".to_string()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_project_routes_share_a_screen() {
        let edit = Route::AdminProject("p1".to_string());
        assert_eq!(edit.screen(), Route::AdminProjects.screen());
        assert_eq!(edit.editing_project().as_deref(), Some("p1"));
        assert_eq!(Route::AdminProjects.editing_project(), None);
        assert_eq!(Route::Home.screen(), Screen::Public);
    }
}
