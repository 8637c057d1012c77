//! Frame shared by the admin pages: session check and navigation bar.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DarkModeToggle, use_notifications};
use crate::route::{Route, use_navigator};

/// Outcome of the session check on entering an admin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Checking,
    Granted,
}

/// Renders `children` once `/api/session` confirms the admin is signed in,
/// otherwise sends the browser to the login page.
#[component]
pub fn AdminShell(children: ChildrenFn) -> impl IntoView {
    let navigator = use_navigator();
    let notifications = use_notifications();
    let (access, set_access) = signal(Access::Checking);

    spawn_local(async move {
        match api::session_status().await {
            Ok(true) => set_access.set(Access::Granted),
            Ok(false) => navigator.go(Route::Login),
            Err(e) => {
                notifications.error(format!("Could not check session: {e}"));
                navigator.go(Route::Login);
            }
        }
    });

    let sign_out = move |_| {
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                leptos::logging::warn!("Logout failed: {}", e);
            }
            navigator.go(Route::Home);
        });
    };

    let link = move |route: Route, label: &'static str| {
        let target = route.clone();
        let href = target.path();
        let active = move || {
            let current = navigator.current();
            current == route
                || (route == Route::AdminProjects && matches!(current, Route::AdminProject(_)))
        };
        view! {
            <a
                href=href
                class="admin-link"
                class:active=active
                on:click=move |ev| {
                    ev.prevent_default();
                    navigator.go(target.clone());
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <div class="admin-page">
            <header class="admin-header">
                <nav class="admin-nav">
                    <div class="admin-nav-links">
                        <span class="admin-brand">"Admin Panel"</span>
                        {link(Route::AdminProfile, "Profile")}
                        {link(Route::AdminProjects, "Projects")}
                    </div>
                    <div class="admin-nav-actions">
                        {link(Route::Home, "View Portfolio")}
                        <DarkModeToggle />
                        <button class="btn btn-danger" on:click=sign_out>"Sign Out"</button>
                    </div>
                </nav>
            </header>
            <main class="admin-main">
                <Show
                    when=move || access.get() == Access::Granted
                    fallback=|| view! { <div class="site-loader" aria-busy="true"></div> }
                >
                    {children()}
                </Show>
            </main>
        </div>
    }
}
