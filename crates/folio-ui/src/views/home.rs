//! Public portfolio page.

use folio_core::Profile;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    BackgroundMusic, DarkModeToggle, LoadErrorEmptyState, NoProjectsEmptyState, ProfileHero,
    ProfileInfo, ProjectSection, SafeImage, use_notifications,
};
use crate::types::{LoadState, SiteContent};

/// Public portfolio page.
#[component]
pub fn HomePage() -> impl IntoView {
    let notifications = use_notifications();

    let (content, set_content) = signal(SiteContent::default());
    let (load_state, set_load_state) = signal(LoadState::Loading);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    spawn_local(async move {
        // a missing profile still lets the projects render
        let profile = match api::get_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                notifications.error(format!("Failed to load profile: {e}"));
                None
            }
        };

        match api::list_projects().await {
            Ok(projects) => {
                leptos::logging::log!("Loaded {} projects", projects.len());
                set_content.set(SiteContent::new(profile, projects));
                set_load_state.set(LoadState::Loaded);
            }
            Err(e) => {
                notifications.error(format!("Failed to load projects: {e}"));
                set_content.set(SiteContent::new(profile, Vec::new()));
                set_load_error.set(Some(e));
                set_load_state.set(LoadState::Error);
            }
        }
    });

    let profile = Signal::derive(move || content.with(|c| c.profile.clone()));
    let featured = Signal::derive(move || content.with(|c| c.featured.clone()));
    let others = Signal::derive(move || content.with(|c| c.others.clone()));
    let site_title = move || content.with(SiteContent::site_title);
    let logo = Signal::derive(move || {
        profile.with(|p| p.as_ref().and_then(|p| p.logo.clone()))
    });
    let music_url = Signal::derive(move || content.with(|c| c.music().0));
    let music_enabled = Signal::derive(move || content.with(|c| c.music().1));

    Effect::new(move |_| {
        let title = site_title();
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&title);
        }
    });

    let year = js_sys::Date::new_0().get_full_year();
    let owner = move || {
        profile.with(|p| {
            p.as_ref()
                .map_or_else(|| "Portfolio".to_string(), |p: &Profile| p.name.clone())
        })
    };

    view! {
        <header class="site-header">
            <nav class="site-nav">
                <div class="site-brand">
                    <Show when=move || logo.with(Option::is_some)>
                        <SafeImage src=logo alt="Logo" class="site-logo" />
                    </Show>
                    <h1 class="site-title">{site_title}</h1>
                </div>
                <div class="site-actions">
                    <BackgroundMusic url=music_url enabled=music_enabled />
                    <DarkModeToggle />
                </div>
            </nav>
        </header>

        <main class="site-main">
            <Show
                when=move || load_state.get() != LoadState::Loading
                fallback=|| view! { <div class="site-loader" aria-busy="true"></div> }
            >
                <ProfileHero profile=profile />
                <ProjectSection title="Featured Projects" projects=featured />
                <ProjectSection title="Projects" projects=others />
                {move || match load_state.get() {
                    LoadState::Error => view! {
                        <LoadErrorEmptyState message=load_error.get().unwrap_or_default() />
                    }
                    .into_any(),
                    _ if content.with(SiteContent::has_no_projects) => {
                        view! { <NoProjectsEmptyState /> }.into_any()
                    }
                    _ => ().into_any(),
                }}
                <ProfileInfo profile=profile />
            </Show>
        </main>

        <footer class="site-footer">
            <p>{move || format!("© {year} {}. All rights reserved.", owner())}</p>
        </footer>
    }
}
