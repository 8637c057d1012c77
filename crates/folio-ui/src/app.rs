//! Main application component.

use leptos::prelude::*;

use crate::components::NotificationProvider;
use crate::route::{Navigator, Screen};
use crate::theme::{generate_css_variables, generate_dark_css_variables};
use crate::views::{AdminProfile, AdminProjects, AdminShell, HomePage, Login};

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let css_vars = generate_css_variables();
    let dark_vars = generate_dark_css_variables();

    let navigator = Navigator::from_location();
    provide_context(navigator);

    view! {
        <style>{css_vars}</style>
        <style>{dark_vars}</style>
        <style>{include_str!("../styles/main.css")}</style>
        <NotificationProvider>
            <Screens navigator=navigator />
        </NotificationProvider>
    }
}

/// Renders the screen for the current route.
#[component]
fn Screens(navigator: Navigator) -> impl IntoView {
    let screen = Memo::new(move |_| navigator.current().screen());
    let editing = Signal::derive(move || navigator.current().editing_project());

    move || match screen.get() {
        Screen::Public => view! { <HomePage /> }.into_any(),
        Screen::Login => view! { <Login /> }.into_any(),
        Screen::Profile => view! {
            <AdminShell>
                <AdminProfile />
            </AdminShell>
        }
        .into_any(),
        Screen::Projects => view! {
            <AdminShell>
                <AdminProjects editing=editing />
            </AdminShell>
        }
        .into_any(),
    }
}
