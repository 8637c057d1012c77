//! Admin sign-in page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DarkModeToggle, FormField};
use crate::route::{Route, use_navigator};

/// Email and password form. A successful login opens the profile editor.
#[component]
pub fn Login() -> impl IntoView {
    let navigator = use_navigator();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);

        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            match api::login(email.trim(), &password).await {
                Ok(()) => navigator.go(Route::AdminProfile),
                Err(e) => {
                    set_error.set(Some(e));
                    set_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-theme">
                <DarkModeToggle />
            </div>
            <form class="login-card" on:submit=on_submit>
                <h1 class="login-title">"Admin Login"</h1>
                {move || error.get().map(|e| view! { <div class="form-alert">{e}</div> })}
                <FormField
                    id="email"
                    label="Email"
                    input_type="email"
                    value=email
                    on_input=Callback::new(move |v| set_email.set(v))
                    required=true
                    placeholder="admin@example.com"
                />
                <FormField
                    id="password"
                    label="Password"
                    input_type="password"
                    value=password
                    on_input=Callback::new(move |v| set_password.set(v))
                    required=true
                />
                <button type="submit" class="btn btn-primary btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
