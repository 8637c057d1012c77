//! Labelled inputs for the admin forms.

use leptos::prelude::*;

/// Single-line or multi-line text input with a label.
#[component]
pub fn FormField(
    /// Element id, also used by the label.
    id: &'static str,
    /// Visible label.
    label: &'static str,
    /// Current value.
    #[prop(into)]
    value: Signal<String>,
    /// Called with the new value on every keystroke.
    on_input: Callback<String>,
    /// HTML input type.
    #[prop(default = "text")]
    input_type: &'static str,
    /// Render a textarea instead of an input.
    #[prop(optional)]
    multiline: bool,
    /// Mark the field as required.
    #[prop(optional)]
    required: bool,
    /// Placeholder text.
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    let handle_input = move |ev: web_sys::Event| on_input.run(event_target_value(&ev));

    let control = if multiline {
        view! {
            <textarea
                id=id
                class="form-input"
                rows="4"
                prop:value=move || value.get()
                on:input=handle_input
                required=required
                placeholder=placeholder
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=id
                type=input_type
                class="form-input"
                prop:value=move || value.get()
                on:input=handle_input
                required=required
                placeholder=placeholder
            />
        }
        .into_any()
    };

    view! {
        <div class="form-field">
            <label for=id class="form-label">
                {label}
                {required.then_some(" *")}
            </label>
            {control}
        </div>
    }
}

/// Checkbox with a label and an optional hint.
#[component]
pub fn CheckboxField(
    /// Element id.
    id: &'static str,
    /// Visible label.
    label: &'static str,
    /// Current state.
    #[prop(into)]
    checked: Signal<bool>,
    /// Called with the new state.
    on_change: Callback<bool>,
    /// Explanatory text under the label.
    #[prop(optional)]
    hint: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="form-checkbox">
            <input
                id=id
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <div>
                <label for=id class="form-label">{label}</label>
                {hint.map(|hint| view! { <p class="form-hint">{hint}</p> })}
            </div>
        </div>
    }
}
