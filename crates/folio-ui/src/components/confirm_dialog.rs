//! Confirmation dialog for destructive admin actions.

use leptos::prelude::*;

/// Modal asking the admin to confirm a deletion.
///
/// Clicking the overlay or "Cancel" calls `on_cancel`.
#[component]
pub fn ConfirmDialog(
    /// Whether the dialog is open.
    #[prop(into)]
    is_open: Signal<bool>,
    /// Title of the dialog.
    #[prop(into)]
    title: String,
    /// Message to display, usually naming the record.
    #[prop(into)]
    message: Signal<String>,
    /// Text for the confirm button.
    #[prop(default = "Delete".to_string(), into)]
    confirm_text: String,
    /// Disables both buttons while the action runs.
    #[prop(optional, into)]
    busy: Signal<bool>,
    /// Callback when the user confirms the action.
    on_confirm: Callback<()>,
    /// Callback when the user cancels or closes the dialog.
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div
            class="confirm-dialog-overlay"
            class:visible=move || is_open.get()
            on:click=move |_| {
                if !busy.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div
                class="confirm-dialog"
                on:click=move |e| e.stop_propagation()
                role="alertdialog"
                aria-modal="true"
                aria-labelledby="confirm-dialog-title"
                aria-describedby="confirm-dialog-message"
            >
                <div class="confirm-dialog-icon">
                    <svg viewBox="0 0 24 24" width="40" height="40" fill="currentColor">
                        <path d="M6 19c0 1.1.9 2 2 2h8c1.1 0 2-.9 2-2V7H6v12zM19 4h-3.5l-1-1h-5l-1 1H5v2h14V4z"/>
                    </svg>
                </div>
                <h3 id="confirm-dialog-title" class="confirm-dialog-title">{title}</h3>
                <p id="confirm-dialog-message" class="confirm-dialog-message">
                    {move || message.get()}
                </p>
                <div class="confirm-dialog-actions">
                    <button
                        class="btn btn-secondary"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-danger"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                        data-testid="confirm-delete"
                    >
                        {move || if busy.get() { "Deleting...".to_string() } else { confirm_text.clone() }}
                    </button>
                </div>
            </div>
        </div>
    }
}
