//! Toast notifications.
//!
//! Content loading failures and admin save results surface here; media
//! failures on the public page degrade silently.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::types::{Notification, NotificationType};

/// Shared handle for pushing notifications from any component.
#[derive(Clone, Copy)]
pub struct NotificationContext {
    /// Current notifications, oldest first.
    pub notifications: ReadSignal<Vec<Notification>>,
    set_notifications: WriteSignal<Vec<Notification>>,
}

impl NotificationContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        let (notifications, set_notifications) = signal::<Vec<Notification>>(vec![]);
        Self {
            notifications,
            set_notifications,
        }
    }

    /// Show a notification and schedule its dismissal.
    pub fn push(&self, notification: Notification) {
        let id = notification.id;
        let duration = notification.duration_ms;
        let set_notifications = self.set_notifications;

        self.set_notifications.update(|list| list.push(notification));

        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration).await;
            set_notifications.try_update(|list| list.retain(|n| n.id != id));
        });
    }

    /// Remove a notification by ID.
    pub fn dismiss(&self, id: u64) {
        self.set_notifications.update(|list| list.retain(|n| n.id != id));
    }

    /// Show an info notification.
    pub fn info(&self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    /// Show an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }
}

impl Default for NotificationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
fn ToastContainer() -> impl IntoView {
    let ctx = expect_context::<NotificationContext>();

    view! {
        <div class="toast-container" data-testid="toast-container">
            <For
                each=move || ctx.notifications.get()
                key=|notification| notification.id
                children=move |notification| {
                    let id = notification.id;
                    view! {
                        <Toast
                            notification=notification
                            on_dismiss=Callback::new(move |()| ctx.dismiss(id))
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
fn Toast(notification: Notification, on_dismiss: Callback<()>) -> impl IntoView {
    let kind = notification.notification_type;
    let icon_path = match kind {
        NotificationType::Info => {
            "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm1 15h-2v-6h2v6zm0-8h-2V7h2v2z"
        }
        NotificationType::Error => {
            "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm1 15h-2v-2h2v2zm0-4h-2V7h2v6z"
        }
    };

    view! {
        <div
            class=format!("toast toast-{kind}")
            role="alert"
            aria-live="polite"
            data-testid="toast"
            data-toast-type=kind.to_string()
        >
            <div class="toast-icon">
                <svg viewBox="0 0 24 24" width="20" height="20" fill="currentColor">
                    <path d=icon_path />
                </svg>
            </div>
            <div class="toast-message">{notification.message}</div>
            <button
                class="toast-dismiss"
                on:click=move |_| on_dismiss.run(())
                aria-label="Dismiss notification"
            >
                "×"
            </button>
        </div>
    }
}

/// Provides [`NotificationContext`] to its children and renders the toasts.
#[component]
pub fn NotificationProvider(children: Children) -> impl IntoView {
    provide_context(NotificationContext::new());

    view! {
        {children()}
        <ToastContainer />
    }
}

/// Access the notification context.
///
/// # Panics
/// Panics if called outside of a `NotificationProvider`.
pub fn use_notifications() -> NotificationContext {
    expect_context::<NotificationContext>()
}
