//! UI components shared by the public page and the admin screens.

mod background_music;
mod confirm_dialog;
mod dark_mode_toggle;
mod empty_state;
mod form_field;
mod profile_info;
mod project_card;
mod safe_image;
mod toast;
mod upload_field;

pub use background_music::BackgroundMusic;
pub use confirm_dialog::ConfirmDialog;
pub use dark_mode_toggle::DarkModeToggle;
pub use empty_state::{
    EmptyState, EmptyStateIcon, EmptyStateSize, LoadErrorEmptyState, NoProjectsEmptyState,
};
pub use form_field::{CheckboxField, FormField};
pub use profile_info::{InfoItem, ProfileHero, ProfileInfo, info_items};
pub use project_card::{ProjectCard, ProjectSection};
pub use safe_image::SafeImage;
pub use toast::{NotificationContext, NotificationProvider, use_notifications};
pub use upload_field::UploadField;
