//! `Folio` UI - Leptos-based site.
//!
//! Renders the owner profile, the project cards and the background-music
//! toggle from the JSON content API, plus the login page and the admin
//! editors for the profile and projects.

// Component files tend to be large by nature - they contain view logic
#![allow(clippy::too_many_lines)]
// Pass by value suggestions for small types like bool - not always clearer
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod api;
pub mod app;
pub mod components;
pub mod route;
pub mod theme;
pub mod types;
pub mod views;

pub use app::App;
pub use route::{Navigator, Route};
pub use types::{LoadState, SiteContent};
