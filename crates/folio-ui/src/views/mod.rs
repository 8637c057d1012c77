//! Top-level screens: the public page, login and the admin editors.

mod admin_profile;
mod admin_projects;
mod admin_shell;
mod home;
mod login;

pub use admin_profile::AdminProfile;
pub use admin_projects::AdminProjects;
pub use admin_shell::AdminShell;
pub use home::HomePage;
pub use login::Login;
