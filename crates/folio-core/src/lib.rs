//! `Folio` Core Library
//!
//! This crate provides the domain logic for the `Folio` portfolio site:
//! - Background-music provider resolution (audio, `YouTube`, Spotify, SoundCloud, generic frames)
//! - The playback state machine behind the background-music toggle
//! - Image-likelihood heuristics with placeholder fallback
//! - Profile and project models with admin form validation
//! - Upload validation rules
//!
//! Everything here is free of I/O so it runs unchanged in the browser bundle
//! and on the server.
//!
//! # Error Handling
//!
//! Content operations return [`Result`]; see the [`error`] module. Media and
//! image handling never fail, they degrade to a silent widget or a placeholder.
//!
//! ```rust
//! use folio_core::{MediaSource, PlaybackController, PlaybackEffect};
//!
//! let mut controller = PlaybackController::new(MediaSource::new("https://youtu.be/dQw4w9WgXcQ", true));
//! let effects = controller.toggle();
//! assert!(matches!(effects[0], PlaybackEffect::MountEmbed(_)));
//! ```

pub mod error;
pub mod image;
pub mod media;
pub mod playback;
pub mod profile;
pub mod project;
pub mod upload;

pub use error::{Error, ErrorKind, Result, UploadError};
pub use image::{Caption, ImageCandidate, RenderMode, is_likely_image};
pub use media::{
    ControlCommand, ControlMessage, FrameMessage, MediaSource, Provider, ResolvedMedia, classify,
    control_message, embed_url, extract_spotify_track_id, extract_youtube_id, resolve,
};
pub use playback::{
    AUDIO_VOLUME, PLAY_SETTLE_DELAY_MS, PlaybackController, PlaybackEffect, PlaybackPhase,
    PlaybackState, TEARDOWN_DELAY_MS, TimerAction, TimerToken,
};
pub use profile::{Profile, ProfileUpdate, SocialLink};
pub use project::{Project, ProjectInput, partition_featured, sort_newest_first};
pub use upload::{
    ALLOWED_AUDIO_EXTENSIONS, ALLOWED_IMAGE_EXTENSIONS, MAX_AUDIO_BYTES, MAX_IMAGE_BYTES,
    UploadKind, public_url, stored_filename, validate_upload,
};
