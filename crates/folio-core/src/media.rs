//! Background-music provider resolution.
//!
//! Classifies an arbitrary URL into one of a fixed set of providers, builds the
//! URL to load in an embedded frame, and produces the play/pause message each
//! provider understands.
//!
//! # Supported URL Formats
//!
//! - Direct audio files: `https://cdn.example.com/song.mp3`, `/uploads/abc.ogg?v=2`
//! - `YouTube`: `https://www.youtube.com/watch?v=dQw4w9WgXcQ`, `https://youtu.be/dQw4w9WgXcQ`
//! - Spotify tracks: `https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC`
//! - SoundCloud: `https://soundcloud.com/artist/track`
//! - Anything else is loaded verbatim in a generic frame.
//!
//! ```rust
//! use folio_core::media::{Provider, classify, embed_url};
//!
//! let url = "https://youtu.be/dQw4w9WgXcQ";
//! assert_eq!(classify(url), Provider::YouTube);
//! assert!(embed_url(url, Provider::YouTube).contains("autoplay=1"));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::profile::Profile;

#[allow(clippy::expect_used)]
static DIRECT_AUDIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mp3|wav|ogg|m4a|flac|aac)(?:\?|$)").expect("valid audio regex")
});

#[allow(clippy::expect_used)]
static YOUTUBE_QUERY_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").expect("valid youtube regex"));

#[allow(clippy::expect_used)]
static YOUTUBE_SHORT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:youtu\.be)/([A-Za-z0-9_-]{11})").expect("valid youtu.be regex")
});

#[allow(clippy::expect_used)]
static SPOTIFY_TRACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:open\.spotify\.com)/track/([A-Za-z0-9]+)").expect("valid spotify regex")
});

/// Embeddable media provider detected from a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Direct audio file played by a native audio element.
    Audio,
    /// `YouTube` video played through the iframe player API.
    #[serde(rename = "youtube")]
    YouTube,
    /// Spotify track embed.
    Spotify,
    /// SoundCloud widget.
    #[serde(rename = "soundcloud")]
    SoundCloud,
    /// Any other URL, loaded as-is in a frame.
    #[default]
    Iframe,
}

impl Provider {
    /// Lowercase tag for this provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::YouTube => "youtube",
            Self::Spotify => "spotify",
            Self::SoundCloud => "soundcloud",
            Self::Iframe => "iframe",
        }
    }

    /// Whether playback happens inside an embedded frame rather than a native element.
    #[must_use]
    pub const fn is_embedded(&self) -> bool {
        !matches!(self, Self::Audio)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background music source taken from the profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaSource {
    /// URL entered (or uploaded) by the admin.
    pub url: String,
    /// Whether the widget is switched on.
    pub enabled: bool,
}

impl MediaSource {
    /// Create a new media source.
    pub fn new(url: impl Into<String>, enabled: bool) -> Self {
        Self {
            url: url.into(),
            enabled,
        }
    }

    /// Build the source from a profile's background music fields.
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            url: profile.background_music.clone().unwrap_or_default(),
            enabled: profile.enable_background_music,
        }
    }

    /// Whether there is something to play.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.url.trim().is_empty()
    }

    /// Provider of this source's URL.
    #[must_use]
    pub fn provider(&self) -> Provider {
        classify(&self.url)
    }
}

/// Play or pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlCommand {
    /// Start playback.
    Play,
    /// Stop playback.
    Pause,
}

/// Payload posted to an embedded player frame.
///
/// Messages are fire-and-forget: no provider acknowledges them, so delivery
/// never decides whether the widget is considered playing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrameMessage {
    /// `YouTube` iframe API command.
    YouTube {
        /// Always `"command"`.
        event: &'static str,
        /// `playVideo` or `pauseVideo`.
        func: &'static str,
        /// Always empty.
        args: Vec<serde_json::Value>,
    },
    /// SoundCloud widget API method call.
    SoundCloud {
        /// `play` or `pause`.
        method: &'static str,
    },
    /// Spotify has no documented contract for anonymous embeds; best-effort only.
    Spotify {
        /// `play` or `pause`.
        #[serde(rename = "type")]
        kind: &'static str,
    },
}

impl FrameMessage {
    /// Serialize the message the way the receiving player expects it.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// How a play/pause request reaches the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlMessage {
    /// Call play/pause on the native audio element.
    Native(ControlCommand),
    /// Post a message into the player frame.
    Frame(FrameMessage),
    /// The provider offers no control channel.
    Unsupported,
}

/// Provider and embed URL resolved for a source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMedia {
    /// Detected provider.
    pub provider: Provider,
    /// URL to load; empty when the provider id could not be extracted.
    pub embed_url: String,
}

impl ResolvedMedia {
    /// Whether there is something that can be loaded.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.embed_url.is_empty()
    }
}

/// Whether the URL points directly at an audio file.
#[must_use]
pub fn is_direct_audio(url: &str) -> bool {
    DIRECT_AUDIO_RE.is_match(url)
}

/// Classify a URL into a provider.
///
/// First match wins: direct audio file, `YouTube`, Spotify, SoundCloud, and
/// finally the generic frame fallback. Every string maps to a provider.
#[must_use]
pub fn classify(url: &str) -> Provider {
    if is_direct_audio(url) {
        return Provider::Audio;
    }

    let url_lower = url.to_lowercase();
    if url_lower.contains("youtube.com") || url_lower.contains("youtu.be") {
        Provider::YouTube
    } else if url_lower.contains("open.spotify.com") {
        Provider::Spotify
    } else if url_lower.contains("soundcloud.com") {
        Provider::SoundCloud
    } else {
        Provider::Iframe
    }
}

/// Extract the 11-character `YouTube` video id from a `v=` parameter or a `youtu.be/` path.
#[must_use]
pub fn extract_youtube_id(url: &str) -> Option<String> {
    YOUTUBE_QUERY_ID_RE
        .captures(url)
        .or_else(|| YOUTUBE_SHORT_ID_RE.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the track id from an `open.spotify.com/track/<id>` URL.
#[must_use]
pub fn extract_spotify_track_id(url: &str) -> Option<String> {
    SPOTIFY_TRACK_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Build the URL to load for `url` under `provider`.
///
/// Returns an empty string when a `YouTube` or Spotify id cannot be found; the
/// caller must not mount a frame in that case.
#[must_use]
pub fn embed_url(url: &str, provider: Provider) -> String {
    match provider {
        Provider::Audio | Provider::Iframe => url.to_string(),
        Provider::YouTube => {
            if let Some(id) = extract_youtube_id(url) {
                // looping a single video needs the id repeated as the playlist
                format!(
                    "https://www.youtube.com/embed/{id}?autoplay=1&controls=0&loop=1&playlist={id}&mute=0&enablejsapi=1"
                )
            } else {
                warn!("No YouTube video id found in {}", url);
                String::new()
            }
        }
        Provider::Spotify => {
            if let Some(id) = extract_spotify_track_id(url) {
                format!("https://open.spotify.com/embed/track/{id}?utm_source=generator&autoplay=true")
            } else {
                warn!("No Spotify track id found in {}", url);
                String::new()
            }
        }
        Provider::SoundCloud => format!(
            "https://w.soundcloud.com/player/?url={}&auto_play=true&hide_related=true&show_comments=false&show_user=false&show_reposts=false&visual=false&api=1",
            urlencoding::encode(url)
        ),
    }
}

/// Classify `url` and build its embed URL in one step.
#[must_use]
pub fn resolve(url: &str) -> ResolvedMedia {
    let provider = classify(url);
    ResolvedMedia {
        provider,
        embed_url: embed_url(url, provider),
    }
}

/// The play/pause message understood by `provider`.
#[must_use]
pub fn control_message(provider: Provider, command: ControlCommand) -> ControlMessage {
    let playing = command == ControlCommand::Play;
    match provider {
        Provider::Audio => ControlMessage::Native(command),
        Provider::YouTube => ControlMessage::Frame(FrameMessage::YouTube {
            event: "command",
            func: if playing { "playVideo" } else { "pauseVideo" },
            args: Vec::new(),
        }),
        Provider::SoundCloud => ControlMessage::Frame(FrameMessage::SoundCloud {
            method: if playing { "play" } else { "pause" },
        }),
        Provider::Spotify => ControlMessage::Frame(FrameMessage::Spotify {
            kind: if playing { "play" } else { "pause" },
        }),
        Provider::Iframe => ControlMessage::Unsupported,
    }
}
