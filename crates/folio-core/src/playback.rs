//! Background-music playback state machine.
//!
//! The controller owns the playback state for one [`MediaSource`] and never
//! touches the page itself. Every transition returns the [`PlaybackEffect`]s
//! the host must perform (call `play()` on the audio element, mount a frame,
//! post a message, start a timer). Timer and native-play callbacks come back
//! with the [`TimerToken`] they were issued with; callbacks from an older
//! request are ignored, so a late teardown can never clear a newer embed.
//!
//! ```text
//!            toggle (audio)              play resolved
//!   Idle ───────────────────► Loading ─────────────────► Playing
//!    ▲  │                        │ play rejected            │
//!    │  │ toggle (embed)         ▼                          │
//!    │  └──────────────────────► Playing ◄──────────────────┘
//!    │                              │
//!    └──────── toggle / source change / disabled ───────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::media::{
    ControlCommand, ControlMessage, FrameMessage, MediaSource, Provider, classify,
    control_message, embed_url,
};

/// Delay between mounting an embed and sending it the play command.
pub const PLAY_SETTLE_DELAY_MS: u32 = 500;

/// Delay between the pause command and tearing the embed down.
pub const TEARDOWN_DELAY_MS: u32 = 200;

/// Volume applied to the native audio element.
pub const AUDIO_VOLUME: f64 = 0.3;

/// Coarse playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackPhase {
    /// Nothing loaded, nothing playing.
    #[default]
    Idle,
    /// Native audio play requested, waiting for the element's answer.
    Loading,
    /// Playing, or assumed to be for embeds.
    Playing,
}

/// Snapshot consumed by the toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Whether the widget shows as playing.
    pub is_playing: bool,
    /// Source of the mounted frame; empty when nothing is mounted.
    pub embed_url: String,
}

/// Identifies the request a deferred callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// What to do when a scheduled timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Post the play command to the freshly mounted frame.
    SendPlay,
    /// Remove the frame so audio stops even if the pause message was ignored.
    Teardown,
}

/// Side effect the host must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEffect {
    /// Set the volume and (re)load the native audio element.
    NativeLoad,
    /// Call `play()` on the native element and report back with the token.
    NativePlay {
        /// Token to pass to the resolve/reject callbacks.
        token: TimerToken,
    },
    /// Call `pause()` on the native element.
    NativePause,
    /// Mount (or re-point) the hidden player frame.
    MountEmbed(String),
    /// Post a message into the player frame.
    PostMessage(FrameMessage),
    /// Call [`PlaybackController::timer_fired`] after `delay_ms`.
    ScheduleTimer {
        /// Token to pass back.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u32,
        /// Action to pass back.
        action: TimerAction,
    },
    /// Remove the player frame.
    Unmount,
}

/// Playback controller for one background-music widget.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    source: MediaSource,
    provider: Provider,
    phase: PlaybackPhase,
    embed_url: String,
    generation: u64,
}

impl PlaybackController {
    /// Create an idle controller for `source`.
    #[must_use]
    pub fn new(source: MediaSource) -> Self {
        let provider = classify(&source.url);
        debug!("Background music provider: {} ({})", provider, source.url);
        Self {
            source,
            provider,
            phase: PlaybackPhase::Idle,
            embed_url: String::new(),
            generation: 0,
        }
    }

    /// Current source.
    #[must_use]
    pub const fn source(&self) -> &MediaSource {
        &self.source
    }

    /// Provider of the current source.
    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Whether the widget should be rendered at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.source.is_active()
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.phase == PlaybackPhase::Playing,
            embed_url: self.embed_url.clone(),
        }
    }

    /// Effects to run once the widget is mounted.
    #[must_use]
    pub fn initial_effects(&self) -> Vec<PlaybackEffect> {
        if self.provider == Provider::Audio && self.source.is_active() {
            vec![PlaybackEffect::NativeLoad]
        } else {
            Vec::new()
        }
    }

    fn next_token(&mut self) -> TimerToken {
        self.generation += 1;
        TimerToken(self.generation)
    }

    const fn is_current(&self, token: TimerToken) -> bool {
        token.0 == self.generation
    }

    /// The user pressed the toggle button.
    pub fn toggle(&mut self) -> Vec<PlaybackEffect> {
        if !self.source.is_active() {
            return Vec::new();
        }

        match (self.provider, self.phase) {
            (Provider::Audio, PlaybackPhase::Idle) => {
                let token = self.next_token();
                self.phase = PlaybackPhase::Loading;
                vec![PlaybackEffect::NativePlay { token }]
            }
            (Provider::Audio, _) => {
                self.next_token();
                self.phase = PlaybackPhase::Idle;
                vec![PlaybackEffect::NativePause]
            }
            (provider, PlaybackPhase::Idle) => {
                let embed = embed_url(&self.source.url, provider);
                if embed.is_empty() {
                    warn!(
                        "Cannot embed {} source, ignoring play request: {}",
                        provider, self.source.url
                    );
                    return Vec::new();
                }

                let token = self.next_token();
                info!("Starting {} background music", provider);
                self.phase = PlaybackPhase::Playing;
                self.embed_url.clone_from(&embed);
                vec![
                    PlaybackEffect::MountEmbed(embed),
                    PlaybackEffect::ScheduleTimer {
                        token,
                        delay_ms: PLAY_SETTLE_DELAY_MS,
                        action: TimerAction::SendPlay,
                    },
                ]
            }
            (provider, _) => {
                let token = self.next_token();
                info!("Stopping {} background music", provider);
                self.phase = PlaybackPhase::Idle;

                let mut effects = Vec::with_capacity(2);
                if let ControlMessage::Frame(message) =
                    control_message(provider, ControlCommand::Pause)
                {
                    effects.push(PlaybackEffect::PostMessage(message));
                }
                effects.push(PlaybackEffect::ScheduleTimer {
                    token,
                    delay_ms: TEARDOWN_DELAY_MS,
                    action: TimerAction::Teardown,
                });
                effects
            }
        }
    }

    /// A timer scheduled through [`PlaybackEffect::ScheduleTimer`] fired.
    pub fn timer_fired(&mut self, token: TimerToken, action: TimerAction) -> Vec<PlaybackEffect> {
        if !self.is_current(token) {
            debug!("Ignoring stale {:?} timer", action);
            return Vec::new();
        }

        match action {
            TimerAction::SendPlay if self.phase == PlaybackPhase::Playing => {
                self.play_message().into_iter().collect()
            }
            TimerAction::Teardown if self.phase == PlaybackPhase::Idle => {
                if self.embed_url.is_empty() {
                    Vec::new()
                } else {
                    self.embed_url.clear();
                    vec![PlaybackEffect::Unmount]
                }
            }
            _ => Vec::new(),
        }
    }

    /// The player frame finished loading.
    ///
    /// Sends the play command again; the settle timer may have fired before
    /// the player was listening.
    pub fn frame_loaded(&self) -> Vec<PlaybackEffect> {
        if self.phase == PlaybackPhase::Playing && self.provider.is_embedded() {
            self.play_message().into_iter().collect()
        } else {
            Vec::new()
        }
    }

    fn play_message(&self) -> Option<PlaybackEffect> {
        match control_message(self.provider, ControlCommand::Play) {
            ControlMessage::Frame(message) => Some(PlaybackEffect::PostMessage(message)),
            ControlMessage::Native(_) | ControlMessage::Unsupported => None,
        }
    }

    /// The native `play()` request succeeded.
    pub fn native_play_resolved(&mut self, token: TimerToken) {
        if self.is_current(token) && self.phase == PlaybackPhase::Loading {
            self.phase = PlaybackPhase::Playing;
        }
    }

    /// The native `play()` request was rejected (autoplay policy, decode error).
    ///
    /// The reason is logged only; the widget simply falls back to idle.
    pub fn native_play_rejected(&mut self, token: TimerToken, reason: &str) {
        warn!("Background music play failed: {}", reason);
        if self.is_current(token) && self.phase == PlaybackPhase::Loading {
            self.phase = PlaybackPhase::Idle;
        }
    }

    /// The native element reported `play`, possibly started outside the
    /// widget (media keys, browser controls).
    pub fn native_started(&mut self) {
        if self.provider == Provider::Audio
            && self.source.is_active()
            && self.phase != PlaybackPhase::Playing
        {
            self.phase = PlaybackPhase::Playing;
        }
    }

    /// The native element reported `pause` or `ended`.
    pub fn native_stopped(&mut self) {
        if self.provider == Provider::Audio && self.phase != PlaybackPhase::Idle {
            self.next_token();
            self.phase = PlaybackPhase::Idle;
        }
    }

    /// The profile changed; replace the source and reset to idle.
    ///
    /// Pending timers and play requests from the old source become stale.
    pub fn set_source(&mut self, source: MediaSource) -> Vec<PlaybackEffect> {
        if source == self.source {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.provider == Provider::Audio && self.phase != PlaybackPhase::Idle {
            effects.push(PlaybackEffect::NativePause);
        }
        if !self.embed_url.is_empty() {
            self.embed_url.clear();
            effects.push(PlaybackEffect::Unmount);
        }

        self.next_token();
        self.phase = PlaybackPhase::Idle;
        self.provider = classify(&source.url);
        self.source = source;
        debug!("Background music source changed, provider {}", self.provider);

        effects.extend(self.initial_effects());
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(url: &str) -> PlaybackController {
        PlaybackController::new(MediaSource::new(url, true))
    }

    #[test]
    fn test_starts_idle() {
        let c = controller("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(c.phase(), PlaybackPhase::Idle);
        assert_eq!(c.state(), PlaybackState::default());
        assert_eq!(c.provider(), Provider::YouTube);
    }

    #[test]
    fn test_disabled_source_ignores_toggle() {
        let mut c = PlaybackController::new(MediaSource::new("https://x.com/a.mp3", false));
        assert!(!c.is_visible());
        assert!(c.toggle().is_empty());
        assert_eq!(c.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn test_audio_initial_load() {
        let c = controller("https://x.com/a.mp3");
        assert_eq!(c.initial_effects(), vec![PlaybackEffect::NativeLoad]);
        assert!(controller("https://example.com/player").initial_effects().is_empty());
    }

    #[test]
    fn test_embed_toggle_is_optimistic() {
        let mut c = controller("https://soundcloud.com/artist/track");
        let effects = c.toggle();
        assert_eq!(c.phase(), PlaybackPhase::Playing);
        assert!(c.state().is_playing);
        assert!(matches!(effects[0], PlaybackEffect::MountEmbed(ref url) if url.starts_with("https://w.soundcloud.com/player/")));
        assert!(matches!(
            effects[1],
            PlaybackEffect::ScheduleTimer {
                delay_ms: PLAY_SETTLE_DELAY_MS,
                action: TimerAction::SendPlay,
                ..
            }
        ));
    }

    #[test]
    fn test_iframe_pause_has_no_message() {
        let mut c = controller("https://example.com/player");
        c.toggle();
        let effects = c.toggle();
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            PlaybackEffect::ScheduleTimer {
                action: TimerAction::Teardown,
                ..
            }
        ));
    }

    #[test]
    fn test_frame_loaded_resends_play() {
        let mut c = controller("https://youtu.be/dQw4w9WgXcQ");
        assert!(c.frame_loaded().is_empty());
        c.toggle();
        assert_eq!(c.frame_loaded().len(), 1);
    }
}
