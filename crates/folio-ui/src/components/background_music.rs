//! Background music toggle.
//!
//! Drives a [`PlaybackController`] and carries out the effects it returns
//! against the DOM: the hidden `<audio>` element for direct files, a hidden
//! `<iframe>` for provider embeds, and `gloo-timers` for the settle and
//! teardown delays. All playback failures are swallowed; the button simply
//! shows the idle state.

use folio_core::{
    AUDIO_VOLUME, MediaSource, PlaybackController, PlaybackEffect, PlaybackState, Provider,
    TimerToken,
};
use gloo_timers::future::TimeoutFuture;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// What the widget renders.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WidgetView {
    visible: bool,
    provider: Provider,
    url: String,
    state: PlaybackState,
}

impl WidgetView {
    fn of(controller: &PlaybackController) -> Self {
        Self {
            visible: controller.is_visible(),
            provider: controller.provider(),
            url: controller.source().url.clone(),
            state: controller.state(),
        }
    }
}

/// Bridges controller effects to the page. Every field is a reactive handle,
/// so the host can be copied into timers and promise callbacks.
#[derive(Clone, Copy)]
struct PlaybackHost {
    controller: StoredValue<PlaybackController>,
    view: RwSignal<WidgetView>,
    audio: NodeRef<html::Audio>,
    frame: NodeRef<html::Iframe>,
}

impl PlaybackHost {
    fn run(self, f: impl FnOnce(&mut PlaybackController) -> Vec<PlaybackEffect>) {
        let Some(effects) = self.controller.try_update_value(f) else {
            return;
        };
        self.sync();
        for effect in effects {
            self.apply(effect);
        }
    }

    fn notify(self, f: impl FnOnce(&mut PlaybackController)) {
        if self.controller.try_update_value(f).is_some() {
            self.sync();
        }
    }

    fn sync(self) {
        if let Some(next) = self.controller.try_with_value(WidgetView::of) {
            self.view.maybe_update(|current| {
                if *current == next {
                    return false;
                }
                *current = next;
                true
            });
        }
    }

    fn apply(self, effect: PlaybackEffect) {
        match effect {
            // before the element mounts this is a no-op; the mount effect
            // asks the controller again once the node exists
            PlaybackEffect::NativeLoad => {
                if let Some(audio) = self.audio.get_untracked() {
                    prepare(&audio);
                    audio.load();
                }
            }
            PlaybackEffect::NativePlay { token } => self.native_play(token),
            PlaybackEffect::NativePause => {
                if let Some(audio) = self.audio.get_untracked()
                    && let Err(e) = audio.pause()
                {
                    leptos::logging::warn!("Background music pause failed: {:?}", e);
                }
            }
            // the iframe itself is rendered from the view signal
            PlaybackEffect::MountEmbed(_) | PlaybackEffect::Unmount => {}
            PlaybackEffect::PostMessage(message) => self.post_message(&message),
            PlaybackEffect::ScheduleTimer {
                token,
                delay_ms,
                action,
            } => {
                spawn_local(async move {
                    TimeoutFuture::new(delay_ms).await;
                    self.run(|c| c.timer_fired(token, action));
                });
            }
        }
    }

    fn native_play(self, token: TimerToken) {
        let Some(audio) = self.audio.get_untracked() else {
            self.notify(|c| c.native_play_rejected(token, "audio element not mounted"));
            return;
        };
        prepare(&audio);

        match audio.play() {
            Ok(promise) => spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => self.notify(|c| c.native_play_resolved(token)),
                    Err(e) => {
                        let reason = describe(&e);
                        self.notify(|c| c.native_play_rejected(token, &reason));
                    }
                }
            }),
            Err(e) => {
                let reason = describe(&e);
                self.notify(|c| c.native_play_rejected(token, &reason));
            }
        }
    }

    fn post_message(self, message: &folio_core::FrameMessage) {
        let Some(target) = self
            .frame
            .get_untracked()
            .and_then(|frame| frame.content_window())
        else {
            return;
        };
        match message.to_json() {
            Ok(json) => {
                if let Err(e) = target.post_message(&JsValue::from_str(&json), "*") {
                    leptos::logging::warn!("postMessage failed: {:?}", e);
                }
            }
            Err(e) => leptos::logging::warn!("Could not encode player message: {}", e),
        }
    }
}

fn prepare(audio: &web_sys::HtmlAudioElement) {
    audio.set_loop(true);
    audio.set_volume(AUDIO_VOLUME);
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Floating play/pause button for the owner's background music.
///
/// Renders nothing when music is disabled or no URL is set.
#[component]
pub fn BackgroundMusic(
    /// Music URL from the profile.
    #[prop(into)]
    url: Signal<Option<String>>,
    /// The profile's enable flag.
    #[prop(into)]
    enabled: Signal<bool>,
) -> impl IntoView {
    let controller = PlaybackController::new(MediaSource::new("", false));
    let host = PlaybackHost {
        view: RwSignal::new(WidgetView::of(&controller)),
        controller: StoredValue::new(controller),
        audio: NodeRef::new(),
        frame: NodeRef::new(),
    };

    Effect::new(move |_| {
        let source = MediaSource::new(url.get().unwrap_or_default(), enabled.get());
        host.run(|c| c.set_source(source));
    });

    // the <audio> node only exists after the Show above renders it
    Effect::new(move |_| {
        if host.audio.get().is_some() {
            host.run(|c| c.initial_effects());
        }
    });

    let view = host.view;
    let is_playing = move || view.with(|v| v.state.is_playing);
    let is_audio = move || view.with(|v| v.provider == Provider::Audio);
    let embed_src = move || view.with(|v| v.state.embed_url.clone());

    view! {
        <Show when=move || view.with(|v| v.visible)>
            <Show when=is_audio>
                <audio
                    node_ref=host.audio
                    src=move || view.with(|v| v.url.clone())
                    preload="auto"
                    on:play=move |_| host.notify(PlaybackController::native_started)
                    on:pause=move |_| host.notify(PlaybackController::native_stopped)
                    on:ended=move |_| host.notify(PlaybackController::native_stopped)
                ></audio>
            </Show>
            <Show when=move || !is_audio() && !embed_src().is_empty()>
                <iframe
                    node_ref=host.frame
                    src=embed_src
                    title="background-music-player"
                    style="display: none"
                    allow="autoplay; encrypted-media"
                    on:load=move |_| host.run(|c| c.frame_loaded())
                ></iframe>
            </Show>
            <button
                class="music-toggle"
                class:playing=is_playing
                on:click=move |_| host.run(PlaybackController::toggle)
                aria-label=move || if is_playing() { "Pause background music" } else { "Play background music" }
                title=move || if is_playing() { "Pause background music" } else { "Play background music" }
                data-testid="music-toggle"
            >
                <span class="music-bar side"></span>
                <span class="music-bar middle"></span>
                <span class="music-bar side"></span>
            </button>
        </Show>
    }
}
