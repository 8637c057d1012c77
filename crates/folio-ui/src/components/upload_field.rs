//! URL field with a file upload, used for the avatar, the logo, project
//! images and the background music.
//!
//! Files are checked against the same rules as the server before they are
//! sent, so an oversized or mistyped file never leaves the browser.

use folio_core::{Provider, UploadKind, classify, validate_upload};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::api;
use crate::components::SafeImage;

/// Browser-side check of a picked file.
fn check_file(kind: UploadKind, name: &str, mime: &str, size: f64) -> Result<(), String> {
    validate_upload(kind, name, mime, byte_count(size))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn byte_count(size: f64) -> u64 {
    size.max(0.0) as u64
}

fn accept_for(kind: UploadKind) -> &'static str {
    match kind {
        UploadKind::Audio => "audio/*",
        UploadKind::Image | UploadKind::Logo => "image/*",
    }
}

/// How the background music will play, shown under the audio field.
fn music_source_label(url: &str) -> &'static str {
    match classify(url) {
        Provider::Audio => "Audio file",
        Provider::YouTube => "YouTube video",
        Provider::Spotify => "Spotify track",
        Provider::SoundCloud => "SoundCloud track",
        Provider::Iframe => "Embedded page",
    }
}

/// URL input plus a file picker that uploads and fills the URL in.
#[component]
pub fn UploadField(
    /// Element id for the URL input.
    id: &'static str,
    /// Visible label.
    label: &'static str,
    /// What the uploaded file is for.
    kind: UploadKind,
    /// Current URL.
    #[prop(into)]
    value: Signal<String>,
    /// Called with a typed or uploaded URL.
    on_change: Callback<String>,
    /// Input placeholder.
    #[prop(optional)]
    placeholder: &'static str,
) -> impl IntoView {
    let (uploading, set_uploading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        if let Err(message) = check_file(kind, &file.name(), &file.type_(), file.size()) {
            set_error.set(Some(message));
            input.set_value("");
            return;
        }

        set_error.set(None);
        set_uploading.set(true);
        spawn_local(async move {
            match api::upload_file(&file, kind).await {
                Ok(url) => {
                    leptos::logging::log!("Uploaded {} as {}", file.name(), url);
                    on_change.run(url);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_uploading.set(false);
            input.set_value("");
        });
    };

    let image_src = Signal::derive(move || {
        let url = value.get();
        (!url.trim().is_empty()).then_some(url)
    });

    let preview = move || {
        if value.with(|v| v.trim().is_empty()) {
            return ().into_any();
        }
        match kind {
            UploadKind::Image => view! {
                <div class="upload-preview">
                    <SafeImage src=image_src alt="Preview" class="upload-preview-image" />
                </div>
            }
            .into_any(),
            UploadKind::Logo => view! {
                <div class="upload-preview">
                    <SafeImage src=image_src alt="Logo preview" class="upload-preview-logo" />
                </div>
            }
            .into_any(),
            UploadKind::Audio => view! {
                <p class="form-hint">
                    {move || music_source_label(&value.get())}": "
                    <a href=move || value.get() target="_blank" rel="noopener noreferrer">
                        {move || value.get()}
                    </a>
                </p>
            }
            .into_any(),
        }
    };

    view! {
        <div class="form-field upload-field">
            <label for=id class="form-label">{label}</label>
            <input
                id=id
                type="text"
                class="form-input"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
                placeholder=placeholder
            />
            <input
                type="file"
                class="form-file"
                accept=accept_for(kind)
                on:change=on_file
                disabled=move || uploading.get()
                aria-label=format!("Upload {label}")
            />
            <Show when=move || uploading.get()>
                <p class="form-hint">"Uploading..."</p>
            </Show>
            {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
            {preview}
        </div>
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_check_file_uses_upload_rules() {
        assert!(check_file(UploadKind::Image, "me.png", "image/png", 2048.0).is_ok());
        assert!(check_file(UploadKind::Audio, "theme.mp3", "audio/mpeg", 4e6).is_ok());

        let err = check_file(UploadKind::Logo, "logo.mp3", "audio/mpeg", 10.0).unwrap_err();
        assert!(err.to_lowercase().contains("image"), "{err}");

        let err = check_file(UploadKind::Image, "huge.jpg", "image/jpeg", 6.0 * 1024.0 * 1024.0)
            .unwrap_err();
        assert!(err.contains("5MB"), "{err}");
    }

    #[test]
    fn test_byte_count_clamps() {
        assert_eq!(byte_count(-1.0), 0);
        assert_eq!(byte_count(1536.0), 1536);
    }

    #[test]
    fn test_accept_for_kind() {
        assert_eq!(accept_for(UploadKind::Audio), "audio/*");
        assert_eq!(accept_for(UploadKind::Logo), "image/*");
    }

    #[test]
    fn test_music_source_label() {
        assert_eq!(music_source_label("/uploads/theme.mp3"), "Audio file");
        assert_eq!(
            music_source_label("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "YouTube video"
        );
        assert_eq!(music_source_label("https://example.com/player"), "Embedded page");
    }
}
