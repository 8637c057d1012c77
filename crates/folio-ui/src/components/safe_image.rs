//! Image element with a placeholder fallback.
//!
//! Classification and failure tracking live in [`ImageCandidate`]; this
//! component only maps its [`RenderMode`] onto markup.

use folio_core::{Caption, ImageCandidate, RenderMode};
use leptos::prelude::*;

/// Render mode for a possibly blank source.
fn mode_for(candidate: &ImageCandidate) -> RenderMode {
    if candidate.url.trim().is_empty() {
        RenderMode::Placeholder(Caption::NoImage)
    } else {
        candidate.render_mode()
    }
}

/// An `<img>` that falls back to a captioned placeholder.
///
/// URLs that do not look like images are never requested. Anything else is
/// attempted once; a load error switches to the placeholder for good, until
/// the source changes.
#[component]
pub fn SafeImage(
    /// Image URL, if any.
    #[prop(into)]
    src: Signal<Option<String>>,
    /// Alternative text.
    #[prop(into)]
    alt: String,
    /// Extra classes for the image or placeholder.
    #[prop(optional, into)]
    class: String,
    /// Stretch to fill the parent box.
    #[prop(optional)]
    fill: bool,
) -> impl IntoView {
    let candidate = RwSignal::new(ImageCandidate::evaluated(
        src.get_untracked().unwrap_or_default(),
    ));

    Effect::new(move |_| {
        let url = src.get().unwrap_or_default();
        candidate.maybe_update(|c| c.set_url(&url));
    });

    let mode = Memo::new(move |_| candidate.with(mode_for));
    let url = move || candidate.with(|c| c.url.clone());
    let on_error = move || candidate.update(ImageCandidate::mark_load_error);

    let classes = if fill {
        format!("safe-image fill {class}")
    } else {
        format!("safe-image {class}")
    };

    move || {
        let classes = classes.clone();
        let alt = alt.clone();
        match mode.get() {
            RenderMode::Placeholder(caption) => view! {
                <div
                    class=format!("{classes} image-placeholder")
                    role="img"
                    aria-label=alt
                    data-testid="image-placeholder"
                >
                    <span class="image-placeholder-caption">{caption.text()}</span>
                </div>
            }
            .into_any(),
            RenderMode::Plain => view! {
                <img
                    class=classes
                    src=url
                    alt=alt
                    on:error=move |_| on_error()
                />
            }
            .into_any(),
            RenderMode::Optimized { unoptimized } => view! {
                <img
                    class=classes
                    src=url
                    alt=alt
                    loading="lazy"
                    decoding="async"
                    data-unoptimized=unoptimized.to_string()
                    on:error=move |_| on_error()
                />
            }
            .into_any(),
        }
    }
}
