//! Image-likelihood heuristics and fallback rendering state.
//!
//! Admin-entered image fields often hold links to product or blog pages rather
//! than to image files. [`is_likely_image`] guesses, without any network
//! request, whether a URL will render as an image; [`ImageCandidate`] combines
//! that guess with runtime load failures to decide between the image and a
//! placeholder.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[allow(clippy::expect_used)]
static IMAGE_EXTENSION_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg|bmp|ico|avif)(\?|$)")
        .expect("valid image extension regex")
});

#[allow(clippy::expect_used)]
static IMAGE_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/[^/]+\.(jpg|jpeg|png|gif|webp|svg|bmp|ico|avif)")
        .expect("valid image segment regex")
});

/// Path fragments that usually mean an image is served.
pub const IMAGE_PATH_HINTS: [&str; 6] = ["/image", "/img", "/photo", "/picture", "/media", "/uploads"];

/// Path fragments of content pages that are not images.
pub const NON_IMAGE_PATH_HINTS: [&str; 5] = ["/product/", "/page/", "/post/", "/article/", "/blog/"];

/// Fragments of dynamic page URLs that are rendered without the optimizer.
const PLAIN_RENDER_HINTS: [&str; 3] = ["/product/", "/page/", "/post/"];

/// Guess whether `url` points at a renderable image.
///
/// Rules, first match decides:
/// 1. ends with an image extension (optionally followed by a query) → true
/// 2. contains an image-ish path fragment → true
/// 3. has a path segment ending in an image extension → true
/// 4. contains a content-page fragment → false
/// 5. root-relative path → true
/// 6. anything else → true (runtime load failure is the safety net)
#[must_use]
pub fn is_likely_image(url: &str) -> bool {
    if IMAGE_EXTENSION_END_RE.is_match(url) {
        return true;
    }

    let url_lower = url.to_lowercase();
    if IMAGE_PATH_HINTS.iter().any(|hint| url_lower.contains(hint)) {
        return true;
    }

    if IMAGE_SEGMENT_RE.is_match(&url_lower) {
        return true;
    }

    if NON_IMAGE_PATH_HINTS
        .iter()
        .any(|hint| url_lower.contains(hint))
    {
        return false;
    }

    // local assets and everything else are attempted
    true
}

/// Whether `url` looks like a dynamic content page that the image optimizer mishandles.
#[must_use]
pub fn needs_plain_render(url: &str) -> bool {
    PLAIN_RENDER_HINTS.iter().any(|hint| url.contains(hint))
}

/// Whether `url` is already in a final form that should skip optimization.
#[must_use]
pub fn skips_optimization(url: &str) -> bool {
    url.contains(".webp") || url.contains(".svg")
}

/// Placeholder caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Caption {
    /// The URL does not look like an image; nothing was loaded.
    NoImage,
    /// The image was attempted and failed to load.
    Unavailable,
}

impl Caption {
    /// Text shown inside the placeholder.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::NoImage => "No Image",
            Self::Unavailable => "Image unavailable",
        }
    }
}

impl std::fmt::Display for Caption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// How an image field should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Show a placeholder with the given caption.
    Placeholder(Caption),
    /// Basic `<img>` element, bypassing the optimization pipeline.
    Plain,
    /// Optimized image pipeline; `unoptimized` marks sources passed through unchanged.
    Optimized {
        /// `.webp` and `.svg` sources are served as-is.
        unoptimized: bool,
    },
}

/// Classification and failure state for one image URL.
///
/// A new candidate is created whenever the URL changes. Once a load error has
/// been recorded the candidate stays on the placeholder; there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// The image URL.
    pub url: String,
    /// Static guess; `None` until evaluated.
    pub is_valid_image: Option<bool>,
    /// Set by the runtime failure callback.
    pub has_load_error: bool,
}

impl ImageCandidate {
    /// Create an unevaluated candidate.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_valid_image: None,
            has_load_error: false,
        }
    }

    /// Create a candidate and run the static classification immediately.
    pub fn evaluated(url: impl Into<String>) -> Self {
        let mut candidate = Self::new(url);
        candidate.evaluate();
        candidate
    }

    /// Run the static classification if it has not run yet.
    pub fn evaluate(&mut self) {
        if self.is_valid_image.is_none() {
            self.is_valid_image = Some(is_likely_image(&self.url));
        }
    }

    /// Replace the URL, starting over with a fresh candidate if it changed.
    ///
    /// Returns true when the URL actually changed.
    pub fn set_url(&mut self, url: &str) -> bool {
        if self.url == url {
            return false;
        }
        *self = Self::evaluated(url);
        true
    }

    /// Record a runtime load failure. Permanent for this candidate.
    pub fn mark_load_error(&mut self) {
        if !self.has_load_error {
            debug!("Image failed to load, showing placeholder: {}", self.url);
        }
        self.has_load_error = true;
    }

    /// Decide what to render right now.
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        if self.is_valid_image == Some(false) {
            return RenderMode::Placeholder(Caption::NoImage);
        }
        if self.has_load_error {
            return RenderMode::Placeholder(Caption::Unavailable);
        }
        if needs_plain_render(&self.url) {
            RenderMode::Plain
        } else {
            RenderMode::Optimized {
                unoptimized: skips_optimization(&self.url),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification_tests {
        use super::*;

        #[test]
        fn test_extension_at_end() {
            assert!(is_likely_image("https://cdn.site.com/assets/photo.jpg"));
            assert!(is_likely_image("https://cdn.site.com/a/b.AVIF"));
            assert!(is_likely_image("https://cdn.site.com/a/b.png?w=200"));
        }

        #[test]
        fn test_image_path_hints() {
            assert!(is_likely_image("https://cdn.site.com/img/12345"));
            assert!(is_likely_image("https://site.com/Uploads/xyz"));
            assert!(is_likely_image("https://site.com/media/product/5"));
        }

        #[test]
        fn test_segment_with_extension_mid_url() {
            assert!(is_likely_image("https://site.com/post/cover.png/resize"));
        }

        #[test]
        fn test_content_pages_are_not_images() {
            assert!(!is_likely_image("https://shop.com/product/123"));
            assert!(!is_likely_image("https://site.com/blog/my-trip"));
            assert!(!is_likely_image("https://site.com/Article/42"));
            assert!(!is_likely_image("https://site.com/page/2"));
        }

        #[test]
        fn test_root_relative_and_default() {
            assert!(is_likely_image("/uploads/abc.png"));
            assert!(is_likely_image("/logo"));
            assert!(is_likely_image("https://shop.com/weirdpage"));
        }

        #[test]
        fn test_idempotent() {
            for url in [
                "https://shop.com/product/123",
                "https://shop.com/weirdpage",
                "/uploads/abc.png",
            ] {
                assert_eq!(is_likely_image(url), is_likely_image(url));
            }
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_unevaluated_attempts_render() {
            let candidate = ImageCandidate::new("https://cdn.site.com/a.jpg");
            assert_eq!(candidate.is_valid_image, None);
            assert_eq!(
                candidate.render_mode(),
                RenderMode::Optimized { unoptimized: false }
            );
        }

        #[test]
        fn test_not_image_shows_no_image() {
            let candidate = ImageCandidate::evaluated("https://shop.com/product/123");
            assert_eq!(
                candidate.render_mode(),
                RenderMode::Placeholder(Caption::NoImage)
            );
            assert_eq!(Caption::NoImage.text(), "No Image");
        }

        #[test]
        fn test_product_image_renders_plain() {
            let candidate = ImageCandidate::evaluated("https://shop.com/product/123/main.jpg");
            assert_eq!(candidate.render_mode(), RenderMode::Plain);
        }

        #[test]
        fn test_webp_and_svg_skip_optimizer() {
            assert_eq!(
                ImageCandidate::evaluated("https://cdn.site.com/a.webp").render_mode(),
                RenderMode::Optimized { unoptimized: true }
            );
            assert_eq!(
                ImageCandidate::evaluated("/uploads/logo.svg").render_mode(),
                RenderMode::Optimized { unoptimized: true }
            );
        }

        #[test]
        fn test_load_error_is_permanent() {
            let mut candidate = ImageCandidate::evaluated("https://shop.com/weirdpage");
            assert_eq!(candidate.is_valid_image, Some(true));

            candidate.mark_load_error();
            candidate.evaluate();
            assert_eq!(
                candidate.render_mode(),
                RenderMode::Placeholder(Caption::Unavailable)
            );
            assert_eq!(Caption::Unavailable.to_string(), "Image unavailable");
        }

        #[test]
        fn test_url_change_starts_over() {
            let mut candidate = ImageCandidate::evaluated("https://shop.com/weirdpage");
            candidate.mark_load_error();

            assert!(!candidate.set_url("https://shop.com/weirdpage"));
            assert!(candidate.has_load_error);

            assert!(candidate.set_url("/uploads/abc.png"));
            assert!(!candidate.has_load_error);
            assert_eq!(candidate.is_valid_image, Some(true));
        }
    }
}
