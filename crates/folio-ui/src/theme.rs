//! Theme configuration for `Folio`.
//!
//! Light editorial palette with a single warm accent. The rainbow ring around
//! the music toggle is the only place several hues appear together.

/// Color palette for the public page.
pub mod colors {
    /// Background colors.
    pub mod background {
        /// Page background.
        pub const PRIMARY: &str = "#fbfaf7";
        /// Card background.
        pub const CARD: &str = "#ffffff";
        /// Placeholder and muted surfaces.
        pub const MUTED: &str = "#efece6";
    }

    /// Text colors.
    pub mod text {
        /// Body text.
        pub const PRIMARY: &str = "#1d1b18";
        /// Secondary text.
        pub const SECONDARY: &str = "#6b665d";
        /// Placeholder captions.
        pub const DISABLED: &str = "#a8a298";
    }

    /// Accent colors.
    pub mod accent {
        /// Links and highlights.
        pub const PRIMARY: &str = "#c2410c";
        /// Featured badge.
        pub const FEATURED: &str = "#b45309";
        /// Error toasts.
        pub const ERROR: &str = "#dc2626";
        /// Info toasts.
        pub const INFO: &str = "#2563eb";
    }

    /// Border colors.
    pub mod border {
        /// Card borders.
        pub const DEFAULT: &str = "rgba(29, 27, 24, 0.1)";
        /// Hovered card borders.
        pub const STRONG: &str = "rgba(29, 27, 24, 0.24)";
    }

    /// Overrides applied under `data-theme="dark"`.
    pub mod dark {
        /// Page background.
        pub const BG_PRIMARY: &str = "#14130f";
        /// Card background.
        pub const BG_CARD: &str = "#1f1d19";
        /// Placeholder and muted surfaces.
        pub const BG_MUTED: &str = "#2a2823";
        /// Translucent header.
        pub const BG_HEADER: &str = "rgba(20, 19, 15, 0.85)";
        /// Body text.
        pub const TEXT_PRIMARY: &str = "#f3f0ea";
        /// Secondary text.
        pub const TEXT_SECONDARY: &str = "#b3ada3";
        /// Placeholder captions.
        pub const TEXT_DISABLED: &str = "#7a756c";
        /// Links and highlights.
        pub const ACCENT_PRIMARY: &str = "#fb923c";
        /// Card borders.
        pub const BORDER_DEFAULT: &str = "rgba(243, 240, 234, 0.12)";
        /// Hovered card borders.
        pub const BORDER_STRONG: &str = "rgba(243, 240, 234, 0.28)";
        /// Card shadow.
        pub const SHADOW: &str = "0 8px 24px rgba(0, 0, 0, 0.4)";
    }

    /// Translucent header over the light page.
    pub const HEADER: &str = "rgba(251, 250, 247, 0.85)";

    /// Conic gradient for the playing music toggle.
    pub const RAINBOW: &str = "conic-gradient(#ef4444, #f59e0b, #eab308, #22c55e, #06b6d4, #6366f1, #d946ef, #ef4444)";

    /// Card shadow.
    pub const SHADOW: &str = "0 8px 24px rgba(29, 27, 24, 0.08)";
}

/// Typography settings.
pub mod typography {
    /// Body font stack.
    pub const FONT_FAMILY: &str =
        "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', sans-serif";
    /// Heading font stack.
    pub const FONT_FAMILY_HEADING: &str = "Georgia, 'Times New Roman', serif";

    /// Font sizes.
    pub mod sizes {
        /// Small captions.
        pub const SM: &str = "0.875rem";
        /// Body.
        pub const BASE: &str = "1rem";
        /// Card titles.
        pub const LG: &str = "1.25rem";
        /// Hero title.
        pub const HERO: &str = "clamp(2rem, 5vw, 3.25rem)";
    }
}

/// Spacing scale.
pub mod spacing {
    /// Extra small.
    pub const XS: &str = "4px";
    /// Small.
    pub const SM: &str = "8px";
    /// Medium.
    pub const MD: &str = "16px";
    /// Large.
    pub const LG: &str = "24px";
    /// Extra large.
    pub const XL: &str = "48px";
}

/// Border radius scale.
pub mod radius {
    /// Tags and small controls.
    pub const SM: &str = "6px";
    /// Cards.
    pub const MD: &str = "14px";
    /// Round buttons and avatars.
    pub const FULL: &str = "9999px";
}

/// Generate CSS custom properties for the theme.
pub fn generate_css_variables() -> String {
    format!(
        r":root {{
  --bg-primary: {bg_primary};
  --bg-card: {bg_card};
  --bg-muted: {bg_muted};
  --bg-header: {bg_header};

  --text-primary: {text_primary};
  --text-secondary: {text_secondary};
  --text-disabled: {text_disabled};

  --accent-primary: {accent_primary};
  --accent-featured: {accent_featured};
  --accent-error: {accent_error};
  --accent-info: {accent_info};

  --border-default: {border_default};
  --border-strong: {border_strong};
  --gradient-rainbow: {rainbow};
  --shadow-card: {shadow};

  --font-family: {font_family};
  --font-family-heading: {font_family_heading};
  --font-size-sm: {font_sm};
  --font-size-base: {font_base};
  --font-size-lg: {font_lg};
  --font-size-hero: {font_hero};

  --spacing-xs: {spacing_xs};
  --spacing-sm: {spacing_sm};
  --spacing-md: {spacing_md};
  --spacing-lg: {spacing_lg};
  --spacing-xl: {spacing_xl};

  --radius-sm: {radius_sm};
  --radius-md: {radius_md};
  --radius-full: {radius_full};
}}",
        bg_primary = colors::background::PRIMARY,
        bg_card = colors::background::CARD,
        bg_muted = colors::background::MUTED,
        bg_header = colors::HEADER,
        text_primary = colors::text::PRIMARY,
        text_secondary = colors::text::SECONDARY,
        text_disabled = colors::text::DISABLED,
        accent_primary = colors::accent::PRIMARY,
        accent_featured = colors::accent::FEATURED,
        accent_error = colors::accent::ERROR,
        accent_info = colors::accent::INFO,
        border_default = colors::border::DEFAULT,
        border_strong = colors::border::STRONG,
        rainbow = colors::RAINBOW,
        shadow = colors::SHADOW,
        font_family = typography::FONT_FAMILY,
        font_family_heading = typography::FONT_FAMILY_HEADING,
        font_sm = typography::sizes::SM,
        font_base = typography::sizes::BASE,
        font_lg = typography::sizes::LG,
        font_hero = typography::sizes::HERO,
        spacing_xs = spacing::XS,
        spacing_sm = spacing::SM,
        spacing_md = spacing::MD,
        spacing_lg = spacing::LG,
        spacing_xl = spacing::XL,
        radius_sm = radius::SM,
        radius_md = radius::MD,
        radius_full = radius::FULL,
    )
}

/// Dark palette, switched on by the theme toggle.
pub fn generate_dark_css_variables() -> String {
    use colors::dark;
    format!(
        r#":root[data-theme="dark"] {{
  color-scheme: dark;
  --bg-primary: {};
  --bg-card: {};
  --bg-muted: {};
  --bg-header: {};
  --text-primary: {};
  --text-secondary: {};
  --text-disabled: {};
  --accent-primary: {};
  --border-default: {};
  --border-strong: {};
  --shadow-card: {};
}}"#,
        dark::BG_PRIMARY,
        dark::BG_CARD,
        dark::BG_MUTED,
        dark::BG_HEADER,
        dark::TEXT_PRIMARY,
        dark::TEXT_SECONDARY,
        dark::TEXT_DISABLED,
        dark::ACCENT_PRIMARY,
        dark::BORDER_DEFAULT,
        dark::BORDER_STRONG,
        dark::SHADOW,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_css_variables() {
        let css = generate_css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--bg-primary: #fbfaf7;"));
        assert!(css.contains("--gradient-rainbow: conic-gradient("));
        assert!(css.trim_end().ends_with('}'));
    }

    #[test]
    fn test_dark_variables_override_the_palette() {
        let css = generate_dark_css_variables();
        assert!(css.starts_with(r#":root[data-theme="dark"] {"#));
        assert!(css.contains("--bg-primary: #14130f;"));
        assert!(css.contains("--bg-header: rgba(20, 19, 15, 0.85);"));
        assert!(generate_css_variables().contains("--bg-header: rgba(251, 250, 247, 0.85);"));
    }

    #[test]
    fn test_color_values() {
        assert!(colors::background::PRIMARY.starts_with('#'));
        assert!(colors::accent::PRIMARY.starts_with('#'));
    }
}
