// File: crates/telemetry-core/src/theme.rs
// Summary: Light/Dark theming: tile spacing, per-tier font sizes and chart colors.

use crate::text::FontTier;
use crate::types::Rgba;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Gap between a tile edge and its content, in pixels.
    pub tile_padding: f32,
    /// Gap between a text row and the region next to it.
    pub tick_text_padding: f32,
    pub small_font_size: f32,
    pub medium_font_size: f32,
    pub large_font_size: f32,
    pub background: Rgba,
    pub tile_background: Rgba,
    pub text: Rgba,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            tile_padding: 5.0,
            tick_text_padding: 3.0,
            small_font_size: 12.0,
            medium_font_size: 18.0,
            large_font_size: 26.0,
            background: Rgba::rgb(18, 18, 20),
            tile_background: Rgba::rgb(40, 40, 45),
            text: Rgba::rgb(235, 235, 245),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            tile_background: Rgba::rgb(230, 230, 235),
            text: Rgba::rgb(20, 20, 30),
            ..Self::dark()
        }
    }

    /// Point size for a text tier.
    pub fn font_size(&self, tier: FontTier) -> f32 {
        match tier {
            FontTier::Small => self.small_font_size,
            FontTier::Medium => self.medium_font_size,
            FontTier::Large => self.large_font_size,
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(find("LIGHT").name, "light");
        assert_eq!(find("sepia").name, "dark");
    }

    #[test]
    fn tiers_grow_in_size() {
        let t = Theme::dark();
        assert!(t.font_size(FontTier::Small) < t.font_size(FontTier::Medium));
        assert!(t.font_size(FontTier::Medium) < t.font_size(FontTier::Large));
    }
}
