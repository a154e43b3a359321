// File: crates/telemetry-render-skia/src/lib.rs
// Summary: Skia CPU raster surface and textlayout fonts behind the core ChartSurface seam.

use std::path::Path;

use anyhow::Result;
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};
use telemetry_core::types::{HEIGHT, WIDTH};
use telemetry_core::{ChartSurface, FontTier, RenderError, Rgba, Theme, TierFont};
use tracing::debug;

/// Canvas size and theme for a headless surface.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT, theme: Theme::dark() }
    }
}

fn to_skia(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// One tier's shaped-text settings. Height is measured once, when the font is built.
pub struct SkiaFont {
    fonts: FontCollection,
    size: f32,
    height: f32,
}

impl SkiaFont {
    fn new(fonts: FontCollection, size: f32) -> Self {
        let mut font = Self { fonts, size, height: 0.0 };
        let baseline = font.layout("Test", skia::Color::TRANSPARENT).alphabetic_baseline();
        // no usable face: fall back to the usual cap-height ratio
        font.height = if baseline.is_finite() && baseline > 0.0 { baseline } else { size * 0.8 };
        font
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    fn layout(&self, text: &str, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let mut style = TextStyle::new();
        style.set_font_size(self.size);
        style.set_color(color);
        style.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }
}

impl TierFont for SkiaFont {
    fn text_width(&self, text: &str) -> f32 {
        self.layout(text, skia::Color::TRANSPARENT).longest_line()
    }

    fn text_height(&self) -> f32 {
        self.height
    }
}

/// CPU raster canvas. Callers use bottom-left coordinates; the surface flips y.
pub struct SkiaSurface {
    surface: skia::Surface,
    fonts: FontCollection,
    theme: Theme,
    width: i32,
    height: i32,
    pass_height: i32,
}

impl SkiaSurface {
    pub fn new(opts: &RenderOptions) -> Result<Self> {
        let surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
        let mut fonts = FontCollection::new();
        // Use system manager fallback
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        debug!(width = opts.width, height = opts.height, theme = opts.theme.name, "raster surface created");
        Ok(Self { surface, fonts, theme: opts.theme, width: opts.width, height: opts.height, pass_height: opts.height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn clear(&mut self, color: Rgba) {
        self.surface.canvas().clear(to_skia(color));
    }

    fn flip_y(&self, y: f32, extent: f32) -> f32 {
        self.pass_height as f32 - y - extent
    }

    /// Snapshot the canvas as PNG bytes.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn save_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl ChartSurface for SkiaSurface {
    type Font = SkiaFont;

    fn create_font(&mut self, tier: FontTier, scale: f32) -> Result<SkiaFont, RenderError> {
        let size = self.theme.font_size(tier) * scale;
        if !(size.is_finite() && size >= 1.0) {
            return Err(RenderError::FontUnavailable { tier, reason: format!("invalid point size {size}") });
        }
        Ok(SkiaFont::new(self.fonts.clone(), size))
    }

    fn draw_box(&mut self, color: Rgba, x: f32, y: f32, width: f32, height: f32) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(false);
        paint.set_color(to_skia(color));
        let top = self.flip_y(y, height);
        self.surface.canvas().draw_rect(skia::Rect::from_xywh(x, top, width, height), &paint);
    }

    fn begin_pass(&mut self, _font: &SkiaFont, _canvas_width: i32, canvas_height: i32) {
        self.pass_height = if canvas_height > 0 { canvas_height } else { self.height };
    }

    fn draw_text(&mut self, font: &SkiaFont, text: &str, x: i32, y: i32, color: Rgba) {
        let mut paragraph = font.layout(text, to_skia(color));
        // paragraphs paint from their top-left corner; (x, y) is the baseline
        let top = self.flip_y(y as f32, paragraph.alphabetic_baseline());
        paragraph.paint(self.surface.canvas(), (x as f32, top));
    }

    fn end_pass(&mut self, _font: &SkiaFont) {
        self.pass_height = self.height;
    }
}
