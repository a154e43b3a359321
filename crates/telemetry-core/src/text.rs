// File: crates/telemetry-core/src/text.rs
// Summary: Deferred, batched text rendering across three font tiers with periodic font recycling.
//
// Charts enqueue positioned text while computing their layout; the frame loop
// flushes every tier once after the chart geometry has been drawn, so text
// always lands on top. Font resources are rebuilt when the display scaling
// changes and every `recycle_after_frames` frames, which bounds whatever the
// backend's text shaper accumulates over time.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::RenderError;
use crate::types::Rgba;

/// One of the three independently batched text sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontTier {
    Small,
    Medium,
    Large,
}

impl FontTier {
    pub const ALL: [FontTier; 3] = [FontTier::Small, FontTier::Medium, FontTier::Large];

    const fn index(self) -> usize {
        match self {
            FontTier::Small => 0,
            FontTier::Medium => 1,
            FontTier::Large => 2,
        }
    }
}

/// A draw request captured at enqueue time, already translated to canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Rgba,
}

/// Metrics of one tier's font. Valid for the generation that created it.
pub trait TierFont {
    fn text_width(&self, text: &str) -> f32;
    /// Fixed pixel height of the tier's glyphs.
    fn text_height(&self) -> f32;
}

/// Drawing target for a frame. Coordinates are canvas pixels, origin bottom-left.
pub trait ChartSurface {
    type Font: TierFont;

    /// Build the text-shaping resource for `tier` at display `scale`.
    fn create_font(&mut self, tier: FontTier, scale: f32) -> Result<Self::Font, RenderError>;

    fn draw_box(&mut self, color: Rgba, x: f32, y: f32, width: f32, height: f32);

    fn begin_pass(&mut self, font: &Self::Font, canvas_width: i32, canvas_height: i32);
    fn draw_text(&mut self, font: &Self::Font, text: &str, x: i32, y: i32, color: Rgba);
    fn end_pass(&mut self, font: &Self::Font);
}

/// Tuning for [`TextBatchRenderer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchConfig {
    /// Fonts are rebuilt after this many flushed frames.
    pub recycle_after_frames: u32,
    /// Display scaling used by the first `initialise`.
    pub initial_scale: f32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            recycle_after_frames: 18_000, // 5 minutes at 60 Hz
            initial_scale: 1.0,
        }
    }
}

/// Observable lifecycle of the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    /// No fonts; measurements fail.
    Uninitialized,
    /// Fonts built, nothing pending.
    Ready,
    /// At least one draw request waits for `flush`.
    Accumulating,
}

struct Tier<F> {
    queue: VecDeque<PositionedText>,
    font: Option<F>,
    height: Option<f32>,
}

impl<F> Tier<F> {
    fn new() -> Self {
        Self { queue: VecDeque::new(), font: None, height: None }
    }
}

/// Batches text per tier and issues it once per frame against a [`ChartSurface`].
pub struct TextBatchRenderer<S: ChartSurface> {
    config: BatchConfig,
    tiers: [Tier<S::Font>; 3],
    x_offset: i32,
    y_offset: i32,
    canvas_width: i32,
    canvas_height: i32,
    scale: f32,
    scaling_changed: bool,
    frames_since_recycle: u32,
    generation: u64,
}

impl<S: ChartSurface> TextBatchRenderer<S> {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            tiers: std::array::from_fn(|_| Tier::new()),
            x_offset: 0,
            y_offset: 0,
            canvas_width: 0,
            canvas_height: 0,
            scale: config.initial_scale,
            scaling_changed: true,
            frames_since_recycle: 0,
            generation: 0,
        }
    }

    pub fn state(&self) -> RendererState {
        if self.tiers.iter().any(|t| t.font.is_none()) {
            RendererState::Uninitialized
        } else if self.tiers.iter().any(|t| !t.queue.is_empty()) {
            RendererState::Accumulating
        } else {
            RendererState::Ready
        }
    }

    /// Number of font generations built so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// (Re)build every tier's font and metrics. Existing fonts are dropped first;
    /// pending draw requests are kept.
    pub fn initialise(&mut self, surface: &mut S) -> Result<(), RenderError> {
        self.drop_fonts();
        for tier in FontTier::ALL {
            let font = surface.create_font(tier, self.scale)?;
            let slot = &mut self.tiers[tier.index()];
            slot.height = Some(font.text_height());
            slot.font = Some(font);
        }
        self.generation += 1;
        self.frames_since_recycle = 0;
        self.scaling_changed = false;
        debug!(generation = self.generation, scale = self.scale, "text fonts initialised");
        Ok(())
    }

    /// Release fonts and discard pending text, returning to `Uninitialized`.
    pub fn teardown(&mut self) {
        self.drop_fonts();
        self.discard_pending();
        self.scaling_changed = true;
    }

    fn drop_fonts(&mut self) {
        for slot in &mut self.tiers {
            slot.font = None;
            slot.height = None;
        }
    }

    /// Display scaling changed. The current fonts and their metrics are
    /// released at once; measurement fails until [`Self::prepare`] or the next
    /// flush rebuilds them at the new scale.
    pub fn scaling_factor_changed(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.scale = factor;
        }
        self.drop_fonts();
        self.scaling_changed = true;
    }

    /// Whether the coming flush would rebuild the fonts: they are missing,
    /// the scaling changed, or the current generation has drawn
    /// `recycle_after_frames` frames.
    pub fn needs_reinit(&self) -> bool {
        self.tiers.iter().any(|t| t.font.is_none())
            || self.scaling_changed
            || self.frames_since_recycle >= self.config.recycle_after_frames
    }

    /// Rebuild fonts now if the coming flush would, so a frame measures with
    /// the same generation it is drawn with. Call before any chart lays out.
    pub fn prepare(&mut self, surface: &mut S) -> Result<(), RenderError> {
        if !self.needs_reinit() {
            return Ok(());
        }
        if self.frames_since_recycle >= self.config.recycle_after_frames {
            debug!(frames = self.frames_since_recycle, "recycling text fonts");
        }
        self.initialise(surface)
    }

    /// Drop queued text without drawing it, e.g. when a frame is abandoned.
    pub fn discard_pending(&mut self) {
        for slot in &mut self.tiers {
            slot.queue.clear();
        }
    }

    /// Set the chart's lower-left corner and the canvas size for the following enqueues.
    pub fn set_origin(&mut self, x: i32, y: i32, canvas_width: i32, canvas_height: i32) {
        self.x_offset = x;
        self.y_offset = y;
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Queue `text` at chart-local `(x, y)`. The current origin is applied now,
    /// so later `set_origin` calls do not move it.
    pub fn enqueue(&mut self, tier: FontTier, text: impl Into<String>, x: i32, y: i32, color: Rgba) {
        self.tiers[tier.index()].queue.push_back(PositionedText {
            text: text.into(),
            x: x + self.x_offset,
            y: y + self.y_offset,
            color,
        });
    }

    pub fn pending(&self, tier: FontTier) -> usize {
        self.tiers[tier.index()].queue.len()
    }

    fn font(&self, tier: FontTier) -> Result<&S::Font, RenderError> {
        self.tiers[tier.index()].font.as_ref().ok_or(RenderError::NotInitialised { tier })
    }

    pub fn text_width(&self, tier: FontTier, text: &str) -> Result<f32, RenderError> {
        Ok(self.font(tier)?.text_width(text))
    }

    pub fn text_height(&self, tier: FontTier) -> Result<f32, RenderError> {
        self.tiers[tier.index()].height.ok_or(RenderError::NotInitialised { tier })
    }

    /// Draw and drain every queue, one pass per non-empty tier, in enqueue order.
    /// Recycles fonts first when [`Self::needs_reinit`] says so.
    /// Returns how many draws were issued.
    pub fn flush(&mut self, surface: &mut S) -> Result<usize, RenderError> {
        self.prepare(surface)?;
        self.frames_since_recycle = self.frames_since_recycle.saturating_add(1);

        let (width, height) = (self.canvas_width, self.canvas_height);
        let mut drawn = 0;
        for tier in FontTier::ALL {
            let slot = &mut self.tiers[tier.index()];
            if slot.queue.is_empty() {
                continue;
            }
            let Some(font) = slot.font.as_ref() else {
                return Err(RenderError::NotInitialised { tier });
            };
            surface.begin_pass(font, width, height);
            while let Some(pt) = slot.queue.pop_front() {
                surface.draw_text(font, &pt.text, pt.x, pt.y, pt.color);
                drawn += 1;
            }
            surface.end_pass(font);
        }
        trace!(drawn, "flushed queued text");
        Ok(drawn)
    }
}

impl<S: ChartSurface> Default for TextBatchRenderer<S> {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
