// File: crates/telemetry-core/tests/common/mod.rs
// Purpose: Recording ChartSurface used to observe passes, draws and font lifecycles without a GPU.

#![allow(dead_code)]

use telemetry_core::{ChartSurface, FontTier, RenderError, Rgba, TierFont};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Begin(FontTier, i32, i32),
    Text(FontTier, String, i32, i32, Rgba),
    End(FontTier),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FakeFont {
    pub tier: FontTier,
    pub scale: f32,
    pub serial: usize,
}

fn tier_factor(tier: FontTier) -> f32 {
    match tier {
        FontTier::Small => 1.0,
        FontTier::Medium => 1.5,
        FontTier::Large => 2.0,
    }
}

impl TierFont for FakeFont {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * 6.0 * tier_factor(self.tier) * self.scale
    }

    fn text_height(&self) -> f32 {
        10.0 * tier_factor(self.tier) * self.scale
    }
}

#[derive(Default)]
pub struct RecordingSurface {
    pub fonts_created: Vec<(FontTier, f32)>,
    pub events: Vec<Event>,
    pub boxes: Vec<(Rgba, f32, f32, f32, f32)>,
    pub refuse_fonts: bool,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<(FontTier, String, i32, i32, Rgba)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Text(t, s, x, y, c) => Some((*t, s.clone(), *x, *y, *c)),
                _ => None,
            })
            .collect()
    }

    pub fn passes(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::Begin(..))).count()
    }
}

impl ChartSurface for RecordingSurface {
    type Font = FakeFont;

    fn create_font(&mut self, tier: FontTier, scale: f32) -> Result<FakeFont, RenderError> {
        if self.refuse_fonts {
            return Err(RenderError::FontUnavailable { tier, reason: "refused".into() });
        }
        self.fonts_created.push((tier, scale));
        Ok(FakeFont { tier, scale, serial: self.fonts_created.len() })
    }

    fn draw_box(&mut self, color: Rgba, x: f32, y: f32, width: f32, height: f32) {
        self.boxes.push((color, x, y, width, height));
    }

    fn begin_pass(&mut self, font: &FakeFont, canvas_width: i32, canvas_height: i32) {
        self.events.push(Event::Begin(font.tier, canvas_width, canvas_height));
    }

    fn draw_text(&mut self, font: &FakeFont, text: &str, x: i32, y: i32, color: Rgba) {
        self.events.push(Event::Text(font.tier, text.to_string(), x, y, color));
    }

    fn end_pass(&mut self, font: &FakeFont) {
        self.events.push(Event::End(font.tier));
    }
}
