// File: crates/telemetry-core/src/charts/plan_position.rs
// Summary: Plan-position display tile; reserves the display region and draws its caption.

use super::{Chart, ChartKind, DrawContext, DrawOutcome};
use crate::config::{ConfigField, Layout, Shared, SharedBool, Toggle};
use crate::error::Result;
use crate::geometry::PlotRect;
use crate::text::{ChartSurface, FontTier};

pub struct PlanPositionChart {
    show_label: SharedBool,
    layout: Layout,
    display: PlotRect,
}

impl PlanPositionChart {
    pub fn new() -> Self {
        let show_label = SharedBool::new(true);
        let layout = Layout::new().field(ConfigField::new("Show Label", true, Toggle::default(), show_label.publisher()));
        Self { show_label, layout, display: PlotRect::from_lbrt(0.0, 0.0, 0.0, 0.0) }
    }

    /// Region left for the display after the caption, as of the last frame.
    pub fn display_region(&self) -> PlotRect {
        self.display
    }
}

impl Default for PlanPositionChart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart for PlanPositionChart {
    fn kind(&self) -> ChartKind {
        ChartKind::PlanPosition
    }

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    fn draw<S: ChartSurface>(&mut self, ctx: &mut DrawContext<'_, S>) -> Result<DrawOutcome> {
        let padding = ctx.theme.tile_padding;
        let (width, height) = (ctx.width as f32, ctx.height as f32);
        self.display = PlotRect::inset(width, height, padding);

        if self.show_label.get() {
            let caption = self.kind().name();
            let caption_width = ctx.text_width(FontTier::Large, caption)?;
            let baseline = padding;
            let top = baseline + ctx.text_height(FontTier::Large)?;
            self.display.bottom = top + ctx.theme.tick_text_padding + padding;

            if caption_width < width - padding * 2.0 {
                let x = width / 2.0 - caption_width / 2.0;
                let color = ctx.theme.text;
                ctx.enqueue(FontTier::Large, caption, x, baseline, color);
            }
        }
        Ok(DrawOutcome::Drawn)
    }
}
