// File: crates/telemetry-core/src/charts/mod.rs
// Summary: Chart capability interface, per-frame draw context and the closed registry of chart kinds.

pub mod indicator;
pub mod plan_position;

use crate::config::{Choice, ConfigField, Layout, LineQueue};
use crate::dataset::DatasetRegistry;
use crate::error::{LayoutError, RenderError, Result};
use crate::text::{ChartSurface, FontTier, TextBatchRenderer};
use crate::theme::Theme;
use crate::types::Rgba;

pub use indicator::IndicatorChart;
pub use plan_position::PlanPositionChart;

/// What happened to a chart during one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    /// Nothing to show yet (no dataset or too few samples).
    Skipped,
}

/// Everything a chart may touch while drawing one tile.
///
/// Coordinates handed to the helpers are tile-local pixels, origin bottom-left.
pub struct DrawContext<'a, S: ChartSurface> {
    pub surface: &'a mut S,
    pub text: &'a mut TextBatchRenderer<S>,
    pub datasets: &'a DatasetRegistry,
    pub theme: &'a Theme,
    /// Tile size.
    pub width: i32,
    pub height: i32,
    /// Tile lower-left corner on the canvas.
    pub x_offset: i32,
    pub y_offset: i32,
    /// Newest sample index of the frame, `None` before any data arrived.
    pub last_index: Option<usize>,
    pub zoom: f64,
}

impl<S: ChartSurface> DrawContext<'_, S> {
    /// Filled rectangle, drawn immediately (beneath any queued text).
    pub fn draw_box(&mut self, color: Rgba, x: f32, y: f32, width: f32, height: f32) {
        self.surface.draw_box(color, x + self.x_offset as f32, y + self.y_offset as f32, width, height);
    }

    pub fn text_width(&self, tier: FontTier, text: &str) -> Result<f32, RenderError> {
        self.text.text_width(tier, text)
    }

    pub fn text_height(&self, tier: FontTier) -> Result<f32, RenderError> {
        self.text.text_height(tier)
    }

    pub fn enqueue(&mut self, tier: FontTier, text: impl Into<String>, x: f32, y: f32, color: Rgba) {
        self.text.enqueue(tier, text, x as i32, y as i32, color);
    }
}

/// Capability every chart variant provides.
pub trait Chart {
    fn kind(&self) -> ChartKind;
    fn layout(&self) -> &Layout;
    fn layout_mut(&mut self) -> &mut Layout;
    fn draw<S: ChartSurface>(&mut self, ctx: &mut DrawContext<'_, S>) -> Result<DrawOutcome>;
}

/// The closed set of chart variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Indicator,
    PlanPosition,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Indicator, ChartKind::PlanPosition];

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Indicator => "Indicator",
            ChartKind::PlanPosition => "Plan Position",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn create(self, datasets: &DatasetRegistry) -> AnyChart {
        match self {
            ChartKind::Indicator => AnyChart::Indicator(IndicatorChart::new(datasets)),
            ChartKind::PlanPosition => AnyChart::PlanPosition(PlanPositionChart::new()),
        }
    }
}

/// Enum dispatch over the chart variants.
pub enum AnyChart {
    Indicator(IndicatorChart),
    PlanPosition(PlanPositionChart),
}

impl Chart for AnyChart {
    fn kind(&self) -> ChartKind {
        match self {
            AnyChart::Indicator(c) => c.kind(),
            AnyChart::PlanPosition(c) => c.kind(),
        }
    }

    fn layout(&self) -> &Layout {
        match self {
            AnyChart::Indicator(c) => c.layout(),
            AnyChart::PlanPosition(c) => c.layout(),
        }
    }

    fn layout_mut(&mut self) -> &mut Layout {
        match self {
            AnyChart::Indicator(c) => c.layout_mut(),
            AnyChart::PlanPosition(c) => c.layout_mut(),
        }
    }

    fn draw<S: ChartSurface>(&mut self, ctx: &mut DrawContext<'_, S>) -> Result<DrawOutcome> {
        match self {
            AnyChart::Indicator(c) => c.draw(ctx),
            AnyChart::PlanPosition(c) => c.draw(ctx),
        }
    }
}

fn chart_type_field() -> ConfigField<Choice> {
    let names = ChartKind::ALL.map(ChartKind::name);
    ConfigField::new("Chart type", names[0].to_string(), Choice::new(names), |_: &String| {})
}

/// Serialize charts: per chart a `chart type = <name>` line followed by its fields.
pub fn export_charts<'a, I>(charts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a AnyChart>,
{
    let mut lines = Vec::new();
    for chart in charts {
        let mut kind = chart_type_field();
        kind.set(chart.kind().name().to_string());
        lines.push(kind.export_state());
        lines.extend(chart.layout().export_state());
    }
    lines
}

/// Rebuild charts from layout lines written by [`export_charts`]. The first
/// defect aborts the whole load.
pub fn import_charts(lines: &mut LineQueue, datasets: &DatasetRegistry) -> Result<Vec<AnyChart>, LayoutError> {
    let mut charts = Vec::new();
    while !lines.is_empty() {
        let mut kind_field = chart_type_field();
        kind_field.import_state(lines)?;
        let kind = ChartKind::from_name(kind_field.value()).unwrap_or(ChartKind::Indicator);
        let mut chart = kind.create(datasets);
        chart.layout_mut().import_state(lines)?;
        charts.push(chart);
    }
    Ok(charts)
}
