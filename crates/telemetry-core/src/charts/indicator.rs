// File: crates/telemetry-core/src/charts/indicator.rs
// Summary: On/off indicator light driven by the newest sample, with optional statistics and min/max rows.

use super::{Chart, ChartKind, DrawContext, DrawOutcome};
use crate::config::{
    Choice, ColorPick, ConfigField, IntRange, Layout, Shared, SharedBool, SharedColor, SharedI32, SharedText,
    TextLimit, Toggle,
};
use crate::dataset::DatasetRegistry;
use crate::error::Result;
use crate::geometry::PlotRect;
use crate::text::{ChartSurface, FontTier};
use crate::types::Rgba;
use crate::window::{formatted_number, select, SampleWindow, WindowOutcome, WindowRequest, WindowSpan};

pub const SAMPLE_COUNT_DEFAULT: i32 = 1000;
pub const SAMPLE_COUNT_LOWER_LIMIT: i32 = 1;
pub const SAMPLE_COUNT_UPPER_LIMIT: i32 = i32::MAX;
pub const LABEL_LENGTH_LIMIT: usize = 16;
pub const DEFAULT_ON_FOREGROUND: Rgba = Rgba::WHITE;
pub const DEFAULT_OFF_FOREGROUND: Rgba = Rgba::WHITE;
pub const DEFAULT_ON_BACKGROUND: Rgba = Rgba::rgb(0, 204, 0);
pub const DEFAULT_OFF_BACKGROUND: Rgba = Rgba::rgb(204, 0, 0);

/// Option shown when no dataset has been registered.
pub const NO_DATASET: &str = "none";
pub const UNIT_SAMPLES: &str = "Samples";
pub const UNIT_MILLISECONDS: &str = "Milliseconds";

/// Values published by the settings fields and read every frame.
#[derive(Clone, Debug)]
pub struct IndicatorSettings {
    pub dataset: SharedText,
    pub chart_label: SharedText,
    pub on_value: SharedI32,
    pub on_label: SharedText,
    pub on_foreground: SharedColor,
    pub on_background: SharedColor,
    pub off_value: SharedI32,
    pub off_label: SharedText,
    pub off_foreground: SharedColor,
    pub off_background: SharedColor,
    pub duration: SharedI32,
    pub duration_unit: SharedText,
    pub show_chart_label: SharedBool,
    pub show_reading_label: SharedBool,
    pub show_min_max_labels: SharedBool,
    pub show_statistics: SharedBool,
    pub precision: SharedI32,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            dataset: SharedText::new(NO_DATASET),
            chart_label: SharedText::new("Data"),
            on_value: SharedI32::new(1),
            on_label: SharedText::new("On"),
            on_foreground: SharedColor::new(DEFAULT_ON_FOREGROUND),
            on_background: SharedColor::new(DEFAULT_ON_BACKGROUND),
            off_value: SharedI32::new(0),
            off_label: SharedText::new("Off"),
            off_foreground: SharedColor::new(DEFAULT_OFF_FOREGROUND),
            off_background: SharedColor::new(DEFAULT_OFF_BACKGROUND),
            duration: SharedI32::new(SAMPLE_COUNT_DEFAULT),
            duration_unit: SharedText::new(UNIT_SAMPLES),
            show_chart_label: SharedBool::new(true),
            show_reading_label: SharedBool::new(true),
            show_min_max_labels: SharedBool::new(true),
            show_statistics: SharedBool::new(true),
            precision: SharedI32::new(6),
        }
    }
}

impl IndicatorSettings {
    fn span(&self) -> WindowSpan {
        let duration = self.duration.get().max(SAMPLE_COUNT_LOWER_LIMIT);
        if self.duration_unit.get() == UNIT_MILLISECONDS {
            WindowSpan::Milliseconds(duration as u64)
        } else {
            WindowSpan::Samples(duration as u32)
        }
    }
}

pub struct IndicatorChart {
    settings: IndicatorSettings,
    layout: Layout,
    samples: SampleWindow,
}

impl IndicatorChart {
    pub fn new(datasets: &DatasetRegistry) -> Self {
        let settings = IndicatorSettings::default();
        let mut names = datasets.names();
        if names.is_empty() {
            names.push(NO_DATASET.to_string());
        }
        let s = &settings;
        let label = |text: &str| text.to_string();

        let layout = Layout::new()
            .field(ConfigField::new("Dataset", names[0].clone(), Choice::new(names), s.dataset.publisher()))
            .field(ConfigField::new("Chart label", label("Data"), TextLimit::new(LABEL_LENGTH_LIMIT), s.chart_label.publisher()))
            .separator()
            .field(ConfigField::new("Value if on", 1, IntRange::new(-i32::MAX, i32::MAX), s.on_value.publisher()))
            .field(ConfigField::new("Label if on", label("On"), TextLimit::new(LABEL_LENGTH_LIMIT), s.on_label.publisher()))
            .field(ConfigField::new("Foreground color if on", DEFAULT_ON_FOREGROUND, ColorPick, s.on_foreground.publisher()))
            .field(ConfigField::new("Background color if on", DEFAULT_ON_BACKGROUND, ColorPick, s.on_background.publisher()))
            .separator()
            .field(ConfigField::new("Value if off", 0, IntRange::new(-i32::MAX, i32::MAX), s.off_value.publisher()))
            .field(ConfigField::new("Label if off", label("Off"), TextLimit::new(LABEL_LENGTH_LIMIT), s.off_label.publisher()))
            .field(ConfigField::new("Foreground color if off", DEFAULT_OFF_FOREGROUND, ColorPick, s.off_foreground.publisher()))
            .field(ConfigField::new("Background color if off", DEFAULT_OFF_BACKGROUND, ColorPick, s.off_background.publisher()))
            .separator()
            .field(ConfigField::new(
                "Duration",
                SAMPLE_COUNT_DEFAULT,
                IntRange::new(SAMPLE_COUNT_LOWER_LIMIT, SAMPLE_COUNT_UPPER_LIMIT),
                s.duration.publisher(),
            ))
            .field(ConfigField::new(
                "Duration unit",
                label(UNIT_SAMPLES),
                Choice::new([UNIT_SAMPLES, UNIT_MILLISECONDS]),
                s.duration_unit.publisher(),
            ))
            .separator()
            .field(ConfigField::new("Show chart label", true, Toggle::default(), s.show_chart_label.publisher()))
            .field(ConfigField::new("Show reading label", true, Toggle::default(), s.show_reading_label.publisher()))
            .field(ConfigField::new("Show min/max labels", true, Toggle::default(), s.show_min_max_labels.publisher()))
            .field(ConfigField::new("Show statistics", true, Toggle::default(), s.show_statistics.publisher()))
            .field(ConfigField::new("Decimal places", 6, IntRange::new(0, 6), s.precision.publisher()));

        Self { settings, layout, samples: SampleWindow::new() }
    }

    /// Handles to the published settings, for readers on other threads.
    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// The window selected by the most recent drawn frame.
    pub fn samples(&self) -> &SampleWindow {
        &self.samples
    }
}

impl Chart for IndicatorChart {
    fn kind(&self) -> ChartKind {
        ChartKind::Indicator
    }

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    fn draw<S: ChartSurface>(&mut self, ctx: &mut DrawContext<'_, S>) -> Result<DrawOutcome> {
        let s = &self.settings;
        let datasets = ctx.datasets;
        let Some(dataset) = datasets.get(&s.dataset.get()) else {
            return Ok(DrawOutcome::Skipped);
        };
        let request = WindowRequest::new(ctx.last_index, s.span(), ctx.zoom)
            .with_min_samples(SAMPLE_COUNT_LOWER_LIMIT as usize);
        if select(&**dataset, &request, &mut self.samples)? == WindowOutcome::Insufficient {
            return Ok(DrawOutcome::Skipped);
        }
        let Some(newest) = self.samples.last() else {
            return Ok(DrawOutcome::Skipped);
        };

        let theme = *ctx.theme;
        let precision = s.precision.get().clamp(0, 6) as usize;
        let mut plot = PlotRect::inset(ctx.width as f32, ctx.height as f32, theme.tile_padding);

        let (reading, foreground, background) = if newest == s.on_value.get() as f32 {
            (s.on_label.get(), s.on_foreground.get(), s.on_background.get())
        } else {
            (s.off_label.get(), s.off_foreground.get(), s.off_background.get())
        };

        let small_height = ctx.text_height(FontTier::Small)?;
        if s.show_statistics.get() {
            if let Some(stats) = self.samples.statistics() {
                let mean_text = format!("Mean: {}", formatted_number(stats.mean, precision));
                let std_dev_text = format!("Std Dev: {}", formatted_number(stats.std_dev, precision));
                let std_dev_width = ctx.text_width(FontTier::Small, &std_dev_text)?;
                let row_width = ctx.text_width(FontTier::Small, &mean_text)? + theme.tick_text_padding + std_dev_width;
                let baseline = plot.top - small_height;
                if row_width < plot.width() {
                    ctx.enqueue(FontTier::Small, mean_text, plot.left, baseline, theme.text);
                    ctx.enqueue(FontTier::Small, std_dev_text, plot.right - std_dev_width, baseline, theme.text);
                }
                plot.top = baseline - theme.tick_text_padding;
            }
        }

        if s.show_min_max_labels.get() {
            let baseline = theme.tile_padding;
            let min_label = formatted_number(f64::from(self.samples.min()), precision);
            let max_label = formatted_number(f64::from(self.samples.max()), precision);
            let max_width = ctx.text_width(FontTier::Small, &max_label)?;
            if ctx.text_width(FontTier::Small, &min_label)? + theme.tick_text_padding + max_width < plot.width() {
                ctx.enqueue(FontTier::Small, min_label, plot.left, baseline, theme.text);
                ctx.enqueue(FontTier::Small, max_label, plot.right - max_width, baseline, theme.text);
            }
            plot.bottom = baseline + small_height + theme.tick_text_padding;
        }

        let label = match (s.show_chart_label.get(), s.show_reading_label.get()) {
            (true, true) => format!("{} {}", s.chart_label.get(), reading),
            (true, false) => s.chart_label.get(),
            (false, true) => reading,
            (false, false) => " ".to_string(),
        };
        let label_width = ctx.text_width(FontTier::Large, &label)?;
        let large_height = ctx.text_height(FontTier::Large)?;
        let x = plot.center_x() - label_width / 2.0;
        let y = plot.bottom + (plot.height() - large_height) / 2.0;
        ctx.enqueue(FontTier::Large, label, x, y, foreground);

        ctx.draw_box(background, plot.left, plot.bottom, plot.width(), plot.height());
        Ok(DrawOutcome::Drawn)
    }
}
