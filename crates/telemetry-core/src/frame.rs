// File: crates/telemetry-core/src/frame.rs
// Summary: One frame of the render loop: place tiles, let charts draw and queue text, flush once.

use tracing::trace;

use crate::charts::{AnyChart, Chart, DrawContext, DrawOutcome};
use crate::dataset::DatasetRegistry;
use crate::error::Result;
use crate::text::{ChartSurface, TextBatchRenderer};
use crate::theme::Theme;

/// A chart and the canvas region it occupies (lower-left corner + size).
pub struct Tile {
    pub chart: AnyChart,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Frame-wide inputs shared by every tile.
pub struct FrameInput<'a> {
    pub datasets: &'a DatasetRegistry,
    pub theme: &'a Theme,
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub last_index: Option<usize>,
    pub zoom: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub drawn: usize,
    pub skipped: usize,
    /// Text draws issued by the flush.
    pub text_draws: usize,
}

/// Draw every tile, then flush the queued text exactly once. Fonts are
/// rebuilt before any chart measures, and a failed frame leaves no text queued.
pub fn render_frame<S: ChartSurface>(
    surface: &mut S,
    text: &mut TextBatchRenderer<S>,
    tiles: &mut [Tile],
    input: &FrameInput<'_>,
) -> Result<FrameReport> {
    text.prepare(surface)?;
    surface.draw_box(input.theme.background, 0.0, 0.0, input.canvas_width as f32, input.canvas_height as f32);

    let mut report = match draw_tiles(surface, text, tiles, input) {
        Ok(report) => report,
        Err(e) => {
            text.discard_pending();
            return Err(e);
        }
    };
    report.text_draws = text.flush(surface)?;
    trace!(?report, "frame rendered");
    Ok(report)
}

fn draw_tiles<S: ChartSurface>(
    surface: &mut S,
    text: &mut TextBatchRenderer<S>,
    tiles: &mut [Tile],
    input: &FrameInput<'_>,
) -> Result<FrameReport> {
    let mut report = FrameReport::default();
    for tile in tiles.iter_mut() {
        surface.draw_box(
            input.theme.tile_background,
            tile.x as f32,
            tile.y as f32,
            tile.width as f32,
            tile.height as f32,
        );
        text.set_origin(tile.x, tile.y, input.canvas_width, input.canvas_height);
        let mut ctx = DrawContext {
            surface: &mut *surface,
            text: &mut *text,
            datasets: input.datasets,
            theme: input.theme,
            width: tile.width,
            height: tile.height,
            x_offset: tile.x,
            y_offset: tile.y,
            last_index: input.last_index,
            zoom: input.zoom,
        };
        match tile.chart.draw(&mut ctx)? {
            DrawOutcome::Drawn => report.drawn += 1,
            DrawOutcome::Skipped => report.skipped += 1,
        }
    }
    Ok(report)
}
