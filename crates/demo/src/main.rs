// File: crates/demo/src/main.rs
// Summary: Demo loads a telemetry CSV, lays out indicator tiles, replays the stream as PNG frames and saves the layout.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use telemetry_core::charts::indicator::LABEL_LENGTH_LIMIT;
use telemetry_core::charts::{export_charts, import_charts};
use telemetry_core::{
    render_frame, AnyChart, Chart, ChartKind, DatasetRegistry, FrameInput, LineQueue, MemoryDataset, TextBatchRenderer,
    Tile,
};
use telemetry_render_skia::{RenderOptions, SkiaSurface};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Spacing assumed between rows that carry no usable timestamp.
const FALLBACK_INTERVAL_MS: i64 = 10;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // telemetry-demo <stream.csv> [layout.txt] [frames]
    let mut args = std::env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "crates/demo/data/pump_valve.csv".to_string()));
    let layout_path = args.next().filter(|a| !a.is_empty() && a != "-").map(PathBuf::from);
    let frames: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("frame count '{n}' is not a number"))?,
        None => 3,
    };

    let datasets = load_stream_csv(&input).with_context(|| format!("failed to load CSV '{}'", input.display()))?;
    if datasets.is_empty() {
        anyhow::bail!("no value columns found in '{}'", input.display());
    }
    info!(datasets = ?datasets.names(), "stream loaded");

    let charts = match &layout_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading layout {}", path.display()))?;
            import_charts(&mut LineQueue::from_text(&text), &datasets)
                .with_context(|| format!("layout {} rejected", path.display()))?
        }
        None => default_charts(&datasets)?,
    };

    let opts = RenderOptions::default();
    let mut tiles = place_tiles(charts, opts.width, opts.height);
    let mut surface = SkiaSurface::new(&opts)?;
    let mut text = TextBatchRenderer::default();

    let newest = datasets.first().and_then(|d| d.last_index());
    let frames = frames.max(1);
    for frame in 0..frames {
        // replay: each frame sees a longer prefix of the stream
        let last_index = newest.map(|n| (n + 1) * (frame + 1) / frames).and_then(|n| n.checked_sub(1));
        let input_frame = FrameInput {
            datasets: &datasets,
            theme: &opts.theme,
            canvas_width: opts.width,
            canvas_height: opts.height,
            last_index,
            zoom: 1.0,
        };
        let report = render_frame(&mut surface, &mut text, &mut tiles, &input_frame)?;
        let out = out_name_with(&input, &format!("frame{frame}"), "png");
        surface.save_png(&out)?;
        info!(frame, drawn = report.drawn, skipped = report.skipped, text = report.text_draws, "wrote {}", out.display());
    }

    let layout_out = out_name_with(&input, "layout", "txt");
    let mut saved = export_charts(tiles.iter().map(|t| &t.chart)).join("\n");
    saved.push('\n');
    std::fs::write(&layout_out, saved).with_context(|| format!("writing {}", layout_out.display()))?;
    info!("wrote {}", layout_out.display());
    Ok(())
}

/// One indicator per dataset, then a plan-position tile.
fn default_charts(datasets: &DatasetRegistry) -> Result<Vec<AnyChart>> {
    let mut charts = Vec::new();
    for name in datasets.names() {
        let mut chart = ChartKind::Indicator.create(datasets);
        let label: String = name.chars().take(LABEL_LENGTH_LIMIT).collect();
        if label != name {
            info!(dataset = %name, label = %label, "dataset name shortened for its chart label");
        }
        let layout = chart.layout_mut();
        if !layout.edit("Dataset", &name) || !layout.edit("Chart label", &label) {
            anyhow::bail!("indicator layout has no dataset/label field");
        }
        charts.push(chart);
    }
    charts.push(ChartKind::PlanPosition.create(datasets));
    Ok(charts)
}

/// Grid placement, filled top row first; tile corners are bottom-left.
fn place_tiles(charts: Vec<AnyChart>, width: i32, height: i32) -> Vec<Tile> {
    let count = charts.len().max(1);
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let (tile_w, tile_h) = (width / cols as i32, height / rows as i32);
    charts
        .into_iter()
        .enumerate()
        .map(|(i, chart)| {
            let (col, row) = ((i % cols) as i32, (i / cols) as i32);
            Tile { chart, x: col * tile_w, y: height - (row + 1) * tile_h, width: tile_w, height: tile_h }
        })
        .collect()
}

/// Produce output file name like target/out/telemetry_<stem>_<suffix>.<ext>
fn out_name_with(input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("stream");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("telemetry_{stem}_{suffix}.{ext}"));
    out
}

/// Load a CSV whose first time-like column holds timestamps and whose other
/// numeric columns each become a dataset.
fn load_stream_csv(path: &Path) -> Result<DatasetRegistry> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let time_col = headers
        .iter()
        .position(|h| matches!(h.to_lowercase().as_str(), "time" | "timestamp" | "date" | "datetime" | "ms"));
    let mut columns: Vec<(usize, MemoryDataset)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != time_col)
        .map(|(i, h)| (i, MemoryDataset::new(h.clone(), "")))
        .collect();

    let mut next_fallback = 0_i64;
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let timestamp = time_col
            .and_then(|ix| rec.get(ix))
            .and_then(parse_timestamp_ms)
            .unwrap_or(next_fallback);
        next_fallback = timestamp + FALLBACK_INTERVAL_MS;

        let values: Option<Vec<f32>> = columns.iter().map(|(ix, _)| rec.get(*ix).and_then(|s| s.parse().ok())).collect();
        match values {
            Some(values) => {
                for ((_, dataset), v) in columns.iter_mut().zip(values) {
                    dataset.push(timestamp, v);
                }
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows with missing or non-numeric values were ignored");
    }

    let mut registry = DatasetRegistry::new();
    for (_, dataset) in columns {
        registry.register(dataset);
    }
    Ok(registry)
}

/// Epoch seconds or milliseconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS[.fff]` (UTC).
fn parse_timestamp_ms(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch sec -> ms
        return if n < 10_i64.pow(11) { n.checked_mul(1000) } else { Some(n) };
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}
