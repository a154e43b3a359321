// File: crates/telemetry-core/src/window.rs
// Summary: Visible sample window selection over a growing stream, plus descriptive statistics.

use crate::error::WindowError;

/// Smallest zoom factor accepted. Smaller factors are raised to it; non-finite ones count as 1.
pub const MIN_ZOOM: f64 = 0.001;

/// How much history a chart asks for before zoom is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowSpan {
    /// A fixed number of samples.
    Samples(u32),
    /// Every sample newer than this many milliseconds before the newest one.
    Milliseconds(u64),
}

/// Read access to a time-series stream, indexed from 0 (oldest) upwards.
pub trait SampleProvider {
    /// Number of samples currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy samples `start..=end` into `out`.
    fn fill(&self, start: usize, end: usize, out: &mut SampleWindow) -> Result<(), WindowError>;

    /// Index of the oldest sample whose timestamp is at most `duration_ms`
    /// before the timestamp of `last`.
    fn start_for_duration(&self, last: usize, duration_ms: f64) -> usize;
}

/// Result of a window selection for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowOutcome {
    /// The window was refilled and can be drawn.
    Ready,
    /// Not enough samples for the chart's domain; skip drawing this frame.
    Insufficient,
}

/// A frame's selection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRequest {
    /// Index of the newest sample, `None` when the stream is empty.
    pub last_index: Option<usize>,
    pub span: WindowSpan,
    pub zoom: f64,
    /// Minimum number of samples the chart needs (the chart's domain, at least 1).
    pub min_samples: usize,
}

impl WindowRequest {
    pub fn new(last_index: Option<usize>, span: WindowSpan, zoom: f64) -> Self {
        Self { last_index, span, zoom, min_samples: 1 }
    }

    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    fn zoom(&self) -> f64 {
        if self.zoom.is_finite() { self.zoom.max(MIN_ZOOM) } else { 1.0 }
    }
}

/// Compute the inclusive index range to draw, or `None` when the stream holds
/// fewer samples than the requested domain.
pub fn visible_range<P: SampleProvider + ?Sized>(provider: &P, request: &WindowRequest) -> Option<(usize, usize)> {
    let newest = provider.len().checked_sub(1)?;
    let end = request.last_index?.min(newest);
    let zoom = request.zoom();
    let min_domain = request.min_samples.max(1) as i64 - 1;

    let end_i = end as i64;
    let mut start = match request.span {
        WindowSpan::Samples(count) => {
            let visible = (f64::from(count) * zoom) as i64;
            end_i - visible + 1
        }
        WindowSpan::Milliseconds(ms) => provider.start_for_duration(end, ms as f64 * zoom) as i64,
    };
    if end_i - start < min_domain {
        start = end_i - min_domain;
    }
    if start < 0 {
        start = 0;
    }
    if end_i - start < min_domain {
        return None;
    }
    Some((start as usize, end))
}

/// Select and fill the frame's window. `Insufficient` is a normal empty-stream
/// state; the caller skips drawing.
pub fn select<P: SampleProvider + ?Sized>(
    provider: &P,
    request: &WindowRequest,
    out: &mut SampleWindow,
) -> Result<WindowOutcome, WindowError> {
    match visible_range(provider, request) {
        Some((start, end)) => {
            provider.fill(start, end, out)?;
            Ok(WindowOutcome::Ready)
        }
        None => Ok(WindowOutcome::Insufficient),
    }
}

/// The bounded slice of a stream visible in a chart, oldest first.
///
/// Contract: once filled, `values().len() == end_index() - start_index() + 1`
/// and `min() <= v <= max()` for every value. A fresh window is empty until
/// its first refill.
#[derive(Clone, Debug, Default)]
pub struct SampleWindow {
    start_index: usize,
    end_index: usize,
    values: Vec<f32>,
    min: f32,
    max: f32,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents in place, starting at stream index `start`.
    /// On error the window is left empty.
    pub fn refill<I>(&mut self, start: usize, values: I) -> Result<(), WindowError>
    where
        I: IntoIterator<Item = f32>,
    {
        self.values.clear();
        self.values.extend(values);
        if self.values.is_empty() {
            self.start_index = start;
            self.end_index = start;
            self.min = 0.0;
            self.max = 0.0;
            return Err(WindowError::EmptyRange);
        }
        self.start_index = start;
        self.end_index = start + self.values.len() - 1;
        self.recompute_bounds();
        Ok(())
    }

    fn recompute_bounds(&mut self) {
        let (min, max) = self
            .values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        self.min = min;
        self.max = max;
    }

    pub fn start_index(&self) -> usize { self.start_index }
    pub fn end_index(&self) -> usize { self.end_index }
    pub fn values(&self) -> &[f32] { &self.values }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn min(&self) -> f32 { self.min }
    pub fn max(&self) -> f32 { self.max }

    /// Newest sample in the window.
    pub fn last(&self) -> Option<f32> {
        self.values.last().copied()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_values(&self.values)
    }
}

/// Descriptive statistics over a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (Bessel-corrected); 0 for a single value.
    pub std_dev: f64,
}

impl Statistics {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mut sum = 0.0f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            let v = f64::from(v);
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        let mean = sum / n as f64;
        let std_dev = if n < 2 {
            0.0
        } else {
            let ss: f64 = values.iter().map(|&v| (f64::from(v) - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        };
        Some(Self { count: n, min, max, mean, std_dev })
    }
}

/// Format `value` with `decimals` places; zero places prints an integer with
/// no trailing separator.
pub fn formatted_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}
