// File: crates/telemetry-core/src/dataset.rs
// Summary: In-memory timestamped sample stream and a name-keyed registry of streams.

use std::sync::Arc;

use crate::error::WindowError;
use crate::types::Rgba;
use crate::window::{SampleProvider, SampleWindow};

/// One telemetry channel: values with millisecond timestamps, oldest first.
/// Timestamps are expected to be non-decreasing.
#[derive(Clone, Debug)]
pub struct MemoryDataset {
    name: String,
    unit: String,
    color: Rgba,
    timestamps: Vec<i64>,
    values: Vec<f32>,
}

impl MemoryDataset {
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            color: Rgba::rgb(64, 160, 255),
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn push(&mut self, timestamp_ms: i64, value: f32) {
        self.timestamps.push(timestamp_ms);
        self.values.push(value);
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn unit(&self) -> &str { &self.unit }
    pub fn color(&self) -> Rgba { self.color }

    pub fn value(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    pub fn timestamp(&self, index: usize) -> Option<i64> {
        self.timestamps.get(index).copied()
    }

    /// Index of the newest sample.
    pub fn last_index(&self) -> Option<usize> {
        self.values.len().checked_sub(1)
    }
}

impl Extend<(i64, f32)> for MemoryDataset {
    fn extend<I: IntoIterator<Item = (i64, f32)>>(&mut self, iter: I) {
        for (t, v) in iter {
            self.push(t, v);
        }
    }
}

impl SampleProvider for MemoryDataset {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn fill(&self, start: usize, end: usize, out: &mut SampleWindow) -> Result<(), WindowError> {
        if start > end {
            return Err(WindowError::InvertedRange { start, end });
        }
        let slice = self
            .values
            .get(start..=end)
            .ok_or(WindowError::OutOfBounds { end, len: self.values.len() })?;
        out.refill(start, slice.iter().copied())
    }

    fn start_for_duration(&self, last: usize, duration_ms: f64) -> usize {
        let Some(&newest) = self.timestamps.get(last) else {
            return last;
        };
        let cutoff = newest as f64 - duration_ms;
        self.timestamps[..=last].partition_point(|&t| (t as f64) < cutoff)
    }
}

/// The datasets a chart may pick from, in registration order.
#[derive(Clone, Debug, Default)]
pub struct DatasetRegistry {
    sets: Vec<Arc<MemoryDataset>>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dataset: MemoryDataset) -> Arc<MemoryDataset> {
        let dataset = Arc::new(dataset);
        self.sets.push(Arc::clone(&dataset));
        dataset
    }

    pub fn names(&self) -> Vec<String> {
        self.sets.iter().map(|d| d.name().to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<MemoryDataset>> {
        self.sets.iter().find(|d| d.name() == name)
    }

    pub fn first(&self) -> Option<&Arc<MemoryDataset>> {
        self.sets.first()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
