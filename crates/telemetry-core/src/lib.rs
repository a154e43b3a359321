// File: crates/telemetry-core/src/lib.rs
// Summary: Core library entry point; sample windows, batched text rendering and bound chart configuration.

pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod text;
pub mod theme;
pub mod types;
pub mod window;

pub use charts::{AnyChart, Chart, ChartKind, DrawContext, DrawOutcome};
pub use config::{BoundField, ConfigField, Layout, LayoutRow, LineQueue};
pub use dataset::{DatasetRegistry, MemoryDataset};
pub use error::{LayoutError, RenderError, TelemetryError, WindowError};
pub use frame::{render_frame, FrameInput, FrameReport, Tile};
pub use text::{BatchConfig, ChartSurface, FontTier, RendererState, TextBatchRenderer, TierFont};
pub use theme::Theme;
pub use types::Rgba;
pub use window::{SampleProvider, SampleWindow, Statistics, WindowOutcome, WindowRequest, WindowSpan};
