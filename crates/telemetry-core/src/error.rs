// File: crates/telemetry-core/src/error.rs
// Summary: Typed errors for window selection, batched text rendering and layout import.

use thiserror::Error;

use crate::text::FontTier;

/// Umbrella error for everything the core can report.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Sample window could not be filled.
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// Text batching / renderer resource failure.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Persisted layout could not be applied.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Errors raised while filling a [`crate::window::SampleWindow`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// A provider tried to refill the window with zero samples.
    #[error("sample window refilled with an empty range")]
    EmptyRange,

    /// `start` lies after `end`.
    #[error("inverted sample range {start}..={end}")]
    InvertedRange {
        /// Requested first index.
        start: usize,
        /// Requested last index.
        end: usize,
    },

    /// `end` lies past the newest sample of the provider.
    #[error("sample index {end} out of bounds for a stream of {len}")]
    OutOfBounds {
        /// Requested last index.
        end: usize,
        /// Samples held by the provider.
        len: usize,
    },
}

/// Errors raised by [`crate::text::TextBatchRenderer`] and its surfaces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A measurement was requested before `initialise` built the tier's font.
    #[error("{tier:?} text tier used before the renderer was initialised")]
    NotInitialised {
        /// Tier that was queried.
        tier: FontTier,
    },

    /// The surface could not build a font for a tier.
    #[error("could not create {tier:?} font: {reason}")]
    FontUnavailable {
        /// Tier being built.
        tier: FontTier,
        /// Backend explanation.
        reason: String,
    },

    /// Any other backend failure.
    #[error("surface failure: {0}")]
    Surface(String),
}

/// Errors raised while importing a layout. Every variant aborts the whole load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The line queue ran dry before every field was restored.
    #[error("layout ended early, expected a line for '{key}'")]
    UnexpectedEnd {
        /// Key of the field that found no line.
        key: String,
    },

    /// The line does not belong to the field reading it.
    #[error("line {line}: expected key '{expected}', found '{found}'")]
    KeyMismatch {
        /// 1-based line number in the layout source.
        line: usize,
        /// Key of the reading field.
        expected: String,
        /// Whatever stood left of `=`.
        found: String,
    },

    /// The value does not match the field's grammar.
    #[error("line {line}: '{value}' is not a valid value for '{key}'")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Field key.
        key: String,
        /// Raw value text.
        value: String,
    },

    /// The value parsed but violates the field's constraint.
    #[error("line {line}: '{value}' is out of range for '{key}' ({reason})")]
    OutOfRange {
        /// 1-based line number.
        line: usize,
        /// Field key.
        key: String,
        /// Raw value text.
        value: String,
        /// Which limit was violated.
        reason: String,
    },
}

/// Convenience result alias used across the crate.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;
