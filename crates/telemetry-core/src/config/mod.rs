// File: crates/telemetry-core/src/config/mod.rs
// Summary: Bound chart configuration: constraints, fields, layout persistence and shared settings.

pub mod constraint;
pub mod field;
pub mod layout;
pub mod shared;

pub use constraint::{Choice, ColorPick, Constraint, IntRange, TextLimit, Toggle};
pub use field::{BoundField, ConfigField, OnChange};
pub use layout::{Layout, LayoutRow, LineQueue};
pub use shared::{Shared, SharedBool, SharedColor, SharedI32, SharedText};
