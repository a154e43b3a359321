// File: crates/telemetry-core/src/config/field.rs
// Summary: Generic bound config field with one validation path for live edits and layout import.

use tracing::debug;

use super::constraint::Constraint;
use super::layout::LineQueue;
use crate::error::LayoutError;

/// Observer notified with every value the field settles on.
pub type OnChange<T> = Box<dyn FnMut(&T) + Send>;

/// A user-editable chart setting.
///
/// `raw` mirrors what the widget displays. After every [`ConfigField::sanity_check`]
/// it holds the canonical text of `value`, and `value` satisfies the constraint.
pub struct ConfigField<C: Constraint> {
    label: String,
    key: String,
    raw: String,
    value: C::Value,
    default: C::Value,
    constraint: C,
    on_change: OnChange<C::Value>,
}

impl<C: Constraint> ConfigField<C> {
    /// Build the field showing `default` and notify `on_change` once with it.
    /// `default` must satisfy `constraint`.
    pub fn new<F>(label: impl Into<String>, default: C::Value, constraint: C, on_change: F) -> Self
    where
        F: FnMut(&C::Value) + Send + 'static,
    {
        let label = label.into();
        debug_assert!(constraint.admit(&default).is_ok(), "default for '{label}' violates its constraint");
        let mut field = Self {
            key: label.trim().to_lowercase(),
            raw: constraint.format(&default),
            value: default.clone(),
            default,
            label,
            constraint,
            on_change: Box::new(on_change),
        };
        field.sanity_check();
        field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lowercased, trimmed label used as the layout key.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &C::Value {
        &self.value
    }

    pub fn default_value(&self) -> &C::Value {
        &self.default
    }

    /// Text currently shown by the widget.
    pub fn display(&self) -> &str {
        &self.raw
    }

    pub fn constraint(&self) -> &C {
        &self.constraint
    }

    /// A user typed `raw` into the widget.
    pub fn edit(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.sanity_check();
    }

    /// Programmatic update; goes through the same correction as a live edit.
    pub fn set(&mut self, value: C::Value) {
        self.raw = self.constraint.format(&value);
        self.sanity_check();
    }

    /// Re-read the widget text, clamp or fall back to the default, rewrite the
    /// display and notify the observer with the corrected value.
    pub fn sanity_check(&mut self) {
        let corrected = match self.constraint.parse(&self.raw) {
            Some(parsed) => match self.constraint.correct(parsed.clone()) {
                Some(fixed) => {
                    if fixed != parsed {
                        debug!(key = %self.key, from = ?parsed, to = ?fixed, "clamped config value");
                    }
                    fixed
                }
                None => {
                    debug!(key = %self.key, rejected = ?parsed, "config value reverted to default");
                    self.default.clone()
                }
            },
            None => {
                debug!(key = %self.key, raw = %self.raw, "unparseable config input, using default");
                self.default.clone()
            }
        };
        self.raw = self.constraint.format(&corrected);
        self.value = corrected;
        (self.on_change)(&self.value);
    }

    /// The single persisted line, `"<key> = <value>"`.
    pub fn export_state(&self) -> String {
        format!("{} = {}", self.key, self.constraint.format(&self.value))
    }

    /// Parse and strictly validate one layout line against this field.
    pub fn parse_line(&self, line_number: usize, line: &str) -> Result<C::Value, LayoutError> {
        let Some((found, text)) = line.split_once(" = ") else {
            return Err(LayoutError::KeyMismatch {
                line: line_number,
                expected: self.key.clone(),
                found: line.to_string(),
            });
        };
        if found != self.key {
            return Err(LayoutError::KeyMismatch {
                line: line_number,
                expected: self.key.clone(),
                found: found.to_string(),
            });
        }
        let value = self.constraint.parse_persisted(text).ok_or_else(|| LayoutError::Malformed {
            line: line_number,
            key: self.key.clone(),
            value: text.to_string(),
        })?;
        self.constraint.admit(&value).map_err(|reason| LayoutError::OutOfRange {
            line: line_number,
            key: self.key.clone(),
            value: text.to_string(),
            reason,
        })?;
        Ok(value)
    }

    /// Consume exactly one line from `lines` and apply it. Any defect is fatal
    /// and leaves the field untouched.
    pub fn import_state(&mut self, lines: &mut LineQueue) -> Result<(), LayoutError> {
        let (line_number, line) = lines
            .pop()
            .ok_or_else(|| LayoutError::UnexpectedEnd { key: self.key.clone() })?;
        let value = self.parse_line(line_number, &line)?;
        self.set(value);
        Ok(())
    }
}

/// Object-safe view of a field, used by layouts to walk mixed field types in order.
pub trait BoundField: Send {
    fn label(&self) -> &str;
    fn key(&self) -> &str;
    fn display(&self) -> &str;
    /// Feed raw widget text through the field's correction path.
    fn edit(&mut self, raw: &str);
    fn sanity_check(&mut self);
    fn export_state(&self) -> String;
    /// Validate a layout line without applying it.
    fn check_line(&self, line_number: usize, line: &str) -> Result<(), LayoutError>;
    fn import_state(&mut self, lines: &mut LineQueue) -> Result<(), LayoutError>;
}

impl<C> BoundField for ConfigField<C>
where
    C: Constraint + Send,
    C::Value: Send,
{
    fn label(&self) -> &str {
        ConfigField::label(self)
    }

    fn key(&self) -> &str {
        ConfigField::key(self)
    }

    fn display(&self) -> &str {
        ConfigField::display(self)
    }

    fn edit(&mut self, raw: &str) {
        ConfigField::edit(self, raw);
    }

    fn sanity_check(&mut self) {
        ConfigField::sanity_check(self);
    }

    fn export_state(&self) -> String {
        ConfigField::export_state(self)
    }

    fn check_line(&self, line_number: usize, line: &str) -> Result<(), LayoutError> {
        self.parse_line(line_number, line).map(|_| ())
    }

    fn import_state(&mut self, lines: &mut LineQueue) -> Result<(), LayoutError> {
        ConfigField::import_state(self, lines)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::config::constraint::{ColorPick, IntRange, TextLimit};
    use crate::types::Rgba;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(&T) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
    }

    #[test]
    fn construction_notifies_default_once() {
        let (seen, cb) = recorder::<i32>();
        let f = ConfigField::new("Decimal places", 6, IntRange::new(0, 6), cb);
        assert_eq!(*seen.lock().unwrap(), vec![6]);
        assert_eq!(f.key(), "decimal places");
        assert_eq!(f.display(), "6");
    }

    #[test]
    fn live_edit_above_upper_clamps() {
        let (seen, cb) = recorder::<i32>();
        let mut f = ConfigField::new("Decimal places", 2, IntRange::new(0, 6), cb);
        f.edit("42");
        assert_eq!(*f.value(), 6);
        assert_eq!(f.display(), "6");
        assert_eq!(seen.lock().unwrap().last(), Some(&6));
    }

    #[test]
    fn garbage_edit_reverts_to_default() {
        let (seen, cb) = recorder::<i32>();
        let mut f = ConfigField::new("Value if true", 1, IntRange::new(-10, 10), cb);
        f.edit("5");
        f.edit("five");
        assert_eq!(*f.value(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![1, 5, 1]);
    }

    #[test]
    fn over_long_text_reverts_to_default() {
        let (_, cb) = recorder::<String>();
        let mut f = ConfigField::new("Chart label", "Data".to_string(), TextLimit::new(4), cb);
        f.edit("  Flow ");
        assert_eq!(f.value(), "Flow");
        f.edit("Pressure");
        assert_eq!(f.value(), "Data");
        assert_eq!(f.display(), "Data");
    }

    #[test]
    fn multi_line_text_never_reaches_export() {
        let (seen, cb) = recorder::<String>();
        let mut f = ConfigField::new("Chart label", "Data".to_string(), TextLimit::new(16), cb);
        f.edit("Pump\nA");
        assert_eq!(f.value(), "Data");
        f.edit("Pump\tA");
        assert_eq!(f.value(), "Data");
        assert_eq!(f.export_state(), "chart label = Data");
        assert!(seen.lock().unwrap().iter().all(|v| v == "Data"));

        let mut lines = LineQueue::from_lines(["chart label = Pump\u{7}"]);
        assert!(matches!(f.import_state(&mut lines), Err(LayoutError::OutOfRange { line: 1, .. })));
        assert_eq!(f.value(), "Data");
    }

    #[test]
    fn color_exports_hex_line() {
        let (_, cb) = recorder::<Rgba>();
        let f = ConfigField::new("Background color if on", Rgba::rgb(0, 204, 0), ColorPick, cb);
        assert_eq!(f.export_state(), "background color if on = 0x00CC00FF");
    }

    #[test]
    fn import_out_of_range_is_fatal_and_leaves_value() {
        let (seen, cb) = recorder::<i32>();
        let mut f = ConfigField::new("Precision", 3, IntRange::new(0, 6), cb);
        let mut lines = LineQueue::from_text("precision = 7\n");
        let err = f.import_state(&mut lines).unwrap_err();
        assert!(matches!(err, LayoutError::OutOfRange { line: 1, .. }));
        assert_eq!(*f.value(), 3);
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(lines.is_empty());
    }

    #[test]
    fn import_notifies_exactly_once() {
        let (seen, cb) = recorder::<i32>();
        let mut f = ConfigField::new("Precision", 3, IntRange::new(0, 6), cb);
        let mut lines = LineQueue::from_text("precision = 5");
        f.import_state(&mut lines).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3, 5]);
    }

    #[test]
    fn import_rejects_wrong_key_and_missing_line() {
        let (_, cb) = recorder::<i32>();
        let mut f = ConfigField::new("Precision", 3, IntRange::new(0, 6), cb);
        let mut lines = LineQueue::from_text("decimals = 2");
        assert!(matches!(f.import_state(&mut lines), Err(LayoutError::KeyMismatch { .. })));
        assert!(matches!(f.import_state(&mut lines), Err(LayoutError::UnexpectedEnd { .. })));
        let mut lines = LineQueue::from_text("precision = two");
        assert!(matches!(f.import_state(&mut lines), Err(LayoutError::Malformed { .. })));
    }
}
