// File: crates/telemetry-core/src/config/layout.rs
// Summary: Ordered layout descriptors (fields + separators) and the shared line queue used for persistence.

use std::collections::VecDeque;

use tracing::warn;

use super::field::BoundField;
use crate::error::LayoutError;

/// Remaining lines of a layout source, consumed front to back.
/// Each line keeps its 1-based position for error reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineQueue {
    lines: VecDeque<(usize, String)>,
}

impl LineQueue {
    /// Split `text` into lines; `\r\n` endings are accepted.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .enumerate()
                .map(|(i, l)| {
                    let mut l: String = l.into();
                    if l.ends_with('\r') {
                        l.pop();
                    }
                    (i + 1, l)
                })
                .collect(),
        }
    }

    /// Remove and return the next line with its number.
    pub fn pop(&mut self) -> Option<(usize, String)> {
        self.lines.pop_front()
    }

    /// Look at the `offset`-th remaining line without consuming it.
    pub fn peek(&self, offset: usize) -> Option<(usize, &str)> {
        self.lines.get(offset).map(|(n, l)| (*n, l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One row of a chart's settings panel.
pub enum LayoutRow {
    Field(Box<dyn BoundField>),
    /// Visual gap between groups; never persisted.
    Separator,
}

/// Declaration-ordered settings of one chart. The order is the persistence
/// contract: export writes fields in this order and import reads them back in it.
#[derive(Default)]
pub struct Layout {
    rows: Vec<LayoutRow>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl BoundField + 'static) -> Self {
        self.rows.push(LayoutRow::Field(Box::new(field)));
        self
    }

    pub fn separator(mut self) -> Self {
        self.rows.push(LayoutRow::Separator);
        self
    }

    pub fn rows(&self) -> &[LayoutRow] {
        &self.rows
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn BoundField> + '_ {
        self.rows.iter().filter_map(|row| match row {
            LayoutRow::Field(f) => Some(&**f),
            LayoutRow::Separator => None,
        })
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn BoundField>> + '_ {
        self.rows.iter_mut().filter_map(|row| match row {
            LayoutRow::Field(f) => Some(f),
            LayoutRow::Separator => None,
        })
    }

    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    /// Field whose key matches `label` after trimming and lowercasing.
    pub fn find_mut(&mut self, label: &str) -> Option<&mut Box<dyn BoundField>> {
        let key = label.trim().to_lowercase();
        self.fields_mut().find(|f| f.key() == key)
    }

    /// Apply a live edit to the field named `label`. Returns `false` when no
    /// such field exists.
    pub fn edit(&mut self, label: &str, raw: &str) -> bool {
        match self.find_mut(label) {
            Some(field) => {
                field.edit(raw);
                true
            }
            None => false,
        }
    }

    pub fn sanity_check_all(&mut self) {
        for field in self.fields_mut() {
            field.sanity_check();
        }
    }

    /// One line per field, in declaration order.
    pub fn export_state(&self) -> Vec<String> {
        self.fields().map(|f| f.export_state()).collect()
    }

    /// Restore every field from the front of `lines`.
    ///
    /// All lines are validated before any field changes, so a defective layout
    /// leaves the chart exactly as it was (and leaves `lines` unconsumed).
    pub fn import_state(&mut self, lines: &mut LineQueue) -> Result<(), LayoutError> {
        for (offset, field) in self.fields().enumerate() {
            let checked = match lines.peek(offset) {
                Some((number, line)) => field.check_line(number, line),
                None => Err(LayoutError::UnexpectedEnd { key: field.key().to_string() }),
            };
            if let Err(e) = checked {
                warn!(error = %e, "layout import aborted");
                return Err(e);
            }
        }
        for field in self.fields_mut() {
            field.import_state(lines)?;
        }
        Ok(())
    }
}
