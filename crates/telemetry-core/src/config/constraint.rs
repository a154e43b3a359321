// File: crates/telemetry-core/src/config/constraint.rs
// Summary: Value constraints for bound config fields: integer range, text length, color, toggle, choice.

use std::fmt;

use crate::types::Rgba;

/// What a field accepts, how live edits are corrected, and how values read as text.
///
/// `format` is the canonical single-line text: it is both what the widget
/// shows and what a layout file stores.
pub trait Constraint {
    type Value: Clone + PartialEq + fmt::Debug;

    /// Parse raw widget input. `None` when it cannot be read at all.
    fn parse(&self, raw: &str) -> Option<Self::Value>;

    /// Parse a value read from a layout line. Defaults to [`Constraint::parse`].
    fn parse_persisted(&self, text: &str) -> Option<Self::Value> {
        self.parse(text)
    }

    /// Bring a parsed live edit into range. `None` reverts the field to its default.
    fn correct(&self, value: Self::Value) -> Option<Self::Value>;

    /// Strict check for persisted values; the error names the violated limit.
    fn admit(&self, value: &Self::Value) -> Result<(), String>;

    fn format(&self, value: &Self::Value) -> String;
}

/// Signed integer within `[lower, upper]`. Live edits are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    pub lower: i32,
    pub upper: i32,
}

impl IntRange {
    pub const fn new(lower: i32, upper: i32) -> Self {
        Self { lower, upper }
    }
}

impl Constraint for IntRange {
    type Value = i32;

    fn parse(&self, raw: &str) -> Option<i32> {
        // wide parse so oversized input still clamps instead of reverting
        let wide: i64 = raw.trim().parse().ok()?;
        Some(wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    fn parse_persisted(&self, text: &str) -> Option<i32> {
        text.parse().ok()
    }

    fn correct(&self, value: i32) -> Option<i32> {
        Some(value.clamp(self.lower, self.upper))
    }

    fn admit(&self, value: &i32) -> Result<(), String> {
        if (self.lower..=self.upper).contains(value) {
            Ok(())
        } else {
            Err(format!("allowed range is [{}, {}]", self.lower, self.upper))
        }
    }

    fn format(&self, value: &i32) -> String {
        value.to_string()
    }
}

/// Trimmed, non-empty, single-line text of at most `max_chars` characters.
/// Live edits that break the limit revert to the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextLimit {
    pub max_chars: usize,
}

impl TextLimit {
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Constraint for TextLimit {
    type Value = String;

    fn parse(&self, raw: &str) -> Option<String> {
        Some(raw.trim().to_string())
    }

    fn correct(&self, value: String) -> Option<String> {
        self.admit(&value).ok().map(|()| value)
    }

    fn admit(&self, value: &String) -> Result<(), String> {
        let n = value.chars().count();
        if n == 0 {
            Err("text is empty".to_string())
        } else if n > self.max_chars {
            Err(format!("{n} characters, limit is {}", self.max_chars))
        } else if value.chars().any(char::is_control) {
            // a layout line must stay a single line
            Err("text contains control characters".to_string())
        } else {
            Ok(())
        }
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}

/// Any RGBA color, written `0xRRGGBBAA`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorPick;

impl Constraint for ColorPick {
    type Value = Rgba;

    fn parse(&self, raw: &str) -> Option<Rgba> {
        Rgba::from_hex(raw.trim())
    }

    fn parse_persisted(&self, text: &str) -> Option<Rgba> {
        Rgba::from_hex(text)
    }

    fn correct(&self, value: Rgba) -> Option<Rgba> {
        Some(value)
    }

    fn admit(&self, _value: &Rgba) -> Result<(), String> {
        Ok(())
    }

    fn format(&self, value: &Rgba) -> String {
        value.to_string()
    }
}

/// Boolean written with caller-chosen tokens (`true` / `false` by default).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toggle {
    pub on: &'static str,
    pub off: &'static str,
}

impl Toggle {
    pub const fn new(on: &'static str, off: &'static str) -> Self {
        Self { on, off }
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new("true", "false")
    }
}

impl Constraint for Toggle {
    type Value = bool;

    fn parse(&self, raw: &str) -> Option<bool> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case(self.on) {
            Some(true)
        } else if raw.eq_ignore_ascii_case(self.off) {
            Some(false)
        } else {
            None
        }
    }

    fn parse_persisted(&self, text: &str) -> Option<bool> {
        if text == self.on {
            Some(true)
        } else if text == self.off {
            Some(false)
        } else {
            None
        }
    }

    fn correct(&self, value: bool) -> Option<bool> {
        Some(value)
    }

    fn admit(&self, _value: &bool) -> Result<(), String> {
        Ok(())
    }

    fn format(&self, value: &bool) -> String {
        (if *value { self.on } else { self.off }).to_string()
    }
}

/// One entry of a fixed option list (dataset names, axis modes).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    options: Vec<String>,
}

impl Choice {
    pub fn new<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self { options: options.into_iter().map(Into::into).collect() }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl Constraint for Choice {
    type Value = String;

    fn parse(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        self.options.iter().find(|o| o.eq_ignore_ascii_case(raw)).cloned()
    }

    fn parse_persisted(&self, text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn correct(&self, value: String) -> Option<String> {
        self.options.contains(&value).then_some(value)
    }

    fn admit(&self, value: &String) -> Result<(), String> {
        if self.options.contains(value) {
            Ok(())
        } else {
            Err(format!("expected one of {:?}", self.options))
        }
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }
}
