// File: crates/telemetry-core/src/config/shared.rs
// Summary: Settings published by the interaction thread and read by the render thread each frame.
//
// Scalars go through atomics (release store, acquire load). Text is not a
// scalar and sits behind an `RwLock`; the render thread only clones it.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::Rgba;

/// A cloneable handle to one published setting.
pub trait Shared<T>: Clone + Send + Sync + 'static {
    fn get(&self) -> T;
    fn set(&self, value: T);

    /// Observer that publishes every value a config field settles on.
    fn publisher(&self) -> Box<dyn FnMut(&T) + Send>
    where
        T: Clone,
    {
        let handle = self.clone();
        Box::new(move |v: &T| handle.set(v.clone()))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedI32(Arc<AtomicI32>);

impl SharedI32 {
    pub fn new(value: i32) -> Self {
        Self(Arc::new(AtomicI32::new(value)))
    }
}

impl Shared<i32> for SharedI32 {
    fn get(&self) -> i32 {
        self.0.load(Ordering::Acquire)
    }
    fn set(&self, value: i32) {
        self.0.store(value, Ordering::Release);
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedBool(Arc<AtomicBool>);

impl SharedBool {
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }
}

impl Shared<bool> for SharedBool {
    fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
    fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

/// Color packed as `0xRRGGBBAA` in one atomic word.
#[derive(Clone, Debug, Default)]
pub struct SharedColor(Arc<AtomicU32>);

impl SharedColor {
    pub fn new(value: Rgba) -> Self {
        Self(Arc::new(AtomicU32::new(value.to_u32())))
    }
}

impl Shared<Rgba> for SharedColor {
    fn get(&self) -> Rgba {
        Rgba::from_u32(self.0.load(Ordering::Acquire))
    }
    fn set(&self, value: Rgba) {
        self.0.store(value.to_u32(), Ordering::Release);
    }
}

#[derive(Clone, Debug, Default)]
pub struct SharedText(Arc<RwLock<String>>);

impl SharedText {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }
}

impl Shared<String> for SharedText {
    fn get(&self) -> String {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
    fn set(&self, value: String) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::{ConfigField, IntRange};

    #[test]
    fn field_publishes_across_threads() {
        let precision = SharedI32::new(0);
        let mut field = ConfigField::new("Decimal places", 6, IntRange::new(0, 6), precision.publisher());
        assert_eq!(precision.get(), 6);

        let reader = precision.clone();
        thread::spawn(move || field.edit("2")).join().unwrap();
        assert_eq!(reader.get(), 2);
    }

    #[test]
    fn color_round_trips_through_atomic() {
        let c = SharedColor::new(Rgba::WHITE);
        c.set(Rgba::new(204, 0, 0, 128));
        assert_eq!(c.get(), Rgba::new(204, 0, 0, 128));
    }

    #[test]
    fn text_setting_clones_out() {
        let t = SharedText::new("Data");
        let mut publish = t.publisher();
        publish(&"Flow".to_string());
        assert_eq!(t.get(), "Flow");
    }
}
