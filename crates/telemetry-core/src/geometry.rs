// File: crates/telemetry-core/src/geometry.rs
// Summary: Lightweight geometry helpers for chart-local pixel math (origin bottom-left, y up).

/// Axis-aligned region inside a chart tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl PlotRect {
    pub const fn from_lbrt(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    /// Tile of `width` x `height` shrunk by `padding` on every side.
    pub fn inset(width: f32, height: f32, padding: f32) -> Self {
        Self::from_lbrt(padding, padding, width - padding, height - padding)
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.top - self.bottom }
    pub fn center_x(&self) -> f32 { self.left + self.width() / 2.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_every_side() {
        let r = PlotRect::inset(200.0, 100.0, 5.0);
        assert_eq!(r.width(), 190.0);
        assert_eq!(r.height(), 90.0);
        assert_eq!(r.center_x(), 100.0);
    }
}
