// File: crates/hubchart-core/src/types.rs
// Summary: Shared sizing constants and the figure-fraction frame used to place axes.

use crate::geometry::PxRect;

/// Default surface width in pixels.
pub const WIDTH: i32 = 600;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 250;
/// Default resolution; font point sizes scale by `dpi / 72`.
pub const DPI: f32 = 100.0;

/// Axes placement as fractions of the figure, origin bottom-left.
/// Contract: 0 <= left < right <= 1 and 0 <= bottom < top <= 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Frame {
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    /// Whole figure, for charts that draw without axes.
    pub const fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn to_px(&self, width: i32, height: i32) -> PxRect {
        let (w, h) = (width as f32, height as f32);
        PxRect::from_ltrb(self.left * w, (1.0 - self.top) * h, self.right * w, (1.0 - self.bottom) * h)
    }

    /// Row `index` (0 = top) of `count` equal rows stacked inside this frame.
    pub fn row(&self, index: usize, count: usize, gap: f32) -> Frame {
        let count = count.max(1) as f32;
        let slot = (self.top - self.bottom) / count;
        let top = self.top - slot * index as f32;
        Frame::new(self.left, top - slot + gap * slot, self.right, top)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0.10, 0.20, 0.90, 0.90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_maps_to_pixels_top_down() {
        let px = Frame::default().to_px(1000, 500);
        assert_eq!(px.left, 100.0);
        assert_eq!(px.right, 900.0);
        assert_eq!(px.top, 50.0);
        assert_eq!(px.bottom, 400.0);
    }

    #[test]
    fn rows_split_top_to_bottom() {
        let f = Frame::new(0.1, 0.0, 0.9, 1.0);
        let r0 = f.row(0, 2, 0.0);
        let r1 = f.row(1, 2, 0.0);
        assert_eq!(r0.top, 1.0);
        assert_eq!(r0.bottom, 0.5);
        assert_eq!(r1.top, 0.5);
        assert_eq!(r1.bottom, 0.0);
    }
}
