// File: crates/hubchart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use skia_safe as skia;

/// Pixel rectangle, y growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PxRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PxRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn center(&self) -> (f32, f32) {
        ((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }
    /// Map an axes fraction (0,0 bottom-left .. 1,1 top-right) to pixels.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> (f32, f32) {
        (
            self.left + fx as f32 * self.width(),
            self.bottom - fy as f32 * self.height(),
        )
    }
    pub fn to_skia(self) -> skia::Rect {
        skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
