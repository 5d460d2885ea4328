// File: crates/hubchart-core/src/scale.rs
// Summary: Data-to-pixel transforms for cartesian and polar axes.

use std::f64::consts::PI;

/// Linear map of the value range [v0, v1] onto pixels [p0, p1].
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub p0: f32,
    pub p1: f32,
    pub v0: f64,
    pub v1: f64,
}

impl ValueScale {
    pub fn new(p0: f32, p1: f32, v0: f64, v1: f64) -> Self {
        let mut s = Self { p0, p1, v0, v1 };
        if (s.v1 - s.v0).abs() < 1e-12 { s.v1 = s.v0 + 1.0; }
        s
    }
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        self.p0 + ((v - self.v0) / (self.v1 - self.v0)) as f32 * (self.p1 - self.p0)
    }
    /// Pixel length of a data span.
    #[inline]
    pub fn span_px(&self, dv: f64) -> f32 {
        (dv / (self.v1 - self.v0)) as f32 * (self.p1 - self.p0)
    }
}

/// Polar map with theta zero at north, increasing clockwise, radius [0, rmax].
#[derive(Clone, Copy, Debug)]
pub struct PolarScale {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub rmax: f64,
}

impl PolarScale {
    pub fn new(cx: f32, cy: f32, radius: f32, rmax: f64) -> Self {
        Self { cx, cy, radius, rmax: if rmax > 0.0 { rmax } else { 1.0 } }
    }
    #[inline]
    pub fn radius_px(&self, r: f64) -> f32 {
        (r.max(0.0) / self.rmax) as f32 * self.radius
    }
    #[inline]
    pub fn to_px(&self, theta: f64, r: f64) -> (f32, f32) {
        let rp = self.radius_px(r);
        (self.cx + rp * theta.sin() as f32, self.cy - rp * theta.cos() as f32)
    }
    /// Skia angle (degrees clockwise from +x) of a compass theta in radians.
    pub fn skia_degrees(theta: f64) -> f32 {
        (theta * 180.0 / PI - 90.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints() {
        let s = ValueScale::new(400.0, 50.0, 0.0, 10.0);
        assert_eq!(s.to_px(0.0), 400.0);
        assert_eq!(s.to_px(10.0), 50.0);
        assert_eq!(s.span_px(5.0), -175.0);
    }

    #[test]
    fn polar_north_is_up_and_clockwise() {
        let p = PolarScale::new(100.0, 100.0, 50.0, 10.0);
        let (x, y) = p.to_px(0.0, 10.0);
        assert!((x - 100.0).abs() < 1e-4 && (y - 50.0).abs() < 1e-4);
        let (x, y) = p.to_px(PI / 2.0, 10.0);
        assert!((x - 150.0).abs() < 1e-4 && (y - 100.0).abs() < 1e-4);
    }
}
