// File: crates/hubchart-core/src/artist.rs
// Summary: Drawable artists held by an Axes (lines, fills, stacks, bars, markers,
// reference lines, spans, texts, polar wedges, tables) and their paint helpers.

use skia_safe as skia;

use crate::style::{Dash, FontSpec, LineSpec, Marker, Rgb};
use crate::text::{HAlign, VAlign};

/// Coordinate system of an artist position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coords {
    Data,
    /// Axes fraction, (0, 0) bottom-left.
    Axes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineArtist {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    /// Stroke width in points; zero draws markers only.
    pub width: f32,
    pub dash: Dash,
    pub alpha: f32,
    pub marker: Marker,
    pub marker_color: Rgb,
    /// Marker size in points.
    pub marker_size: f32,
}

impl LineArtist {
    pub fn new(points: Vec<(f64, f64)>, color: Rgb, spec: &LineSpec) -> Self {
        Self {
            points,
            color,
            width: spec.width,
            dash: spec.dash,
            alpha: spec.alpha,
            marker: Marker::None,
            marker_color: color,
            marker_size: spec.marker_size,
        }
    }

    pub fn with_marker(mut self, marker: Marker, color: Rgb) -> Self {
        self.marker = marker;
        self.marker_color = color;
        self
    }

    pub fn with_dash(mut self, dash: Dash) -> Self {
        self.dash = dash;
        self
    }

    /// Circle of radius `r` on a polar axes.
    pub fn circle(r: f64, color: Rgb, spec: &LineSpec) -> Self {
        let points = (0..=180).map(|i| (i as f64 * std::f64::consts::TAU / 180.0, r)).collect();
        Self::new(points, color, spec)
    }
}

/// One bar: `pos` is the center along the category axis, `value` the length from `base`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub pos: f64,
    pub value: f64,
    pub width: f64,
    pub base: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextArtist {
    pub text: String,
    pub at: (f64, f64),
    pub coords: Coords,
    pub font: FontSpec,
    pub anchor: (HAlign, VAlign),
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    /// Offset from `at` in points, y up.
    pub offset: (f32, f32),
}

impl TextArtist {
    pub fn new(text: impl Into<String>, at: (f64, f64), coords: Coords, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            at,
            coords,
            font,
            anchor: (HAlign::Center, VAlign::Center),
            rotation: 0.0,
            offset: (0.0, 0.0),
        }
    }

    pub fn anchored(mut self, h: HAlign, v: VAlign) -> Self {
        self.anchor = (h, v);
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        self.offset = (dx, dy);
        self
    }
}

/// Grid of text cells placed in axes-fraction bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// (left, bottom, right, top) in axes fraction.
    pub bounds: (f64, f64, f64, f64),
    pub cells: Vec<Vec<String>>,
    pub fills: Vec<Vec<Option<Rgb>>>,
    pub font: FontSpec,
    pub edge: Option<Rgb>,
}

impl Table {
    pub fn new(bounds: (f64, f64, f64, f64), cells: Vec<Vec<String>>, font: FontSpec) -> Self {
        let fills = cells.iter().map(|row| vec![None; row.len()]).collect();
        Self { bounds, cells, fills, font, edge: None }
    }

    pub fn columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Artist {
    Line(LineArtist),
    /// Area between the points and a horizontal baseline.
    Fill { points: Vec<(f64, f64)>, base: f64, color: Rgb, alpha: f32 },
    /// Stacked layers over a shared x; NaN counts as zero.
    Stack { x: Vec<f64>, layers: Vec<Vec<f64>>, colors: Vec<Rgb>, alpha: f32 },
    Bars { bars: Vec<Bar>, alpha: f32, horizontal: bool },
    Markers { points: Vec<(f64, f64)>, marker: Marker, color: Rgb, size: f32, alpha: f32 },
    HLine { y: f64, color: Rgb, width: f32, dash: Dash, alpha: f32 },
    VLine { x: f64, color: Rgb, width: f32, dash: Dash, alpha: f32 },
    VSpan { x0: f64, x1: f64, color: Rgb, alpha: f32 },
    /// Fills the whole axes area.
    Background { color: Rgb },
    Text(TextArtist),
    /// Polar bar: angular center and width in radians, radial extent `r0..r1`.
    Wedge { theta: f64, width: f64, r0: f64, r1: f64, color: Rgb, alpha: f32 },
    Table(Table),
}

/// Artist with its stacking order.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub artist: Artist,
    pub zorder: f32,
}

// ---- paint helpers ----------------------------------------------------------

pub(crate) fn stroke_paint(color: Rgb, alpha: f32, width_px: f32, dash: Dash) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width_px);
    paint.set_color(color.with_alpha(alpha));
    if let Some(intervals) = dash.intervals(width_px) {
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    paint
}

pub(crate) fn fill_paint(color: Rgb, alpha: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.with_alpha(alpha));
    paint
}

fn polygon(points: &[(f32, f32)]) -> skia::Path {
    let mut path = skia::Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close();
    }
    path
}

/// Draw a marker centered at `at`; `size` is the marker's extent in pixels.
pub(crate) fn draw_marker(canvas: &skia::Canvas, marker: Marker, at: (f32, f32), size: f32, color: Rgb, alpha: f32) {
    let (x, y) = at;
    let h = size * 0.5;
    let fill = fill_paint(color, alpha);
    let stroke = stroke_paint(color, alpha, (size * 0.15).max(1.0), Dash::Solid);
    match marker {
        Marker::None => {}
        Marker::Point => {
            canvas.draw_circle((x, y), h * 0.5, &fill);
        }
        Marker::Circle => {
            canvas.draw_circle((x, y), h, &fill);
        }
        Marker::Square => {
            canvas.draw_rect(skia::Rect::from_ltrb(x - h, y - h, x + h, y + h), &fill);
        }
        Marker::TriangleUp => {
            canvas.draw_path(&polygon(&[(x, y - h), (x + h, y + h), (x - h, y + h)]), &fill);
        }
        Marker::TriangleDown => {
            canvas.draw_path(&polygon(&[(x, y + h), (x + h, y - h), (x - h, y - h)]), &fill);
        }
        Marker::TriangleLeft => {
            canvas.draw_path(&polygon(&[(x - h, y), (x + h, y - h), (x + h, y + h)]), &fill);
        }
        Marker::TriangleRight => {
            canvas.draw_path(&polygon(&[(x + h, y), (x - h, y - h), (x - h, y + h)]), &fill);
        }
        Marker::Diamond => {
            canvas.draw_path(&polygon(&[(x, y - h), (x + h, y), (x, y + h), (x - h, y)]), &fill);
        }
        Marker::Star => {
            let pts: Vec<(f32, f32)> = (0..10)
                .map(|i| {
                    let r = if i % 2 == 0 { h } else { h * 0.4 };
                    let a = std::f32::consts::PI * i as f32 / 5.0;
                    (x + r * a.sin(), y - r * a.cos())
                })
                .collect();
            canvas.draw_path(&polygon(&pts), &fill);
        }
        Marker::Hexagon => {
            let pts: Vec<(f32, f32)> = (0..6)
                .map(|i| {
                    let a = std::f32::consts::PI * i as f32 / 3.0;
                    (x + h * a.sin(), y - h * a.cos())
                })
                .collect();
            canvas.draw_path(&polygon(&pts), &fill);
        }
        Marker::Plus => {
            canvas.draw_line((x - h, y), (x + h, y), &stroke);
            canvas.draw_line((x, y - h), (x, y + h), &stroke);
        }
        Marker::Cross => {
            canvas.draw_line((x - h, y - h), (x + h, y + h), &stroke);
            canvas.draw_line((x - h, y + h), (x + h, y - h), &stroke);
        }
        Marker::VLine => {
            canvas.draw_line((x, y - h), (x, y + h), &stroke);
        }
        Marker::HLine => {
            canvas.draw_line((x - h, y), (x + h, y), &stroke);
        }
    }
}

/// Split a polyline into runs of finite points.
pub(crate) fn finite_runs(points: &[(f64, f64)]) -> Vec<&[(f64, f64)]> {
    points
        .split(|(x, y)| !(x.is_finite() && y.is_finite()))
        .filter(|run| !run.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_breaks_polyline() {
        let pts = [(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 4.0)];
        let runs = finite_runs(&pts);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], &[(2.0, 3.0), (3.0, 4.0)]);
    }

    #[test]
    fn table_columns_use_widest_row() {
        let font = FontSpec { family: "DejaVu Sans".into(), size: 8.0, color: Rgb::WHITE };
        let t = Table::new((0.0, 0.0, 1.0, 1.0), vec![vec!["a".into()], vec!["b".into(), "c".into()]], font);
        assert_eq!(t.columns(), 2);
        assert_eq!(t.fills[1].len(), 2);
    }
}
