// File: crates/hubchart-core/src/legend.rs
// Summary: Legend built from explicit handles, laid out column-major below the axes.

use skia_safe as skia;

use crate::artist::{draw_marker, fill_paint, stroke_paint};
use crate::geometry::PxRect;
use crate::style::{Dash, FontSpec, Marker, Rgb};
use crate::text::{HAlign, TextShaper, VAlign};

/// What a legend entry shows next to its label.
#[derive(Clone, Debug, PartialEq)]
pub enum LegendHandle {
    Line { color: Rgb, width: f32, dash: Dash, marker: Marker, marker_color: Rgb },
    /// Filled rectangle (bars, fills, stack layers).
    Patch { color: Rgb, alpha: f32 },
    /// Zero-length line with a marker (scatter groups).
    Marker { marker: Marker, color: Rgb },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub handle: LegendHandle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub columns: usize,
    pub font: FontSpec,
    /// Top-center of the legend box in axes fraction.
    pub anchor: (f64, f64),
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>, columns: usize, font: FontSpec) -> Self {
        Self { entries, columns: columns.max(1), font, anchor: (0.5, -0.15) }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns.max(1))
    }

    /// Draw below (or wherever `anchor` points) the given axes rectangle.
    pub(crate) fn draw(&self, canvas: &skia::Canvas, shaper: Option<&TextShaper>, rect: PxRect, pt: f32) {
        if self.entries.is_empty() {
            return;
        }
        let size_px = self.font.size * pt;
        let row_h = size_px * 1.6;
        let handle_w = size_px * 2.0;
        let gap = size_px * 0.6;
        let col_gap = size_px * 1.5;
        let rows = self.rows();

        // Column-major: entry k sits in column k / rows, row k % rows.
        let columns: Vec<&[LegendEntry]> = self.entries.chunks(rows.max(1)).collect();
        let widths: Vec<f32> = columns
            .iter()
            .map(|col| {
                let label_w = col
                    .iter()
                    .map(|e| shaper.map_or(0.0, |s| s.measure(&e.label, &self.font.family, self.font.size).0))
                    .fold(0.0f32, f32::max);
                handle_w + gap + label_w
            })
            .collect();
        let total_w = widths.iter().sum::<f32>() + col_gap * (widths.len().saturating_sub(1)) as f32;
        let (ax, ay) = rect.at_fraction(self.anchor.0, self.anchor.1);
        let mut left = ax - total_w * 0.5;

        for (col, width) in columns.iter().zip(&widths) {
            for (r, entry) in col.iter().enumerate() {
                let cy = ay + row_h * (r as f32 + 0.5);
                draw_handle(canvas, &entry.handle, (left, cy), handle_w, size_px, pt);
                if let Some(s) = shaper {
                    s.draw(
                        canvas,
                        &entry.label,
                        &self.font.family,
                        self.font.size,
                        self.font.color.to_skia(),
                        (left + handle_w + gap, cy),
                        (HAlign::Left, VAlign::Center),
                        0.0,
                    );
                }
            }
            left += width + col_gap;
        }
    }
}

fn draw_handle(canvas: &skia::Canvas, handle: &LegendHandle, at: (f32, f32), w: f32, size_px: f32, pt: f32) {
    let (x, y) = at;
    match handle {
        LegendHandle::Line { color, width, dash, marker, marker_color } => {
            if *dash != Dash::Hidden && *width > 0.0 {
                canvas.draw_line((x, y), (x + w, y), &stroke_paint(*color, 1.0, width * pt, *dash));
            }
            draw_marker(canvas, *marker, (x + w * 0.5, y), size_px * 0.8, *marker_color, 1.0);
        }
        LegendHandle::Patch { color, alpha } => {
            let h = size_px * 0.7;
            canvas.draw_rect(skia::Rect::from_ltrb(x, y - h * 0.5, x + w, y + h * 0.5), &fill_paint(*color, *alpha));
        }
        LegendHandle::Marker { marker, color } => {
            draw_marker(canvas, *marker, (x + w * 0.5, y), size_px * 0.8, *color, 1.0);
        }
    }
}

/// Reorder items so a column-major legend with `ncol` columns reads left to right by row.
pub fn reorder_for_rows<T: Clone>(items: &[T], ncol: usize) -> Vec<T> {
    let ncol = ncol.max(1);
    (0..ncol).flat_map(|c| items.iter().skip(c).step_by(ncol).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_fill_reordering() {
        let items = ["a", "b", "c", "d", "e"];
        assert_eq!(reorder_for_rows(&items, 2), ["a", "c", "e", "b", "d"]);
        assert_eq!(reorder_for_rows(&items, 1), items);
        assert_eq!(reorder_for_rows(&items, 5), items);
    }

    #[test]
    fn rows_round_up() {
        let font = FontSpec { family: "DejaVu Sans".into(), size: 6.0, color: Rgb::WHITE };
        let entry = LegendEntry { label: "x".into(), handle: LegendHandle::Patch { color: Rgb::WHITE, alpha: 1.0 } };
        let legend = Legend::new(vec![entry; 5], 2, font);
        assert_eq!(legend.rows(), 3);
    }
}
