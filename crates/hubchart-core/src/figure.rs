// File: crates/hubchart-core/src/figure.rs
// Summary: Figure/Axes retained model and headless PNG rendering on Skia CPU raster surfaces.

use std::path::Path;

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::artist::{draw_marker, fill_paint, finite_runs, stroke_paint, Artist, Coords, Item, Table, TextArtist};
use crate::axis::{Axis, Side};
use crate::geometry::PxRect;
use crate::legend::Legend;
use crate::scale::{PolarScale, ValueScale};
use crate::style::{Dash, FontSpec, GridSpec, RGridSpec, Rgb};
use crate::text::{HAlign, TextShaper, VAlign};
use crate::types::{Frame, DPI, HEIGHT, WIDTH};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub dpi: f32,
    /// `None` leaves the figure transparent.
    pub background: Option<Rgb>,
    /// Off skips every glyph; used for deterministic pixel snapshots.
    pub draw_labels: bool,
    pub font_family: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            dpi: DPI,
            background: Some(Rgb::BLACK),
            draw_labels: true,
            font_family: "DejaVu Sans".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    Cartesian,
    /// Theta in radians (north = 0, clockwise) on x, radius on y.
    Polar,
}

/// Ring and compass decoration of a polar axes.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarGrid {
    pub rings: Vec<f64>,
    pub ring_labels: Vec<String>,
    pub label_style: RGridSpec,
    pub family: String,
    pub compass: bool,
}

#[derive(Clone, Debug)]
pub struct Axes {
    pub frame: Frame,
    pub projection: Projection,
    pub x: Axis,
    pub y: Axis,
    pub y_side: Side,
    pub face: Option<Rgb>,
    pub spine: Option<Rgb>,
    pub x_grid: Option<GridSpec>,
    pub y_grid: Option<GridSpec>,
    pub title: Option<(String, FontSpec)>,
    pub legend: Option<Legend>,
    pub polar: Option<PolarGrid>,
    pub items: Vec<Item>,
}

impl Axes {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            projection: Projection::Cartesian,
            x: Axis::new(0.0, 1.0),
            y: Axis::new(0.0, 1.0),
            y_side: Side::Left,
            face: None,
            spine: None,
            x_grid: None,
            y_grid: None,
            title: None,
            legend: None,
            polar: None,
            items: Vec::new(),
        }
    }

    pub fn polar(frame: Frame, rmax: f64) -> Self {
        let mut ax = Self::new(frame);
        ax.projection = Projection::Polar;
        ax.x = Axis::new(0.0, std::f64::consts::TAU);
        ax.y = Axis::new(0.0, rmax);
        ax
    }

    /// Second axes over the same frame sharing X, with its Y on the right.
    pub fn twin(&self) -> Self {
        let mut ax = Self::new(self.frame);
        ax.x = self.x.clone();
        ax.x.visible = false;
        ax.y_side = Side::Right;
        ax.spine = self.spine;
        ax
    }

    pub fn add(&mut self, artist: Artist, zorder: f32) {
        self.items.push(Item { artist, zorder });
    }

    /// All artists in insertion order.
    pub fn artists(&self) -> impl Iterator<Item = &Artist> {
        self.items.iter().map(|i| &i.artist)
    }
}

pub struct Figure {
    pub opts: RenderOptions,
    pub axes: Vec<Axes>,
    /// Figure-level texts; `Coords::Axes` means figure fraction here.
    pub texts: Vec<TextArtist>,
}

impl Figure {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, axes: Vec::new(), texts: Vec::new() }
    }

    pub fn add_axes(&mut self, axes: Axes) -> usize {
        self.axes.push(axes);
        self.axes.len() - 1
    }

    /// Rasterize and encode as PNG bytes.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((self.opts.width.max(1), self.opts.height.max(1)))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        match self.opts.background {
            Some(bg) => canvas.clear(bg.to_skia()),
            None => canvas.clear(skia::Color::TRANSPARENT),
        };

        let shaper = self
            .opts
            .draw_labels
            .then(|| TextShaper::new(&self.opts.font_family, self.opts.dpi));
        let ctx = Ctx { canvas, shaper: shaper.as_ref(), pt: self.opts.dpi / 72.0 };

        for axes in &self.axes {
            draw_axes(&ctx, axes, self.opts.width, self.opts.height);
        }
        let whole = PxRect::from_ltrb(0.0, 0.0, self.opts.width as f32, self.opts.height as f32);
        for t in &self.texts {
            let at = whole.at_fraction(t.at.0, t.at.1);
            draw_text(&ctx, t, at);
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the figure to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

struct Ctx<'a> {
    canvas: &'a skia::Canvas,
    shaper: Option<&'a TextShaper>,
    /// Pixels per point.
    pt: f32,
}

#[derive(Clone, Copy)]
enum Transform {
    Cartesian { rect: PxRect, x: ValueScale, y: ValueScale },
    Polar { rect: PxRect, scale: PolarScale },
}

impl Transform {
    fn of(axes: &Axes, rect: PxRect) -> Self {
        match axes.projection {
            Projection::Cartesian => Transform::Cartesian {
                rect,
                x: ValueScale::new(rect.left, rect.right, axes.x.min, axes.x.max),
                y: ValueScale::new(rect.bottom, rect.top, axes.y.min, axes.y.max),
            },
            Projection::Polar => {
                let (cx, cy) = rect.center();
                let radius = rect.width().min(rect.height()) * 0.5;
                Transform::Polar { rect, scale: PolarScale::new(cx, cy, radius, axes.y.max) }
            }
        }
    }

    fn rect(&self) -> PxRect {
        match self {
            Transform::Cartesian { rect, .. } | Transform::Polar { rect, .. } => *rect,
        }
    }

    fn data(&self, x: f64, y: f64) -> (f32, f32) {
        match self {
            Transform::Cartesian { x: sx, y: sy, .. } => (sx.to_px(x), sy.to_px(y)),
            Transform::Polar { scale, .. } => scale.to_px(x, y),
        }
    }

    fn at(&self, coords: Coords, p: (f64, f64)) -> (f32, f32) {
        match coords {
            Coords::Data => self.data(p.0, p.1),
            Coords::Axes => self.rect().at_fraction(p.0, p.1),
        }
    }
}

fn draw_axes(ctx: &Ctx, axes: &Axes, width: i32, height: i32) {
    let rect = axes.frame.to_px(width, height);
    let t = Transform::of(axes, rect);
    let canvas = ctx.canvas;

    if let Some(face) = axes.face {
        match t {
            Transform::Cartesian { .. } => canvas.draw_rect(rect.to_skia(), &fill_paint(face, 1.0)),
            Transform::Polar { scale, .. } => canvas.draw_circle((scale.cx, scale.cy), scale.radius, &fill_paint(face, 1.0)),
        };
    }

    let mut items: Vec<&Item> = axes.items.iter().collect();
    items.sort_by(|a, b| a.zorder.total_cmp(&b.zorder));
    let grid_z = axes.x_grid.iter().chain(axes.y_grid.iter()).map(|g| g.zorder).fold(0.0f32, f32::min);
    let split = items.iter().position(|i| i.zorder >= grid_z).unwrap_or(items.len());

    for item in &items[..split] {
        draw_artist(ctx, &t, &item.artist);
    }
    match t {
        Transform::Cartesian { .. } => draw_cartesian_grid(ctx, axes, &t),
        Transform::Polar { scale, .. } => draw_polar_grid(ctx, axes, scale),
    }
    for item in &items[split..] {
        draw_artist(ctx, &t, &item.artist);
    }

    match t {
        Transform::Cartesian { .. } => draw_cartesian_frame(ctx, axes, &t),
        Transform::Polar { scale, .. } => {
            if let Some(spine) = axes.spine {
                canvas.draw_circle((scale.cx, scale.cy), scale.radius, &stroke_paint(spine, 1.0, ctx.pt, Dash::Solid));
            }
        }
    }

    if let (Some((title, font)), Some(shaper)) = (&axes.title, ctx.shaper) {
        let (cx, _) = rect.center();
        shaper.draw(
            canvas,
            title,
            &font.family,
            font.size,
            font.color.to_skia(),
            (cx, rect.top - 6.0 * ctx.pt),
            (HAlign::Center, VAlign::Bottom),
            0.0,
        );
    }
    if let Some(legend) = &axes.legend {
        legend.draw(canvas, ctx.shaper, rect, ctx.pt);
    }
}

fn draw_artist(ctx: &Ctx, t: &Transform, artist: &Artist) {
    let canvas = ctx.canvas;
    let clip = !matches!(artist, Artist::Text(_));
    if clip {
        canvas.save();
        if let Transform::Cartesian { rect, .. } = t {
            canvas.clip_rect(rect.to_skia(), None, Some(true));
        }
    }
    match artist {
        Artist::Line(line) => {
            if line.dash != Dash::Hidden && line.width > 0.0 {
                let paint = stroke_paint(line.color, line.alpha, line.width * ctx.pt, line.dash);
                for run in finite_runs(&line.points) {
                    let mut path = skia::Path::new();
                    for (k, (x, y)) in run.iter().enumerate() {
                        let p = t.data(*x, *y);
                        if k == 0 { path.move_to(p); } else { path.line_to(p); }
                    }
                    canvas.draw_path(&path, &paint);
                }
            }
            if line.marker.is_visible() {
                for (x, y) in line.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                    draw_marker(canvas, line.marker, t.data(*x, *y), line.marker_size * ctx.pt, line.marker_color, line.alpha);
                }
            }
        }
        Artist::Fill { points, base, color, alpha } => {
            let paint = fill_paint(*color, *alpha);
            for run in finite_runs(points) {
                let mut path = skia::Path::new();
                if let (Some(first), Some(last)) = (run.first(), run.last()) {
                    path.move_to(t.data(first.0, *base));
                    for (x, y) in run {
                        path.line_to(t.data(*x, *y));
                    }
                    path.line_to(t.data(last.0, *base));
                    path.close();
                }
                canvas.draw_path(&path, &paint);
            }
        }
        Artist::Stack { x, layers, colors, alpha } => {
            let mut lower = vec![0.0f64; x.len()];
            for (layer, color) in layers.iter().zip(colors) {
                let upper: Vec<f64> = lower
                    .iter()
                    .zip(layer.iter().chain(std::iter::repeat(&0.0)))
                    .map(|(lo, v)| lo + if v.is_finite() { *v } else { 0.0 })
                    .collect();
                let mut path = skia::Path::new();
                for (k, (xv, up)) in x.iter().zip(&upper).enumerate() {
                    let p = t.data(*xv, *up);
                    if k == 0 { path.move_to(p); } else { path.line_to(p); }
                }
                for (xv, lo) in x.iter().zip(&lower).rev() {
                    path.line_to(t.data(*xv, *lo));
                }
                path.close();
                canvas.draw_path(&path, &fill_paint(*color, *alpha));
                lower = upper;
            }
        }
        Artist::Bars { bars, alpha, horizontal } => {
            for bar in bars.iter().filter(|b| b.value.is_finite()) {
                let (a, b) = if *horizontal {
                    (t.data(bar.base, bar.pos - bar.width / 2.0), t.data(bar.base + bar.value, bar.pos + bar.width / 2.0))
                } else {
                    (t.data(bar.pos - bar.width / 2.0, bar.base), t.data(bar.pos + bar.width / 2.0, bar.base + bar.value))
                };
                let r = skia::Rect::from_ltrb(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1));
                canvas.draw_rect(r, &fill_paint(bar.color, *alpha));
            }
        }
        Artist::Markers { points, marker, color, size, alpha } => {
            for (x, y) in points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                draw_marker(canvas, *marker, t.data(*x, *y), size * ctx.pt, *color, *alpha);
            }
        }
        Artist::HLine { y, color, width, dash, alpha } => {
            if let Transform::Cartesian { rect, y: sy, .. } = t {
                let py = sy.to_px(*y);
                canvas.draw_line((rect.left, py), (rect.right, py), &stroke_paint(*color, *alpha, width * ctx.pt, *dash));
            }
        }
        Artist::VLine { x, color, width, dash, alpha } => {
            if let Transform::Cartesian { rect, x: sx, .. } = t {
                let px = sx.to_px(*x);
                canvas.draw_line((px, rect.top), (px, rect.bottom), &stroke_paint(*color, *alpha, width * ctx.pt, *dash));
            }
        }
        Artist::VSpan { x0, x1, color, alpha } => {
            if let Transform::Cartesian { rect, x: sx, .. } = t {
                let (a, b) = (sx.to_px(*x0), sx.to_px(*x1));
                canvas.draw_rect(skia::Rect::from_ltrb(a.min(b), rect.top, a.max(b), rect.bottom), &fill_paint(*color, *alpha));
            }
        }
        Artist::Background { color } => {
            match t {
                Transform::Cartesian { rect, .. } => canvas.draw_rect(rect.to_skia(), &fill_paint(*color, 1.0)),
                Transform::Polar { scale, .. } => canvas.draw_circle((scale.cx, scale.cy), scale.radius, &fill_paint(*color, 1.0)),
            };
        }
        Artist::Text(text) => draw_text(ctx, text, t.at(text.coords, text.at)),
        Artist::Wedge { theta, width, r0, r1, color, alpha } => {
            if let Transform::Polar { scale, .. } = t {
                draw_wedge(canvas, scale, *theta, *width, *r0, *r1, &fill_paint(*color, *alpha));
            }
        }
        Artist::Table(table) => draw_table(ctx, table, t.rect()),
    }
    if clip {
        canvas.restore();
    }
}

fn draw_text(ctx: &Ctx, text: &TextArtist, at: (f32, f32)) {
    if let Some(shaper) = ctx.shaper {
        let pos = (at.0 + text.offset.0 * ctx.pt, at.1 - text.offset.1 * ctx.pt);
        shaper.draw(
            ctx.canvas,
            &text.text,
            &text.font.family,
            text.font.size,
            text.font.color.to_skia(),
            pos,
            text.anchor,
            text.rotation,
        );
    }
}

fn draw_wedge(canvas: &skia::Canvas, scale: &PolarScale, theta: f64, width: f64, r0: f64, r1: f64, paint: &skia::Paint) {
    let sweep = (width.to_degrees() as f32).clamp(-359.9, 359.9);
    let start = PolarScale::skia_degrees(theta - width / 2.0);
    let oval = |r: f64| {
        let rp = scale.radius_px(r);
        skia::Rect::from_ltrb(scale.cx - rp, scale.cy - rp, scale.cx + rp, scale.cy + rp)
    };
    let mut path = skia::Path::new();
    if r0 <= 0.0 {
        path.move_to((scale.cx, scale.cy));
        path.arc_to(oval(r1), start, sweep, false);
    } else {
        path.arc_to(oval(r1), start, sweep, true);
        path.arc_to(oval(r0), start + sweep, -sweep, false);
    }
    path.close();
    canvas.draw_path(&path, paint);
}

fn draw_table(ctx: &Ctx, table: &Table, rect: PxRect) {
    let (l, b, r, tp) = table.bounds;
    let (x0, y1) = rect.at_fraction(l, b);
    let (x1, y0) = rect.at_fraction(r, tp);
    let rows = table.cells.len().max(1);
    let cols = table.columns().max(1);
    let cw = (x1 - x0) / cols as f32;
    let ch = (y1 - y0) / rows as f32;
    for (ri, row) in table.cells.iter().enumerate() {
        for (ci, cell) in row.iter().enumerate() {
            let cell_rect = skia::Rect::from_ltrb(
                x0 + cw * ci as f32,
                y0 + ch * ri as f32,
                x0 + cw * (ci + 1) as f32,
                y0 + ch * (ri + 1) as f32,
            );
            if let Some(fill) = table.fills.get(ri).and_then(|r| r.get(ci)).copied().flatten() {
                ctx.canvas.draw_rect(cell_rect, &fill_paint(fill, 1.0));
            }
            if let Some(edge) = table.edge {
                ctx.canvas.draw_rect(cell_rect, &stroke_paint(edge, 1.0, 0.5 * ctx.pt, Dash::Solid));
            }
            if let Some(shaper) = ctx.shaper {
                shaper.draw(
                    ctx.canvas,
                    cell,
                    &table.font.family,
                    table.font.size,
                    table.font.color.to_skia(),
                    (cell_rect.center_x(), cell_rect.center_y()),
                    (HAlign::Center, VAlign::Center),
                    0.0,
                );
            }
        }
    }
}

fn draw_cartesian_grid(ctx: &Ctx, axes: &Axes, t: &Transform) {
    let rect = t.rect();
    if let Some(g) = &axes.x_grid {
        let paint = stroke_paint(g.color, 1.0, g.width * ctx.pt, g.dash);
        for x in axes.x.major_positions() {
            let (px, _) = t.data(x, axes.y.min);
            ctx.canvas.draw_line((px, rect.top), (px, rect.bottom), &paint);
        }
    }
    if let Some(g) = &axes.y_grid {
        let paint = stroke_paint(g.color, 1.0, g.width * ctx.pt, g.dash);
        for y in axes.y.major_positions() {
            let (_, py) = t.data(axes.x.min, y);
            ctx.canvas.draw_line((rect.left, py), (rect.right, py), &paint);
        }
    }
}

fn draw_polar_grid(ctx: &Ctx, axes: &Axes, scale: PolarScale) {
    let Some(grid) = &axes.polar else { return };
    let canvas = ctx.canvas;
    let spec = axes.y_grid.as_ref().or(axes.x_grid.as_ref());
    if let Some(g) = spec {
        let paint = stroke_paint(g.color, 1.0, g.width * ctx.pt, g.dash);
        for r in &grid.rings {
            canvas.draw_circle((scale.cx, scale.cy), scale.radius_px(*r), &paint);
        }
        for k in 0..8 {
            let theta = std::f64::consts::FRAC_PI_4 * k as f64;
            canvas.draw_line((scale.cx, scale.cy), scale.to_px(theta, scale.rmax), &paint);
        }
    }
    let Some(shaper) = ctx.shaper else { return };
    let label = &grid.label_style;
    let angle = (label.angle as f64).to_radians();
    for (r, text) in grid.rings.iter().zip(&grid.ring_labels) {
        shaper.draw(
            canvas,
            text,
            &grid.family,
            label.size,
            label.color.to_skia(),
            scale.to_px(angle, *r),
            (HAlign::Left, VAlign::Bottom),
            0.0,
        );
    }
    if grid.compass {
        const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        let pad = scale.rmax * (1.0 + (8.0 * ctx.pt / scale.radius.max(1.0)) as f64);
        for (k, name) in POINTS.iter().enumerate() {
            let theta = std::f64::consts::FRAC_PI_4 * k as f64;
            shaper.draw(
                canvas,
                name,
                &grid.family,
                label.size,
                label.color.to_skia(),
                scale.to_px(theta, pad),
                (HAlign::Center, VAlign::Center),
                0.0,
            );
        }
    }
}

fn draw_cartesian_frame(ctx: &Ctx, axes: &Axes, t: &Transform) {
    let rect = t.rect();
    let canvas = ctx.canvas;
    if let Some(spine) = axes.spine {
        canvas.draw_rect(rect.to_skia(), &stroke_paint(spine, 1.0, 0.8 * ctx.pt, Dash::Solid));
    }

    // X ticks, below the axes.
    let mut x_label_depth = 0.0f32;
    if axes.x.visible {
        if let Some(spec) = &axes.x.minor_style {
            let paint = stroke_paint(spec.color, 1.0, spec.width * ctx.pt, Dash::Solid);
            for x in axes.x.minor_positions() {
                let px = t.data(x, axes.y.min).0;
                canvas.draw_line((px, rect.bottom), (px, rect.bottom + spec.length * ctx.pt), &paint);
            }
        }
        if let Some(spec) = &axes.x.major_style {
            let paint = stroke_paint(spec.color, 1.0, spec.width * ctx.pt, Dash::Solid);
            let len = spec.length * ctx.pt;
            x_label_depth = len;
            for (x, label) in axes.x.major_ticks() {
                let px = t.data(x, axes.y.min).0;
                canvas.draw_line((px, rect.bottom), (px, rect.bottom + len), &paint);
                if let Some(shaper) = ctx.shaper {
                    let family = axes.x.label_font.as_ref().map_or("DejaVu Sans", |f| f.family.as_str());
                    let (_, h) = shaper.measure(&label, family, spec.label_size);
                    x_label_depth = x_label_depth.max(len + 2.0 * ctx.pt + h);
                    shaper.draw(
                        canvas,
                        &label,
                        family,
                        spec.label_size,
                        spec.label_color.to_skia(),
                        (px, rect.bottom + len + 2.0 * ctx.pt),
                        (HAlign::Center, VAlign::Top),
                        0.0,
                    );
                }
            }
        }
        if let (Some(text), Some(font), Some(shaper)) = (&axes.x.label, &axes.x.label_font, ctx.shaper) {
            shaper.draw(
                canvas,
                text,
                &font.family,
                font.size,
                font.color.to_skia(),
                (rect.center().0, rect.bottom + x_label_depth + 3.0 * ctx.pt),
                (HAlign::Center, VAlign::Top),
                0.0,
            );
        }
    }

    if !axes.y.visible {
        return;
    }
    let (edge, dir) = match axes.y_side {
        Side::Left => (rect.left, -1.0f32),
        Side::Right => (rect.right, 1.0f32),
    };
    if let Some(spec) = &axes.y.minor_style {
        let paint = stroke_paint(spec.color, 1.0, spec.width * ctx.pt, Dash::Solid);
        for y in axes.y.minor_positions() {
            let py = t.data(axes.x.min, y).1;
            canvas.draw_line((edge, py), (edge + dir * spec.length * ctx.pt, py), &paint);
        }
    }
    let mut y_label_depth = 0.0f32;
    if let Some(spec) = &axes.y.major_style {
        let paint = stroke_paint(spec.color, 1.0, spec.width * ctx.pt, Dash::Solid);
        let len = spec.length * ctx.pt;
        y_label_depth = len;
        let anchor = if dir < 0.0 { HAlign::Right } else { HAlign::Left };
        for (y, label) in axes.y.major_ticks() {
            let py = t.data(axes.x.min, y).1;
            canvas.draw_line((edge, py), (edge + dir * len, py), &paint);
            if let Some(shaper) = ctx.shaper {
                let family = axes.y.label_font.as_ref().map_or("DejaVu Sans", |f| f.family.as_str());
                let (w, _) = shaper.measure(&label, family, spec.label_size);
                y_label_depth = y_label_depth.max(len + 2.0 * ctx.pt + w);
                shaper.draw(
                    canvas,
                    &label,
                    family,
                    spec.label_size,
                    spec.label_color.to_skia(),
                    (edge + dir * (len + 2.0 * ctx.pt), py),
                    (anchor, VAlign::Center),
                    0.0,
                );
            }
        }
    }
    if let (Some(text), Some(font), Some(shaper)) = (&axes.y.label, &axes.y.label_font, ctx.shaper) {
        let v = if dir < 0.0 { VAlign::Bottom } else { VAlign::Top };
        shaper.draw(
            canvas,
            text,
            &font.family,
            font.size,
            font.color.to_skia(),
            (edge + dir * (y_label_depth + 3.0 * ctx.pt), rect.center().1),
            (HAlign::Center, v),
            90.0,
        );
    }
}
