// File: crates/hubchart-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout, configured family first.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

const FALLBACK_FAMILIES: [&str; 5] = ["DejaVu Sans", "Arial", "Helvetica", "Roboto", "sans-serif"];

/// Horizontal anchor of a text box relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text box relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl HAlign {
    fn factor(self) -> f32 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => 0.5,
            HAlign::Right => 1.0,
        }
    }
}

impl VAlign {
    fn factor(self) -> f32 {
        match self {
            VAlign::Top => 0.0,
            VAlign::Center => 0.5,
            VAlign::Bottom => 1.0,
        }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
    family: String,
    /// Pixels per point.
    scale: f32,
}

impl TextShaper {
    pub fn new(family: &str, dpi: f32) -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc, family: family.to_string(), scale: dpi / 72.0 }
    }

    /// Point size to pixels.
    pub fn px(&self, points: f32) -> f32 {
        points * self.scale
    }

    fn make_style(&self, family: &str, size_px: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size_px.max(1.0));
        ts.set_color(color);
        let mut families: Vec<&str> = vec![family, self.family.as_str()];
        families.extend(FALLBACK_FAMILIES);
        ts.set_font_families(&families);
        ts
    }

    /// Lay out (possibly multi-line) text; lines are aligned within the widest one.
    pub fn layout(&self, text: &str, family: &str, size_pt: f32, color: skia::Color, align: HAlign) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(match align {
            HAlign::Left => TextAlign::Left,
            HAlign::Center => TextAlign::Center,
            HAlign::Right => TextAlign::Right,
        });
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = self.make_style(family, self.px(size_pt), color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        let natural = paragraph.max_intrinsic_width().ceil() + 1.0;
        paragraph.layout(natural);
        paragraph
    }

    /// (width, height) in pixels.
    pub fn measure(&self, text: &str, family: &str, size_pt: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let p = self.layout(text, family, size_pt, skia::Color::TRANSPARENT, HAlign::Left);
        (p.max_intrinsic_width(), p.height())
    }

    /// Draw text anchored at `at`, rotated counter-clockwise by `rotation` degrees around the anchor.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        family: &str,
        size_pt: f32,
        color: skia::Color,
        at: (f32, f32),
        anchor: (HAlign, VAlign),
        rotation: f32,
    ) {
        if text.is_empty() {
            return;
        }
        let mut p = self.layout(text, family, size_pt, color, anchor.0);
        let (w, h) = (p.max_intrinsic_width(), p.height());
        canvas.save();
        canvas.translate(at);
        if rotation != 0.0 {
            canvas.rotate(-rotation, None);
        }
        p.paint(canvas, (-w * anchor.0.factor(), -h * anchor.1.factor()));
        canvas.restore();
    }
}
