// File: crates/hubchart-core/src/style.rs
// Summary: Style registry: "RR GG BB" color normalization, line/marker vocabularies,
// and the keyword bundles every formatter draws from.

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use thiserror::Error;

use crate::prefs::PluginPrefs;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color '{0}' is not in 'RR GG BB' form")]
    Malformed(String),
}

/// Normalized RGB triple; every channel lies in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 0..=255 channel values.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Grey level in [0, 1] (0 = black).
    pub fn grey(level: f32) -> Self {
        let l = level.clamp(0.0, 1.0);
        Self::new(l, l, l)
    }

    pub fn to_skia(self) -> skia::Color {
        self.with_alpha(1.0)
    }

    pub fn with_alpha(self, alpha: f32) -> skia::Color {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(ch(alpha), ch(self.r), ch(self.g), ch(self.b))
    }

    /// Canonical host encoding, e.g. "FF 80 00".
    pub fn to_hex_triplet(self) -> String {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{:02X} {:02X} {:02X}", ch(self.r), ch(self.g), ch(self.b))
    }
}

/// Convert a `"RR GG BB"` triplet into a normalized color.
pub fn fix_rgb(color: &str) -> Result<Rgb, ColorError> {
    let parts: Vec<&str> = color.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(ColorError::Malformed(color.to_string()));
    }
    let mut ch = [0u8; 3];
    for (slot, part) in ch.iter_mut().zip(&parts) {
        if part.len() != 2 {
            return Err(ColorError::Malformed(color.to_string()));
        }
        *slot = u8::from_str_radix(part, 16).map_err(|_| ColorError::Malformed(color.to_string()))?;
    }
    Ok(Rgb::from_u8(ch[0], ch[1], ch[2]))
}

/// Looser color reader for user literals: "RR GG BB", "#RRGGBB" or a basic color name.
pub fn parse_color_any(color: &str) -> Result<Rgb, ColorError> {
    let c = color.trim();
    if let Some(hex) = c.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            return fix_rgb(&format!("{} {} {}", &hex[0..2], &hex[2..4], &hex[4..6]));
        }
        return Err(ColorError::Malformed(color.to_string()));
    }
    if let Some(named) = named_color(c) {
        return Ok(named);
    }
    fix_rgb(c)
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" | "k" => (0x00, 0x00, 0x00),
        "white" | "w" => (0xFF, 0xFF, 0xFF),
        "red" | "r" => (0xFF, 0x00, 0x00),
        "green" | "g" => (0x00, 0x80, 0x00),
        "blue" | "b" => (0x00, 0x00, 0xFF),
        "yellow" | "y" => (0xFF, 0xFF, 0x00),
        "cyan" | "c" => (0x00, 0xFF, 0xFF),
        "magenta" | "m" => (0xFF, 0x00, 0xFF),
        "orange" => (0xFF, 0xA5, 0x00),
        "purple" => (0x80, 0x00, 0x80),
        "gray" | "grey" => (0x80, 0x80, 0x80),
        _ => return None,
    };
    Some(Rgb::from_u8(rgb.0, rgb.1, rgb.2))
}

/// Stroke pattern vocabulary (matplotlib-style codes as stored by the host).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dash {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// No stroke at all (markers only).
    Hidden,
}

impl Dash {
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "-" | "solid" => Dash::Solid,
            "--" | "dashed" => Dash::Dashed,
            ":" | "dotted" => Dash::Dotted,
            "-." | "dashdot" => Dash::DashDot,
            "" | "None" | "none" => Dash::Hidden,
            _ => Dash::Solid,
        }
    }

    /// On/off intervals in pixels for a given stroke width.
    pub fn intervals(self, width: f32) -> Option<Vec<f32>> {
        let w = width.max(1.0);
        match self {
            Dash::Solid | Dash::Hidden => None,
            Dash::Dashed => Some(vec![3.7 * w, 1.6 * w]),
            Dash::Dotted => Some(vec![w, 1.65 * w]),
            Dash::DashDot => Some(vec![6.4 * w, 1.6 * w, w, 1.6 * w]),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[default]
    None,
    Point,
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Diamond,
    Star,
    Plus,
    Cross,
    Hexagon,
    VLine,
    HLine,
}

impl Marker {
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "." => Marker::Point,
            "o" => Marker::Circle,
            "s" => Marker::Square,
            "^" => Marker::TriangleUp,
            "v" => Marker::TriangleDown,
            "<" => Marker::TriangleLeft,
            ">" => Marker::TriangleRight,
            "D" | "d" => Marker::Diamond,
            "*" => Marker::Star,
            "+" => Marker::Plus,
            "x" | "X" => Marker::Cross,
            "h" | "H" | "p" => Marker::Hexagon,
            "|" => Marker::VLine,
            "_" => Marker::HLine,
            _ => Marker::None,
        }
    }

    pub fn is_visible(self) -> bool {
        self != Marker::None
    }
}

/// Font family, size in points and color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub color: Rgb,
}

/// Tick mark and tick label styling for one axis/tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    pub color: Rgb,
    pub label_color: Rgb,
    pub label_size: f32,
    pub length: f32,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub width: f32,
    pub dash: Dash,
    pub alpha: f32,
    pub zorder: f32,
    pub marker_size: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatchSpec {
    pub alpha: f32,
    pub zorder: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub color: Rgb,
    pub size: f32,
    /// Vertical offset of the label above its point, in points.
    pub offset: f32,
    pub zorder: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub color: Rgb,
    pub dash: Dash,
    pub width: f32,
    pub zorder: f32,
}

/// Radial grid labelling for polar charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RGridSpec {
    /// Angle (degrees clockwise from north) along which ring labels are written.
    pub angle: f32,
    pub color: Rgb,
    pub size: f32,
}

/// Named styling bundles carried with every job so formatters never repeat options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleBundles {
    pub k_line: LineSpec,
    pub k_bar: PatchSpec,
    pub k_fill: PatchSpec,
    pub k_annotation: AnnotationSpec,
    pub k_min: LineSpec,
    pub k_max: LineSpec,
    pub k_custom: LineSpec,
    pub k_grid_fig: GridSpec,
    pub k_major_x: TickSpec,
    pub k_minor_x: TickSpec,
    pub k_major_y: TickSpec,
    pub k_minor_y: TickSpec,
    pub k_title_font: FontSpec,
    pub k_x_axis_font: FontSpec,
    pub k_y_axis_font: FontSpec,
    pub k_legend_font: FontSpec,
    pub k_rgrids: RGridSpec,
}

impl StyleBundles {
    /// Derive every bundle from the global plugin preferences.
    pub fn from_prefs(prefs: &PluginPrefs) -> Result<Self, ColorError> {
        let font_color = fix_rgb(&prefs.font_color)?;
        let annotation_color = fix_rgb(&prefs.font_color_annotation)?;
        let grid_color = fix_rgb(&prefs.grid_color)?;
        let tick_color = fix_rgb(&prefs.tick_color)?;
        let family = prefs.font_main.clone();

        let font = |size: f32| FontSpec { family: family.clone(), size, color: font_color };
        let major = TickSpec {
            color: tick_color,
            label_color: font_color,
            label_size: prefs.tick_font_size,
            length: prefs.tick_size,
            width: 1.0,
        };
        let minor = TickSpec { length: prefs.tick_size / 2.0, ..major.clone() };
        let reference = |dash: Dash| LineSpec {
            width: prefs.line_weight,
            dash,
            alpha: 1.0,
            zorder: 1.0,
            marker_size: 0.0,
        };

        Ok(Self {
            k_line: LineSpec {
                width: prefs.line_weight,
                dash: Dash::Solid,
                alpha: 1.0,
                zorder: 10.0,
                marker_size: 6.0,
            },
            k_bar: PatchSpec { alpha: 1.0, zorder: 10.0 },
            k_fill: PatchSpec { alpha: 0.7, zorder: 10.0 },
            k_annotation: AnnotationSpec {
                color: annotation_color,
                size: prefs.tick_font_size,
                offset: 7.0,
                zorder: 20.0,
            },
            k_min: reference(Dash::Dotted),
            k_max: reference(Dash::Dotted),
            k_custom: reference(Dash::Solid),
            k_grid_fig: GridSpec {
                color: grid_color,
                dash: Dash::parse(&prefs.grid_style),
                width: 0.5,
                zorder: 0.0,
            },
            k_major_x: major.clone(),
            k_minor_x: minor.clone(),
            k_major_y: major,
            k_minor_y: minor,
            k_title_font: font(prefs.main_font_size),
            k_x_axis_font: font(prefs.main_font_size),
            k_y_axis_font: font(prefs.main_font_size),
            k_legend_font: font(prefs.legend_font_size),
            k_rgrids: RGridSpec { angle: 67.0, color: font_color, size: prefs.tick_font_size },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_hex_triplet() {
        let c = fix_rgb("FF 80 00").unwrap();
        assert_eq!(c, Rgb::new(1.0, 128.0 / 255.0, 0.0));
        assert_eq!(c.to_hex_triplet(), "FF 80 00");
    }

    #[test]
    fn every_well_formed_triplet_lands_in_unit_cube() {
        for v in [0u8, 1, 0x7F, 0x80, 0xFE, 0xFF] {
            let s = format!("{v:02X} {v:02x} {v:02X}");
            let c = fix_rgb(&s).unwrap();
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(fix_rgb("#FF8000").is_err());
        assert!(fix_rgb("FF 80").is_err());
        assert!(fix_rgb("GG 00 00").is_err());
        assert!(fix_rgb("FFF 00 00").is_err());
    }

    #[test]
    fn loose_reader_accepts_names_and_hash() {
        assert_eq!(parse_color_any("#0000FF").unwrap(), Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(parse_color_any("red").unwrap(), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(parse_color_any("00 FF 00").unwrap(), Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn dash_and_marker_codes() {
        assert_eq!(Dash::parse("--"), Dash::Dashed);
        assert_eq!(Dash::parse("None"), Dash::Hidden);
        assert_eq!(Marker::parse("o"), Marker::Circle);
        assert_eq!(Marker::parse("None"), Marker::None);
    }

    #[test]
    fn bundles_follow_prefs() {
        let mut prefs = PluginPrefs::default();
        prefs.grid_color = "11 22 33".into();
        prefs.line_weight = 2.5;
        let k = StyleBundles::from_prefs(&prefs).unwrap();
        assert_eq!(k.k_grid_fig.color, fix_rgb("11 22 33").unwrap());
        assert_eq!(k.k_line.width, 2.5);
        prefs.tick_color = "nope".into();
        assert!(StyleBundles::from_prefs(&prefs).is_err());
    }
}
