// File: crates/hubchart-core/src/overlay.rs
// Summary: Overlays drawn after the legend is final: best-fit, min/max and origin lines,
// and user-defined horizontal line segments.

use thiserror::Error;

use crate::artist::{Artist, LineArtist};
use crate::figure::Axes;
use crate::style::{parse_color_any, LineSpec, Rgb};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SegmentError {
    #[error("unexpected character '{0}' in line segment list")]
    Unexpected(char),
    #[error("unterminated string in line segment list")]
    Unterminated,
    #[error("unbalanced brackets in line segment list")]
    Unbalanced,
    #[error("line segment must be a (value, 'color') pair")]
    Shape,
    #[error("bad segment color: {0}")]
    Color(String),
}

/// Overlays add artists to finished axes. They never touch limits or the legend.
pub trait Overlay {
    fn id(&self) -> &'static str;
    fn apply(&self, axes: &mut Axes);
}

/// Horizontal reference line across the axes (min, max, origin, custom segments).
#[derive(Clone, Debug, PartialEq)]
pub struct HLineOverlay {
    pub y: f64,
    pub color: Rgb,
    pub spec: LineSpec,
}

impl Overlay for HLineOverlay {
    fn id(&self) -> &'static str { "hline" }

    fn apply(&self, axes: &mut Axes) {
        if !self.y.is_finite() {
            return;
        }
        axes.add(
            Artist::HLine { y: self.y, color: self.color, width: self.spec.width, dash: self.spec.dash, alpha: self.spec.alpha },
            self.spec.zorder,
        );
    }
}

/// Vertical reference line, used where the value axis runs along x.
#[derive(Clone, Debug, PartialEq)]
pub struct VLineOverlay {
    pub x: f64,
    pub color: Rgb,
    pub spec: LineSpec,
}

impl Overlay for VLineOverlay {
    fn id(&self) -> &'static str { "vline" }

    fn apply(&self, axes: &mut Axes) {
        if !self.x.is_finite() {
            return;
        }
        axes.add(
            Artist::VLine { x: self.x, color: self.color, width: self.spec.width, dash: self.spec.dash, alpha: self.spec.alpha },
            self.spec.zorder,
        );
    }
}

/// Degree-1 least-squares fit, returned as (slope, intercept).
pub fn polyfit1(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let pts: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();
    if pts.len() < 2 {
        return None;
    }
    let n = pts.len() as f64;
    let mx = pts.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pts.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = pts.iter().map(|p| (p.0 - mx).powi(2)).sum();
    if sxx.abs() < f64::EPSILON {
        return None;
    }
    let sxy: f64 = pts.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Straight best-fit line through a series, spanning its x range.
#[derive(Clone, Debug, PartialEq)]
pub struct BestFitOverlay {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Rgb,
    pub spec: LineSpec,
}

impl Overlay for BestFitOverlay {
    fn id(&self) -> &'static str { "best_fit" }

    fn apply(&self, axes: &mut Axes) {
        let Some((m, b)) = polyfit1(&self.x, &self.y) else { return };
        let finite = self.x.iter().copied().filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let line = LineArtist::new(vec![(lo, m * lo + b), (hi, m * hi + b)], self.color, &self.spec);
        axes.add(Artist::Line(line), self.spec.zorder);
    }
}

/// A parsed custom line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub y: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
enum Lit {
    Num(f64),
    Str(String),
    Seq(Vec<Lit>),
}

struct LitParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl LitParser<'_> {
    fn skip_ws(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn value(&mut self) -> Result<Lit, SegmentError> {
        self.skip_ws();
        match self.chars.peek().copied() {
            Some(open @ ('(' | '[')) => {
                self.chars.next();
                let close = if open == '(' { ')' } else { ']' };
                let mut items = Vec::new();
                loop {
                    self.skip_ws();
                    match self.chars.peek().copied() {
                        Some(c) if c == close => {
                            self.chars.next();
                            return Ok(Lit::Seq(items));
                        }
                        None => return Err(SegmentError::Unbalanced),
                        _ => {}
                    }
                    items.push(self.value()?);
                    self.skip_ws();
                    match self.chars.peek().copied() {
                        Some(',') => {
                            self.chars.next();
                        }
                        Some(c) if c == close => {}
                        Some(c) => return Err(SegmentError::Unexpected(c)),
                        None => return Err(SegmentError::Unbalanced),
                    }
                }
            }
            Some(q @ ('\'' | '"')) => {
                self.chars.next();
                let mut s = String::new();
                for c in self.chars.by_ref() {
                    if c == q {
                        return Ok(Lit::Str(s));
                    }
                    s.push(c);
                }
                Err(SegmentError::Unterminated)
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                let mut s = String::new();
                while let Some(c) = self.chars.peek().copied() {
                    if c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.') {
                        s.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                s.parse::<f64>().map(Lit::Num).map_err(|_| SegmentError::Shape)
            }
            Some(c) => Err(SegmentError::Unexpected(c)),
            None => Err(SegmentError::Unbalanced),
        }
    }
}

fn pair(lit: &Lit) -> Result<Segment, SegmentError> {
    match lit {
        Lit::Seq(items) => match items.as_slice() {
            [Lit::Num(y), Lit::Str(c)] => {
                let color = parse_color_any(c).map_err(|e| SegmentError::Color(e.to_string()))?;
                Ok(Segment { y: *y, color })
            }
            _ => Err(SegmentError::Shape),
        },
        _ => Err(SegmentError::Shape),
    }
}

/// Parse `(y, 'color')`, or a tuple/list of such pairs.
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, SegmentError> {
    let mut parser = LitParser { chars: text.chars().peekable() };
    let lit = parser.value()?;
    parser.skip_ws();
    if let Some(c) = parser.chars.next() {
        return Err(SegmentError::Unexpected(c));
    }
    match &lit {
        Lit::Seq(items) if items.iter().all(|i| matches!(i, Lit::Seq(_))) && !items.is_empty() => {
            items.iter().map(pair).collect()
        }
        _ => Ok(vec![pair(&lit)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_line() {
        let (m, b) = polyfit1(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-12);
        assert!((b - 1.0).abs() < 1e-12);
        assert!(polyfit1(&[1.0], &[1.0]).is_none());
        assert!(polyfit1(&[2.0, 2.0], &[1.0, 5.0]).is_none());
    }

    #[test]
    fn fit_ignores_nan() {
        let (m, _) = polyfit1(&[0.0, 1.0, 2.0], &[0.0, f64::NAN, 4.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-12);
    }

    #[test]
    fn single_and_multiple_segments() {
        let one = parse_segments("(70, 'FF 00 00')").unwrap();
        assert_eq!(one, vec![Segment { y: 70.0, color: Rgb::new(1.0, 0.0, 0.0) }]);
        let many = parse_segments("((32, 'blue'), (-4.5, '#00FF00'))").unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].y, -4.5);
        let list = parse_segments("[(1, \"red\"), (2, 'red'),]").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn rejects_bad_literals() {
        assert!(parse_segments("").is_err());
        assert!(parse_segments("(70, 'FF 00 00'").is_err());
        assert!(parse_segments("(70)").is_err());
        assert!(parse_segments("(70, 'notacolor')").is_err());
        assert!(parse_segments("__import__('os')").is_err());
        assert!(parse_segments("(70, 'red') junk").is_err());
    }
}
