// File: crates/hubchart-core/src/axis.rs
// Summary: Axis model: limits, tick locators, tick label formats and styling.

use crate::dates::{format_day_number, DateLocator};
use crate::grid::{nice_ticks, tick_decimals};
use crate::style::{FontSpec, TickSpec};

/// Where ticks go.
#[derive(Clone, Debug, PartialEq)]
pub enum TickLocator {
    /// Round numbers inside the limits.
    Auto,
    /// Calendar-aligned positions on a day-number axis.
    Date(DateLocator),
    /// Explicit positions; those outside the limits are dropped.
    Fixed(Vec<f64>),
    None,
}

/// How major tick labels are written.
#[derive(Clone, Debug, PartialEq)]
pub enum TickFormat {
    /// Decimals chosen from the tick spacing.
    Auto,
    /// Fixed number of decimals.
    Precision(usize),
    /// strftime pattern over day numbers.
    Date(String),
    /// Labels paired with positions by index.
    Labels(Vec<String>),
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: Option<String>,
    pub label_font: Option<FontSpec>,
    pub min: f64,
    pub max: f64,
    pub major: TickLocator,
    pub minor: TickLocator,
    pub format: TickFormat,
    pub major_style: Option<TickSpec>,
    pub minor_style: Option<TickSpec>,
    pub visible: bool,
}

impl Axis {
    pub fn new(min: f64, max: f64) -> Self {
        let mut a = Self {
            label: None,
            label_font: None,
            min: 0.0,
            max: 1.0,
            major: TickLocator::Auto,
            minor: TickLocator::None,
            format: TickFormat::Auto,
            major_style: None,
            minor_style: None,
            visible: true,
        };
        a.set_limits(min, max);
        a
    }

    /// Set limits, widening a degenerate or reversed range.
    pub fn set_limits(&mut self, min: f64, max: f64) {
        let (mut lo, mut hi) = (min, max);
        if !lo.is_finite() { lo = 0.0; }
        if !hi.is_finite() { hi = lo + 1.0; }
        if hi < lo { std::mem::swap(&mut lo, &mut hi); }
        if (hi - lo).abs() < 1e-12 {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
            lo -= pad;
            hi += pad;
        }
        self.min = lo;
        self.max = hi;
    }

    fn positions(&self, locator: &TickLocator) -> Vec<f64> {
        match locator {
            TickLocator::Auto => nice_ticks(self.min, self.max, 7),
            TickLocator::Date(loc) => loc.ticks(self.min, self.max),
            TickLocator::Fixed(v) => {
                let eps = (self.max - self.min).abs() * 1e-9;
                v.iter().copied().filter(|p| *p >= self.min - eps && *p <= self.max + eps).collect()
            }
            TickLocator::None => Vec::new(),
        }
    }

    pub fn major_positions(&self) -> Vec<f64> {
        self.positions(&self.major)
    }

    pub fn minor_positions(&self) -> Vec<f64> {
        let major = self.major_positions();
        self.positions(&self.minor)
            .into_iter()
            .filter(|m| !major.iter().any(|p| (p - m).abs() < 1e-9))
            .collect()
    }

    /// Major tick positions with their label text.
    pub fn major_ticks(&self) -> Vec<(f64, String)> {
        // Labels pair with the unfiltered fixed list so dropped positions keep alignment.
        if let (TickFormat::Labels(labels), TickLocator::Fixed(all)) = (&self.format, &self.major) {
            let eps = (self.max - self.min).abs() * 1e-9;
            return all
                .iter()
                .enumerate()
                .filter(|(_, p)| **p >= self.min - eps && **p <= self.max + eps)
                .map(|(i, p)| (*p, labels.get(i).cloned().unwrap_or_default()))
                .collect();
        }
        let pos = self.major_positions();
        let decimals = tick_decimals(&pos);
        pos.iter()
            .enumerate()
            .map(|(i, p)| {
                let label = match &self.format {
                    TickFormat::Auto => format!("{:.*}", decimals, p),
                    TickFormat::Precision(d) => format!("{:.*}", d, p),
                    TickFormat::Date(fmt) => format_day_number(*p, fmt),
                    TickFormat::Labels(labels) => labels.get(i).cloned().unwrap_or_default(),
                    TickFormat::Blank => String::new(),
                };
                (*p, label)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_limits_widen() {
        let a = Axis::new(3.0, 3.0);
        assert!(a.min < 3.0 && a.max > 3.0);
        let b = Axis::new(5.0, 1.0);
        assert_eq!((b.min, b.max), (1.0, 5.0));
    }

    #[test]
    fn precision_and_labels() {
        let mut a = Axis::new(0.0, 10.0);
        a.major = TickLocator::Fixed(vec![0.0, 5.0, 20.0]);
        a.format = TickFormat::Precision(1);
        assert_eq!(a.major_ticks(), vec![(0.0, "0.0".to_string()), (5.0, "5.0".to_string())]);
        a.format = TickFormat::Labels(vec!["lo".into(), "mid".into(), "hi".into()]);
        assert_eq!(a.major_ticks()[1].1, "mid");
    }

    #[test]
    fn minor_ticks_skip_major_positions() {
        let mut a = Axis::new(0.0, 4.0);
        a.major = TickLocator::Fixed(vec![0.0, 2.0, 4.0]);
        a.minor = TickLocator::Fixed(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.minor_positions(), vec![1.0, 3.0]);
    }
}
