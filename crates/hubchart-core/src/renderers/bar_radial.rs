// File: crates/hubchart-core/src/renderers/bar_radial.rs
// Summary: Single-value gauge: a clockwise arc from north over a background ring.

use std::f64::consts::TAU;

use anyhow::Result;

use crate::artist::{Artist, Coords, TextArtist};
use crate::figure::Axes;
use crate::formatters::{annotation_text, format_title, new_figure};
use crate::job::{JobContext, JobOutcome, Scratch, SeriesData};
use crate::payload::{ChartJob, JobData};
use crate::style::{FontSpec, Rgb};
use crate::theme::Theme;
use crate::types::Frame;

/// Inner radius of the ring as a fraction of the outer one.
const RING_INNER: f64 = 0.7;

/// Fraction of a full turn covered by `value` on a gauge of `scale`.
pub fn sweep_fraction(value: f64, scale: f64) -> f64 {
    if !value.is_finite() || !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    (value / scale).clamp(0.0, 1.0)
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let Some(JobData::Value(value)) = job.data else {
        ctx.log.warning(format!("No value for radial bar '{}'. Skipping chart.", job.name));
        return Ok(None);
    };
    let p = &job.p_dict;
    let k = &job.k_dict;
    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);
    let mut ax = Axes::polar(Frame::new(0.1, 0.1, 0.9, 0.9), 1.0);

    let scale = p.number("scale").filter(|s| *s > 0.0).unwrap_or(100.0);
    let bar_color = p.color_or("barColor", Rgb::new(0.0, 0.5, 1.0));
    let ring_color = p.color_or("backgroundRingColor", Rgb::grey(0.3));
    let fraction = sweep_fraction(value, scale);
    ctx.log.threaddebug(format!("Radial bar value {value} of {scale} ({:.1}%).", fraction * 100.0));

    ax.add(Artist::Wedge { theta: TAU / 2.0, width: TAU, r0: RING_INNER, r1: 1.0, color: ring_color, alpha: 1.0 }, 1.0);
    if fraction > 0.0 {
        let width = fraction * TAU;
        ax.add(
            Artist::Wedge { theta: width / 2.0, width, r0: RING_INNER, r1: 1.0, color: bar_color, alpha: k.k_bar.alpha },
            k.k_bar.zorder,
        );
    }
    let font = FontSpec { family: job.prefs.font_main.clone(), size: k.k_title_font.size * 2.0, color: theme.font };
    ax.add(Artist::Text(TextArtist::new(annotation_text(value, job), (0.5, 0.5), Coords::Axes, font)), k.k_annotation.zorder);
    format_title(&mut ax, job);

    let mut scratch = Scratch::default();
    scratch.push_series(SeriesData { index: 1, label: job.name.clone(), x: vec![0.0], y: vec![value], color: bar_color });
    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_is_clamped() {
        assert_eq!(sweep_fraction(25.0, 100.0), 0.25);
        assert_eq!(sweep_fraction(150.0, 100.0), 1.0);
        assert_eq!(sweep_fraction(-3.0, 100.0), 0.0);
        assert_eq!(sweep_fraction(f64::NAN, 100.0), 0.0);
        assert_eq!(sweep_fraction(5.0, 0.0), 0.0);
    }
}
