// File: crates/hubchart-core/src/renderers/polar.rs
// Summary: Wind rose: recent wind observations as polar bars, newest and max highlighted.

use std::f64::consts::TAU;

use anyhow::Result;

use super::common::load_source;
use crate::artist::{Artist, Coords, LineArtist, TextArtist};
use crate::figure::{Axes, PolarGrid};
use crate::formatters::{format_legend, format_title, new_figure};
use crate::job::{JobContext, JobOutcome, Scratch, SeriesData};
use crate::legend::{LegendEntry, LegendHandle};
use crate::payload::ChartJob;
use crate::style::{FontSpec, Rgb};
use crate::theme::Theme;
use crate::types::Frame;

/// Angular width of one observation bar, in radians.
const BAR_WIDTH: f64 = 0.1;

/// Grid rings, their maximum and whether the speed overflowed the ladder.
#[derive(Clone, Debug, PartialEq)]
pub struct RingLadder {
    pub rings: Vec<f64>,
    pub rmax: f64,
    pub overflow: bool,
}

/// Pick grid radii from the fixed ladder for the highest speed seen.
pub fn ring_ladder(max_speed: f64) -> RingLadder {
    let top = match max_speed {
        s if s <= 5.0 => 5.0,
        s if s <= 10.0 => 10.0,
        s if s <= 20.0 => 20.0,
        s if s <= 30.0 => 30.0,
        s if s <= 40.0 => 40.0,
        s if s <= 50.0 => 50.0,
        s => (s / 10.0).ceil() * 10.0,
    };
    let rings = (1..=5).map(|k| top * k as f64 / 5.0).collect();
    RingLadder { rings, rmax: top, overflow: max_speed > 50.0 }
}

/// Grey level per observation, oldest lightest.
pub fn age_greys(count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.3],
        n => (0..n).map(|i| 0.9 - 0.6 * i as f32 / (n - 1) as f32).collect(),
    }
}

fn keep_last<T>(mut v: Vec<T>, n: Option<usize>) -> Vec<T> {
    if let Some(n) = n {
        if v.len() > n {
            v.drain(..v.len() - n);
        }
    }
    v
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let p = &job.p_dict;
    let k = &job.k_dict;
    let theta_source = p.text("thetaValue").trim().to_string();
    let radii_source = p.text("radiiValue").trim().to_string();
    let (Some(theta), Some(radii)) = (
        load_source(job, &theta_source, None, None, ctx),
        load_source(job, &radii_source, None, None, ctx),
    ) else {
        ctx.log.warning("Wind direction or speed data unavailable. Skipping chart.");
        return Ok(None);
    };

    if theta.y.len() != radii.y.len() {
        ctx.log.warning("Insufficient number of observations to plot.");
        return Ok(None);
    }
    let keep = p.number("numObs").filter(|n| *n >= 1.0).map(|n| n as usize);
    let theta = keep_last(theta.y, keep);
    let radii = keep_last(radii.y, keep);

    let theta: Vec<f64> = theta.iter().map(|d| d.to_radians()).collect();
    let max_speed = radii.iter().copied().filter(|r| r.is_finite()).fold(0.0f64, f64::max);
    let ladder = ring_ladder(max_speed);

    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);
    let mut ax = Axes::polar(Frame::new(0.12, 0.12, 0.88, 0.88), ladder.rmax);
    ax.face = theme.face;
    ax.spine = Some(theme.spine);
    ax.y_grid = Some(k.k_grid_fig.clone());
    ax.polar = Some(PolarGrid {
        rings: ladder.rings.clone(),
        ring_labels: ladder.rings.iter().map(|r| format!("{r}")).collect(),
        label_style: k.k_rgrids.clone(),
        family: job.prefs.font_main.clone(),
        compass: true,
    });

    let current_color = p.color_or("currentWindColor", Rgb::new(0.0, 0.5, 1.0));
    let max_color = p.color_or("maxWindColor", Rgb::new(1.0, 0.0, 0.0));
    for ((t, r), grey) in theta.iter().zip(&radii).zip(age_greys(radii.len())) {
        if !t.is_finite() || !r.is_finite() {
            continue;
        }
        ax.add(
            Artist::Wedge { theta: *t, width: BAR_WIDTH, r0: 0.0, r1: *r, color: Rgb::grey(grey), alpha: k.k_bar.alpha },
            k.k_bar.zorder,
        );
    }

    let max_at = radii
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_finite())
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i);
    if let Some(i) = max_at {
        ax.add(
            Artist::Wedge { theta: theta[i], width: BAR_WIDTH, r0: 0.0, r1: radii[i], color: max_color, alpha: 1.0 },
            k.k_bar.zorder + 1.0,
        );
        ax.add(Artist::Line(LineArtist::circle(radii[i], max_color, &k.k_max)), k.k_line.zorder);
    }
    if let (Some(t), Some(r)) = (theta.last(), radii.last()) {
        if *r > 0.0 {
            ax.add(
                Artist::Wedge { theta: *t, width: BAR_WIDTH, r0: 0.0, r1: *r, color: current_color, alpha: 1.0 },
                k.k_bar.zorder + 2.0,
            );
        } else {
            // Calm: a small disk at the origin.
            ax.add(
                Artist::Wedge { theta: 0.0, width: TAU, r0: 0.0, r1: ladder.rmax * 0.05, color: current_color, alpha: 1.0 },
                k.k_bar.zorder + 2.0,
            );
        }
        ax.add(Artist::Line(LineArtist::circle(r.max(0.0), current_color, &k.k_min)), k.k_line.zorder);
    }

    if ladder.overflow {
        let font = FontSpec { family: job.prefs.font_main.clone(), size: k.k_rgrids.size, color: Rgb::WHITE };
        ax.add(Artist::Text(TextArtist::new("Holy crap!", (0.5, 0.4), Coords::Axes, font)), k.k_annotation.zorder);
    }

    format_title(&mut ax, job);
    format_legend(
        &mut ax,
        job,
        vec![
            LegendEntry { label: "Current".into(), handle: LegendHandle::Patch { color: current_color, alpha: 1.0 } },
            LegendEntry { label: "Max".into(), handle: LegendHandle::Patch { color: max_color, alpha: 1.0 } },
        ],
    );

    let mut scratch = Scratch::default();
    scratch.push_series(SeriesData { index: 1, label: "Wind".into(), x: theta, y: radii, color: current_color });
    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_steps() {
        assert_eq!(ring_ladder(0.0).rings, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(ring_ladder(7.0).rmax, 10.0);
        assert_eq!(ring_ladder(20.0).rmax, 20.0);
        assert_eq!(ring_ladder(45.0).rings, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        let over = ring_ladder(63.0);
        assert!(over.overflow);
        assert_eq!(over.rmax, 70.0);
        assert_eq!(over.rings, vec![14.0, 28.0, 42.0, 56.0, 70.0]);
        assert!(!ring_ladder(50.0).overflow);
    }

    #[test]
    fn older_observations_are_lighter() {
        let g = age_greys(4);
        assert!(g.windows(2).all(|w| w[0] > w[1]));
        assert!(age_greys(0).is_empty());
    }

    #[test]
    fn keeps_most_recent() {
        assert_eq!(keep_last(vec![1, 2, 3, 4], Some(2)), vec![3, 4]);
        assert_eq!(keep_last(vec![1, 2], Some(5)), vec![1, 2]);
        assert_eq!(keep_last(vec![1, 2], None), vec![1, 2]);
    }
}
