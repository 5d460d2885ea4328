// File: crates/hubchart-core/src/renderers/bar_flow.rs
// Summary: Time-series bar chart with auto bar width and the show-zero-bars rule.

use anyhow::Result;

use super::common::{format_time_axes, load_series, min_gap, prepare, series_overlays, SeriesOptions};
use crate::artist::{Artist, Bar};
use crate::formatters::{
    annotate, annotation_text, custom_line_segments, format_custom_line_segments, format_legend, format_origin_line,
    promote_custom_line_segments,
};
use crate::job::{JobContext, JobOutcome, Scratch};
use crate::legend::{LegendEntry, LegendHandle};
use crate::payload::ChartJob;

pub const MAX_SERIES: usize = 4;
/// Stand-in height that keeps zero bars visible.
pub const ZERO_BAR: f64 = 1e-6;

/// Height to draw for a value.
pub fn plotted_height(value: f64, show_zero_bars: bool) -> f64 {
    if show_zero_bars && value == 0.0 { ZERO_BAR } else { value }
}

/// `barWidth` when positive, else 0.8 of the smallest gap (one day for a single bar).
pub fn bar_width(job: &ChartJob, x: &[f64]) -> f64 {
    job.p_dict
        .number("barWidth")
        .filter(|w| *w > 0.0)
        .unwrap_or_else(|| 0.8 * min_gap(x).unwrap_or(1.0))
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let (theme, mut figure, mut ax) = prepare(job, ctx);
    let k = &job.k_dict;
    let show_zero = job.p_dict.flag("showZeroBars");
    let mut scratch = Scratch::default();
    let mut drawn = Vec::new();
    let mut widest = 0.0f64;

    for opts in SeriesOptions::read_all(job, "bar", MAX_SERIES) {
        let Some(series) = load_series(job, &opts, ctx) else { continue };
        if opts.suppress {
            ctx.log.debug(format!("Series {} ({}) is suppressed.", opts.index, series.label));
            continue;
        }
        let data = series.into_data(&opts);
        let width = bar_width(job, &data.x);
        widest = widest.max(width);

        let bars = data
            .x
            .iter()
            .zip(&data.y)
            .map(|(x, y)| Bar { pos: *x, value: plotted_height(*y, show_zero), width, base: 0.0, color: opts.color })
            .collect();
        ax.add(Artist::Bars { bars, alpha: k.k_bar.alpha, horizontal: false }, k.k_bar.zorder);
        if opts.annotate {
            for (x, y) in data.x.iter().zip(&data.y).filter(|(_, y)| y.is_finite()) {
                annotate(&mut ax, job, (*x, plotted_height(*y, show_zero)), annotation_text(*y, job));
            }
        }
        scratch.push_series(data);
        drawn.push(opts);
    }

    let segments = custom_line_segments(job, &mut ctx.log);
    promote_custom_line_segments(job, &segments, &mut scratch.data_array);
    format_time_axes(&mut ax, job, &scratch, widest, ctx);

    let entries = scratch
        .headers
        .iter()
        .zip(&scratch.colors)
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            handle: LegendHandle::Patch { color: *color, alpha: k.k_bar.alpha },
        })
        .collect();
    format_legend(&mut ax, job, entries);

    for (opts, data) in drawn.iter().zip(&scratch.series) {
        series_overlays(&mut ax, job, opts, &data.x, &data.y);
    }
    format_origin_line(&mut ax, job, &theme);
    format_custom_line_segments(&mut ax, job, &segments);

    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bars_only_change_zeros() {
        let values = [0.0, 5.0, 0.0, -2.0];
        let plotted: Vec<f64> = values.iter().map(|v| plotted_height(*v, true)).collect();
        assert_eq!(plotted, vec![ZERO_BAR, 5.0, ZERO_BAR, -2.0]);
        for (orig, drawn) in values.iter().zip(&plotted) {
            assert!(orig == drawn || *orig == 0.0);
        }
        assert_eq!(plotted_height(0.0, false), 0.0);
    }
}
