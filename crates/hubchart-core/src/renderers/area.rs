// File: crates/hubchart-core/src/renderers/area.rs
// Summary: Stacked area chart with cumulative annotations and proxy patch legend entries.

use anyhow::Result;

use super::common::{format_time_axes, load_series, prepare, series_overlays, SeriesOptions};
use crate::artist::Artist;
use crate::formatters::{
    annotate, annotation_text, custom_line_segments, format_custom_line_segments, format_legend, format_origin_line,
    promote_custom_line_segments,
};
use crate::job::{JobContext, JobOutcome, Scratch};
use crate::legend::{LegendEntry, LegendHandle};
use crate::payload::ChartJob;

pub const MAX_SERIES: usize = 8;

/// Running sums of the layers; NaN contributes zero to the stack.
pub fn cumulative(layers: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut out: Vec<Vec<f64>> = Vec::with_capacity(layers.len());
    for layer in layers {
        let next: Vec<f64> = match out.last() {
            Some(prev) => prev.iter().zip(layer).map(|(a, b)| a + if b.is_finite() { *b } else { 0.0 }).collect(),
            None => layer.iter().map(|b| if b.is_finite() { *b } else { 0.0 }).collect(),
        };
        out.push(next);
    }
    out
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let (theme, mut figure, mut ax) = prepare(job, ctx);
    let k = &job.k_dict;
    let mut scratch = Scratch::default();
    let mut drawn = Vec::new();

    // Stack plots need every layer before anything is drawn.
    for opts in SeriesOptions::read_all(job, "area", MAX_SERIES) {
        let Some(series) = load_series(job, &opts, ctx) else { continue };
        if opts.suppress {
            ctx.log.debug(format!("Series {} ({}) is suppressed.", opts.index, series.label));
            continue;
        }
        let data = series.into_data(&opts);
        // Layers share the first series' timestamps.
        if let Some(first) = scratch.series.first() {
            if data.x != first.x {
                ctx.log.warning(format!(
                    "Area series '{}' does not share timestamps with '{}'. Skipping series.",
                    data.label, first.label
                ));
                continue;
            }
        }
        scratch.push_series(data);
        drawn.push(opts);
    }

    let x: Vec<f64> = scratch.series.first().map(|s| s.x.clone()).unwrap_or_default();
    let layers: Vec<Vec<f64>> = scratch.series.iter().map(|s| s.y.clone()).collect();
    // Limits follow the stack tops, not the individual layers.
    let stacked = cumulative(&layers);
    scratch.data_array = stacked.iter().flatten().copied().collect();

    ax.add(
        Artist::Stack { x: x.clone(), layers: layers.clone(), colors: scratch.colors.clone(), alpha: k.k_fill.alpha },
        k.k_fill.zorder,
    );
    for (opts, top) in drawn.iter().zip(&stacked) {
        if opts.annotate {
            for (xv, yv) in x.iter().zip(top) {
                annotate(&mut ax, job, (*xv, *yv), annotation_text(*yv, job));
            }
        }
    }

    let segments = custom_line_segments(job, &mut ctx.log);
    promote_custom_line_segments(job, &segments, &mut scratch.data_array);
    format_time_axes(&mut ax, job, &scratch, 0.0, ctx);

    // Stack layers have no legend artist of their own; patches stand in.
    let entries = scratch
        .headers
        .iter()
        .zip(&scratch.colors)
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            handle: LegendHandle::Patch { color: *color, alpha: k.k_fill.alpha },
        })
        .collect();
    format_legend(&mut ax, job, entries);

    for (opts, top) in drawn.iter().zip(&stacked) {
        if opts.marker.is_visible() {
            let points = x.iter().copied().zip(top.iter().copied()).collect();
            let markers = Artist::Markers {
                points,
                marker: opts.marker,
                color: opts.marker_color,
                size: k.k_line.marker_size,
                alpha: 1.0,
            };
            ax.add(markers, k.k_line.zorder);
        }
        series_overlays(&mut ax, job, opts, &x, top);
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
    fn running_sums_treat_nan_as_zero() {
        let layers = vec![vec![1.0, 2.0, f64::NAN], vec![1.0, 1.0, 1.0]];
        assert_eq!(cumulative(&layers), vec![vec![1.0, 2.0, 0.0], vec![2.0, 3.0, 1.0]]);
    }
}
