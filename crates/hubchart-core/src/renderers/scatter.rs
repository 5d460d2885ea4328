// File: crates/hubchart-core/src/renderers/scatter.rs
// Summary: Scatter chart: up to four marker groups over time with marker-proxy legend entries.

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
use crate::style::Marker;

pub const MAX_GROUPS: usize = 4;

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let (theme, mut figure, mut ax) = prepare(job, ctx);
    let k = &job.k_dict;
    let mut scratch = Scratch::default();
    let mut drawn = Vec::new();
    let mut entries = Vec::new();

    for mut opts in SeriesOptions::read_all(job, "group", MAX_GROUPS) {
        let Some(series) = load_series(job, &opts, ctx) else { continue };
        if opts.suppress {
            ctx.log.debug(format!("Group {} ({}) is suppressed.", opts.index, series.label));
            continue;
        }
        if !opts.marker.is_visible() {
            opts.marker = Marker::Circle;
        }
        let data = series.into_data(&opts);
        let points: Vec<(f64, f64)> = data.x.iter().copied().zip(data.y.iter().copied()).collect();
        ax.add(
            Artist::Markers {
                points: points.clone(),
                marker: opts.marker,
                color: opts.marker_color,
                size: k.k_line.marker_size,
                alpha: k.k_line.alpha,
            },
            k.k_line.zorder,
        );
        if opts.annotate {
            for (x, y) in points.into_iter().filter(|(_, y)| y.is_finite()) {
                annotate(&mut ax, job, (x, y), annotation_text(y, job));
            }
        }
        entries.push(LegendEntry {
            label: data.label.clone(),
            handle: LegendHandle::Marker { marker: opts.marker, color: opts.marker_color },
        });
        scratch.push_series(data);
        drawn.push(opts);
    }

    let segments = custom_line_segments(job, &mut ctx.log);
    promote_custom_line_segments(job, &segments, &mut scratch.data_array);
    format_time_axes(&mut ax, job, &scratch, 0.0, ctx);
    format_legend(&mut ax, job, entries);

    for (opts, data) in drawn.iter().zip(&scratch.series) {
        series_overlays(&mut ax, job, opts, &data.x, &data.y);
    }
    format_origin_line(&mut ax, job, &theme);
    format_custom_line_segments(&mut ax, job, &segments);

    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch }))
}
