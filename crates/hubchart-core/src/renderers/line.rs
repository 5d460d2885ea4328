// File: crates/hubchart-core/src/renderers/line.rs
// Summary: Line chart: up to eight time series with markers, fills, annotations and overlays.

use anyhow::Result;

use super::common::{format_time_axes, load_series, prepare, series_overlays, SeriesOptions};
use crate::artist::{Artist, LineArtist};
use crate::formatters::{
    annotate, annotation_text, custom_line_segments, format_custom_line_segments, format_legend, format_origin_line,
    promote_custom_line_segments,
};
use crate::job::{JobContext, JobOutcome, Scratch};
use crate::legend::LegendEntry;
use crate::payload::ChartJob;

pub const MAX_SERIES: usize = 8;

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let (theme, mut figure, mut ax) = prepare(job, ctx);
    let k = &job.k_dict;
    let mut scratch = Scratch::default();
    let mut drawn = Vec::new();
    let mut entries = Vec::new();

    for opts in SeriesOptions::read_all(job, "line", MAX_SERIES) {
        let Some(series) = load_series(job, &opts, ctx) else { continue };
        if opts.suppress {
            ctx.log.debug(format!("Series {} ({}) is suppressed.", opts.index, series.label));
            continue;
        }
        let data = series.into_data(&opts);
        let points: Vec<(f64, f64)> = data.x.iter().copied().zip(data.y.iter().copied()).collect();

        if opts.fill {
            let fill = Artist::Fill { points: points.clone(), base: 0.0, color: opts.color, alpha: k.k_fill.alpha };
            ax.add(fill, k.k_line.zorder - 1.0);
        }
        let line = LineArtist::new(points.clone(), opts.color, &k.k_line)
            .with_dash(opts.dash)
            .with_marker(opts.marker, opts.marker_color);
        ax.add(Artist::Line(line), k.k_line.zorder);
        if opts.annotate {
            for (x, y) in points.into_iter().filter(|(_, y)| y.is_finite()) {
                annotate(&mut ax, job, (x, y), annotation_text(y, job));
            }
        }

        entries.push(LegendEntry { label: data.label.clone(), handle: opts.line_handle(k.k_line.width) });
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
