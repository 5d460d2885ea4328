// File: crates/hubchart-core/src/renderers/bar_stock.rs
// Summary: Categorical bar chart from inline bar data, vertical or horizontal.

use anyhow::Result;

use super::bar_flow::plotted_height;
use super::common::{prepare, PALETTE};
use crate::artist::{Artist, Bar, Coords, TextArtist};
use crate::axis::{TickFormat, TickLocator};
use crate::formatters::{
    annotate, annotation_text, custom_line_segments, format_axis_x1_min_max, format_axis_x_label,
    format_axis_y1_label, format_axis_y1_min_max, format_axis_y_ticks, format_custom_line_segments,
    format_custom_line_segments_x, format_grids, format_legend, format_origin_line, format_origin_line_x, format_title,
    promote_custom_line_segments,
};
use crate::job::{JobContext, JobOutcome, Scratch, SeriesData};
use crate::legend::{LegendEntry, LegendHandle};
use crate::payload::{ChartJob, JobData, StockBar};
use crate::style::{fix_rgb, FontSpec, Rgb};
use crate::text::{HAlign, VAlign};

/// Bars that survive suppression, with their resolved colors.
fn visible_bars(bars: &[StockBar], ctx: &mut JobContext) -> Vec<(StockBar, Rgb)> {
    bars.iter()
        .enumerate()
        .filter(|(_, b)| !b.suppress)
        .map(|(i, b)| {
            let color = fix_rgb(&b.color).unwrap_or_else(|e| {
                ctx.log.warning(format!("Bar '{}' has an invalid color: {e}. Using default.", b.legend));
                PALETTE[i % PALETTE.len()]
            });
            (b.clone(), color)
        })
        .collect()
}

pub fn render(job: &ChartJob, ctx: &mut JobContext, horizontal: bool) -> Result<Option<JobOutcome>> {
    let bars = match &job.data {
        Some(JobData::Bars(bars)) if !bars.is_empty() => bars.as_slice(),
        _ => {
            ctx.log.warning(format!("No bar data for '{}'. Skipping chart.", job.name));
            return Ok(None);
        }
    };
    let (theme, mut figure, mut ax) = prepare(job, ctx);
    let k = &job.k_dict;
    let show_zero = job.p_dict.flag("showZeroBars");
    let width = job.p_dict.number("barWidth").filter(|w| *w > 0.0).unwrap_or(0.8);
    let mut scratch = Scratch::default();
    let mut drawn = Vec::new();

    for (i, (bar, color)) in visible_bars(bars, ctx).into_iter().enumerate() {
        let pos = i as f64;
        drawn.push(Bar { pos, value: plotted_height(bar.value, show_zero), width, base: 0.0, color });
        if bar.annotate && bar.value.is_finite() {
            if horizontal {
                let font = FontSpec {
                    family: job.prefs.font_main.clone(),
                    size: k.k_annotation.size,
                    color: k.k_annotation.color,
                };
                let label = TextArtist::new(annotation_text(bar.value, job), (plotted_height(bar.value, show_zero), pos), Coords::Data, font)
                    .anchored(HAlign::Left, VAlign::Center)
                    .offset(k.k_annotation.offset, 0.0);
                ax.add(Artist::Text(label), k.k_annotation.zorder);
            } else {
                annotate(&mut ax, job, (pos, plotted_height(bar.value, show_zero)), annotation_text(bar.value, job));
            }
        }
        scratch.push_series(SeriesData { index: i + 1, label: bar.legend, x: vec![pos], y: vec![bar.value], color });
    }
    let count = drawn.len();
    ax.add(Artist::Bars { bars: drawn, alpha: k.k_bar.alpha, horizontal }, k.k_bar.zorder);

    let positions: Vec<f64> = (0..count).map(|i| i as f64).collect();
    let segments = custom_line_segments(job, &mut ctx.log);
    promote_custom_line_segments(job, &segments, &mut scratch.data_array);
    let half = (width / 2.0).max(0.5);
    let span = (-half, count.saturating_sub(1) as f64 + half);
    if horizontal {
        ax.y.major = TickLocator::Fixed(positions);
        ax.y.format = TickFormat::Labels(scratch.headers.clone());
        ax.y.set_limits(span.0, span.1);
        format_axis_x1_min_max(&mut ax, job, &scratch.data_array, &mut ctx.log);
    } else {
        ax.x.major = TickLocator::Fixed(positions);
        ax.x.format = TickFormat::Labels(scratch.headers.clone());
        ax.x.set_limits(span.0, span.1);
        format_axis_y_ticks(&mut ax, job, &mut ctx.log);
        format_axis_y1_min_max(&mut ax, job, &scratch.data_array, &mut ctx.log);
    }
    format_axis_x_label(&mut ax, job);
    format_axis_y1_label(&mut ax, job);
    format_title(&mut ax, job);
    format_grids(&mut ax, job);

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

    if horizontal {
        format_origin_line_x(&mut ax, job, &theme);
        format_custom_line_segments_x(&mut ax, job, &segments);
    } else {
        format_origin_line(&mut ax, job, &theme);
        format_custom_line_segments(&mut ax, job, &segments);
    }

    figure.add_axes(ax);
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(legend: &str, suppress: bool, color: &str) -> StockBar {
        StockBar { legend: legend.into(), value: 1.0, color: color.into(), suppress, annotate: false }
    }

    #[test]
    fn suppressed_bars_are_dropped_and_bad_colors_fall_back() {
        let mut ctx = JobContext::new(chrono::NaiveDateTime::default());
        let bars = [bar("a", false, "FF 00 00"), bar("b", true, "00 FF 00"), bar("c", false, "zz")];
        let kept = visible_bars(&bars, &mut ctx);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].0.legend, "a");
        assert_eq!(kept[1].1, PALETTE[2]);
        assert_eq!(ctx.log.warning.len(), 1);
    }
}
