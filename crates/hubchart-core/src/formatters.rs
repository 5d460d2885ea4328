// File: crates/hubchart-core/src/formatters.rs
// Summary: Axis formatters shared by every chart variant. Renderers call them in a
// fixed order: data first, then limits, labels and grids, then the legend, then overlays.

use crate::artist::{Artist, Coords, TextArtist};
use crate::axis::{TickFormat, TickLocator};
use crate::dates::bin_scale;
use crate::figure::{Axes, Figure, RenderOptions};
use crate::legend::{reorder_for_rows, Legend, LegendEntry};
use crate::limits::{auto_limits, padded_range};
use crate::overlay::{parse_segments, BestFitOverlay, HLineOverlay, Overlay, Segment, VLineOverlay};
use crate::payload::{ChartJob, ChartVariant};
use crate::record::LogRecord;
use crate::style::Rgb;
use crate::text::{HAlign, VAlign};
use crate::theme::Theme;
use crate::types::Frame;

/// Default legend columns when `legendColumns` is unset.
pub const LEGEND_COLUMNS: usize = 5;

/// Pixel size of the output image for this job.
pub fn figure_size(job: &ChartJob) -> (i32, i32) {
    let p = &job.p_dict;
    let prefs = &job.prefs;
    let (dw, dh) = match job.variant {
        ChartVariant::Polar | ChartVariant::BarRadial | ChartVariant::Calendar => (prefs.sq_chart_size, prefs.sq_chart_size),
        _ if p.flag("rectWide") => (prefs.rect_chart_wide_width, prefs.rect_chart_wide_height),
        _ => (prefs.rect_chart_width, prefs.rect_chart_height),
    };
    let w = p.number("figureWidth").filter(|v| *v >= 1.0).unwrap_or(dw as f64);
    let h = p.number("figureHeight").filter(|v| *v >= 1.0).unwrap_or(dh as f64);
    (w.round() as i32, h.round() as i32)
}

/// Empty figure sized and colored for the job.
pub fn new_figure(job: &ChartJob, theme: &Theme, draw_labels: bool) -> Figure {
    let (width, height) = figure_size(job);
    let dpi = if job.prefs.chart_resolution > 0.0 { job.prefs.chart_resolution } else { crate::types::DPI };
    Figure::new(RenderOptions {
        width,
        height,
        dpi,
        background: theme.background,
        draw_labels,
        font_family: job.prefs.font_main.clone(),
    })
}

/// Cartesian axes with the job's face, spines, tick styles and axis fonts.
pub fn format_axis(job: &ChartJob, theme: &Theme, frame: Frame) -> Axes {
    let k = &job.k_dict;
    let mut ax = Axes::new(frame);
    ax.face = theme.face;
    ax.spine = Some(theme.spine);
    ax.x.major_style = Some(k.k_major_x.clone());
    ax.x.minor_style = Some(k.k_minor_x.clone());
    ax.y.major_style = Some(k.k_major_y.clone());
    ax.y.minor_style = Some(k.k_minor_y.clone());
    ax.x.label_font = Some(k.k_x_axis_font.clone());
    ax.y.label_font = Some(k.k_y_axis_font.clone());
    format_transparent_fill(&mut ax, theme);
    ax
}

/// On transparent charts that ask for a filled plot area, lay the face color down first.
pub fn format_transparent_fill(ax: &mut Axes, theme: &Theme) {
    if let Some(color) = theme.fill_patch {
        ax.add(Artist::Background { color }, -1.0);
    }
}

/// Date locators and labels for a day-number X axis.
pub fn format_axis_x_ticks(ax: &mut Axes, job: &ChartJob) {
    let p = &job.p_dict;
    let scale = bin_scale(&p.text("xAxisBins"));
    ax.x.major = TickLocator::Date(scale.major);
    ax.x.minor = TickLocator::Date(scale.minor);
    let fmt = p.text("xAxisLabelFormat");
    let fmt = if fmt.trim().is_empty() { "%m-%d" } else { fmt.trim() };
    ax.x.format = TickFormat::Date(fmt.to_string());
}

/// X limits covering the plotted day numbers plus `margin` days on each side.
pub fn format_axis_x_scale(ax: &mut Axes, xs: &[f64], margin: f64) {
    if let Some((lo, hi)) = padded_range(xs, 0.0, 1.0) {
        ax.x.set_limits(lo - margin, hi + margin);
    }
}

fn parse_list(text: &str) -> Vec<String> {
    let mut items: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();
    while items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items
}

fn is_override(text: &str) -> bool {
    let t = text.trim();
    !t.is_empty() && !t.eq_ignore_ascii_case("none")
}

/// Resolve custom tick positions and labels. Without positions, labels apply to the
/// automatic ticks (`None` positions); without labels, positions label themselves.
pub fn custom_ticks(positions: &str, labels: &str) -> Result<Option<(Option<Vec<f64>>, Vec<String>)>, String> {
    let labels = is_override(labels).then(|| parse_list(labels));
    if !is_override(positions) {
        return Ok(labels.map(|l| (None, l)));
    }
    let texts = parse_list(positions);
    let values = texts
        .iter()
        .map(|t| t.parse::<f64>().map_err(|_| format!("custom tick '{t}' is not a number")))
        .collect::<Result<Vec<f64>, String>>()?;
    Ok(Some((Some(values), labels.unwrap_or(texts))))
}

/// Custom Y ticks and precision.
pub fn format_axis_y_ticks(ax: &mut Axes, job: &ChartJob, log: &mut LogRecord) {
    let p = &job.p_dict;
    if let Some(prec) = p.number("yAxisPrecision") {
        ax.y.format = TickFormat::Precision(prec.clamp(0.0, 10.0) as usize);
    }
    match custom_ticks(&p.text("customTicksY"), &p.text("customTicksLabelY")) {
        Ok(Some((positions, labels))) => {
            if let Some(pos) = positions {
                ax.y.major = TickLocator::Fixed(pos);
            }
            ax.y.format = TickFormat::Labels(labels);
        }
        Ok(None) => {}
        Err(e) => log.warning(format!("Ignoring custom Y ticks: {e}.")),
    }
}

pub fn format_axis_x_label(ax: &mut Axes, job: &ChartJob) {
    let text = job.p_dict.text("customAxisLabelX");
    if is_override(&text) {
        ax.x.label = Some(text.trim().to_string());
    }
}

pub fn format_axis_y1_label(ax: &mut Axes, job: &ChartJob) {
    format_axis_y_label_key(ax, job, "customAxisLabelY");
}

pub fn format_axis_y_label_key(ax: &mut Axes, job: &ChartJob, key: &str) {
    let text = job.p_dict.text(key);
    if is_override(&text) {
        ax.y.label = Some(text.trim().to_string());
    }
}

/// Y limits from `yAxisMin`/`yAxisMax`, automatic for "None" or non-numeric values.
pub fn format_axis_y1_min_max(ax: &mut Axes, job: &ChartJob, data_array: &[f64], log: &mut LogRecord) {
    format_axis_y_min_max_keys(ax, job, data_array, "yAxisMin", "yAxisMax", log);
}

pub fn format_axis_y_min_max_keys(ax: &mut Axes, job: &ChartJob, data: &[f64], min_key: &str, max_key: &str, log: &mut LogRecord) {
    let (lo, hi) = auto_limits(data, job.p_dict.number(min_key), job.p_dict.number(max_key));
    log.threaddebug(format!("Y limits [{lo}, {hi}] from {} values.", data.len()));
    ax.y.set_limits(lo, hi);
}

/// X limits for horizontal bar charts, same rules on `xAxisMin`/`xAxisMax`.
pub fn format_axis_x1_min_max(ax: &mut Axes, job: &ChartJob, data_array: &[f64], log: &mut LogRecord) {
    let (lo, hi) = auto_limits(data_array, job.p_dict.number("xAxisMin"), job.p_dict.number("xAxisMax"));
    log.threaddebug(format!("X limits [{lo}, {hi}] from {} values.", data_array.len()));
    ax.x.set_limits(lo, hi);
}

pub fn format_title(ax: &mut Axes, job: &ChartJob) {
    let text = job.p_dict.text("chartTitle");
    if is_override(&text) {
        ax.title = Some((text.trim().to_string(), job.k_dict.k_title_font.clone()));
    }
}

pub fn format_grids(ax: &mut Axes, job: &ChartJob) {
    if job.p_dict.flag("showxAxisGrid") {
        ax.x_grid = Some(job.k_dict.k_grid_fig.clone());
    }
    if job.p_dict.flag("showyAxisGrid") {
        ax.y_grid = Some(job.k_dict.k_grid_fig.clone());
    }
}

pub fn legend_columns(job: &ChartJob) -> usize {
    job.p_dict.number("legendColumns").filter(|v| *v >= 1.0).map_or(LEGEND_COLUMNS, |v| v as usize)
}

/// Attach the legend when `showLegend` is on, reordered to fill by row.
pub fn format_legend(ax: &mut Axes, job: &ChartJob, entries: Vec<LegendEntry>) {
    if !job.p_dict.flag("showLegend") || entries.is_empty() {
        return;
    }
    let columns = legend_columns(job).min(entries.len());
    let ordered = reorder_for_rows(&entries, columns);
    ax.legend = Some(Legend::new(ordered, columns, job.k_dict.k_legend_font.clone()));
}

pub fn format_best_fit_line_segments(ax: &mut Axes, job: &ChartJob, x: &[f64], y: &[f64], color: Rgb) {
    BestFitOverlay { x: x.to_vec(), y: y.to_vec(), color, spec: job.k_dict.k_line.clone() }.apply(ax);
}

/// Min and/or max reference lines for one series.
pub fn format_min_max_lines(ax: &mut Axes, job: &ChartJob, y: &[f64], color: Rgb, show_min: bool, show_max: bool) {
    let finite = y.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if show_min && lo.is_finite() {
        HLineOverlay { y: lo, color, spec: job.k_dict.k_min.clone() }.apply(ax);
    }
    if show_max && hi.is_finite() {
        HLineOverlay { y: hi, color, spec: job.k_dict.k_max.clone() }.apply(ax);
    }
}

/// Line at y = 0 when forced on and zero lies inside the limits.
pub fn format_origin_line(ax: &mut Axes, job: &ChartJob, theme: &Theme) {
    let forced = job.p_dict.flag("forceOriginLines") || job.prefs.force_origin_lines;
    if forced && ax.y.min < 0.0 && ax.y.max > 0.0 {
        HLineOverlay { y: 0.0, color: theme.spine, spec: job.k_dict.k_custom.clone() }.apply(ax);
    }
}

/// Origin line for charts whose values run along x.
pub fn format_origin_line_x(ax: &mut Axes, job: &ChartJob, theme: &Theme) {
    let forced = job.p_dict.flag("forceOriginLines") || job.prefs.force_origin_lines;
    if forced && ax.x.min < 0.0 && ax.x.max > 0.0 {
        VLineOverlay { x: 0.0, color: theme.spine, spec: job.k_dict.k_custom.clone() }.apply(ax);
    }
}

/// Parsed custom segments when enabled; a bad literal is skipped with a warning.
pub fn custom_line_segments(job: &ChartJob, log: &mut LogRecord) -> Vec<Segment> {
    let p = &job.p_dict;
    let enabled = if p.get("enableCustomLineSegments").is_some() {
        p.flag("enableCustomLineSegments")
    } else {
        job.prefs.enable_custom_line_segments
    };
    let text = p.text("customLineSegments");
    if !enabled || !is_override(&text) {
        return Vec::new();
    }
    match parse_segments(&text) {
        Ok(segs) => segs,
        Err(e) => {
            log.warning(format!("Problem with custom line segments: {e}. Skipping."));
            Vec::new()
        }
    }
}

/// With promotion on, segment values join the auto-limit data.
pub fn promote_custom_line_segments(job: &ChartJob, segments: &[Segment], data_array: &mut Vec<f64>) {
    if job.prefs.promote_custom_line_segments {
        data_array.extend(segments.iter().map(|s| s.y));
    }
}

pub fn format_custom_line_segments(ax: &mut Axes, job: &ChartJob, segments: &[Segment]) {
    for s in segments {
        HLineOverlay { y: s.y, color: s.color, spec: job.k_dict.k_custom.clone() }.apply(ax);
    }
}

pub fn format_custom_line_segments_x(ax: &mut Axes, job: &ChartJob, segments: &[Segment]) {
    for s in segments {
        VLineOverlay { x: s.y, color: s.color, spec: job.k_dict.k_custom.clone() }.apply(ax);
    }
}

/// Annotation label: `yAxisPrecision` decimals when set, else the shortest form.
pub fn annotation_text(value: f64, job: &ChartJob) -> String {
    match job.p_dict.number("yAxisPrecision") {
        Some(p) => format!("{:.*}", p.clamp(0.0, 10.0) as usize, value),
        None => format!("{value}"),
    }
}

/// Value label just above a data point.
pub fn annotate(ax: &mut Axes, job: &ChartJob, at: (f64, f64), text: String) {
    let k = &job.k_dict.k_annotation;
    let font = crate::style::FontSpec { family: job.prefs.font_main.clone(), size: k.size, color: k.color };
    let label = TextArtist::new(text, at, Coords::Data, font)
        .anchored(HAlign::Center, VAlign::Bottom)
        .offset(0.0, k.offset);
    ax.add(Artist::Text(label), k.zorder);
}
