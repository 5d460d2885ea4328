// File: crates/hubchart-core/src/renderers/common.rs
// Summary: Per-series options read from chart parameters, and the shared series pipeline:
// ingest, coerce, adjust, prune, date-parse.

use chrono::NaiveDateTime;

use crate::coerce::to_numbers;
use crate::dates::{date2num, parse_timestamp};
use crate::expr::adjust_values;
use crate::figure::{Axes, Figure};
use crate::formatters::{
    format_axis, format_axis_x_label, format_axis_x_scale, format_axis_x_ticks, format_axis_y1_label,
    format_axis_y1_min_max, format_axis_y_ticks, format_best_fit_line_segments, format_grids, format_min_max_lines,
    format_title, new_figure,
};
use crate::ingest::get_data;
use crate::job::{JobContext, Scratch, SeriesData};
use crate::legend::LegendHandle;
use crate::payload::ChartJob;
use crate::prune::{prune_data, PrunePolicy};
use crate::style::{Dash, Marker, Rgb};
use crate::theme::Theme;
use crate::types::Frame;

/// Fallback series colors when a chart leaves `…Color` unset.
pub const PALETTE: [Rgb; 8] = [
    Rgb::new(0.0, 0.5, 1.0),
    Rgb::new(1.0, 0.5, 0.0),
    Rgb::new(0.2, 0.8, 0.2),
    Rgb::new(0.9, 0.2, 0.2),
    Rgb::new(0.6, 0.4, 0.8),
    Rgb::new(0.6, 0.4, 0.3),
    Rgb::new(0.9, 0.5, 0.8),
    Rgb::new(0.5, 0.5, 0.5),
];

/// Display options of series `index` (1-based) under a key prefix such as "line" or "group".
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesOptions {
    pub index: usize,
    pub source: String,
    pub color: Rgb,
    pub marker: Marker,
    pub marker_color: Rgb,
    pub dash: Dash,
    pub fill: bool,
    pub annotate: bool,
    pub best_fit: bool,
    pub best_fit_color: Rgb,
    pub legend: Option<String>,
    pub suppress: bool,
    pub adjuster: Option<String>,
    pub show_min: bool,
    pub show_max: bool,
}

fn capitalized(prefix: &str) -> String {
    let mut chars = prefix.chars();
    chars.next().map_or_else(String::new, |c| c.to_ascii_uppercase().to_string() + chars.as_str())
}

impl SeriesOptions {
    pub fn read(job: &ChartJob, prefix: &str, index: usize) -> Self {
        let p = &job.p_dict;
        let key = |name: &str| format!("{prefix}{index}{name}");
        let color = p.color_or(&key("Color"), PALETTE[(index.max(1) - 1) % PALETTE.len()]);
        let set_text = |k: String| p.is_set(&k).then(|| p.text(&k).trim().to_string());
        let plot = format!("plot{}{index}", capitalized(prefix));
        let source = p.text(&key("Source"));
        Self {
            index,
            source: source.trim().to_string(),
            color,
            marker: Marker::parse(&p.text(&key("Marker"))),
            marker_color: p.color_or(&key("MarkerColor"), color),
            dash: if p.is_set(&key("Style")) { Dash::parse(&p.text(&key("Style"))) } else { Dash::Solid },
            fill: p.flag(&key("Fill")),
            annotate: p.flag(&key("Annotate")),
            best_fit: p.flag(&key("BestFit")),
            best_fit_color: p.color_or(&key("BestFitColor"), Rgb::new(1.0, 0.0, 0.0)),
            legend: set_text(key("Legend")),
            suppress: p.flag(&key("Suppress")),
            adjuster: set_text(key("adjuster")),
            show_min: p.flag(&format!("{plot}Min")),
            show_max: p.flag(&format!("{plot}Max")),
        }
    }

    /// Every configured series of a chart, in index order.
    pub fn read_all(job: &ChartJob, prefix: &str, count: usize) -> Vec<Self> {
        (1..=count).map(|i| Self::read(job, prefix, i)).collect()
    }

    /// A series with no source is skipped before any file is touched.
    pub fn is_inert(&self) -> bool {
        self.source.is_empty() || self.source.eq_ignore_ascii_case("none")
    }

    pub fn line_handle(&self, width: f32) -> LegendHandle {
        LegendHandle::Line { color: self.color, width, dash: self.dash, marker: self.marker, marker_color: self.marker_color }
    }
}

/// A series after the shared pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedSeries {
    pub label: String,
    pub times: Vec<NaiveDateTime>,
    pub y: Vec<f64>,
}

impl LoadedSeries {
    pub fn x(&self) -> Vec<f64> {
        self.times.iter().copied().map(date2num).collect()
    }

    pub fn into_data(self, opts: &SeriesOptions) -> SeriesData {
        SeriesData { index: opts.index, x: self.x(), label: self.label, y: self.y, color: opts.color }
    }
}

/// Apply an adjustment expression to y-values; an invalid expression leaves them untouched.
pub fn apply_adjuster(y: Vec<f64>, adjuster: Option<&str>, label: &str, ctx: &mut JobContext) -> Vec<f64> {
    let Some(adjuster) = adjuster else { return y };
    match adjust_values(&y, adjuster) {
        Ok(adjusted) => adjusted,
        Err(e) => {
            ctx.log.warning(format!("Y-axis adjustment '{adjuster}' for {label} is invalid: {e}. Skipping adjustment."));
            y
        }
    }
}

/// Restrict to the chart's `limitDataRange` window when `limitDataRangeLength` is positive.
pub fn apply_window(
    times: Vec<NaiveDateTime>,
    y: Vec<f64>,
    job: &ChartJob,
    ctx: &mut JobContext,
) -> (Vec<NaiveDateTime>, Vec<f64>) {
    match job.p_dict.number("limitDataRangeLength").filter(|d| *d > 0.0) {
        Some(days) => {
            let policy = PrunePolicy::parse(&job.p_dict.text("limitDataRange"));
            prune_data(&times, &y, days, policy, ctx.now, &mut ctx.log)
        }
        None => (times, y),
    }
}

/// Read one series through ingest, coercion, adjustment, pruning and date parsing.
/// Inert and unreadable series yield None.
pub fn load_series(job: &ChartJob, opts: &SeriesOptions, ctx: &mut JobContext) -> Option<LoadedSeries> {
    if opts.is_inert() {
        return None;
    }
    load_source(job, &opts.source, opts.legend.as_deref(), opts.adjuster.as_deref(), ctx)
}

/// Pipeline for a single source file under the data path.
pub fn load_source(
    job: &ChartJob,
    source: &str,
    legend: Option<&str>,
    adjuster: Option<&str>,
    ctx: &mut JobContext,
) -> Option<LoadedSeries> {
    let path = job.prefs.data_path.join(source);
    let obs = get_data(&path, ctx.now, &mut ctx.log);
    if !obs.is_usable() {
        return None;
    }
    let label = legend.map_or_else(|| obs.value_label().to_string(), str::to_string);

    let values = to_numbers(&obs.rows);
    let mut times = Vec::with_capacity(values.len());
    let mut y = Vec::with_capacity(values.len());
    let mut unparsed = 0usize;
    for ((stamp, _), v) in obs.body().iter().zip(values) {
        match parse_timestamp(stamp) {
            Some(t) => {
                times.push(t);
                y.push(v);
            }
            None => unparsed += 1,
        }
    }
    if unparsed > 0 {
        ctx.log.debug(format!("{}: skipped {unparsed} rows with unreadable timestamps.", path.display()));
    }
    if times.is_empty() {
        ctx.log.warning(format!("{}: no rows with readable timestamps. Skipping series.", path.display()));
        return None;
    }

    let y = apply_adjuster(y, adjuster, &label, ctx);
    let (times, y) = apply_window(times, y, job, ctx);
    Some(LoadedSeries { label, times, y })
}

/// Theme, empty figure and a formatted cartesian axes for the job.
pub fn prepare(job: &ChartJob, ctx: &mut JobContext) -> (Theme, Figure, Axes) {
    let theme = Theme::from_job(job, &mut ctx.log);
    let figure = new_figure(job, &theme, ctx.draw_labels);
    let axes = format_axis(job, &theme, Frame::default());
    (theme, figure, axes)
}

/// Date ticks and limits on X, ticks and auto-limits on Y, then labels, title and grids.
pub fn format_time_axes(ax: &mut Axes, job: &ChartJob, scratch: &Scratch, x_margin: f64, ctx: &mut JobContext) {
    let xs: Vec<f64> = scratch.series.iter().flat_map(|s| s.x.iter().copied()).collect();
    format_axis_x_ticks(ax, job);
    if xs.iter().any(|x| x.is_finite()) {
        format_axis_x_scale(ax, &xs, x_margin);
    } else {
        let now = date2num(ctx.now);
        ax.x.set_limits(now - 1.0, now);
    }
    format_axis_y_ticks(ax, job, &mut ctx.log);
    format_axis_y1_min_max(ax, job, &scratch.data_array, &mut ctx.log);
    format_axis_x_label(ax, job);
    format_axis_y1_label(ax, job);
    format_title(ax, job);
    format_grids(ax, job);
}

/// Best-fit and min/max lines for one series. Call only after the legend is final.
pub fn series_overlays(ax: &mut Axes, job: &ChartJob, opts: &SeriesOptions, x: &[f64], y: &[f64]) {
    if opts.best_fit {
        format_best_fit_line_segments(ax, job, x, y, opts.best_fit_color);
    }
    format_min_max_lines(ax, job, y, opts.color, opts.show_min, opts.show_max);
}

/// Smallest positive gap between consecutive x values.
pub fn min_gap(x: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = x.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.windows(2).map(|w| w[1] - w[0]).filter(|g| *g > 0.0).min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PluginPrefs;
    use crate::style::StyleBundles;
    use crate::payload::ChartVariant;

    fn job() -> ChartJob {
        let prefs = PluginPrefs::default();
        let k = StyleBundles::from_prefs(&prefs).unwrap();
        ChartJob::new(ChartVariant::Line, "t", prefs, k)
    }

    #[test]
    fn reads_prefixed_keys() {
        let mut j = job();
        j.p_dict.insert("line2Source", "t.csv");
        j.p_dict.insert("line2Color", "00 FF 00");
        j.p_dict.insert("line2Marker", "o");
        j.p_dict.insert("line2Legend", "Outside");
        j.p_dict.insert("line2adjuster", "*2");
        j.p_dict.insert("plotLine2Max", true);
        let o = SeriesOptions::read(&j, "line", 2);
        assert_eq!(o.color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(o.marker_color, o.color);
        assert_eq!(o.marker, Marker::Circle);
        assert_eq!(o.legend.as_deref(), Some("Outside"));
        assert_eq!(o.adjuster.as_deref(), Some("*2"));
        assert!(o.show_max && !o.show_min);
        assert!(!o.is_inert());
    }

    #[test]
    fn none_source_is_inert() {
        let mut j = job();
        j.p_dict.insert("line1Source", "None");
        assert!(SeriesOptions::read(&j, "line", 1).is_inert());
        assert!(SeriesOptions::read(&j, "line", 3).is_inert());
    }

    #[test]
    fn invalid_adjuster_keeps_values() {
        let mut j = job();
        j.p_dict.insert("line1adjuster", "+__import__('os')");
        let o = SeriesOptions::read(&j, "line", 1);
        let mut ctx = JobContext::new(NaiveDateTime::default());
        let y = apply_adjuster(vec![1.0, 2.0], o.adjuster.as_deref(), "T", &mut ctx);
        assert_eq!(y, vec![1.0, 2.0]);
        assert_eq!(ctx.log.warning.len(), 1);
    }

    #[test]
    fn minimum_gap_ignores_duplicates() {
        assert_eq!(min_gap(&[3.0, 1.0, 1.0, 1.5]), Some(0.5));
        assert_eq!(min_gap(&[2.0]), None);
    }
}
