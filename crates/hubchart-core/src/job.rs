// File: crates/hubchart-core/src/job.rs
// Summary: Worker-side job execution: per-job context, the scratch area renderers fill,
// dispatch by variant and PNG output.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::figure::Figure;
use crate::payload::{ChartJob, ChartVariant};
use crate::record::LogRecord;
use crate::renderers;
use crate::style::Rgb;

/// Per-job state that is not part of the payload.
#[derive(Clone, Debug)]
pub struct JobContext {
    pub now: NaiveDateTime,
    pub log: LogRecord,
    pub draw_labels: bool,
}

impl JobContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now, log: LogRecord::new(), draw_labels: true }
    }

    /// Context anchored at the local wall clock.
    pub fn now_local() -> Self {
        Self::new(chrono::Local::now().naive_local())
    }
}

/// One plotted series after ingest, coercion, adjustment and pruning.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesData {
    /// 1-based series index from the parameter keys.
    pub index: usize,
    pub label: String,
    /// Day numbers.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Rgb,
}

/// Working area a renderer fills while drawing: legend headers and colors,
/// the plotted series, and every value that drives automatic limits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scratch {
    pub headers: Vec<String>,
    pub colors: Vec<Rgb>,
    pub series: Vec<SeriesData>,
    pub data_array: Vec<f64>,
}

impl Scratch {
    /// Record a drawn series: header, legend color and its finite values.
    pub fn push_series(&mut self, data: SeriesData) {
        self.headers.push(data.label.clone());
        self.colors.push(data.color);
        self.data_array.extend(data.y.iter().copied().filter(|v| v.is_finite()));
        self.series.push(data);
    }
}

/// A finished chart ready to be written.
pub struct JobOutcome {
    pub figure: Figure,
    pub scratch: Scratch,
}

/// Build the figure for a job. `Ok(None)` means the chart was skipped and no image is due.
pub fn render_job(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    ctx.log.threaddebug(format!("Rendering {} chart '{}'.", job.variant.as_str(), job.name));
    match job.variant {
        ChartVariant::Line => renderers::line::render(job, ctx),
        ChartVariant::Area => renderers::area::render(job, ctx),
        ChartVariant::BarFlow => renderers::bar_flow::render(job, ctx),
        ChartVariant::BarStock => renderers::bar_stock::render(job, ctx, false),
        ChartVariant::BarStockHorizontal => renderers::bar_stock::render(job, ctx, true),
        ChartVariant::BarRadial => renderers::bar_radial::render(job, ctx),
        ChartVariant::Calendar => renderers::calendar::render(job, ctx),
        ChartVariant::Multiline => renderers::multiline::render(job, ctx),
        ChartVariant::Polar => renderers::polar::render(job, ctx),
        ChartVariant::Scatter => renderers::scatter::render(job, ctx),
        ChartVariant::WeatherForecast => renderers::weather_forecast::render(job, ctx),
        ChartVariant::WeatherComposite => renderers::weather_composite::render(job, ctx),
    }
}

/// Render and write the job's PNG. Returns the written path, or None when skipped.
pub fn run_job(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<PathBuf>> {
    let Some(outcome) = render_job(job, ctx)? else {
        ctx.log.debug(format!("No image written for '{}'.", job.name));
        return Ok(None);
    };
    let path = job.output_path();
    outcome.figure.render_to_png(&path)?;
    if job.prefs.verbose_logging {
        ctx.log.debug(format!("Wrote {}", path.display()));
    }
    ctx.log.threaddebug(format!("Chart data values: {}", outcome.scratch.data_array.len()));
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_collects_finite_values_only() {
        let mut s = Scratch::default();
        s.push_series(SeriesData { index: 1, label: "T".into(), x: vec![1.0, 2.0], y: vec![f64::NAN, 3.0], color: Rgb::WHITE });
        assert_eq!(s.headers, ["T"]);
        assert_eq!(s.data_array, vec![3.0]);
        assert_eq!(s.colors.len(), 1);
    }
}
