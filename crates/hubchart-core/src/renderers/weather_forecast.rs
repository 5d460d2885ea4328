// File: crates/hubchart-core/src/renderers/weather_forecast.rs
// Summary: Forecast chart: precipitation bars on a right axis under temperature lines on the left.

use anyhow::Result;

use super::common::min_gap;
use crate::artist::{Artist, Bar, LineArtist};
use crate::axis::Side;
use crate::dates::{date2num, parse_timestamp};
use crate::figure::Axes;
use crate::formatters::{
    format_axis, format_axis_x_label, format_axis_x_scale, format_axis_x_ticks, format_axis_y1_label,
    format_axis_y_label_key, format_axis_y_min_max_keys, format_axis_y_ticks, format_grids, format_legend,
    format_title, new_figure,
};
use crate::job::{JobContext, JobOutcome, Scratch, SeriesData};
use crate::legend::{LegendEntry, LegendHandle};
use crate::payload::{ChartJob, ForecastKind, ForecastPeriod};
use crate::record::LogRecord;
use crate::style::{Marker, Rgb};
use crate::theme::Theme;
use crate::types::Frame;

/// Forecast periods with readable timestamps, as (day number, period).
pub fn forecast_points<'a>(periods: &'a [ForecastPeriod], log: &mut LogRecord) -> Vec<(f64, &'a ForecastPeriod)> {
    let mut out = Vec::with_capacity(periods.len());
    for period in periods {
        match parse_timestamp(&period.timestamp) {
            Some(t) => out.push((date2num(t), period)),
            None => log.debug(format!("Skipping forecast period with timestamp '{}'.", period.timestamp)),
        }
    }
    out
}

/// One field of every period; missing values become NaN.
pub fn field(points: &[(f64, &ForecastPeriod)], get: impl Fn(&ForecastPeriod) -> Option<f64>) -> Vec<f64> {
    points.iter().map(|(_, p)| get(p).unwrap_or(f64::NAN)).collect()
}

/// Daylight span clipped to `[lo, hi]`, or None when it falls outside.
pub fn daylight_span(sun_rise_set: &(String, String), lo: f64, hi: f64) -> Option<(f64, f64)> {
    let rise = date2num(parse_timestamp(&sun_rise_set.0)?);
    let set = date2num(parse_timestamp(&sun_rise_set.1)?);
    let (a, b) = (rise.max(lo), set.min(hi));
    (a < b).then_some((a, b))
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    let points = forecast_points(&job.state_list, &mut ctx.log);
    if points.is_empty() {
        ctx.log.warning(format!("No forecast data for '{}'. Skipping chart.", job.name));
        return Ok(None);
    }
    let p = &job.p_dict;
    let k = &job.k_dict;
    let kind = job.dev_type.unwrap_or(ForecastKind::Daily);
    let x: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    let high = field(&points, |f| f.temperature_high);
    let low = field(&points, |f| f.temperature_low);
    let precip = field(&points, |f| f.precipitation);

    let high_color = p.color_or("line1Color", Rgb::new(1.0, 0.4, 0.4));
    let low_color = p.color_or("line2Color", Rgb::new(0.4, 0.6, 1.0));
    let precip_color = p.color_or("line3Color", Rgb::new(0.3, 0.3, 0.9));

    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);

    // Precipitation owns the face and the date axis; temperatures draw over it.
    let mut rain = format_axis(job, &theme, Frame::default());
    rain.y_side = Side::Right;
    let width = 0.8 * min_gap(&x).unwrap_or(1.0);
    let bars = x
        .iter()
        .zip(&precip)
        .map(|(x, v)| Bar { pos: *x, value: *v, width, base: 0.0, color: precip_color })
        .collect();
    rain.add(Artist::Bars { bars, alpha: k.k_bar.alpha, horizontal: false }, k.k_bar.zorder);
    format_axis_x_ticks(&mut rain, job);
    format_axis_x_scale(&mut rain, &x, width);
    let rain_values: Vec<f64> = precip.iter().copied().filter(|v| v.is_finite()).collect();
    format_axis_y_min_max_keys(&mut rain, job, &rain_values, "y2AxisMin", "y2AxisMax", &mut ctx.log);
    format_axis_y_label_key(&mut rain, job, "customAxisLabelY2");
    format_axis_x_label(&mut rain, job);
    format_grids(&mut rain, job);

    if kind == ForecastKind::Hourly {
        if let Some(span) = job.sun_rise_set.as_ref().and_then(|s| daylight_span(s, rain.x.min, rain.x.max)) {
            let color = p.color_or("daytimeColor", Rgb::new(0.2, 0.2, 0.2));
            rain.add(Artist::VSpan { x0: span.0, x1: span.1, color, alpha: 0.5 }, 0.5);
        }
    }

    let mut temps = rain.twin();
    temps.y_side = Side::Left;
    temps.y.major_style = rain.y.major_style.clone();
    temps.y.minor_style = rain.y.minor_style.clone();
    temps.y.label_font = rain.y.label_font.clone();

    let mut scratch = Scratch::default();
    let mut entries = Vec::new();
    let mut plot = |ax: &mut Axes, label: &str, y: Vec<f64>, color: Rgb, index: usize| {
        let pts = x.iter().copied().zip(y.iter().copied()).collect();
        ax.add(Artist::Line(LineArtist::new(pts, color, &k.k_line)), k.k_line.zorder);
        let handle = LegendHandle::Line { color, width: k.k_line.width, dash: k.k_line.dash, marker: Marker::None, marker_color: color };
        entries.push(LegendEntry { label: label.to_string(), handle });
        scratch.push_series(SeriesData { index, label: label.to_string(), x: x.clone(), y, color });
    };
    match kind {
        ForecastKind::Daily => {
            plot(&mut temps, "High Temperature", high, high_color, 1);
            plot(&mut temps, "Low Temperature", low, low_color, 2);
        }
        ForecastKind::Hourly => plot(&mut temps, "Temperature", high, high_color, 1),
    }
    entries.push(LegendEntry {
        label: "Precipitation".into(),
        handle: LegendHandle::Patch { color: precip_color, alpha: k.k_bar.alpha },
    });

    format_axis_y_ticks(&mut temps, job, &mut ctx.log);
    format_axis_y_min_max_keys(&mut temps, job, &scratch.data_array, "yAxisMin", "yAxisMax", &mut ctx.log);
    format_axis_y1_label(&mut temps, job);
    format_title(&mut temps, job);
    format_legend(&mut temps, job, entries);

    figure.add_axes(rain);
    figure.add_axes(temps);
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(ts: &str, hi: Option<f64>) -> ForecastPeriod {
        ForecastPeriod { timestamp: ts.into(), temperature_high: hi, ..Default::default() }
    }

    #[test]
    fn unreadable_timestamps_are_dropped() {
        let mut log = LogRecord::new();
        let periods = [period("2026-10-19 00:00:00", Some(60.0)), period("soon", Some(61.0))];
        let pts = forecast_points(&periods, &mut log);
        assert_eq!(pts.len(), 1);
        assert_eq!(field(&pts, |f| f.temperature_high), vec![60.0]);
        assert!(field(&pts, |f| f.temperature_low)[0].is_nan());
    }

    #[test]
    fn daylight_clips_to_window() {
        let lo = date2num(parse_timestamp("2026-10-19 00:00:00").unwrap());
        let hi = lo + 0.5;
        let s = ("2026-10-19 07:00:00".to_string(), "2026-10-19 18:30:00".to_string());
        let (a, b) = daylight_span(&s, lo, hi).unwrap();
        assert!((a - (lo + 7.0 / 24.0)).abs() < 1e-9);
        assert_eq!(b, hi);
        assert!(daylight_span(&s, hi + 1.0, hi + 2.0).is_none());
    }
}
