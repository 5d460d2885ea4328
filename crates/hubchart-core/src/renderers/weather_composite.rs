// File: crates/hubchart-core/src/renderers/weather_composite.rs
// Summary: Stack of forecast subplots chosen by a component list, sharing one date axis.

use anyhow::Result;

use super::common::min_gap;
use super::weather_forecast::{field, forecast_points};
use crate::artist::{Artist, Bar, Coords, LineArtist, TextArtist};
use crate::axis::TickFormat;
use crate::figure::Axes;
use crate::formatters::{format_axis, format_axis_x_scale, format_axis_x_ticks, format_grids, format_legend, format_title, new_figure};
use crate::job::{JobContext, JobOutcome, Scratch, SeriesData};
use crate::legend::{LegendEntry, LegendHandle};
use crate::limits::auto_limits;
use crate::payload::{ChartJob, CompositeComponent, ForecastPeriod};
use crate::style::{FontSpec, Marker, Rgb};
use crate::text::{HAlign, VAlign};
use crate::theme::Theme;
use crate::types::Frame;

const ARROW: &str = "\u{2191}";

/// Text rotation (degrees counter-clockwise) that points an up arrow downwind
/// for a wind blowing from `bearing` degrees.
pub fn arrow_rotation(bearing: f64) -> f32 {
    -((bearing + 180.0).rem_euclid(360.0)) as f32
}

struct Trace {
    label: &'static str,
    y: Vec<f64>,
    color: Rgb,
    bars: bool,
}

fn component_traces(component: CompositeComponent, points: &[(f64, &ForecastPeriod)], job: &ChartJob) -> (&'static str, Vec<Trace>) {
    let p = &job.p_dict;
    let high = || Trace {
        label: "High Temperature",
        y: field(points, |f| f.temperature_high),
        color: p.color_or("highTemperatureColor", Rgb::new(1.0, 0.4, 0.4)),
        bars: false,
    };
    let low = || Trace {
        label: "Low Temperature",
        y: field(points, |f| f.temperature_low),
        color: p.color_or("lowTemperatureColor", Rgb::new(0.4, 0.6, 1.0)),
        bars: false,
    };
    let precip = |bars| Trace {
        label: "Precipitation",
        y: field(points, |f| f.precipitation),
        color: p.color_or("precipitationColor", Rgb::new(0.3, 0.3, 0.9)),
        bars,
    };
    match component {
        CompositeComponent::ShowHighTemperature => ("High", vec![high()]),
        CompositeComponent::ShowLowTemperature => ("Low", vec![low()]),
        CompositeComponent::ShowHighLowTemperature => ("Temperature", vec![high(), low()]),
        CompositeComponent::ShowHumidity => (
            "Humidity",
            vec![Trace {
                label: "Humidity",
                y: field(points, |f| f.humidity),
                color: p.color_or("humidityColor", Rgb::new(0.4, 0.8, 0.4)),
                bars: false,
            }],
        ),
        CompositeComponent::ShowBarometricPressure => (
            "Pressure",
            vec![Trace {
                label: "Pressure",
                y: field(points, |f| f.pressure),
                color: p.color_or("pressureColor", Rgb::new(0.8, 0.8, 0.4)),
                bars: false,
            }],
        ),
        CompositeComponent::ShowWind => (
            "Wind",
            vec![Trace {
                label: "Wind",
                y: field(points, |f| f.wind_speed),
                color: p.color_or("windColor", Rgb::new(0.6, 0.6, 0.9)),
                bars: false,
            }],
        ),
        CompositeComponent::ShowPrecipitation => ("Precipitation", vec![precip(false)]),
        CompositeComponent::ShowPrecipitationBar => ("Precipitation", vec![precip(true)]),
    }
}

pub fn render(job: &ChartJob, ctx: &mut JobContext) -> Result<Option<JobOutcome>> {
    if job.component_list.is_empty() {
        ctx.log.warning(format!("No components selected for '{}'. Skipping chart.", job.name));
        return Ok(None);
    }
    let points = forecast_points(&job.state_list, &mut ctx.log);
    if points.is_empty() {
        ctx.log.warning(format!("No forecast data for '{}'. Skipping chart.", job.name));
        return Ok(None);
    }
    let k = &job.k_dict;
    let x: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    let width = 0.8 * min_gap(&x).unwrap_or(1.0);
    let count = job.component_list.len();

    let theme = Theme::from_job(job, &mut ctx.log);
    let mut figure = new_figure(job, &theme, ctx.draw_labels);
    figure.opts.height = figure.opts.height.saturating_mul(count as i32);
    let stack = Frame::new(0.10, 0.08, 0.90, 0.95);

    let mut scratch = Scratch::default();
    let mut entries = Vec::new();
    let mut subplots = Vec::with_capacity(count);
    for (row, component) in job.component_list.iter().enumerate() {
        let (name, traces) = component_traces(*component, &points, job);
        let mut ax = format_axis(job, &theme, stack.row(row, count, 0.25));
        format_axis_x_ticks(&mut ax, job);
        format_axis_x_scale(&mut ax, &x, width);
        if row + 1 < count {
            ax.x.format = TickFormat::Blank;
        }
        ax.y.label = Some(name.to_string());

        let mut values = Vec::new();
        for trace in traces {
            if trace.bars {
                let bars = x
                    .iter()
                    .zip(&trace.y)
                    .map(|(x, v)| Bar { pos: *x, value: *v, width, base: 0.0, color: trace.color })
                    .collect();
                ax.add(Artist::Bars { bars, alpha: k.k_bar.alpha, horizontal: false }, k.k_bar.zorder);
                entries.push(LegendEntry {
                    label: trace.label.into(),
                    handle: LegendHandle::Patch { color: trace.color, alpha: k.k_bar.alpha },
                });
            } else {
                let pts = x.iter().copied().zip(trace.y.iter().copied()).collect();
                ax.add(Artist::Line(LineArtist::new(pts, trace.color, &k.k_line)), k.k_line.zorder);
                entries.push(LegendEntry {
                    label: trace.label.into(),
                    handle: LegendHandle::Line {
                        color: trace.color,
                        width: k.k_line.width,
                        dash: k.k_line.dash,
                        marker: Marker::None,
                        marker_color: trace.color,
                    },
                });
            }
            if *component == CompositeComponent::ShowWind {
                let font = FontSpec { family: job.prefs.font_main.clone(), size: k.k_annotation.size, color: trace.color };
                for ((xv, speed), (_, period)) in x.iter().zip(&trace.y).zip(&points) {
                    let (Some(bearing), true) = (period.wind_bearing, speed.is_finite()) else { continue };
                    let arrow = TextArtist::new(ARROW, (*xv, *speed), Coords::Data, font.clone())
                        .anchored(HAlign::Center, VAlign::Center)
                        .rotated(arrow_rotation(bearing));
                    ax.add(Artist::Text(arrow), k.k_annotation.zorder);
                }
            }
            values.extend(trace.y.iter().copied().filter(|v| v.is_finite()));
            scratch.push_series(SeriesData {
                index: scratch.series.len() + 1,
                label: trace.label.into(),
                x: x.clone(),
                y: trace.y,
                color: trace.color,
            });
        }
        let (lo, hi) = auto_limits(&values, None, None);
        ax.y.set_limits(lo, hi);
        format_grids(&mut ax, job);
        if row == 0 {
            format_title(&mut ax, job);
        }
        subplots.push(ax);
    }

    if let Some(bottom) = subplots.last_mut() {
        format_legend(bottom, job, entries);
    }
    for ax in subplots {
        figure.add_axes(ax);
    }
    Ok(Some(JobOutcome { figure, scratch }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_point_downwind() {
        assert_eq!(arrow_rotation(0.0), -180.0);
        assert_eq!(arrow_rotation(90.0), -270.0);
        assert_eq!(arrow_rotation(180.0), 0.0);
        assert_eq!(arrow_rotation(270.0), -90.0);
    }
}
