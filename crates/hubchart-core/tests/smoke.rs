// File: crates/hubchart-core/tests/smoke.rs
// Purpose: Every chart variant renders a decodable PNG of the configured size.

mod support;

use std::path::Path;

use hubchart_core::{run_job, ChartJob, ChartVariant, CompositeComponent, ForecastKind, ForecastPeriod, JobData, StockBar};
use support::{ctx, hourly, job};

fn forecast() -> Vec<ForecastPeriod> {
    (0..6)
        .map(|h| ForecastPeriod {
            timestamp: format!("2026-10-19 {:02}:00:00", 8 + h),
            temperature_high: Some(60.0 + h as f64),
            temperature_low: Some(45.0 - h as f64),
            precipitation: Some(if h % 2 == 0 { 0.1 } else { 0.0 }),
            humidity: Some(70.0),
            pressure: Some(29.9),
            wind_speed: Some(4.0 + h as f64),
            wind_bearing: Some(45.0 * h as f64),
        })
        .collect()
}

fn configured(variant: ChartVariant, root: &Path) -> ChartJob {
    hourly(root, "a.csv", "Outside", &["50", "52.5", "51", "49", "55"]);
    hourly(root, "b.csv", "Inside", &["68", "69", "70", "70.5", "71"]);
    hourly(root, "dir.csv", "Direction", &["0", "90", "180", "270", "315"]);
    let mut j = job(variant, root);
    let p = &mut j.p_dict;
    p.insert("showLegend", true);
    p.insert("chartTitle", "Smoke");
    for prefix in ["line", "area", "bar", "group"] {
        p.insert(format!("{prefix}1Source"), "a.csv");
        p.insert(format!("{prefix}2Source"), "b.csv");
    }
    p.insert("line1Marker", "o");
    p.insert("line1BestFit", true);
    p.insert("plotLine1Max", true);
    p.insert("thetaValue", "dir.csv");
    p.insert("radiiValue", "a.csv");
    match variant {
        ChartVariant::BarStock | ChartVariant::BarStockHorizontal => {
            j.data = Some(JobData::Bars(vec![
                StockBar { legend: "One".into(), value: 4.0, color: "FF 00 00".into(), suppress: false, annotate: true },
                StockBar { legend: "Two".into(), value: 0.0, color: "00 FF 00".into(), suppress: false, annotate: true },
            ]))
        }
        ChartVariant::BarRadial => j.data = Some(JobData::Value(42.0)),
        ChartVariant::Multiline => j.data = Some(JobData::Text("Rain likely after 3 pm...".into())),
        ChartVariant::WeatherForecast => {
            j.state_list = forecast();
            j.dev_type = Some(ForecastKind::Hourly);
            j.sun_rise_set = Some(("2026-10-19 07:12:00".into(), "2026-10-19 18:20:00".into()));
        }
        ChartVariant::WeatherComposite => {
            j.state_list = forecast();
            j.component_list = vec![
                CompositeComponent::ShowHighLowTemperature,
                CompositeComponent::ShowWind,
                CompositeComponent::ShowPrecipitationBar,
            ];
        }
        _ => {}
    }
    j
}

#[test]
fn every_variant_renders_png() {
    for variant in ChartVariant::ALL {
        let dir = tempfile::tempdir().unwrap();
        let j = configured(variant, dir.path());
        let mut c = ctx();
        let path = run_job(&j, &mut c)
            .unwrap_or_else(|e| panic!("{} failed: {e:#}", variant.as_str()))
            .unwrap_or_else(|| panic!("{} skipped: {:?}", variant.as_str(), c.log));
        let img = image::open(&path).expect("decode png");
        let (w, h) = (img.width(), img.height());
        match variant {
            ChartVariant::Polar | ChartVariant::BarRadial | ChartVariant::Calendar => assert_eq!((w, h), (250, 250)),
            ChartVariant::WeatherComposite => assert_eq!((w, h), (600, 750)),
            _ => assert_eq!((w, h), (600, 250), "{}", variant.as_str()),
        }
        assert!(c.log.critical.is_empty(), "{}: {:?}", variant.as_str(), c.log.critical);
    }
}

#[test]
fn render_with_labels_smoke() {
    let dir = tempfile::tempdir().unwrap();
    let j = configured(ChartVariant::Line, dir.path());
    let mut c = ctx();
    c.draw_labels = true;
    let path = run_job(&j, &mut c).unwrap().unwrap();
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn transparent_chart_has_clear_corners() {
    let dir = tempfile::tempdir().unwrap();
    let mut j = configured(ChartVariant::Line, dir.path());
    j.p_dict.insert("transparent_charts", true);
    let path = run_job(&j, &mut ctx()).unwrap().unwrap();
    let img = image::open(path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}
