// File: crates/hubchart-core/tests/scenarios.rs
// Purpose: Pipeline scenarios driven through render_job/run_job against CSV fixtures.

mod support;

use chrono::Duration;
use hubchart_core::artist::Artist;
use hubchart_core::{render_job, run_job, ChartVariant, JobData, StockBar};
use support::{ctx, hourly, job, write_series};

#[test]
fn scatter_skips_empty_group_source() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "gp2.csv", "Humidity", &["40", "42", "45"]);
    let mut j = job(ChartVariant::Scatter, dir.path());
    j.p_dict.insert("group1Source", "");
    j.p_dict.insert("group2Source", "gp2.csv");
    j.p_dict.insert("showLegend", true);

    let mut c = ctx();
    let out = render_job(&j, &mut c).unwrap().expect("chart rendered");
    let legend = out.figure.axes[0].legend.as_ref().expect("legend");
    assert_eq!(legend.labels(), vec!["Humidity"]);
    assert_eq!(out.scratch.data_array.len(), 3);
    assert!(c.log.critical.is_empty());

    let png = run_job(&j, &mut ctx()).unwrap().expect("png written");
    assert!(png.exists());
}

#[test]
fn adjustment_expression_applies_to_every_point() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "t.csv", "Temp", &["1", "2", "3"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("line1Source", "t.csv");
    j.p_dict.insert("line1adjuster", "*2+1");

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    assert_eq!(out.scratch.series[0].y, vec![3.0, 5.0, 7.0]);
}

#[test]
fn state_words_and_sentinels_are_coerced() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "s.csv", "State", &["on", "off", "open", "-99.0", "foo", "3.14"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("line1Source", "s.csv");

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    let y = &out.scratch.series[0].y;
    assert_eq!(y.len(), 6);
    assert_eq!(&y[..3], &[1.0, 0.0, 1.0]);
    assert!(y[3].is_nan() && y[4].is_nan());
    assert_eq!(y[5], 3.14);
    assert_eq!(out.scratch.data_array, vec![1.0, 0.0, 1.0, 3.14]);
}

#[test]
fn newest_window_keeps_trailing_days() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<String> = (0..10).map(|v| v.to_string()).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    write_series(dir.path(), "d.csv", "Daily", &refs, Duration::days(1));
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("line1Source", "d.csv");
    j.p_dict.insert("limitDataRange", "newest");
    j.p_dict.insert("limitDataRangeLength", 2.5);

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    assert_eq!(out.scratch.series[0].y, vec![7.0, 8.0, 9.0]);
}

#[test]
fn zero_bars_are_lifted_but_annotated_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "b.csv", "Rain", &["0", "5", "0"]);
    let mut j = job(ChartVariant::BarFlow, dir.path());
    j.p_dict.insert("bar1Source", "b.csv");
    j.p_dict.insert("bar1Annotate", true);
    j.p_dict.insert("showZeroBars", true);

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    let ax = &out.figure.axes[0];
    let heights: Vec<f64> = ax
        .artists()
        .filter_map(|a| match a {
            Artist::Bars { bars, .. } => Some(bars.iter().map(|b| b.value).collect::<Vec<_>>()),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(heights, vec![1e-6, 5.0, 1e-6]);
    let labels: Vec<&str> = ax
        .artists()
        .filter_map(|a| match a {
            Artist::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["0", "5", "0"]);
}

#[test]
fn polar_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dirs: Vec<String> = (0..10).map(|v| (v * 36).to_string()).collect();
    let speeds: Vec<String> = (0..9).map(|v| v.to_string()).collect();
    hourly(dir.path(), "dir.csv", "Direction", &dirs.iter().map(String::as_str).collect::<Vec<_>>());
    hourly(dir.path(), "spd.csv", "Speed", &speeds.iter().map(String::as_str).collect::<Vec<_>>());
    let mut j = job(ChartVariant::Polar, dir.path());
    j.p_dict.insert("thetaValue", "dir.csv");
    j.p_dict.insert("radiiValue", "spd.csv");

    let mut c = ctx();
    assert_eq!(run_job(&j, &mut c).unwrap(), None);
    assert!(!j.output_path().exists());
    assert!(c.log.warning.iter().any(|w| w == "Insufficient number of observations to plot."));

    // Trimming to the newest observations must not hide the mismatch.
    j.p_dict.insert("numObs", 5);
    let mut c = ctx();
    assert!(render_job(&j, &mut c).unwrap().is_none());
    assert!(c.log.warning.iter().any(|w| w == "Insufficient number of observations to plot."));
}

#[test]
fn suppressed_and_missing_series_stay_out_of_the_legend() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "a.csv", "A", &["1", "2"]);
    hourly(dir.path(), "b.csv", "B", &["100", "200"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("showLegend", true);
    j.p_dict.insert("line1Source", "a.csv");
    j.p_dict.insert("line2Source", "b.csv");
    j.p_dict.insert("line2Suppress", true);
    j.p_dict.insert("line3Source", "gone.csv");

    let mut c = ctx();
    let out = render_job(&j, &mut c).unwrap().unwrap();
    assert_eq!(out.scratch.headers, vec!["A"]);
    assert_eq!(out.scratch.data_array, vec![1.0, 2.0]);
    assert_eq!(out.figure.axes[0].legend.as_ref().unwrap().labels(), vec!["A"]);
    assert_eq!(c.log.critical.len(), 1);
}

#[test]
fn auto_limits_contain_the_data() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "t.csv", "T", &["-12.5", "3", "71.2"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.p_dict.insert("line1Source", "t.csv");
    j.p_dict.insert("yAxisMin", "None");
    j.p_dict.insert("yAxisMax", "lots");

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    let y = &out.figure.axes[0].y;
    assert!(y.min <= -12.5 && y.max >= 71.2);
}

#[test]
fn promoted_segments_widen_limits() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "t.csv", "T", &["10", "20"]);
    let mut j = job(ChartVariant::Line, dir.path());
    j.prefs.promote_custom_line_segments = true;
    j.p_dict.insert("line1Source", "t.csv");
    j.p_dict.insert("enableCustomLineSegments", true);
    j.p_dict.insert("customLineSegments", "((32, 'blue'), (90, 'FF 00 00'))");

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    assert!(out.scratch.data_array.contains(&90.0));
    assert!(out.figure.axes[0].y.max >= 90.0);
    let hlines = out.figure.axes[0].artists().filter(|a| matches!(a, Artist::HLine { .. })).count();
    assert_eq!(hlines, 2);
}

#[test]
fn stock_bars_label_categories() {
    let dir = tempfile::tempdir().unwrap();
    let mut j = job(ChartVariant::BarStock, dir.path());
    j.data = Some(JobData::Bars(vec![
        StockBar { legend: "Kitchen".into(), value: 3.0, color: "FF 00 00".into(), suppress: false, annotate: true },
        StockBar { legend: "Garage".into(), value: 9.0, color: "00 FF 00".into(), suppress: true, annotate: false },
        StockBar { legend: "Office".into(), value: 5.0, color: "00 00 FF".into(), suppress: false, annotate: false },
    ]));

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    let ticks = out.figure.axes[0].x.major_ticks();
    assert_eq!(ticks, vec![(0.0, "Kitchen".to_string()), (1.0, "Office".to_string())]);
    assert_eq!(out.scratch.data_array, vec![3.0, 5.0]);
}

#[test]
fn horizontal_bars_draw_promoted_segments_vertically() {
    let dir = tempfile::tempdir().unwrap();
    let mut j = job(ChartVariant::BarStockHorizontal, dir.path());
    j.prefs.promote_custom_line_segments = true;
    j.p_dict.insert("enableCustomLineSegments", true);
    j.p_dict.insert("customLineSegments", "(90, 'FF 00 00')");
    j.data = Some(JobData::Bars(vec![StockBar {
        legend: "Kitchen".into(),
        value: 3.0,
        color: "FF 00 00".into(),
        suppress: false,
        annotate: false,
    }]));

    let out = render_job(&j, &mut ctx()).unwrap().unwrap();
    let ax = &out.figure.axes[0];
    assert!(ax.x.max >= 90.0);
    assert_eq!(ax.artists().filter(|a| matches!(a, Artist::VLine { x, .. } if *x == 90.0)).count(), 1);
    assert_eq!(ax.artists().filter(|a| matches!(a, Artist::HLine { .. })).count(), 0);
}

#[test]
fn area_skips_layers_on_other_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    hourly(dir.path(), "a.csv", "A", &["1", "2", "3"]);
    hourly(dir.path(), "b.csv", "B", &["10", "20"]);
    let mut j = job(ChartVariant::Area, dir.path());
    j.p_dict.insert("area1Source", "a.csv");
    j.p_dict.insert("area2Source", "b.csv");

    let mut c = ctx();
    let out = render_job(&j, &mut c).unwrap().unwrap();
    assert_eq!(out.scratch.headers, ["A"]);
    assert_eq!(out.scratch.data_array, vec![1.0, 2.0, 3.0]);
    assert!(c.log.warning.iter().any(|w| w.contains("'B'")));
}
