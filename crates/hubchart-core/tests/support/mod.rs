// File: crates/hubchart-core/tests/support/mod.rs
// Summary: Shared fixtures for integration tests: jobs rooted in a temp dir and CSV writers.
#![allow(dead_code)]

use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use hubchart_core::{ChartJob, ChartVariant, JobContext, PluginPrefs, StyleBundles};

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

/// Job whose data and chart paths live under `root`.
pub fn job(variant: ChartVariant, root: &Path) -> ChartJob {
    let prefs = PluginPrefs { data_path: root.join("data"), chart_path: root.join("charts"), ..PluginPrefs::default() };
    let k = StyleBundles::from_prefs(&prefs).unwrap();
    ChartJob::new(variant, "test chart", prefs, k)
}

pub fn ctx() -> JobContext {
    let mut ctx = JobContext::new(now());
    ctx.draw_labels = false;
    ctx
}

/// Write a (timestamp, value) CSV with one row per value, `step` apart, ending at now.
pub fn write_series(root: &Path, name: &str, label: &str, values: &[&str], step: Duration) {
    let dir = root.join("data");
    std::fs::create_dir_all(&dir).unwrap();
    let mut text = format!("timestamp,{label}\n");
    let n = values.len() as i32;
    for (i, v) in values.iter().enumerate() {
        let t = now() - step * (n - 1 - i as i32);
        text.push_str(&format!("{},{v}\n", t.format("%Y-%m-%d %H:%M:%S%.6f")));
    }
    std::fs::write(dir.join(name), text).unwrap();
}

pub fn hourly(root: &Path, name: &str, label: &str, values: &[&str]) {
    write_series(root, name, label, values, Duration::hours(1));
}
