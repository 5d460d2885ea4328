// File: crates/hubchart-core/src/prefs.rs
// Summary: Global plugin preferences shared by every chart job.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default refresh cadence, in seconds.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 900;

/// Host-wide preferences. Colors stay in the host's "RR GG BB" text form;
/// they are normalized when keyword bundles are derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginPrefs {
    pub background_color: String,
    pub face_color: String,
    pub font_color: String,
    pub font_color_annotation: String,
    pub font_main: String,
    pub grid_color: String,
    pub grid_style: String,
    pub legend_font_size: f32,
    pub line_weight: f32,
    pub main_font_size: f32,
    pub rect_chart_height: u32,
    pub rect_chart_width: u32,
    pub rect_chart_wide_height: u32,
    pub rect_chart_wide_width: u32,
    pub sq_chart_size: u32,
    pub spine_color: String,
    pub tick_color: String,
    pub tick_font_size: f32,
    pub tick_size: f32,
    pub chart_resolution: f32,
    pub chart_path: PathBuf,
    pub data_path: PathBuf,
    pub force_origin_lines: bool,
    pub promote_custom_line_segments: bool,
    pub enable_custom_line_segments: bool,
    pub verbose_logging: bool,
    pub log_each_chart_completed: bool,
    pub refresh_interval: u64,
}

impl Default for PluginPrefs {
    fn default() -> Self {
        Self {
            background_color: "00 00 00".into(),
            face_color: "00 00 00".into(),
            font_color: "FF FF FF".into(),
            font_color_annotation: "FF FF FF".into(),
            font_main: "DejaVu Sans".into(),
            grid_color: "88 88 88".into(),
            grid_style: ":".into(),
            legend_font_size: 6.0,
            line_weight: 1.0,
            main_font_size: 10.0,
            rect_chart_height: 250,
            rect_chart_width: 600,
            rect_chart_wide_height: 250,
            rect_chart_wide_width: 1000,
            sq_chart_size: 250,
            spine_color: "88 88 88".into(),
            tick_color: "88 88 88".into(),
            tick_font_size: 8.0,
            tick_size: 4.0,
            chart_resolution: 100.0,
            chart_path: PathBuf::from("charts"),
            data_path: PathBuf::from("data"),
            force_origin_lines: false,
            promote_custom_line_segments: false,
            enable_custom_line_segments: false,
            verbose_logging: false,
            log_each_chart_completed: true,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}
