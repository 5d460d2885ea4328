// File: crates/hubchart/src/config.rs
// Summary: TOML host configuration: plugin preferences and the chart devices to render.

use std::path::Path;

use hubchart_core::{CompositeComponent, ForecastKind, ForecastPeriod, JobData, PluginPrefs};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub prefs: PluginPrefs,
    pub devices: Vec<DeviceConfig>,
}

/// One configured device. `props` holds the per-chart options as the host stores them.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfig {
    pub name: String,
    pub id: i64,
    pub device_type_id: String,
    pub props: Map<String, Value>,
    pub data: Option<JobData>,
    pub state_list: Vec<ForecastPeriod>,
    pub dev_type: Option<ForecastKind>,
    pub sun_rise_set: Option<(String, String)>,
    pub component_list: Vec<CompositeComponent>,
}

impl HostConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[prefs]
chartPath = "/tmp/charts"
dataPath = "/tmp/data"
lineWeight = 1.5
verboseLogging = true

[[devices]]
name = "Outdoor Temps"
id = 101
deviceTypeId = "lineChartingDevice"
[devices.props]
line1Source = "outside.csv"
line1Color = "#FF8000"
showLegend = "true"
legendColumns = 3

[[devices]]
name = "Wind Gauge"
id = 102
deviceTypeId = "radialBarChartingDevice"
data = { Value = 12.5 }
"#;

    #[test]
    fn parses_prefs_and_devices() {
        let cfg = HostConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(cfg.prefs.chart_path, Path::new("/tmp/charts"));
        assert_eq!(cfg.prefs.line_weight, 1.5);
        assert!(cfg.prefs.verbose_logging);
        assert_eq!(cfg.prefs.refresh_interval, hubchart_core::prefs::DEFAULT_REFRESH_INTERVAL);
        assert_eq!(cfg.devices.len(), 2);
        let line = &cfg.devices[0];
        assert_eq!(line.device_type_id, "lineChartingDevice");
        assert_eq!(line.props["line1Source"], "outside.csv");
        assert_eq!(line.props["legendColumns"], 3);
        assert_eq!(cfg.devices[1].data, Some(JobData::Value(12.5)));
    }

    #[test]
    fn empty_config_is_default() {
        let cfg = HostConfig::from_toml("").unwrap();
        assert!(cfg.devices.is_empty());
        assert_eq!(cfg.prefs, PluginPrefs::default());
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(HostConfig::from_toml("[prefs"), Err(ConfigError::Parse(_))));
    }
}
