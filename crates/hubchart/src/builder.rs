// File: crates/hubchart/src/builder.rs
// Summary: Builds a fresh ChartJob for a device from the plugin preferences and its cleaned props.

use hubchart_core::{ChartJob, ChartVariant, ColorError, Params, PluginPrefs, StyleBundles};

use crate::cleaner::clean_device_props;
use crate::config::DeviceConfig;

/// Job for one device, or `None` when the device type is not a chart.
pub fn build_job(prefs: &PluginPrefs, device: &DeviceConfig) -> Result<Option<ChartJob>, ColorError> {
    let Some(variant) = ChartVariant::from_device_type(&device.device_type_id) else {
        tracing::debug!(device = %device.name, type_id = %device.device_type_id, "not a chart device");
        return Ok(None);
    };
    let k_dict = StyleBundles::from_prefs(prefs)?;
    let mut job = ChartJob::new(variant, device.name.clone(), prefs.clone(), k_dict);
    job.device_id = device.id;
    job.p_dict = Params::from_map(clean_device_props(&device.device_type_id, device.props.clone()));
    job.data = device.data.clone();
    job.state_list = device.state_list.clone();
    job.dev_type = device.dev_type;
    job.sun_rise_set = device.sun_rise_set.clone();
    job.component_list = device.component_list.clone();
    Ok(Some(job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn device(type_id: &str) -> DeviceConfig {
        DeviceConfig {
            name: "Porch".into(),
            id: 7,
            device_type_id: type_id.into(),
            props: json!({ "line1Color": "#FF0000", "showLegend": "True" }).as_object().cloned().unwrap(),
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn builds_line_job_with_clean_props() {
        let job = build_job(&PluginPrefs::default(), &device("lineChartingDevice")).unwrap().unwrap();
        assert_eq!(job.variant, ChartVariant::Line);
        assert_eq!(job.device_id, 7);
        assert_eq!(job.p_dict.text("line1Color"), "FF 00 00");
        assert!(job.p_dict.flag("showLegend"));
        assert_eq!(job.output_path(), PluginPrefs::default().chart_path.join("Porch.png"));
    }

    #[test]
    fn non_chart_devices_build_nothing() {
        assert!(build_job(&PluginPrefs::default(), &device("thermostat")).unwrap().is_none());
    }

    #[test]
    fn bad_pref_colors_fail_the_build() {
        let prefs = PluginPrefs { grid_color: "not a color".into(), ..PluginPrefs::default() };
        assert!(build_job(&prefs, &device("lineChartingDevice")).is_err());
    }
}
