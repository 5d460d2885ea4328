// File: crates/hubchart/src/cleaner.rs
// Summary: Sanitizes stored device preferences: legacy keys, color encodings, loose booleans,
// custom-color markers, refresh interval and the chart tag. Applying it twice changes nothing.

use hubchart_core::prefs::DEFAULT_REFRESH_INTERVAL;
use hubchart_core::ChartVariant;
use serde_json::{Map, Value};

/// Keys older plugin versions stored and nothing reads any more.
pub const LEGACY_KEYS: [&str; 9] = [
    "customSizeChart",
    "dpi",
    "enableCustomColors",
    "fontMainSize",
    "legendFontColor",
    "refreshRate",
    "showxAxisMinorTicks",
    "showyAxisMinorTicks",
    "tickFontSizeOverride",
];

/// Fallback for a custom-color marker without a companion value.
pub const DEFAULT_CUSTOM_COLOR: &str = "FF FF FF";

const CHART_FLAGS: [&str; 9] = [
    "showLegend",
    "showxAxisGrid",
    "showyAxisGrid",
    "transparent_charts",
    "transparent_filled",
    "forceOriginLines",
    "enableCustomLineSegments",
    "rectWide",
    "showZeroBars",
];

const SERIES_FLAGS: [&str; 4] = ["Fill", "Annotate", "BestFit", "Suppress"];

/// Series key prefix and count for variants that plot numbered series.
fn series_layout(variant: ChartVariant) -> Option<(&'static str, usize)> {
    match variant {
        ChartVariant::Line => Some(("line", 8)),
        ChartVariant::Area => Some(("area", 8)),
        ChartVariant::BarFlow => Some(("bar", 4)),
        ChartVariant::Scatter => Some(("group", 4)),
        _ => None,
    }
}

/// Boolean fields for a variant.
pub fn bool_fields(variant: ChartVariant) -> Vec<String> {
    let mut fields: Vec<String> = CHART_FLAGS.iter().map(|s| s.to_string()).collect();
    if let Some((prefix, count)) = series_layout(variant) {
        let plot = format!("plot{}{}", prefix[..1].to_ascii_uppercase(), &prefix[1..]);
        for i in 1..=count {
            fields.extend(SERIES_FLAGS.iter().map(|f| format!("{prefix}{i}{f}")));
            fields.push(format!("{plot}{i}Min"));
            fields.push(format!("{plot}{i}Max"));
        }
    }
    if variant == ChartVariant::Multiline {
        fields.push("cleanTheText".into());
        fields.push("textAreaBorder".into());
    }
    fields
}

/// `#RRGGBB` to `RR GG BB`; anything else is returned unchanged.
pub fn rewrite_hex_color(text: &str) -> Option<String> {
    let hex = text.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let up = hex.to_ascii_uppercase();
    Some(format!("{} {} {}", &up[0..2], &up[2..4], &up[4..6]))
}

fn loose_bool(value: &Value) -> Option<bool> {
    match value.as_str()? {
        "True" | "true" => Some(true),
        "False" | "false" | "" => Some(false),
        _ => None,
    }
}

fn is_custom_marker(value: &Value) -> bool {
    matches!(value.as_str(), Some("#custom" | "custom"))
}

/// Clean one device's stored props.
pub fn clean_device_props(device_type_id: &str, mut props: Map<String, Value>) -> Map<String, Value> {
    for key in LEGACY_KEYS {
        if props.remove(key).is_some() {
            tracing::debug!(key, "removed legacy device preference");
        }
    }

    let custom: Vec<String> = props.iter().filter(|(_, v)| is_custom_marker(v)).map(|(k, _)| k.clone()).collect();
    for key in custom {
        let companion = props
            .get(&format!("{key}Other"))
            .filter(|v| !is_custom_marker(v))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_CUSTOM_COLOR)
            .to_string();
        props.insert(key, Value::String(companion));
    }

    for value in props.values_mut() {
        if let Some(fixed) = value.as_str().and_then(rewrite_hex_color) {
            *value = Value::String(fixed);
        }
    }

    let variant = ChartVariant::from_device_type(device_type_id);
    if let Some(variant) = variant {
        for field in bool_fields(variant) {
            if let Some(b) = props.get(&field).and_then(loose_bool) {
                props.insert(field, Value::Bool(b));
            }
        }
    }

    props.entry("refreshInterval").or_insert_with(|| Value::from(DEFAULT_REFRESH_INTERVAL));
    props.insert("isChart".into(), Value::Bool(variant.is_some()));
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn cleans_a_line_device() {
        let raw = props(json!({
            "dpi": 100,
            "refreshRate": "60",
            "line1Color": "#ff8000",
            "line2Color": "custom",
            "line2ColorOther": "#00FF00",
            "line3Color": "#custom",
            "line1Fill": "True",
            "line2Annotate": "",
            "plotLine1Max": "false",
            "showLegend": "true",
            "chartTitle": "True",
        }));
        let out = clean_device_props("lineChartingDevice", raw);
        assert!(!out.contains_key("dpi") && !out.contains_key("refreshRate"));
        assert_eq!(out["line1Color"], "FF 80 00");
        assert_eq!(out["line2Color"], "00 FF 00");
        assert_eq!(out["line3Color"], DEFAULT_CUSTOM_COLOR);
        assert_eq!(out["line1Fill"], true);
        assert_eq!(out["line2Annotate"], false);
        assert_eq!(out["plotLine1Max"], false);
        assert_eq!(out["showLegend"], true);
        assert_eq!(out["chartTitle"], "True");
        assert_eq!(out["refreshInterval"], 900);
        assert_eq!(out["isChart"], true);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = props(json!({
            "barColor": "custom",
            "barColorOther": "#123456",
            "cleanTheText": "False",
            "textColor": "#abcdef",
            "legendFontColor": "FF FF FF",
        }));
        let once = clean_device_props("multiLineText", raw);
        let twice = clean_device_props("multiLineText", once.clone());
        assert_eq!(once, twice);
        assert_eq!(once["cleanTheText"], false);
    }

    #[test]
    fn marker_in_companion_resolves_to_default_once() {
        let raw = props(json!({ "lineColor": "custom", "lineColorOther": "custom" }));
        let once = clean_device_props("lineChartingDevice", raw);
        assert_eq!(once["lineColor"], DEFAULT_CUSTOM_COLOR);
        assert_eq!(once["lineColorOther"], DEFAULT_CUSTOM_COLOR);
        let twice = clean_device_props("lineChartingDevice", once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn keeps_existing_refresh_and_tags_non_charts() {
        let out = clean_device_props("csvEngine", props(json!({ "refreshInterval": 60, "showLegend": "true" })));
        assert_eq!(out["refreshInterval"], 60);
        assert_eq!(out["isChart"], false);
        assert_eq!(out["showLegend"], "true");
    }

    #[test]
    fn hex_rewrite_only_touches_hex() {
        assert_eq!(rewrite_hex_color("#0a0B0c").as_deref(), Some("0A 0B 0C"));
        assert_eq!(rewrite_hex_color("0A 0B 0C"), None);
        assert_eq!(rewrite_hex_color("#custom"), None);
        assert_eq!(rewrite_hex_color("#12345"), None);
    }
}
