// File: crates/hubchart-core/src/payload.rs
// Summary: Chart job payload: variant tag, identity, read-only parameters, style bundles,
// preferences and per-variant extras.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{self, CodecError};
use crate::prefs::PluginPrefs;
use crate::style::{fix_rgb, Rgb, StyleBundles};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartVariant {
    Area,
    BarFlow,
    BarStock,
    BarStockHorizontal,
    BarRadial,
    Calendar,
    Line,
    Multiline,
    Polar,
    Scatter,
    WeatherForecast,
    WeatherComposite,
}

impl ChartVariant {
    pub const ALL: [ChartVariant; 12] = [
        ChartVariant::Area,
        ChartVariant::BarFlow,
        ChartVariant::BarStock,
        ChartVariant::BarStockHorizontal,
        ChartVariant::BarRadial,
        ChartVariant::Calendar,
        ChartVariant::Line,
        ChartVariant::Multiline,
        ChartVariant::Polar,
        ChartVariant::Scatter,
        ChartVariant::WeatherForecast,
        ChartVariant::WeatherComposite,
    ];

    /// Host device type id for this chart variant.
    pub fn device_type(self) -> &'static str {
        match self {
            ChartVariant::Area => "areaChartingDevice",
            ChartVariant::BarFlow => "barChartingDevice",
            ChartVariant::BarStock => "barStockChartingDevice",
            ChartVariant::BarStockHorizontal => "barStockHorizontalChartingDevice",
            ChartVariant::BarRadial => "radialBarChartingDevice",
            ChartVariant::Calendar => "calendarChartingDevice",
            ChartVariant::Line => "lineChartingDevice",
            ChartVariant::Multiline => "multiLineText",
            ChartVariant::Polar => "polarChartingDevice",
            ChartVariant::Scatter => "scatterChartingDevice",
            ChartVariant::WeatherForecast => "forecastChartingDevice",
            ChartVariant::WeatherComposite => "compositeForecastChartingDevice",
        }
    }

    pub fn from_device_type(type_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.device_type() == type_id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartVariant::Area => "area",
            ChartVariant::BarFlow => "bar-flow",
            ChartVariant::BarStock => "bar-stock",
            ChartVariant::BarStockHorizontal => "bar-stock-horizontal",
            ChartVariant::BarRadial => "bar-radial",
            ChartVariant::Calendar => "calendar",
            ChartVariant::Line => "line",
            ChartVariant::Multiline => "multiline",
            ChartVariant::Polar => "polar",
            ChartVariant::Scatter => "scatter",
            ChartVariant::WeatherForecast => "weather-forecast",
            ChartVariant::WeatherComposite => "weather-composite",
        }
    }
}

/// Read-only chart parameters keyed the way the host stores device props.
///
/// Host values arrive loosely typed ("True", "None", "12", 12, true); the
/// accessors below give each a single interpretation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Text form of a value; missing and null read as "".
    pub fn text(&self, key: &str) -> Cow<'_, str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Bool(true)) => Cow::Borrowed("True"),
            Some(Value::Bool(false)) => Cow::Borrowed("False"),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    /// False for missing, empty and the host's literal "None".
    pub fn is_set(&self, key: &str) -> bool {
        let t = self.text(key);
        let t = t.trim();
        !t.is_empty() && !t.eq_ignore_ascii_case("none")
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
            }
            _ => false,
        }
    }

    /// Finite number, or None for missing/"None"/non-numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        let v = match self.0.get(key)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        v.is_finite().then_some(v)
    }

    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    pub fn color(&self, key: &str) -> Option<Rgb> {
        fix_rgb(self.text(key).trim()).ok()
    }

    pub fn color_or(&self, key: &str, default: Rgb) -> Rgb {
        self.color(key).unwrap_or(default)
    }
}

/// One bar of a stock (categorical) bar chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    pub legend: String,
    pub value: f64,
    /// Host color text, "RR GG BB".
    pub color: String,
    #[serde(default)]
    pub suppress: bool,
    #[serde(default)]
    pub annotate: bool,
}

/// Inline data for variants that do not read CSV files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JobData {
    Bars(Vec<StockBar>),
    Text(String),
    Value(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastKind {
    Daily,
    Hourly,
}

/// One forecast period reported by a weather device. Hourly devices put the
/// hour's temperature in `temperature_high`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPeriod {
    pub timestamp: String,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    pub precipitation: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeComponent {
    ShowHighTemperature,
    ShowLowTemperature,
    ShowHighLowTemperature,
    ShowHumidity,
    ShowBarometricPressure,
    ShowWind,
    ShowPrecipitation,
    ShowPrecipitationBar,
}

/// Everything a worker needs to render one chart. Built fresh for every refresh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartJob {
    pub variant: ChartVariant,
    pub name: String,
    pub device_id: i64,
    pub p_dict: Params,
    pub k_dict: StyleBundles,
    pub prefs: PluginPrefs,
    #[serde(default)]
    pub data: Option<JobData>,
    #[serde(default)]
    pub state_list: Vec<ForecastPeriod>,
    #[serde(default)]
    pub dev_type: Option<ForecastKind>,
    #[serde(default)]
    pub sun_rise_set: Option<(String, String)>,
    #[serde(default)]
    pub component_list: Vec<CompositeComponent>,
}

impl ChartJob {
    pub fn new(variant: ChartVariant, name: impl Into<String>, prefs: PluginPrefs, k_dict: StyleBundles) -> Self {
        Self {
            variant,
            name: name.into(),
            device_id: 0,
            p_dict: Params::new(),
            k_dict,
            prefs,
            data: None,
            state_list: Vec::new(),
            dev_type: None,
            sun_rise_set: None,
            component_list: Vec::new(),
        }
    }

    /// Output image name: the `fileName` prop when set, else the device name.
    pub fn chart_name(&self) -> String {
        if self.p_dict.is_set("fileName") {
            self.p_dict.text("fileName").trim().trim_end_matches(".png").to_string()
        } else {
            self.name.clone()
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.prefs.chart_path.join(format!("{}.png", self.chart_name()))
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        codec::encode(self)
    }

    pub fn decode(token: &str) -> Result<Self, CodecError> {
        codec::decode(token)
    }
}
