// File: crates/hubchart-core/src/lib.rs
// Summary: Core library entry point; chart jobs, data preparation and the Skia figure engine.

pub mod codec;
pub mod record;
pub mod prefs;
pub mod style;
pub mod payload;

pub mod ingest;
pub mod coerce;
pub mod expr;
pub mod prune;
pub mod dates;

pub mod types;
pub mod geometry;
pub mod scale;
pub mod grid;
pub mod axis;
pub mod text;
pub mod artist;
pub mod legend;
pub mod figure;
pub mod limits;
pub mod theme;
pub mod overlay;
pub mod formatters;

pub mod job;
pub mod renderers;

pub use codec::CodecError;
pub use record::{LogRecord, Severity};
pub use prefs::PluginPrefs;
pub use style::{fix_rgb, ColorError, Rgb, StyleBundles};
pub use payload::{ChartJob, ChartVariant, CompositeComponent, ForecastKind, ForecastPeriod, JobData, Params, StockBar};
pub use figure::{Axes, Figure, RenderOptions};
pub use job::{render_job, run_job, JobContext, JobOutcome, Scratch, SeriesData};
pub use text::TextShaper;
pub use theme::Theme;
