// File: crates/hubchart-core/src/renderers/mod.rs
// Summary: One renderer per chart variant; each orchestrates ingest, formatters and overlays.

pub mod common;

pub mod area;
pub mod bar_flow;
pub mod bar_radial;
pub mod bar_stock;
pub mod calendar;
pub mod line;
pub mod multiline;
pub mod polar;
pub mod scatter;
pub mod weather_composite;
pub mod weather_forecast;
