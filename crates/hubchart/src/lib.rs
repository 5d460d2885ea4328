// File: crates/hubchart/src/lib.rs
// Summary: Host side of hubchart: configuration, payload building, preference cleaning and the job driver.

pub mod config;
pub mod cleaner;
pub mod builder;
pub mod driver;

pub use builder::build_job;
pub use cleaner::clean_device_props;
pub use config::{DeviceConfig, HostConfig};
pub use driver::{Driver, JobReport};
