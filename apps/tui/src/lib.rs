// Export our modules for use in the binary and tests
pub mod config;
pub mod domain;
pub mod logging;
pub mod map;
pub mod overview;
pub mod service;

pub use domain::{DashboardSummary, DateRange, FilterMode, Hotspot, MapPoint, SharkAlert};
