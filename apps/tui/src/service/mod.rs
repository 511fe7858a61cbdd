// Map data service for sharkwatch
// HTTP wrapper, intensity lookups and the telemetry source capability

pub mod client;
pub mod error;
pub mod palette;
pub mod source;

pub use client::{all_map_data_url, MapService};
pub use error::ServiceError;
pub use palette::{circle_color, circle_radius, risk_color, Tone};
pub use source::{DemoSource, TelemetrySource};
