// fibwatch-core: Telemetry engine between fibwatch-api and consumers
// (dashboards, settings forms). Classifies raw hub devices into sensor
// categories, normalizes them into typed readings, and orchestrates the
// fetch-classify-normalize refresh cycle.

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod monitor;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::SensorKind;
pub use config::{HubConfig, TlsVerification};
pub use error::MonitorError;
pub use monitor::{Monitor, MonitorState};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Connectivity, FleetSnapshot, MotionReading, TemperatureReading, TemperatureUnit, Trend,
};
