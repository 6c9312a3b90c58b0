// ── Domain model ──

pub mod reading;
pub mod snapshot;

pub use reading::{MotionReading, TemperatureReading, TemperatureUnit, Trend};
pub use snapshot::{Connectivity, FleetSnapshot};
