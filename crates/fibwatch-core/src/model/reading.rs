// ── Telemetry reading types ──

use serde::{Deserialize, Serialize};

/// Temperature unit -- the closed set consumers understand.
///
/// Normalized output is always Celsius (classification only admits
/// Celsius-bearing sources); the variant set exists so a display layer
/// can render either scale without re-deriving it from strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

/// Temperature trend indicator.
///
/// Always `Stable` for now: a real trend needs reading history, which
/// the monitor deliberately does not keep. The variant set is the
/// contract with the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

/// Normalized reading from one temperature sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub device_id: u32,
    pub name: String,
    pub temperature: f64,
    pub unit: TemperatureUnit,
    /// Resolved room name; "Unknown Room" when the id doesn't resolve.
    pub room: String,
    pub trend: Trend,
    /// Human-readable time since the hub last updated the value
    /// ("5 min ago").
    pub last_update: String,
}

/// Normalized reading from one motion sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionReading {
    pub device_id: u32,
    pub name: String,
    pub room: String,
    pub active: bool,
    /// Human-readable time since the sensor last triggered; "never"
    /// when the hub has no breach on record.
    pub last_triggered: String,
    /// Battery percentage, absent when the device reports none. Never
    /// defaulted -- 0 is a meaningful low-battery value.
    pub battery_pct: Option<u8>,
}
