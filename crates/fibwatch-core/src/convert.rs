// ── Raw-to-domain normalization ──
//
// Converts a classified raw device plus the cycle's room list into a
// typed reading. Parsing is forgiving on purpose: a malformed field
// degrades that one value (a zero temperature, an absent battery) and
// never drops the device or aborts the cycle.

use chrono::{DateTime, Utc};

use fibwatch_api::{RawDevice, RawRoom};

use crate::model::{MotionReading, TemperatureReading, TemperatureUnit, Trend};

/// Room name substituted when a device's room id doesn't resolve.
pub const UNKNOWN_ROOM: &str = "Unknown Room";

// ── Helpers ────────────────────────────────────────────────────────

/// Resolve a room id against the rooms fetched in the same cycle.
fn room_name(room_id: u32, rooms: &[RawRoom]) -> String {
    rooms
        .iter()
        .find(|r| r.id == room_id)
        .map_or_else(|| UNKNOWN_ROOM.to_owned(), |r| r.name.clone())
}

/// Whole minutes elapsed between an epoch-seconds timestamp and `now`,
/// clamped at zero against clock skew.
fn minutes_since(epoch_secs: i64, now: DateTime<Utc>) -> i64 {
    (now.timestamp() - epoch_secs).max(0) / 60
}

// ── Temperature ────────────────────────────────────────────────────

/// Normalize a temperature device into a reading.
///
/// The value property parses as a float or degrades to 0.0 -- the hub
/// transiently blanks values, and a zero reading beats a vanished
/// sensor. The unit is fixed to Celsius because classification only
/// admits Celsius-bearing sources.
pub fn temperature_reading(
    device: &RawDevice,
    rooms: &[RawRoom],
    now: DateTime<Utc>,
) -> TemperatureReading {
    let temperature = device
        .properties
        .value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    TemperatureReading {
        device_id: device.id,
        name: device.name.clone(),
        temperature,
        unit: TemperatureUnit::Celsius,
        room: room_name(device.room_id, rooms),
        // Needs reading history to do better.
        trend: Trend::Stable,
        last_update: format!("{} min ago", minutes_since(device.modified, now)),
    }
}

// ── Motion ─────────────────────────────────────────────────────────

/// Normalize a motion device into a reading.
///
/// The hub is inconsistent about whether `value` or `breached` carries
/// the trigger state; either saying "true" counts as active.
pub fn motion_reading(device: &RawDevice, rooms: &[RawRoom], now: DateTime<Utc>) -> MotionReading {
    let props = &device.properties;

    let active =
        props.value.as_deref() == Some("true") || props.breached.as_deref() == Some("true");

    let battery_pct = props
        .battery_level
        .as_deref()
        .and_then(|b| b.trim().parse::<u8>().ok());

    MotionReading {
        device_id: device.id,
        name: device.name.clone(),
        room: room_name(device.room_id, rooms),
        active,
        last_triggered: last_triggered(props.last_breached.as_deref(), now),
        battery_pct,
    }
}

/// Render the time since the last breach in the coarsest applicable
/// unit. No recorded breach (or an unparseable one) renders "never".
fn last_triggered(last_breached: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(epoch) = last_breached.and_then(|s| s.trim().parse::<i64>().ok()) else {
        return "never".to_owned();
    };

    let elapsed_secs = (now.timestamp() - epoch).max(0);
    let hours = elapsed_secs / 3600;
    let minutes = elapsed_secs / 60;

    if hours >= 1 {
        format!("{hours} hours ago")
    } else if minutes >= 1 {
        format!("{minutes} min ago")
    } else {
        "just now".to_owned()
    }
}
