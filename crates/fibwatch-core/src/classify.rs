// ── Sensor classification ──
//
// Pure predicates mapping one raw device record to at most one sensor
// category. Temperature is evaluated first; a device satisfying both
// predicate sets classifies as Temperature, which keeps the two reading
// collections disjoint.

use fibwatch_api::RawDevice;

/// Canonical HC2 type string for temperature sensors.
const TEMPERATURE_SENSOR_TYPE: &str = "com.fibaro.temperatureSensor";
/// Canonical HC2 type string for motion sensors.
const MOTION_SENSOR_TYPE: &str = "com.fibaro.motionSensor";

/// Sensor category a device classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Temperature,
    Motion,
}

/// Classify a device, or `None` when it is neither sensor type.
///
/// Most hub devices (switches, dimmers, plugins) match neither
/// predicate; `None` is the common case and not an error.
pub fn classify(device: &RawDevice) -> Option<SensorKind> {
    if is_temperature_sensor(device) {
        Some(SensorKind::Temperature)
    } else if is_motion_sensor(device) {
        Some(SensorKind::Motion)
    } else {
        None
    }
}

fn is_temperature_sensor(device: &RawDevice) -> bool {
    if device.interfaces.iter().any(|i| i == "temperature") {
        return true;
    }
    if device.device_type == TEMPERATURE_SENSOR_TYPE {
        return true;
    }
    // Fallback for firmware that omits both the interface tag and the
    // canonical type: a populated value plus a Celsius-looking unit.
    let has_value = device
        .properties
        .value
        .as_deref()
        .is_some_and(|v| !v.is_empty());
    has_value
        && device
            .properties
            .unit
            .as_deref()
            .is_some_and(is_celsius_unit)
}

fn is_motion_sensor(device: &RawDevice) -> bool {
    device.interfaces.iter().any(|i| i == "motionSensor")
        || device.device_type == MOTION_SENSOR_TYPE
        || device.base_type == MOTION_SENSOR_TYPE
}

/// Tolerant Celsius-unit check.
///
/// The hub emits the degree sign in several byte forms depending on
/// firmware encoding ("°C", the double-encoded "Â°C", sometimes a bare
/// "C"). Strip everything non-alphabetic and compare what remains
/// instead of matching any single byte sequence. A unit this check does
/// not recognize drops the device from classification; the unit is
/// never guessed.
/// TODO: pin the accepted set down against captured hub responses once
/// we have samples from more firmware versions.
fn is_celsius_unit(unit: &str) -> bool {
    let letters: String = unit.chars().filter(char::is_ascii_alphabetic).collect();
    letters.eq_ignore_ascii_case("c") || letters.eq_ignore_ascii_case("celsius")
}
