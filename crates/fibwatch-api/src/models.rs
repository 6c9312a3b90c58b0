// Hub wire models
//
// Types for the HC2's JSON REST API. Fields use `#[serde(default)]`
// liberally because the hub omits fields depending on device class and
// firmware version. Property values arrive as strings even when their
// meaning is numeric or boolean; normalization happens downstream.

use serde::{Deserialize, Serialize};

/// One device record from `GET /api/devices`.
///
/// The hub reports dozens of fields per device. This is the closed set
/// the monitor consumes; unknown keys are dropped at deserialization
/// rather than carried around as a dynamic bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDevice {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "roomID")]
    pub room_id: u32,
    #[serde(default, rename = "type")]
    pub device_type: String,
    #[serde(default, rename = "baseType")]
    pub base_type: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub visible: bool,
    /// Capability tags assigned by the hub (e.g. "temperature").
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub properties: DeviceProperties,
    /// Last-modified time, epoch seconds.
    #[serde(default)]
    pub modified: i64,
}

/// The device properties the monitor consumes.
///
/// Every value is an untyped string on the wire ("21.5", "true", "66"),
/// including the boolean-ish and numeric ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceProperties {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub dead: Option<String>,
    #[serde(default, rename = "batteryLevel")]
    pub battery_level: Option<String>,
    #[serde(default)]
    pub armed: Option<String>,
    #[serde(default)]
    pub breached: Option<String>,
    /// Epoch seconds of the last breach, as a string.
    #[serde(default, rename = "lastBreached")]
    pub last_breached: Option<String>,
}

/// One room record from `GET /api/rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoom {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "sectionID")]
    pub section_id: u32,
}
