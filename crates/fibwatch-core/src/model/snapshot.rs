// ── Fleet snapshot ──
//
// The unit handed to the display layer after each refresh cycle. A new
// snapshot replaces the previous one wholesale; there is no incremental
// merge, and a failed cycle leaves the old snapshot in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::{MotionReading, TemperatureReading};

/// Whether the refresh cycle that produced a snapshot reached the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    Reachable,
    Unreachable,
}

impl Connectivity {
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Reachable)
    }
}

/// Everything one fetch-classify-normalize cycle produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub temperatures: Vec<TemperatureReading>,
    pub motions: Vec<MotionReading>,
    pub connectivity: Connectivity,
    pub refreshed_at: DateTime<Utc>,
}

impl FleetSnapshot {
    /// Count of motion sensors currently detecting motion.
    pub fn active_motion_count(&self) -> usize {
        self.motions.iter().filter(|m| m.active).count()
    }

    /// Arithmetic mean over all temperature readings.
    ///
    /// `None` when no temperature sensors were classified -- the
    /// "unavailable" case the display renders instead of a figure.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_temperature(&self) -> Option<f64> {
        if self.temperatures.is_empty() {
            return None;
        }
        let sum: f64 = self.temperatures.iter().map(|t| t.temperature).sum();
        Some(sum / self.temperatures.len() as f64)
    }
}
