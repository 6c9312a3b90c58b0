// ── Refresh orchestration ──
//
// Drives one fetch-classify-normalize cycle against the hub and tracks
// connectivity across cycles. The monitor holds the single current
// FleetSnapshot; a successful cycle replaces it atomically and a failed
// cycle leaves it untouched, so the display layer keeps stale data in
// preference to a blank screen.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use fibwatch_api::{HubClient, TlsMode, TransportConfig};

use crate::classify::{SensorKind, classify};
use crate::config::{HubConfig, TlsVerification};
use crate::convert::{motion_reading, temperature_reading};
use crate::error::MonitorError;
use crate::model::{Connectivity, FleetSnapshot};

/// Refresh-cycle state observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// No cycle in flight.
    Idle,
    /// A fetch is in flight.
    Refreshing,
}

/// The refresh orchestrator.
///
/// Cheaply cloneable via `Arc`. The hub configuration is an explicit
/// argument to each operation rather than monitor state, so two
/// monitors (or one monitor handed two configs over its lifetime) never
/// share hidden session state.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    state: watch::Sender<MonitorState>,
    connectivity: watch::Sender<Connectivity>,
    snapshot: ArcSwapOption<FleetSnapshot>,
    /// Held for the duration of one cycle; `try_lock` failure is how a
    /// second concurrent refresh gets rejected.
    cycle_gate: Mutex<()>,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor {
    pub fn new() -> Self {
        let (state, _) = watch::channel(MonitorState::Idle);
        let (connectivity, _) = watch::channel(Connectivity::Unreachable);
        Self {
            inner: Arc::new(MonitorInner {
                state,
                connectivity,
                snapshot: ArcSwapOption::empty(),
                cycle_gate: Mutex::new(()),
            }),
        }
    }

    /// The most recent successful snapshot, if any cycle has succeeded.
    pub fn snapshot(&self) -> Option<Arc<FleetSnapshot>> {
        self.inner.snapshot.load_full()
    }

    /// Subscribe to refresh-state changes.
    pub fn state(&self) -> watch::Receiver<MonitorState> {
        self.inner.state.subscribe()
    }

    /// Subscribe to connectivity changes.
    pub fn connectivity(&self) -> watch::Receiver<Connectivity> {
        self.inner.connectivity.subscribe()
    }

    /// Run one fetch-classify-normalize cycle.
    ///
    /// Devices and rooms are fetched concurrently; either failing
    /// aborts the whole cycle (no partial snapshot) and flips
    /// connectivity to Unreachable while the previous snapshot stays in
    /// place. A refresh arriving while another is in flight is
    /// rejected, and an incomplete config is reported before any
    /// network traffic.
    pub async fn refresh(&self, config: &HubConfig) -> Result<Arc<FleetSnapshot>, MonitorError> {
        config.validate()?;

        let Ok(_gate) = self.inner.cycle_gate.try_lock() else {
            return Err(MonitorError::RefreshInFlight);
        };
        let _ = self.inner.state.send(MonitorState::Refreshing);

        let result = self.run_cycle(config).await;

        match &result {
            Ok(snapshot) => {
                debug!(
                    temperatures = snapshot.temperatures.len(),
                    motions = snapshot.motions.len(),
                    "refresh cycle complete"
                );
                let _ = self.inner.connectivity.send(Connectivity::Reachable);
            }
            Err(e) => {
                warn!(error = %e, "refresh cycle failed");
                let _ = self.inner.connectivity.send(Connectivity::Unreachable);
            }
        }
        let _ = self.inner.state.send(MonitorState::Idle);

        result
    }

    async fn run_cycle(&self, config: &HubConfig) -> Result<Arc<FleetSnapshot>, MonitorError> {
        let client = build_client(config)?;

        // Fetch both inventories concurrently; fail fast on either.
        let (devices, rooms) = tokio::join!(client.fetch_devices(), client.fetch_rooms());
        let devices = devices?;
        let rooms = rooms?;

        let now = Utc::now();
        let mut temperatures = Vec::new();
        let mut motions = Vec::new();

        for device in &devices {
            match classify(device) {
                Some(SensorKind::Temperature) => {
                    temperatures.push(temperature_reading(device, &rooms, now));
                }
                Some(SensorKind::Motion) => {
                    motions.push(motion_reading(device, &rooms, now));
                }
                None => {}
            }
        }

        let snapshot = Arc::new(FleetSnapshot {
            temperatures,
            motions,
            connectivity: Connectivity::Reachable,
            refreshed_at: now,
        });
        self.inner.snapshot.store(Some(Arc::clone(&snapshot)));
        Ok(snapshot)
    }

    /// Settings-validation affordance: can the hub be reached with this
    /// config? Never errors; an incomplete config answers `false`
    /// without network activity.
    pub async fn probe(&self, config: &HubConfig) -> bool {
        if config.validate().is_err() {
            return false;
        }
        match build_client(config) {
            Ok(client) => client.probe_connectivity().await,
            Err(e) => {
                debug!(error = %e, "probe could not build a client");
                false
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Build a `HubClient` for one cycle from the per-call config.
fn build_client(config: &HubConfig) -> Result<HubClient, MonitorError> {
    let transport = TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    };
    HubClient::new(
        &config.address,
        &config.username,
        config.password.clone(),
        &transport,
    )
    .map_err(MonitorError::from)
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
