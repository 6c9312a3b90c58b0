#![allow(clippy::unwrap_used)]
// Integration tests for the refresh orchestrator against a mock hub.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fibwatch_core::{Connectivity, HubConfig, Monitor, MonitorError};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> HubConfig {
    HubConfig::new(server.uri(), "admin", SecretString::from("pw".to_string()))
}

fn devices_body() -> serde_json::Value {
    json!([
        {
            "id": 11,
            "name": "Living Room Temp",
            "roomID": 2,
            "type": "com.fibaro.temperatureSensor",
            "baseType": "com.fibaro.multilevelSensor",
            "enabled": true,
            "visible": true,
            "interfaces": ["temperature"],
            "properties": { "value": "21.5", "unit": "°C" },
            "modified": 1_700_000_000
        },
        {
            "id": 12,
            "name": "Hallway Motion",
            "roomID": 3,
            "type": "com.fibaro.motionSensor",
            "baseType": "com.fibaro.FGMS001",
            "enabled": true,
            "visible": true,
            "interfaces": ["motionSensor"],
            "properties": {
                "value": "false",
                "breached": "true",
                "batteryLevel": "85",
                "lastBreached": "1700000000"
            },
            "modified": 1_700_000_000
        },
        {
            "id": 13,
            "name": "Wall Plug",
            "roomID": 2,
            "type": "com.fibaro.wallPlug",
            "baseType": "com.fibaro.binarySwitch",
            "enabled": true,
            "visible": true,
            "interfaces": ["power"],
            "properties": { "value": "1" },
            "modified": 1_700_000_000
        }
    ])
}

fn rooms_body() -> serde_json::Value {
    json!([
        { "id": 2, "name": "Living Room", "sectionID": 1 },
        { "id": 3, "name": "Hallway", "sectionID": 1 }
    ])
}

async fn mount_inventory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(rooms_body()))
        .mount(server)
        .await;
}

// ── Successful cycle ────────────────────────────────────────────────

#[tokio::test]
async fn refresh_produces_classified_snapshot() {
    let server = MockServer::start().await;
    mount_inventory(&server).await;

    let monitor = Monitor::new();
    let snapshot = monitor.refresh(&config_for(&server)).await.unwrap();

    // One temperature, one motion; the wall plug classifies as neither.
    assert_eq!(snapshot.temperatures.len(), 1);
    assert_eq!(snapshot.motions.len(), 1);

    let temp = &snapshot.temperatures[0];
    assert_eq!(temp.device_id, 11);
    assert_eq!(temp.temperature, 21.5);
    assert_eq!(temp.room, "Living Room");
    assert!(temp.last_update.ends_with("min ago"));

    let motion = &snapshot.motions[0];
    assert_eq!(motion.device_id, 12);
    assert!(motion.active, "breached=true must activate");
    assert_eq!(motion.room, "Hallway");
    assert_eq!(motion.battery_pct, Some(85));

    // Aggregates and connectivity.
    assert_eq!(snapshot.active_motion_count(), 1);
    assert_eq!(snapshot.average_temperature(), Some(21.5));
    assert!(snapshot.connectivity.is_reachable());
    assert_eq!(*monitor.connectivity().borrow(), Connectivity::Reachable);

    // The stored snapshot is the returned one.
    let stored = monitor.snapshot().unwrap();
    assert_eq!(stored.refreshed_at, snapshot.refreshed_at);
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn partial_failure_aborts_cycle_and_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    mount_inventory(&server).await;

    let monitor = Monitor::new();
    let config = config_for(&server);
    let first = monitor.refresh(&config).await.unwrap();

    // Devices still succeed, rooms now fail: the whole cycle must abort.
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let second = monitor.refresh(&config).await;
    assert!(matches!(second, Err(MonitorError::HubProtocol { .. })));
    assert_eq!(*monitor.connectivity().borrow(), Connectivity::Unreachable);

    // No partial snapshot replaced the previous one.
    let stored = monitor.snapshot().unwrap();
    assert_eq!(stored.refreshed_at, first.refreshed_at);
    assert_eq!(stored.temperatures.len(), 1);
}

#[tokio::test]
async fn rejected_credentials_surface_and_flip_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let monitor = Monitor::new();
    let result = monitor.refresh(&config_for(&server)).await;

    assert!(matches!(
        result,
        Err(MonitorError::HubAuthRejected { status: 401 })
    ));
    assert_eq!(*monitor.connectivity().borrow(), Connectivity::Unreachable);
    assert!(monitor.snapshot().is_none());
}

#[tokio::test]
async fn missing_config_is_reported_before_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let monitor = Monitor::new();
    let mut config = config_for(&server);
    config.address = String::new();

    let result = monitor.refresh(&config).await;
    assert!(matches!(
        result,
        Err(MonitorError::ConfigurationMissing { field: "address" })
    ));

    // The hub client must never have been invoked.
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Single-flight gate ──────────────────────────────────────────────

#[tokio::test]
async fn refresh_while_refreshing_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/devices"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let monitor = Monitor::new();
    let config = config_for(&server);

    let background = tokio::spawn({
        let monitor = monitor.clone();
        let config = config.clone();
        async move { monitor.refresh(&config).await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = monitor.refresh(&config).await;
    assert!(matches!(second, Err(MonitorError::RefreshInFlight)));

    let first = background.await.unwrap();
    assert!(first.is_ok(), "in-flight cycle must still complete");
}

// ── Probe ───────────────────────────────────────────────────────────

#[tokio::test]
async fn probe_answers_true_against_live_hub() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/settings/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"serialNumber": "HC2-1"})))
        .mount(&server)
        .await;

    let monitor = Monitor::new();
    assert!(monitor.probe(&config_for(&server)).await);
}

#[tokio::test]
async fn probe_with_incomplete_config_skips_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = Monitor::new();
    let mut config = config_for(&server);
    config.password = SecretString::from(String::new());

    assert!(!monitor.probe(&config).await);
    assert!(server.received_requests().await.unwrap().is_empty());
}
