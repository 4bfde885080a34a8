//! Mock-backend behavior: fixture contents, simulated delays, id minting,
//! and request validation. Timing assertions run on tokio's paused clock.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::time::Instant;

use casita_api::types::{DevicePatch, NewDeviceRequest, TimerSpec};
use casita_api::{DeviceClient, Error, DEFAULT_DELAY, DISCOVERY_DELAY, STATUS_DELAY};

fn new_device(name: &str) -> NewDeviceRequest {
    NewDeviceRequest {
        name: name.into(),
        device_type: "smart_plug".into(),
        brand: "TP-Link".into(),
        model: "Kasa HS100".into(),
        api_endpoint: "http://192.168.1.110/api".into(),
        capabilities: vec!["power".into()],
        group_id: None,
        icon: None,
        current_settings: serde_json::Map::new(),
        energy_usage: 0.0,
    }
}

#[tokio::test(start_paused = true)]
async fn list_devices_returns_fixtures_after_delay() {
    let client = DeviceClient::mock();
    let start = Instant::now();

    let devices = client.list_devices().await.unwrap();

    assert_eq!(start.elapsed(), DEFAULT_DELAY);
    assert_eq!(devices.len(), 6);
    assert_eq!(devices[0].id, "1");
    assert_eq!(devices[0].name, "Living Room AC");
    assert_eq!(devices[0].status, "online");
    assert!(!devices[0].is_on);
    assert_eq!(devices[0].group_id.as_deref(), Some("living-room"));
}

#[tokio::test(start_paused = true)]
async fn get_device_unknown_id_is_not_found() {
    let client = DeviceClient::mock();

    let err = client.get_device("999").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Device not found");
}

#[tokio::test(start_paused = true)]
async fn discovery_is_slow_and_finds_two_devices() {
    let client = DeviceClient::mock();
    let start = Instant::now();

    let found = client.discover_devices().await.unwrap();

    assert_eq!(start.elapsed(), DISCOVERY_DELAY);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "New Smart Plug");
    assert_eq!(found[1].name, "Smart Door Lock");
}

#[tokio::test(start_paused = true)]
async fn add_device_mints_unique_ids_and_starts_online_but_off() {
    let client = DeviceClient::mock();

    let a = client.add_device(new_device("Plug A")).await.unwrap();
    let b = client.add_device(new_device("Plug B")).await.unwrap();

    assert!(!a.id.is_empty());
    assert!(!b.id.is_empty());
    assert_ne!(a.id, b.id);
    assert_eq!(a.status, "online");
    assert!(!a.is_on);
    assert!(a.last_seen.is_some());
}

#[tokio::test(start_paused = true)]
async fn add_device_rejects_invalid_request_with_every_reason() {
    let client = DeviceClient::mock();
    let req = NewDeviceRequest {
        name: "  ".into(),
        device_type: String::new(),
        api_endpoint: "not a url".into(),
        capabilities: Vec::new(),
        ..new_device("ignored")
    };

    let err = client.add_device(req).await.unwrap_err();

    let Error::Validation { reasons } = err else {
        panic!("expected validation error, got {err}");
    };
    assert!(reasons.contains("device name is required"));
    assert!(reasons.contains("device type is required"));
    assert!(reasons.contains("valid API endpoint is required"));
    assert!(reasons.contains("at least one capability is required"));
}

#[tokio::test(start_paused = true)]
async fn update_device_echoes_patch_with_fresh_stamp() {
    let client = DeviceClient::mock();
    let patch = DevicePatch {
        name: Some("Renamed".into()),
        is_on: Some(true),
        ..DevicePatch::default()
    };

    let ack = client.update_device("3", patch).await.unwrap();

    assert_eq!(ack.id, "3");
    assert_eq!(ack.changes.name.as_deref(), Some("Renamed"));
    assert_eq!(ack.changes.is_on, Some(true));
    assert!(ack.changes.status.is_none());
}

#[tokio::test(start_paused = true)]
async fn status_poll_is_cheap_and_degrades_to_offline() {
    let client = DeviceClient::mock();
    let start = Instant::now();

    let known = client.get_device_status("2").await.unwrap();
    assert_eq!(start.elapsed(), STATUS_DELAY);
    assert_eq!(known.status, "online");
    assert!(known.is_on);

    let unknown = client.get_device_status("999").await.unwrap();
    assert_eq!(unknown.status, "offline");
    assert!(!unknown.is_on);
}

#[tokio::test(start_paused = true)]
async fn control_and_timer_acks_echo_the_request() {
    let client = DeviceClient::mock();

    let control = client
        .control_device("1", "setTemperature", json!(22))
        .await
        .unwrap();
    assert!(control.success);
    assert_eq!(control.device_id, "1");
    assert_eq!(control.action, "setTemperature");
    assert_eq!(control.value, json!(22));

    let timer = client
        .set_timer(
            "1",
            TimerSpec {
                duration_minutes: 30,
                action: "turn_off".into(),
            },
        )
        .await
        .unwrap();
    assert!(timer.success);
    assert_eq!(timer.timer.duration_minutes, 30);
}

#[tokio::test(start_paused = true)]
async fn delete_device_acknowledges() {
    let client = DeviceClient::mock();
    let ack = client.delete_device("5").await.unwrap();
    assert!(ack.success);
}

#[tokio::test(start_paused = true)]
async fn per_operation_delays_hold() {
    // Status is the fast path, discovery the slow one.
    assert!(STATUS_DELAY < DEFAULT_DELAY);
    assert!(DEFAULT_DELAY < DISCOVERY_DELAY);
    assert_eq!(STATUS_DELAY, Duration::from_millis(200));
    assert_eq!(DEFAULT_DELAY, Duration::from_millis(500));
    assert_eq!(DISCOVERY_DELAY, Duration::from_millis(2000));
}
