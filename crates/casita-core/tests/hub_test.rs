//! Hub behavior over the mock backend: load lifecycle, optimistic
//! mutations, and store/selector interplay. Runs on tokio's paused
//! clock so the mock's simulated delays cost nothing.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::Map;

use casita_api::types::NewDeviceRequest;
use casita_core::{DeviceStatus, Hub, SettingValue};

fn mock_hub() -> Hub {
    Hub::new(casita_api::DeviceClient::mock())
}

async fn loaded_hub() -> Hub {
    let hub = mock_hub();
    hub.load().await.unwrap();
    hub
}

fn plug_request(name: &str) -> NewDeviceRequest {
    NewDeviceRequest {
        name: name.into(),
        device_type: "smart_plug".into(),
        brand: "TP-Link".into(),
        model: "Kasa HS100".into(),
        api_endpoint: "http://192.168.1.110/api".into(),
        capabilities: vec!["power".into(), "energy_monitoring".into()],
        group_id: Some("kitchen".into()),
        icon: None,
        current_settings: Map::new(),
        energy_usage: 0.0,
    }
}

#[tokio::test(start_paused = true)]
async fn load_populates_every_store() {
    let hub = loaded_hub().await;
    let store = hub.store();

    assert_eq!(store.devices.len(), 6);
    assert_eq!(store.groups.len(), 5);
    assert_eq!(store.rules.len(), 3);
    assert_eq!(store.modes.modes().len(), 3);
    assert_eq!(store.modes.active_mode_id(), "comfort");
    assert!(!store.devices.is_loading());
    assert!(store.devices.last_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn toggle_applies_optimistically_and_sticks() {
    let hub = loaded_hub().await;

    let toggled = hub.toggle_device("1").await.unwrap();
    assert!(toggled.is_on);
    assert!(toggled.last_toggled.is_some());

    let stored = hub.store().devices.device("1").unwrap();
    assert!(stored.is_on);
}

#[tokio::test(start_paused = true)]
async fn toggle_unknown_device_fails_without_store_change() {
    let hub = loaded_hub().await;
    let version_before = hub.store().devices.version();

    let err = hub.toggle_device("999").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(hub.store().devices.version(), version_before);
}

#[tokio::test(start_paused = true)]
async fn create_device_lands_in_store_and_group() {
    let hub = loaded_hub().await;

    let plug = hub.create_device(plug_request("Kettle Plug")).await.unwrap();
    assert!(!plug.id.is_empty());
    assert_eq!(plug.status, DeviceStatus::Online);
    assert!(!plug.is_on);

    assert!(hub.store().devices.device(&plug.id).is_some());
    assert!(
        hub.store()
            .groups
            .group("kitchen")
            .unwrap()
            .contains_device(&plug.id)
    );
}

#[tokio::test(start_paused = true)]
async fn create_device_rejects_invalid_requests() {
    let hub = loaded_hub().await;
    let mut req = plug_request("Bad Plug");
    req.capabilities.clear();
    req.api_endpoint = "nope".into();

    let err = hub.create_device(req).await.unwrap_err();
    assert!(err.to_string().contains("Invalid device configuration"));
    assert_eq!(hub.store().devices.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn delete_device_clears_group_membership() {
    let hub = loaded_hub().await;

    hub.delete_device("2").await.unwrap();
    assert!(hub.store().devices.device("2").is_none());
    assert!(!hub.store().groups.group("bedroom").unwrap().contains_device("2"));
}

#[tokio::test(start_paused = true)]
async fn set_setting_updates_the_stored_device() {
    let hub = loaded_hub().await;

    let updated = hub
        .set_device_setting("1", "temperature", SettingValue::Number(21.0))
        .await
        .unwrap();
    assert_eq!(
        updated.settings.get("temperature"),
        Some(&SettingValue::Number(21.0))
    );
    assert_eq!(
        hub.store()
            .devices
            .device("1")
            .unwrap()
            .settings
            .get("temperature"),
        Some(&SettingValue::Number(21.0))
    );
}

#[tokio::test(start_paused = true)]
async fn rename_merges_the_backend_echo() {
    let hub = loaded_hub().await;

    let renamed = hub.rename_device("1", "Lounge AC").await.unwrap();
    assert_eq!(renamed.name, "Lounge AC");
    assert!(renamed.updated_at.is_some());
    assert_eq!(hub.store().devices.device("1").unwrap().name, "Lounge AC");
}

#[tokio::test(start_paused = true)]
async fn set_timer_stamps_the_stored_device() {
    let hub = loaded_hub().await;

    let ack = hub.set_timer("1", 45, "turn_off").await.unwrap();
    assert!(ack.success);

    let stored = hub.store().devices.device("1").unwrap();
    let timer = stored.timer.as_ref().unwrap();
    assert_eq!(timer.duration_minutes, 45);
    assert_eq!(timer.action, "turn_off");
    assert_eq!(timer.armed_at, ack.set_at);
}

#[tokio::test(start_paused = true)]
async fn status_refresh_merges_into_store() {
    let hub = loaded_hub().await;

    let refreshed = hub.refresh_device_status("2").await.unwrap();
    assert_eq!(refreshed.status, DeviceStatus::Online);
    assert!(refreshed.last_seen.is_some());
}

#[tokio::test(start_paused = true)]
async fn discovery_returns_unregistered_devices() {
    let hub = loaded_hub().await;

    let found = hub.discover_devices().await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].name, "New Smart Plug");
    // Discovery never touches the device store.
    assert_eq!(hub.store().devices.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn device_lookup_falls_back_to_the_backend() {
    let hub = mock_hub();
    // Store is empty: the hub must go to the client.
    let device = hub.device("3").await.unwrap();
    assert_eq!(device.name, "Kitchen Fan");
    assert!(hub.store().devices.device("3").is_some());

    let err = hub.device("999").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(start_paused = true)]
async fn analytics_report_is_consistent_with_fixtures() {
    let hub = loaded_hub().await;
    let report = hub.analytics();

    assert_eq!(report.device_activity.total_devices, 6);
    assert_eq!(report.usage_by_hour.len(), 24);
    assert_eq!(report.top_energy_consumers[0].device_id, "1");
}

#[tokio::test(start_paused = true)]
async fn streams_observe_hub_mutations() {
    let hub = loaded_hub().await;
    let mut stream = hub.store().devices.stream();
    let initial = stream.latest();
    assert_eq!(initial.len(), 6);

    hub.toggle_device("3").await.unwrap();
    let snapshot = stream.changed().await.unwrap();
    let fan = snapshot.iter().find(|d| d.id == "3").unwrap();
    assert!(fan.is_on);
}
