// ── Hub abstraction ──
//
// Facade over the API client and the reactive stores. Owns the fetch
// lifecycle (loading flags, error capture) and applies mutations
// optimistically: the store changes first, and a failed backend call
// rolls the change back before the error is surfaced.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use casita_api::types::{AnalyticsPayload, DevicePatch, NewDeviceRequest, TimerAck, TimerSpec};
use casita_api::{ClientConfig, DeviceClient};

use crate::convert;
use crate::error::CoreError;
use crate::model::{Device, DeviceTimer, DiscoveredDevice, SettingValue};
use crate::store::DataStore;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<HubInner>`. Construct with
/// [`Hub::new`], call [`load`](Hub::load) to populate the stores, then
/// read through [`store`](Hub::store) and mutate through the hub's
/// operations.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

struct HubInner {
    client: DeviceClient,
    store: DataStore,
}

impl Hub {
    pub fn new(client: DeviceClient) -> Self {
        Self {
            inner: Arc::new(HubInner {
                client,
                store: DataStore::new(),
            }),
        }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, CoreError> {
        Ok(Self::new(DeviceClient::new(config)?))
    }

    /// Access the reactive stores.
    pub fn store(&self) -> &DataStore {
        &self.inner.store
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Populate every store: devices from the backend, groups and rules
    /// from the canned dataset (they have no backend endpoint), modes
    /// from their built-in presets.
    pub async fn load(&self) -> Result<(), CoreError> {
        self.refresh_devices().await?;
        self.load_groups();
        self.load_rules()?;
        Ok(())
    }

    /// Fetch the device list and replace the store's contents.
    pub async fn refresh_devices(&self) -> Result<(), CoreError> {
        let store = &self.inner.store.devices;
        store.set_loading(true);
        store.set_error(None);

        let result = self.inner.client.list_devices().await;
        store.set_loading(false);

        let payloads = match result {
            Ok(p) => p,
            Err(e) => {
                store.set_error(Some(e.to_string()));
                return Err(e.into());
            }
        };

        let devices = payloads
            .into_iter()
            .map(convert::device_from_payload)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| store.set_error(Some(e.to_string())))?;

        debug!(count = devices.len(), "device list refreshed");
        store.set_devices(devices);
        Ok(())
    }

    /// Seed group state. Groups have no backend endpoint; they are
    /// client-side organization over the canned dataset.
    pub fn load_groups(&self) {
        let groups = casita_api::fixtures::groups()
            .into_iter()
            .map(convert::group_from_payload)
            .collect();
        self.inner.store.groups.set_groups(groups);
    }

    /// Seed rule state from the canned dataset.
    pub fn load_rules(&self) -> Result<(), CoreError> {
        let rules = casita_api::fixtures::rules()
            .into_iter()
            .map(convert::rule_from_payload)
            .collect::<Result<Vec<_>, _>>()?;
        self.inner.store.rules.set_rules(rules);
        Ok(())
    }

    // ── Device operations ────────────────────────────────────────────

    /// Fetch a single device, preferring the local store. A backend hit
    /// is merged into the store.
    pub async fn device(&self, id: &str) -> Result<Arc<Device>, CoreError> {
        if let Some(device) = self.inner.store.devices.device(id) {
            return Ok(device);
        }

        let payload = self.inner.client.get_device(id).await?;
        let device = convert::device_from_payload(payload)?;
        self.inner.store.devices.upsert(device.clone());
        Ok(Arc::new(device))
    }

    /// Register a new device and insert it into the store. If the
    /// request names a group, membership is updated as well.
    pub async fn create_device(&self, req: NewDeviceRequest) -> Result<Arc<Device>, CoreError> {
        let payload = self.inner.client.add_device(req).await?;
        let device = convert::device_from_payload(payload)?;

        if let Some(group_id) = &device.group_id {
            if self
                .inner
                .store
                .groups
                .add_device(group_id, &device.id)
                .is_none()
            {
                warn!(group = %group_id, "new device references an unknown group");
            }
        }

        self.inner.store.devices.upsert(device.clone());
        Ok(Arc::new(device))
    }

    /// Delete a device from the backend, the store, and every group.
    pub async fn delete_device(&self, id: &str) -> Result<(), CoreError> {
        self.inner.client.delete_device(id).await?;
        self.inner.store.devices.remove(id);
        self.inner.store.groups.remove_device_everywhere(id);
        Ok(())
    }

    /// Flip a device's power state, optimistically.
    ///
    /// The store toggles immediately; if the backend rejects the
    /// command, the toggle is rolled back and the error is both
    /// recorded on the store and returned.
    pub async fn toggle_device(&self, id: &str) -> Result<Arc<Device>, CoreError> {
        let store = &self.inner.store.devices;
        let previous = store
            .device(id)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })?;

        let toggled = store
            .toggle(id)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })?;

        let result = self
            .inner
            .client
            .control_device(id, "toggle", Value::Bool(toggled.is_on))
            .await;

        match result {
            Ok(_) => Ok(toggled),
            Err(e) => {
                store.update_with(id, |_| (*previous).clone());
                store.set_error(Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Change one device setting, optimistically, and forward the
    /// command to the backend. Rolled back on failure.
    pub async fn set_device_setting(
        &self,
        id: &str,
        key: &str,
        value: SettingValue,
    ) -> Result<Arc<Device>, CoreError> {
        let store = &self.inner.store.devices;
        let previous = store
            .device(id)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })?;

        let wire_value = serde_json::to_value(&value)
            .map_err(|e| CoreError::Convert(format!("unserializable setting value: {e}")))?;
        let updated = store
            .set_setting(id, key, value)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })?;

        let result = self.inner.client.control_device(id, key, wire_value).await;

        match result {
            Ok(_) => Ok(updated),
            Err(e) => {
                store.update_with(id, |_| (*previous).clone());
                store.set_error(Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Rename a device. The backend echo stamps `updated_at`, which is
    /// merged into the store along with the new name.
    pub async fn rename_device(&self, id: &str, name: &str) -> Result<Arc<Device>, CoreError> {
        let patch = DevicePatch {
            name: Some(name.to_owned()),
            ..DevicePatch::default()
        };
        let ack = self.inner.client.update_device(id, patch).await?;

        self.inner
            .store
            .devices
            .update_with(id, |d| {
                let mut next = d.clone();
                next.name = name.to_owned();
                next.updated_at = Some(ack.updated_at);
                next
            })
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })
    }

    /// Arm a timer on a device. The backend acknowledgement stamps the
    /// timer onto the stored device; failures are recorded on the store
    /// error flag and returned.
    pub async fn set_timer(
        &self,
        id: &str,
        duration_minutes: u32,
        action: &str,
    ) -> Result<TimerAck, CoreError> {
        let spec = TimerSpec {
            duration_minutes,
            action: action.to_owned(),
        };
        let ack = self
            .inner
            .client
            .set_timer(id, spec)
            .await
            .inspect_err(|e| self.inner.store.devices.set_error(Some(e.to_string())))?;

        self.inner.store.devices.set_timer(
            id,
            Some(DeviceTimer {
                duration_minutes,
                action: action.to_owned(),
                armed_at: ack.set_at,
            }),
        );
        Ok(ack)
    }

    /// Poll a device's live status and merge it into the store.
    pub async fn refresh_device_status(&self, id: &str) -> Result<Arc<Device>, CoreError> {
        let snapshot = self.inner.client.get_device_status(id).await?;
        let status = convert::parse_status(&snapshot.status);

        self.inner
            .store
            .devices
            .set_status(id, status, snapshot.is_on, snapshot.last_seen)
            .ok_or_else(|| CoreError::DeviceNotFound { id: id.to_owned() })
    }

    /// Scan for unregistered devices. Results are returned, not stored:
    /// discovered devices only enter the store once registered.
    pub async fn discover_devices(&self) -> Result<Vec<DiscoveredDevice>, CoreError> {
        let found = self.inner.client.discover_devices().await?;
        found
            .into_iter()
            .map(convert::discovered_from_payload)
            .collect()
    }

    /// Canned analytics report for the dashboard.
    pub fn analytics(&self) -> AnalyticsPayload {
        casita_api::fixtures::analytics()
    }
}
