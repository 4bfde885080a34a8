// ── Device store ──
//
// Actions mutate through the reactive collection; selectors are pure
// reads over the current snapshot. Power-state changes stamp
// `last_toggled` so views can show recency.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::model::{Device, DeviceStatus, DeviceTimer, DeviceType, SettingValue};
use crate::store::collection::{EntityCollection, Keyed};
use crate::stream::EntityStream;

impl Keyed for Device {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Aggregate counts for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCounts {
    pub total: usize,
    pub online: usize,
    /// Online and switched on.
    pub active: usize,
}

pub struct DeviceStore {
    collection: EntityCollection<Device>,
}

impl DeviceStore {
    pub(crate) fn new() -> Self {
        Self {
            collection: EntityCollection::new(),
        }
    }

    // ── Selectors ────────────────────────────────────────────────────

    pub fn devices(&self) -> Arc<Vec<Arc<Device>>> {
        self.collection.snapshot()
    }

    pub fn device(&self, id: &str) -> Option<Arc<Device>> {
        self.collection.get(id)
    }

    pub fn by_group(&self, group_id: &str) -> Vec<Arc<Device>> {
        self.devices()
            .iter()
            .filter(|d| d.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect()
    }

    pub fn by_type(&self, device_type: &DeviceType) -> Vec<Arc<Device>> {
        self.devices()
            .iter()
            .filter(|d| d.device_type == *device_type)
            .cloned()
            .collect()
    }

    pub fn online_devices(&self) -> Vec<Arc<Device>> {
        self.devices()
            .iter()
            .filter(|d| d.is_online())
            .cloned()
            .collect()
    }

    pub fn active_devices(&self) -> Vec<Arc<Device>> {
        self.devices()
            .iter()
            .filter(|d| d.is_active())
            .cloned()
            .collect()
    }

    /// Sum of instantaneous draw (watts) across devices that are on.
    pub fn total_energy_usage(&self) -> f64 {
        self.devices()
            .iter()
            .filter(|d| d.is_on)
            .map(|d| d.energy_usage)
            .sum()
    }

    pub fn counts(&self) -> DeviceCounts {
        let devices = self.devices();
        DeviceCounts {
            total: devices.len(),
            online: devices.iter().filter(|d| d.is_online()).count(),
            active: devices.iter().filter(|d| d.is_active()).count(),
        }
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.len() == 0
    }

    pub fn version(&self) -> u64 {
        self.collection.version()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn stream(&self) -> EntityStream<Device> {
        EntityStream::new(self.collection.subscribe())
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.collection.subscribe_loading()
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub fn set_devices(&self, devices: Vec<Device>) {
        self.collection.replace_all(devices);
    }

    /// Returns `true` if the device was new.
    pub fn upsert(&self, device: Device) -> bool {
        self.collection.upsert(device)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Device>> {
        self.collection.remove(id)
    }

    /// Flip the power state, stamping `last_toggled`. Returns the
    /// updated device, or `None` if the id is unknown.
    pub fn toggle(&self, id: &str) -> Option<Arc<Device>> {
        self.collection.update(id, |d| {
            let mut next = d.clone();
            next.is_on = !d.is_on;
            next.last_toggled = Some(Utc::now());
            next
        })
    }

    /// Overwrite a single setting. Returns the updated device.
    pub fn set_setting(&self, id: &str, key: &str, value: SettingValue) -> Option<Arc<Device>> {
        self.collection.update(id, |d| {
            let mut next = d.clone();
            next.settings.insert(key.to_owned(), value.clone());
            next.updated_at = Some(Utc::now());
            next
        })
    }

    /// Merge a status poll result into the stored device.
    pub fn set_status(
        &self,
        id: &str,
        status: DeviceStatus,
        is_on: bool,
        last_seen: chrono::DateTime<Utc>,
    ) -> Option<Arc<Device>> {
        self.collection.update(id, |d| {
            let mut next = d.clone();
            next.status = status;
            next.is_on = is_on;
            next.last_seen = Some(last_seen);
            next
        })
    }

    /// Stamp an armed timer onto a device (or clear it with `None`).
    pub fn set_timer(&self, id: &str, timer: Option<DeviceTimer>) -> Option<Arc<Device>> {
        self.collection.update(id, |d| {
            let mut next = d.clone();
            next.timer = timer;
            next
        })
    }

    /// Point a device at a different group (or none).
    pub fn set_group(&self, id: &str, group_id: Option<String>) -> Option<Arc<Device>> {
        self.collection.update(id, |d| {
            let mut next = d.clone();
            next.group_id = group_id.clone();
            next
        })
    }

    /// Apply an arbitrary edit. Used by the hub for optimistic updates
    /// and their rollbacks.
    pub fn update_with<F>(&self, id: &str, f: F) -> Option<Arc<Device>>
    where
        F: FnOnce(&Device) -> Device,
    {
        self.collection.update(id, f)
    }

    // ── Fetch bookkeeping ────────────────────────────────────────────

    pub fn set_loading(&self, loading: bool) {
        self.collection.set_loading(loading);
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    pub fn set_error(&self, error: Option<String>) {
        self.collection.set_error(error);
    }

    pub fn last_error(&self) -> Option<String> {
        self.collection.last_error()
    }
}
