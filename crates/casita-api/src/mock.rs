// ── Mock backend ──
//
// Serves fixture data after a simulated network delay. Never fails
// except `get_device` on an unknown id. Generated ids are unique for
// the lifetime of the backend (timestamp-seeded atomic counter).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::fixtures;
use crate::types::{
    ControlAck, DeleteAck, DevicePatch, DevicePayload, DiscoveredDevice, NewDeviceRequest,
    StatusSnapshot, TimerAck, TimerSpec, UpdateAck,
};
use crate::Error;

/// Simulated round-trip for most operations.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
/// Status polls are cheap.
pub const STATUS_DELAY: Duration = Duration::from_millis(200);
/// Discovery represents a full network scan.
pub const DISCOVERY_DELAY: Duration = Duration::from_millis(2000);

pub(crate) struct MockBackend {
    next_id: AtomicU64,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        // Seed from the wall clock so ids look like the real backend's
        // timestamp-minted ones, then count up so they never collide
        // within a session.
        #[allow(clippy::cast_sign_loss)]
        let seed = Utc::now().timestamp_millis().max(0) as u64;
        Self {
            next_id: AtomicU64::new(seed),
        }
    }

    fn mint_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::SeqCst).to_string()
    }

    async fn simulate_delay(delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    pub(crate) async fn list_devices(&self) -> Result<Vec<DevicePayload>, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        Ok(fixtures::devices())
    }

    pub(crate) async fn get_device(&self, id: &str) -> Result<DevicePayload, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        fixtures::devices()
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::NotFound { id: id.to_owned() })
    }

    pub(crate) async fn add_device(
        &self,
        req: NewDeviceRequest,
    ) -> Result<DevicePayload, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        let now = Utc::now();
        let id = self.mint_id();
        debug!(%id, name = %req.name, "mock device registered");

        Ok(DevicePayload {
            id,
            name: req.name,
            device_type: req.device_type,
            brand: req.brand,
            model: req.model,
            status: "online".into(),
            is_on: false,
            group_id: req.group_id,
            capabilities: req.capabilities,
            current_settings: req.current_settings,
            energy_usage: req.energy_usage,
            location: None,
            last_seen: Some(now),
            created_at: now,
            updated_at: None,
            api_endpoint: req.api_endpoint,
            icon: req.icon,
        })
    }

    // Echoes the patch without checking that the id exists — the real
    // backend owns that decision.
    pub(crate) async fn update_device(
        &self,
        id: &str,
        patch: DevicePatch,
    ) -> Result<UpdateAck, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        Ok(UpdateAck {
            id: id.to_owned(),
            changes: patch,
            updated_at: Utc::now(),
        })
    }

    pub(crate) async fn delete_device(&self, _id: &str) -> Result<DeleteAck, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        Ok(DeleteAck { success: true })
    }

    pub(crate) async fn control_device(
        &self,
        id: &str,
        action: &str,
        value: Value,
    ) -> Result<ControlAck, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        Ok(ControlAck {
            success: true,
            device_id: id.to_owned(),
            action: action.to_owned(),
            value,
            timestamp: Utc::now(),
        })
    }

    pub(crate) async fn set_timer(&self, id: &str, timer: TimerSpec) -> Result<TimerAck, Error> {
        Self::simulate_delay(DEFAULT_DELAY).await;
        Ok(TimerAck {
            success: true,
            device_id: id.to_owned(),
            timer,
            set_at: Utc::now(),
        })
    }

    // Unknown ids degrade to an offline snapshot rather than an error.
    pub(crate) async fn get_device_status(&self, id: &str) -> Result<StatusSnapshot, Error> {
        Self::simulate_delay(STATUS_DELAY).await;
        let device = fixtures::devices().into_iter().find(|d| d.id == id);
        Ok(match device {
            Some(d) => StatusSnapshot {
                status: d.status,
                is_on: d.is_on,
                last_seen: d.last_seen.unwrap_or_else(Utc::now),
            },
            None => StatusSnapshot {
                status: "offline".into(),
                is_on: false,
                last_seen: Utc::now(),
            },
        })
    }

    pub(crate) async fn discover_devices(&self) -> Result<Vec<DiscoveredDevice>, Error> {
        Self::simulate_delay(DISCOVERY_DELAY).await;
        Ok(fixtures::discovered())
    }
}
