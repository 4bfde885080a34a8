// ── Device client facade ──
//
// One asynchronous contract for device operations regardless of whether
// a real backend exists. The `use_mock_data` switch picks the backend at
// construction time; callers never branch on it again.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::http::HttpBackend;
use crate::mock::{self, MockBackend};
use crate::retry::RetryPolicy;
use crate::types::{
    ControlAck, DeleteAck, DevicePatch, DevicePayload, DiscoveredDevice, NewDeviceRequest,
    StatusSnapshot, TimerAck, TimerSpec, UpdateAck,
};
use crate::Error;

// ── Configuration ────────────────────────────────────────────────────

/// Client construction settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Serve canned fixture data instead of contacting a backend.
    pub use_mock_data: bool,
    /// Backend base URL; required when `use_mock_data` is false.
    pub base_url: Option<Url>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            use_mock_data: true,
            base_url: None,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

enum Backend {
    Mock(MockBackend),
    Http(HttpBackend),
}

/// Asynchronous device API client.
///
/// Every operation resolves to a typed payload; transport failures are
/// normalized into [`Error`] and transient ones retried per the
/// configured [`RetryPolicy`] (HTTP backend only — the mock never fails
/// transiently).
pub struct DeviceClient {
    backend: Backend,
    retry: RetryPolicy,
}

impl DeviceClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let backend = if config.use_mock_data {
            debug!("device client running in mock mode");
            Backend::Mock(MockBackend::new())
        } else {
            let base_url = config.base_url.ok_or_else(|| {
                Error::Configuration("base_url is required when mock mode is disabled".into())
            })?;
            Backend::Http(HttpBackend::new(base_url, config.timeout)?)
        };

        Ok(Self {
            backend,
            retry: config.retry,
        })
    }

    /// Shorthand for a mock-mode client with default settings.
    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock(MockBackend::new()),
            retry: RetryPolicy::default(),
        }
    }

    /// HTTP-mode client over an existing `reqwest::Client` (tests).
    pub fn with_http_client(http: reqwest::Client, base_url: Url, retry: RetryPolicy) -> Self {
        Self {
            backend: Backend::Http(HttpBackend::with_client(http, base_url)),
            retry,
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the full device collection.
    pub async fn list_devices(&self) -> Result<Vec<DevicePayload>, Error> {
        match &self.backend {
            Backend::Mock(m) => m.list_devices().await,
            Backend::Http(h) => self.retry.run(|| h.list_devices()).await,
        }
    }

    /// Fetch a single device. Fails with [`Error::NotFound`] if absent.
    pub async fn get_device(&self, id: &str) -> Result<DevicePayload, Error> {
        match &self.backend {
            Backend::Mock(m) => m.get_device(id).await,
            Backend::Http(h) => self.retry.run(|| h.get_device(id)).await,
        }
    }

    /// Register a new device. Validates the request before dispatch.
    pub async fn add_device(&self, req: NewDeviceRequest) -> Result<DevicePayload, Error> {
        req.validate()?;
        match &self.backend {
            Backend::Mock(m) => m.add_device(req).await,
            Backend::Http(h) => self.retry.run(|| h.add_device(&req)).await,
        }
    }

    /// Apply a shallow patch. Echoes the merged patch with a fresh
    /// `updated_at`; does not verify the id exists.
    pub async fn update_device(&self, id: &str, patch: DevicePatch) -> Result<UpdateAck, Error> {
        match &self.backend {
            Backend::Mock(m) => m.update_device(id, patch).await,
            Backend::Http(h) => self.retry.run(|| h.update_device(id, &patch)).await,
        }
    }

    /// Remove a device. Acknowledgement only; existence is not verified.
    pub async fn delete_device(&self, id: &str) -> Result<DeleteAck, Error> {
        match &self.backend {
            Backend::Mock(m) => m.delete_device(id).await,
            Backend::Http(h) => self.retry.run(|| h.delete_device(id)).await,
        }
    }

    /// Send a control command (toggle, set a property, …).
    pub async fn control_device(
        &self,
        id: &str,
        action: &str,
        value: Value,
    ) -> Result<ControlAck, Error> {
        match &self.backend {
            Backend::Mock(m) => m.control_device(id, action, value).await,
            Backend::Http(h) => self.retry.run(|| h.control_device(id, action, &value)).await,
        }
    }

    /// Arm a timer on a device.
    pub async fn set_timer(&self, id: &str, timer: TimerSpec) -> Result<TimerAck, Error> {
        match &self.backend {
            Backend::Mock(m) => m.set_timer(id, timer).await,
            Backend::Http(h) => self.retry.run(|| h.set_timer(id, &timer)).await,
        }
    }

    /// Cheap status/power/last-seen poll.
    pub async fn get_device_status(&self, id: &str) -> Result<StatusSnapshot, Error> {
        match &self.backend {
            Backend::Mock(m) => m.get_device_status(id).await,
            Backend::Http(h) => self.retry.run(|| h.get_device_status(id)).await,
        }
    }

    /// Scan the network for unregistered devices. Slower than the other
    /// operations; retries (HTTP mode) space out to match.
    pub async fn discover_devices(&self) -> Result<Vec<DiscoveredDevice>, Error> {
        match &self.backend {
            Backend::Mock(m) => m.discover_devices().await,
            Backend::Http(h) => {
                let retry = self.retry.with_delay(mock::DISCOVERY_DELAY);
                retry.run(|| h.discover_devices()).await
            }
        }
    }
}
