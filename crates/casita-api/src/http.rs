// Hand-crafted async HTTP client for the casita device backend.
//
// All endpoints live under the configured base URL and wrap their
// responses in a `{ "data": … }` envelope.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::types::{
    ControlAck, DeleteAck, DevicePatch, DevicePayload, DiscoveredDevice, NewDeviceRequest,
    StatusSnapshot, TimerAck, TimerSpec, UpdateAck,
};
use crate::Error;

// ── Wire envelope ────────────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for a real casita device backend.
pub(crate) struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub(crate) fn new(base_url: Url, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("casita/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Wrap an existing `reqwest::Client` (tests inject their own).
    pub(crate) fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    /// Join a relative path (e.g. `"devices/3/control"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");
        let resp = self.http.put(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        handle_response(resp).await
    }

    // ── Operations ───────────────────────────────────────────────────

    pub(crate) async fn list_devices(&self) -> Result<Vec<DevicePayload>, Error> {
        self.get("devices").await
    }

    pub(crate) async fn get_device(&self, id: &str) -> Result<DevicePayload, Error> {
        self.get(&format!("devices/{id}")).await
    }

    pub(crate) async fn add_device(&self, req: &NewDeviceRequest) -> Result<DevicePayload, Error> {
        self.post("devices", req).await
    }

    pub(crate) async fn update_device(
        &self,
        id: &str,
        patch: &DevicePatch,
    ) -> Result<UpdateAck, Error> {
        self.put(&format!("devices/{id}"), patch).await
    }

    pub(crate) async fn delete_device(&self, id: &str) -> Result<DeleteAck, Error> {
        self.delete(&format!("devices/{id}")).await
    }

    pub(crate) async fn control_device(
        &self,
        id: &str,
        action: &str,
        value: &Value,
    ) -> Result<ControlAck, Error> {
        let body = serde_json::json!({ "action": action, "value": value });
        self.post(&format!("devices/{id}/control"), &body).await
    }

    pub(crate) async fn set_timer(&self, id: &str, timer: &TimerSpec) -> Result<TimerAck, Error> {
        self.post(&format!("devices/{id}/timer"), timer).await
    }

    pub(crate) async fn get_device_status(&self, id: &str) -> Result<StatusSnapshot, Error> {
        self.get(&format!("devices/{id}/status")).await
    }

    pub(crate) async fn discover_devices(&self) -> Result<Vec<DiscoveredDevice>, Error> {
        self.post("devices/discover", &serde_json::json!({})).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = truncate_on_char_boundary(&body, 200);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;
        Ok(envelope.data)
    } else {
        Err(parse_error(status, resp).await)
    }
}

/// Normalize a non-2xx response into the crate error shape.
async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let path = resp.url().path().to_owned();
    let raw = resp.text().await.unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        return Error::NotFound { id: path };
    }

    let message = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw
            }
        });

    Error::Api {
        status: status.as_u16(),
        message,
    }
}

/// Cut `s` at no more than `max` bytes, backing up to a char boundary
/// so multibyte UTF-8 sequences are never split.
fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Base URLs must end with a slash for relative joins to behave.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
