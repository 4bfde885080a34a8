// ── Wire payload types ──
//
// JSON shapes exchanged with the device backend (and produced by the mock
// backend). These stay stringly-typed on purpose: `casita-core` normalizes
// them into the canonical domain model via its convert layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

// ── Device ──────────────────────────────────────────────────────────

/// A device as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub status: String,
    pub is_on: bool,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub current_settings: serde_json::Map<String, Value>,
    /// Instantaneous draw in watts.
    pub energy_usage: f64,
    #[serde(default)]
    pub location: Option<Position>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub api_endpoint: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Floor-plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// ── Requests ────────────────────────────────────────────────────────

/// Fields supplied when registering a new device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub api_endpoint: String,
    pub capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub current_settings: serde_json::Map<String, Value>,
    #[serde(default)]
    pub energy_usage: f64,
}

impl NewDeviceRequest {
    /// Check the required fields: non-empty name, a parseable endpoint URL,
    /// and at least one capability. Collects every problem before failing.
    pub fn validate(&self) -> Result<(), Error> {
        let mut reasons = Vec::new();

        if self.name.trim().is_empty() {
            reasons.push("device name is required");
        }
        if self.device_type.trim().is_empty() {
            reasons.push("device type is required");
        }
        if url::Url::parse(&self.api_endpoint).is_err() {
            reasons.push("valid API endpoint is required");
        }
        if self.capabilities.is_empty() {
            reasons.push("at least one capability is required");
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                reasons: reasons.join(", "),
            })
        }
    }
}

/// Shallow patch applied to a device. Only present fields are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_settings: Option<serde_json::Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_usage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A timer armed on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSpec {
    pub duration_minutes: u32,
    /// Effect when the timer fires, e.g. `"turn_off"`.
    pub action: String,
}

// ── Acknowledgements ────────────────────────────────────────────────

/// Echo of an `update_device` call: the merged patch plus a fresh stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub id: String,
    #[serde(flatten)]
    pub changes: DevicePatch,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}

/// Echo of a `control_device` call. In a real deployment this is where the
/// command would have been forwarded to physical hardware.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlAck {
    pub success: bool,
    pub device_id: String,
    pub action: String,
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerAck {
    pub success: bool,
    pub device_id: String,
    pub timer: TimerSpec,
    pub set_at: DateTime<Utc>,
}

/// Point-in-time status snapshot for a single device.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: String,
    pub is_on: bool,
    pub last_seen: DateTime<Utc>,
}

/// A device found during a network scan — not yet registered, so no id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub brand: String,
    pub model: String,
    pub api_endpoint: String,
    pub capabilities: Vec<String>,
}

// ── Groups / rules (fixture ground truth) ───────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPayload {
    pub id: String,
    pub name: String,
    pub description: String,
    pub device_ids: Vec<String>,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// Automation rule. Defined in fixture data but never executed — the rule
/// engine is out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePayload {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub condition: ConditionPayload,
    pub action: ActionPayload,
    pub trigger_count: u64,
    #[serde(default)]
    pub last_triggered: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Loose condition shape: `type` selects which optional fields apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Minutes, for time-based duration conditions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Wall-clock trigger time, e.g. `"22:00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub device_id: String,
    pub property: String,
    pub value: Value,
}

// ── Analytics (fixture-only) ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsPayload {
    pub energy_usage: EnergySummary,
    pub device_activity: DeviceActivity,
    pub top_energy_consumers: Vec<TopConsumer>,
    pub usage_by_hour: Vec<HourlyUsage>,
}

/// Aggregate energy figures in kWh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    pub today: f64,
    pub yesterday: f64,
    pub this_week: f64,
    pub last_week: f64,
    pub this_month: f64,
    pub last_month: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceActivity {
    pub total_devices: u32,
    pub online_devices: u32,
    pub active_devices: u32,
    pub recently_used: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopConsumer {
    pub device_id: String,
    /// kWh over the reporting window.
    pub consumption: f64,
    pub percentage: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HourlyUsage {
    pub hour: u8,
    pub usage: f64,
}
