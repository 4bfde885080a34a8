// ── Device domain model ──
//
// Canonical, typed view of a smart-home device. The stringly wire
// shapes from `casita-api` are normalized into these types by the
// convert layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Connectivity state as last reported by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    /// Reachable but reporting a fault.
    Error,
}

impl DeviceStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Kind of device. Unrecognized kinds are carried through verbatim so
/// newer backends do not break older clients.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeviceType {
    AirConditioner,
    SmartLight,
    CeilingFan,
    Sprinkler,
    SecurityCamera,
    Thermostat,
    SmartPlug,
    DoorLock,
    #[serde(untagged)]
    #[strum(default, to_string = "{0}")]
    Other(String),
}

/// Something a device can do. Each capability carries a human-readable
/// effect label for rendering.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Power,
    Temperature,
    Mode,
    Timer,
    Brightness,
    Color,
    Speed,
    Direction,
    Zones,
    Recording,
    MotionDetection,
    Schedule,
    EcoMode,
    EnergyMonitoring,
    Lock,
    Unlock,
    AutoLock,
    #[serde(untagged)]
    #[strum(default, to_string = "{0}")]
    Other(String),
}

impl Capability {
    /// Human-readable effect of exercising this capability.
    pub fn label(&self) -> &str {
        match self {
            Self::Power => "Turn on/off",
            Self::Temperature => "Adjust temperature",
            Self::Mode => "Change operating mode",
            Self::Timer => "Set timer",
            Self::Brightness => "Adjust brightness",
            Self::Color => "Change color",
            Self::Speed => "Adjust speed",
            Self::Direction => "Change direction",
            Self::Zones => "Control zones",
            Self::Recording => "Record video",
            Self::MotionDetection => "Detect motion",
            Self::Schedule => "Follow schedule",
            Self::EcoMode => "Eco mode",
            Self::EnergyMonitoring => "Monitor energy use",
            Self::Lock => "Lock",
            Self::Unlock => "Unlock",
            Self::AutoLock => "Auto-lock",
            Self::Other(name) => name,
        }
    }
}

/// A single device setting. Settings are heterogeneous per device type
/// (a thermostat has `targetTemp`, a light has `brightness`), so values
/// are a small closed union rather than free-form JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<SettingValue>),
}

impl SettingValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// A pending auto-action armed on a device (e.g. turn off in 30 min).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTimer {
    pub duration_minutes: u32,
    pub action: String,
    pub armed_at: DateTime<Utc>,
}

/// Floor-plan coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Canonical device entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub status: DeviceStatus,
    pub is_on: bool,
    pub group_id: Option<String>,
    pub capabilities: Vec<Capability>,
    /// Keyed by the backend's setting names (`targetTemp`, `brightness`, …).
    pub settings: BTreeMap<String, SettingValue>,
    /// Instantaneous draw in watts.
    pub energy_usage: f64,
    pub location: Option<Position>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Stamped locally whenever the power state is flipped.
    pub last_toggled: Option<DateTime<Utc>>,
    /// The most recently armed timer, if any.
    pub timer: Option<DeviceTimer>,
    pub api_endpoint: Url,
    pub icon: Option<String>,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    /// Online and switched on.
    pub fn is_active(&self) -> bool {
        self.is_online() && self.is_on
    }

    pub fn has_capability(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }
}

/// A device turned up by a network scan, not yet registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    pub name: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub api_endpoint: Url,
    pub capabilities: Vec<Capability>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn device_type_round_trips_through_strings() {
        let t = DeviceType::from_str("air_conditioner").unwrap();
        assert_eq!(t, DeviceType::AirConditioner);
        assert_eq!(t.to_string(), "air_conditioner");
    }

    #[test]
    fn unknown_device_type_is_preserved() {
        let t = DeviceType::from_str("toaster").unwrap();
        assert_eq!(t, DeviceType::Other("toaster".into()));
        assert_eq!(t.to_string(), "toaster");
    }

    #[test]
    fn capability_labels_are_human_readable() {
        assert_eq!(Capability::Power.label(), "Turn on/off");
        assert_eq!(Capability::MotionDetection.label(), "Detect motion");
        assert_eq!(Capability::Other("frobnicate".into()).label(), "frobnicate");
    }

    #[test]
    fn setting_value_display() {
        assert_eq!(SettingValue::Number(24.0).to_string(), "24");
        assert_eq!(SettingValue::Text("cool".into()).to_string(), "cool");
        assert_eq!(
            SettingValue::List(vec![SettingValue::Number(1.0), SettingValue::Number(2.0)])
                .to_string(),
            "[1, 2]"
        );
    }
}
