// ── API-to-domain type conversions ──
//
// Bridges raw `casita_api` wire types into canonical `casita_core::model`
// domain types. Each conversion parses strings into strong types and
// fills sensible defaults for missing optional data. Conversions are
// fallible: a payload with a garbage endpoint URL or an unintelligible
// condition shape is rejected rather than half-imported.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::Value;
use tracing::warn;
use url::Url;

use casita_api::types::{
    ActionPayload, ConditionPayload, DevicePayload, DiscoveredDevice as DiscoveredPayload,
    GroupPayload, RulePayload, StatusSnapshot,
};

use crate::error::CoreError;
use crate::model::{
    Capability, Device, DeviceStatus, DeviceType, DiscoveredDevice, Group, Position, Rule,
    RuleAction, RuleCondition, SettingValue,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a reported status string. Unknown strings degrade to offline
/// rather than failing the whole payload.
pub(crate) fn parse_status(raw: &str) -> DeviceStatus {
    DeviceStatus::from_str(raw).unwrap_or_else(|_| {
        warn!(status = raw, "unrecognized device status, treating as offline");
        DeviceStatus::Offline
    })
}

fn parse_capabilities(raw: Vec<String>) -> Vec<Capability> {
    raw.into_iter()
        .map(|c| Capability::from_str(&c).unwrap_or(Capability::Other(c)))
        .collect()
}

/// Normalize a free-form JSON value into a [`SettingValue`]. Nested
/// objects have no domain meaning and are flattened to their JSON text;
/// nulls are dropped by the caller.
fn setting_from_json(value: &Value) -> Option<SettingValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(SettingValue::Flag(*b)),
        Value::Number(n) => n.as_f64().map(SettingValue::Number),
        Value::String(s) => Some(SettingValue::Text(s.clone())),
        Value::Array(items) => Some(SettingValue::List(
            items.iter().filter_map(setting_from_json).collect(),
        )),
        Value::Object(_) => Some(SettingValue::Text(value.to_string())),
    }
}

pub(crate) fn settings_from_map(
    map: &serde_json::Map<String, Value>,
) -> BTreeMap<String, SettingValue> {
    map.iter()
        .filter_map(|(k, v)| setting_from_json(v).map(|s| (k.clone(), s)))
        .collect()
}

fn parse_endpoint(raw: &str, id: &str) -> Result<Url, CoreError> {
    Url::parse(raw)
        .map_err(|e| CoreError::Convert(format!("device {id} has invalid endpoint {raw:?}: {e}")))
}

// ── Device ─────────────────────────────────────────────────────────

pub fn device_from_payload(p: DevicePayload) -> Result<Device, CoreError> {
    let api_endpoint = parse_endpoint(&p.api_endpoint, &p.id)?;

    Ok(Device {
        status: parse_status(&p.status),
        device_type: DeviceType::from_str(&p.device_type)
            .unwrap_or(DeviceType::Other(p.device_type)),
        capabilities: parse_capabilities(p.capabilities),
        settings: settings_from_map(&p.current_settings),
        location: p.location.map(|l| Position { x: l.x, y: l.y }),
        id: p.id,
        name: p.name,
        brand: p.brand,
        model: p.model,
        is_on: p.is_on,
        group_id: p.group_id,
        energy_usage: p.energy_usage,
        last_seen: p.last_seen,
        created_at: p.created_at,
        updated_at: p.updated_at,
        last_toggled: None,
        timer: None,
        api_endpoint,
        icon: p.icon,
    })
}

pub fn discovered_from_payload(p: DiscoveredPayload) -> Result<DiscoveredDevice, CoreError> {
    let api_endpoint = parse_endpoint(&p.api_endpoint, &p.name)?;

    Ok(DiscoveredDevice {
        device_type: DeviceType::from_str(&p.device_type)
            .unwrap_or(DeviceType::Other(p.device_type)),
        capabilities: parse_capabilities(p.capabilities),
        name: p.name,
        brand: p.brand,
        model: p.model,
        api_endpoint,
    })
}

/// Merge a status poll into an existing device record.
pub fn apply_status(device: &Device, snapshot: &StatusSnapshot) -> Device {
    let mut updated = device.clone();
    updated.status = parse_status(&snapshot.status);
    updated.is_on = snapshot.is_on;
    updated.last_seen = Some(snapshot.last_seen);
    updated
}

// ── Group ──────────────────────────────────────────────────────────

pub fn group_from_payload(p: GroupPayload) -> Group {
    Group {
        id: p.id,
        name: p.name,
        description: p.description,
        device_ids: p.device_ids,
        color: p.color,
        icon: p.icon,
        created_at: p.created_at,
    }
}

// ── Rule ───────────────────────────────────────────────────────────

fn condition_from_payload(p: ConditionPayload) -> Result<RuleCondition, CoreError> {
    match p.kind.as_str() {
        "time_based" => Ok(RuleCondition::TimeBased {
            device_id: p.device_id,
            property: p.property,
            value: p.value,
            duration_minutes: p.duration,
            time: p.time,
            operator: p.operator,
        }),
        "sensor_based" => {
            let missing = |field: &str| {
                CoreError::Convert(format!("sensor_based condition missing {field}"))
            };
            Ok(RuleCondition::SensorBased {
                device_id: p.device_id.ok_or_else(|| missing("deviceId"))?,
                property: p.property.ok_or_else(|| missing("property"))?,
                value: p.value.ok_or_else(|| missing("value"))?,
                operator: p.operator.ok_or_else(|| missing("operator"))?,
            })
        }
        other => Err(CoreError::Convert(format!(
            "unknown rule condition type {other:?}"
        ))),
    }
}

fn action_from_payload(p: ActionPayload) -> Result<RuleAction, CoreError> {
    match p.kind.as_str() {
        "device_control" => Ok(RuleAction::DeviceControl {
            device_id: p.device_id,
            property: p.property,
            value: p.value,
        }),
        other => Err(CoreError::Convert(format!(
            "unknown rule action type {other:?}"
        ))),
    }
}

pub fn rule_from_payload(p: RulePayload) -> Result<Rule, CoreError> {
    Ok(Rule {
        condition: condition_from_payload(p.condition)?,
        action: action_from_payload(p.action)?,
        id: p.id,
        name: p.name,
        description: p.description,
        is_active: p.is_active,
        trigger_count: p.trigger_count,
        last_triggered: p.last_triggered,
        created_at: p.created_at,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixture_devices_all_convert() {
        let devices: Vec<Device> = casita_api::fixtures::devices()
            .into_iter()
            .map(|p| device_from_payload(p).unwrap())
            .collect();

        assert_eq!(devices.len(), 6);
        let ac = &devices[0];
        assert_eq!(ac.device_type, DeviceType::AirConditioner);
        assert_eq!(ac.status, DeviceStatus::Online);
        assert!(ac.has_capability(&Capability::Temperature));
        assert_eq!(
            ac.settings.get("temperature"),
            Some(&SettingValue::Number(24.0))
        );
        assert_eq!(
            ac.settings.get("mode"),
            Some(&SettingValue::Text("cool".into()))
        );
    }

    #[test]
    fn unknown_status_degrades_to_offline() {
        assert_eq!(parse_status("zombie"), DeviceStatus::Offline);
    }

    #[test]
    fn fixture_rules_all_convert() {
        let rules: Vec<Rule> = casita_api::fixtures::rules()
            .into_iter()
            .map(|p| rule_from_payload(p).unwrap())
            .collect();

        assert_eq!(rules.len(), 3);
        assert!(matches!(
            rules[2].condition,
            RuleCondition::SensorBased { .. }
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let mut payload = casita_api::fixtures::devices().remove(0);
        payload.api_endpoint = "not a url".into();

        let err = device_from_payload(payload).unwrap_err();
        assert!(matches!(err, CoreError::Convert(_)));
    }

    #[test]
    fn null_settings_are_dropped() {
        let map = serde_json::json!({ "a": null, "b": 1 });
        let settings = settings_from_map(map.as_object().unwrap());
        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get("b"), Some(&SettingValue::Number(1.0)));
    }
}
