// ── Automation rule model ──
//
// Rules are data: the dashboard lists and toggles them, but no rule
// engine evaluates conditions or fires actions here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// When a rule should fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleCondition {
    /// Clock- or duration-driven. Either a wall-clock `time` with an
    /// `operator` like `"after"`, or a device property held for
    /// `duration_minutes`.
    TimeBased {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        property: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_minutes: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        operator: Option<String>,
    },
    /// A sensor reading crossing a threshold.
    SensorBased {
        device_id: String,
        property: String,
        value: Value,
        operator: String,
    },
}

/// What a rule does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    DeviceControl {
        device_id: String,
        property: String,
        value: Value,
    },
}

/// An automation rule as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub condition: RuleCondition,
    pub action: RuleAction,
    pub trigger_count: u64,
    pub last_triggered: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Partial edit of a rule. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub condition: Option<RuleCondition>,
    pub action: Option<RuleAction>,
}

impl Rule {
    /// Whether the rule references a device on either its condition or
    /// its action side.
    pub fn touches_device(&self, device_id: &str) -> bool {
        let condition_hit = match &self.condition {
            RuleCondition::TimeBased { device_id: id, .. } => id.as_deref() == Some(device_id),
            RuleCondition::SensorBased { device_id: id, .. } => id == device_id,
        };
        let RuleAction::DeviceControl { device_id: id, .. } = &self.action;
        condition_hit || id == device_id
    }
    /// Short condition summary for table rendering.
    pub fn condition_summary(&self) -> String {
        match &self.condition {
            RuleCondition::TimeBased {
                time: Some(time),
                operator,
                ..
            } => match operator.as_deref() {
                Some(op) => format!("{op} {time}"),
                None => format!("at {time}"),
            },
            RuleCondition::TimeBased {
                device_id: Some(device_id),
                property: Some(property),
                duration_minutes: Some(minutes),
                ..
            } => format!("device {device_id} {property} held for {minutes} min"),
            RuleCondition::TimeBased { .. } => "time-based".into(),
            RuleCondition::SensorBased {
                device_id,
                property,
                value,
                operator,
            } => format!("device {device_id} {property} {operator} {value}"),
        }
    }
}
