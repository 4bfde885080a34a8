// ── Fixture data ──
//
// Static ground truth served by the mock backend. Six devices, five
// groups, three rules, one analytics summary, and two discoverable
// devices. Ids and names are load-bearing: client code and tests key
// off them.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Map, Value, json};

use crate::types::{
    ActionPayload, AnalyticsPayload, ConditionPayload, DeviceActivity, DevicePayload,
    DiscoveredDevice, EnergySummary, GroupPayload, HourlyUsage, Position, RulePayload,
    TopConsumer,
};

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

fn settings(value: Value) -> Map<String, Value> {
    value
        .as_object()
        .cloned()
        .expect("fixture settings are an object")
}

fn caps(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

/// The six fixture devices. First is always `{id: "1", name: "Living Room
/// AC", status: online}`.
#[allow(clippy::too_many_lines)]
pub fn devices() -> Vec<DevicePayload> {
    let now = Utc::now();
    vec![
        DevicePayload {
            id: "1".into(),
            name: "Living Room AC".into(),
            device_type: "air_conditioner".into(),
            brand: "Samsung".into(),
            model: "WindFree AR24".into(),
            status: "online".into(),
            is_on: false,
            group_id: Some("living-room".into()),
            capabilities: caps(&["power", "temperature", "mode", "timer"]),
            current_settings: settings(json!({
                "temperature": 24,
                "mode": "cool",
                "fanSpeed": "auto",
            })),
            energy_usage: 1200.0,
            location: Some(Position { x: 10.0, y: 20.0 }),
            last_seen: Some(now),
            created_at: date(2024, 1, 15),
            updated_at: None,
            api_endpoint: "http://192.168.1.100/api".into(),
            icon: Some("❄️".into()),
        },
        DevicePayload {
            id: "2".into(),
            name: "Bedroom Light".into(),
            device_type: "smart_light".into(),
            brand: "Philips".into(),
            model: "Hue White".into(),
            status: "online".into(),
            is_on: true,
            group_id: Some("bedroom".into()),
            capabilities: caps(&["power", "brightness", "color"]),
            current_settings: settings(json!({
                "brightness": 75,
                "color": "#ffffff",
            })),
            energy_usage: 9.0,
            location: Some(Position { x: 30.0, y: 15.0 }),
            last_seen: Some(now),
            created_at: date(2024, 1, 10),
            updated_at: None,
            api_endpoint: "http://192.168.1.101/api".into(),
            icon: Some("💡".into()),
        },
        DevicePayload {
            id: "3".into(),
            name: "Kitchen Fan".into(),
            device_type: "ceiling_fan".into(),
            brand: "Hunter".into(),
            model: "Smart Fan Pro".into(),
            status: "online".into(),
            is_on: false,
            group_id: Some("kitchen".into()),
            capabilities: caps(&["power", "speed", "direction"]),
            current_settings: settings(json!({
                "speed": 2,
                "direction": "forward",
            })),
            energy_usage: 45.0,
            location: Some(Position { x: 50.0, y: 40.0 }),
            last_seen: Some(now),
            created_at: date(2024, 1, 20),
            updated_at: None,
            api_endpoint: "http://192.168.1.102/api".into(),
            icon: Some("🌀".into()),
        },
        DevicePayload {
            id: "4".into(),
            name: "Garden Sprinkler".into(),
            device_type: "sprinkler".into(),
            brand: "Rain Bird".into(),
            model: "Smart Sprinkler ST8".into(),
            status: "offline".into(),
            is_on: false,
            group_id: Some("garden".into()),
            capabilities: caps(&["power", "timer", "zones"]),
            current_settings: settings(json!({
                "activeZones": [],
                "duration": 15,
            })),
            energy_usage: 0.0,
            location: Some(Position { x: 80.0, y: 60.0 }),
            last_seen: Some(now - Duration::hours(1)),
            created_at: date(2024, 2, 1),
            updated_at: None,
            api_endpoint: "http://192.168.1.103/api".into(),
            icon: Some("💧".into()),
        },
        DevicePayload {
            id: "5".into(),
            name: "Security Camera".into(),
            device_type: "security_camera".into(),
            brand: "Arlo".into(),
            model: "Pro 4".into(),
            status: "online".into(),
            is_on: true,
            group_id: Some("security".into()),
            capabilities: caps(&["power", "recording", "motion_detection"]),
            current_settings: settings(json!({
                "recording": true,
                "motionSensitivity": "medium",
                "nightVision": true,
            })),
            energy_usage: 12.0,
            location: Some(Position { x: 90.0, y: 10.0 }),
            last_seen: Some(now),
            created_at: date(2024, 1, 25),
            updated_at: None,
            api_endpoint: "http://192.168.1.104/api".into(),
            icon: Some("📹".into()),
        },
        DevicePayload {
            id: "6".into(),
            name: "Smart Thermostat".into(),
            device_type: "thermostat".into(),
            brand: "Nest".into(),
            model: "Learning Thermostat".into(),
            status: "online".into(),
            is_on: true,
            group_id: Some("living-room".into()),
            capabilities: caps(&["power", "temperature", "schedule", "eco_mode"]),
            current_settings: settings(json!({
                "targetTemp": 22,
                "currentTemp": 21,
                "mode": "heat",
                "schedule": "home",
            })),
            energy_usage: 3.0,
            location: Some(Position { x: 25.0, y: 25.0 }),
            last_seen: Some(now),
            created_at: date(2024, 1, 12),
            updated_at: None,
            api_endpoint: "http://192.168.1.105/api".into(),
            icon: Some("🌡️".into()),
        },
    ]
}

/// The five fixture groups (rooms).
pub fn groups() -> Vec<GroupPayload> {
    vec![
        GroupPayload {
            id: "living-room".into(),
            name: "Living Room".into(),
            description: "Main living area devices".into(),
            device_ids: vec!["1".into(), "6".into()],
            color: "#3b82f6".into(),
            icon: "🛋️".into(),
            created_at: date(2024, 1, 15),
        },
        GroupPayload {
            id: "bedroom".into(),
            name: "Bedroom".into(),
            description: "Master bedroom devices".into(),
            device_ids: vec!["2".into()],
            color: "#8b5cf6".into(),
            icon: "🛏️".into(),
            created_at: date(2024, 1, 10),
        },
        GroupPayload {
            id: "kitchen".into(),
            name: "Kitchen".into(),
            description: "Kitchen and dining area".into(),
            device_ids: vec!["3".into()],
            color: "#f59e0b".into(),
            icon: "👨‍🍳".into(),
            created_at: date(2024, 1, 20),
        },
        GroupPayload {
            id: "garden".into(),
            name: "Garden".into(),
            description: "Outdoor garden devices".into(),
            device_ids: vec!["4".into()],
            color: "#10b981".into(),
            icon: "🌱".into(),
            created_at: date(2024, 2, 1),
        },
        GroupPayload {
            id: "security".into(),
            name: "Security".into(),
            description: "Security and monitoring devices".into(),
            device_ids: vec!["5".into()],
            color: "#ef4444".into(),
            icon: "🔒".into(),
            created_at: date(2024, 1, 25),
        },
    ]
}

/// The three fixture automation rules (data only, never executed).
pub fn rules() -> Vec<RulePayload> {
    let now = Utc::now();
    vec![
        RulePayload {
            id: "1".into(),
            name: "AC Auto Off".into(),
            description: "Turn off AC after 2 hours of continuous operation".into(),
            is_active: true,
            condition: ConditionPayload {
                kind: "time_based".into(),
                device_id: Some("1".into()),
                property: Some("isOn".into()),
                value: Some(json!(true)),
                duration: Some(120),
                time: None,
                operator: Some("equals".into()),
            },
            action: ActionPayload {
                kind: "device_control".into(),
                device_id: "1".into(),
                property: "isOn".into(),
                value: json!(false),
            },
            trigger_count: 5,
            last_triggered: Some(now - Duration::days(1)),
            created_at: date(2024, 1, 16),
        },
        RulePayload {
            id: "2".into(),
            name: "Bedroom Night Mode".into(),
            description: "Dim bedroom light when it's past 10 PM".into(),
            is_active: true,
            condition: ConditionPayload {
                kind: "time_based".into(),
                device_id: None,
                property: None,
                value: None,
                duration: None,
                time: Some("22:00".into()),
                operator: Some("after".into()),
            },
            action: ActionPayload {
                kind: "device_control".into(),
                device_id: "2".into(),
                property: "brightness".into(),
                value: json!(20),
            },
            trigger_count: 12,
            last_triggered: Some(now - Duration::hours(1)),
            created_at: date(2024, 1, 18),
        },
        RulePayload {
            id: "3".into(),
            name: "Kitchen Fan Auto".into(),
            description: "Turn on kitchen fan when temperature exceeds 26°C".into(),
            is_active: false,
            condition: ConditionPayload {
                kind: "sensor_based".into(),
                // thermostat
                device_id: Some("6".into()),
                property: Some("currentTemp".into()),
                value: Some(json!(26)),
                duration: None,
                time: None,
                operator: Some("greater_than".into()),
            },
            action: ActionPayload {
                kind: "device_control".into(),
                device_id: "3".into(),
                property: "isOn".into(),
                value: json!(true),
            },
            trigger_count: 3,
            last_triggered: Some(now - Duration::days(2)),
            created_at: date(2024, 1, 22),
        },
    ]
}

/// Devices a mock network scan turns up. Exactly two; the first is the
/// smart plug.
pub fn discovered() -> Vec<DiscoveredDevice> {
    vec![
        DiscoveredDevice {
            name: "New Smart Plug".into(),
            device_type: "smart_plug".into(),
            brand: "TP-Link".into(),
            model: "Kasa HS100".into(),
            api_endpoint: "http://192.168.1.110/api".into(),
            capabilities: caps(&["power", "energy_monitoring"]),
        },
        DiscoveredDevice {
            name: "Smart Door Lock".into(),
            device_type: "door_lock".into(),
            brand: "August".into(),
            model: "Smart Lock Pro".into(),
            api_endpoint: "http://192.168.1.111/api".into(),
            capabilities: caps(&["lock", "unlock", "auto_lock"]),
        },
    ]
}

/// Canned analytics summary for the dashboard.
pub fn analytics() -> AnalyticsPayload {
    AnalyticsPayload {
        energy_usage: EnergySummary {
            today: 45.2,
            yesterday: 52.1,
            this_week: 315.6,
            last_week: 342.8,
            this_month: 1205.4,
            last_month: 1156.7,
        },
        device_activity: DeviceActivity {
            total_devices: 6,
            online_devices: 5,
            active_devices: 3,
            recently_used: vec!["1".into(), "2".into(), "6".into()],
        },
        top_energy_consumers: vec![
            TopConsumer { device_id: "1".into(), consumption: 28.8, percentage: 64 },
            TopConsumer { device_id: "3".into(), consumption: 8.1, percentage: 18 },
            TopConsumer { device_id: "2".into(), consumption: 4.3, percentage: 10 },
            TopConsumer { device_id: "5".into(), consumption: 2.9, percentage: 6 },
            TopConsumer { device_id: "6".into(), consumption: 1.1, percentage: 2 },
        ],
        usage_by_hour: [
            0.8, 0.6, 0.5, 0.4, 0.5, 0.7, 1.2, 2.1, 3.4, 2.8, 2.2, 2.5, 3.1, 2.9, 2.6, 2.8,
            3.2, 3.8, 4.2, 4.8, 4.1, 3.5, 2.8, 1.9,
        ]
        .iter()
        .zip(0u8..)
        .map(|(&usage, hour)| HourlyUsage { hour, usage })
        .collect(),
    }
}
