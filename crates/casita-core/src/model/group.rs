use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A room-level grouping of devices.
///
/// Membership lives here as an ordered, duplicate-free list of device
/// ids; devices also carry a back-reference via `group_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub device_ids: Vec<String>,
    /// Accent color as a `#rrggbb` hex string.
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

/// Partial edit of a group's descriptive fields. Membership changes go
/// through the dedicated store actions instead.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl Group {
    /// A fresh, empty group. The store mints the real id on insert.
    pub fn new(name: &str, description: &str, color: &str, icon: &str) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            device_ids: Vec::new(),
            color: color.into(),
            icon: icon.into(),
            created_at: Utc::now(),
        }
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.device_ids.iter().any(|id| id == device_id)
    }

    pub fn device_count(&self) -> usize {
        self.device_ids.len()
    }
}
