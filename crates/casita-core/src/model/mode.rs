use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::device::SettingValue;

/// A home-wide operating mode (power saving, performance, comfort).
///
/// Modes are presets the dashboard offers; exactly one is active at a
/// time and exactly one is marked as the default fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub is_active: bool,
    /// The fallback mode. Cannot be removed; activation falls back here
    /// when the active mode is deleted.
    pub is_default: bool,
    /// Setting targets this mode applies, keyed by setting name.
    pub settings: BTreeMap<String, SettingValue>,
}

/// Partial edit of a mode. The `is_active` / `is_default` flags are
/// deliberately absent; they only move through store actions so the
/// one-active / one-default invariants hold.
#[derive(Debug, Clone, Default)]
pub struct ModePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Replaces the whole settings bundle when present.
    pub settings: Option<BTreeMap<String, SettingValue>>,
}

impl Mode {
    pub fn new(id: &str, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            is_active: false,
            is_default: false,
            settings: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: &str, value: SettingValue) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}
