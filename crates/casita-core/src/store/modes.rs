// ── Mode store ──
//
// Operating modes are client-side presets with no backend endpoint, so
// the store seeds itself. Invariants: exactly one active mode at all
// times, and the default mode can never be removed.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{Mode, ModePatch, SettingValue};
use crate::store::collection::{EntityCollection, Keyed};
use crate::stream::EntityStream;

impl Keyed for Mode {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Built-in presets. Comfort is both active and the removal fallback.
///
/// Each settings bundle carries the same four keys: target brightness,
/// target temperature, and the auto-off flag with its delay in minutes.
fn default_modes() -> Vec<Mode> {
    vec![
        Mode::new(
            "power-saving",
            "Power Saving",
            "Minimize energy use across the home",
            "🌱",
        )
        .with_setting("brightness", SettingValue::Number(30.0))
        .with_setting("temperature", SettingValue::Number(22.0))
        .with_setting("auto_off", SettingValue::Flag(true))
        .with_setting("auto_off_delay", SettingValue::Number(30.0)),
        Mode::new(
            "performance",
            "Performance",
            "Run every device at full capacity",
            "⚡",
        )
        .with_setting("brightness", SettingValue::Number(100.0))
        .with_setting("temperature", SettingValue::Number(20.0))
        .with_setting("auto_off", SettingValue::Flag(false))
        .with_setting("auto_off_delay", SettingValue::Number(0.0)),
        Mode {
            is_active: true,
            is_default: true,
            ..Mode::new(
                "comfort",
                "Comfort",
                "Balanced settings for everyday living",
                "🏠",
            )
            .with_setting("brightness", SettingValue::Number(75.0))
            .with_setting("temperature", SettingValue::Number(24.0))
            .with_setting("auto_off", SettingValue::Flag(true))
            .with_setting("auto_off_delay", SettingValue::Number(60.0))
        },
    ]
}

pub struct ModeStore {
    collection: EntityCollection<Mode>,
    active: watch::Sender<String>,
}

impl ModeStore {
    pub(crate) fn new() -> Self {
        let modes = default_modes();
        let active_id = modes
            .iter()
            .find(|m| m.is_active)
            .map_or_else(|| "comfort".to_owned(), |m| m.id.clone());

        let collection = EntityCollection::new();
        collection.replace_all(modes);
        let (active, _) = watch::channel(active_id);

        Self { collection, active }
    }

    // ── Selectors ────────────────────────────────────────────────────

    pub fn modes(&self) -> Arc<Vec<Arc<Mode>>> {
        self.collection.snapshot()
    }

    pub fn mode(&self, id: &str) -> Option<Arc<Mode>> {
        self.collection.get(id)
    }

    pub fn active_mode_id(&self) -> String {
        self.active.borrow().clone()
    }

    pub fn active_mode(&self) -> Option<Arc<Mode>> {
        self.collection.get(&self.active.borrow())
    }

    fn default_mode_id(&self) -> Option<String> {
        self.modes()
            .iter()
            .find(|m| m.is_default)
            .map(|m| m.id.clone())
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn stream(&self) -> EntityStream<Mode> {
        EntityStream::new(self.collection.subscribe())
    }

    pub fn subscribe_active(&self) -> watch::Receiver<String> {
        self.active.subscribe()
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Register a new (non-default, inactive) mode.
    pub fn add_mode(&self, mut mode: Mode) -> bool {
        mode.is_active = false;
        mode.is_default = false;
        self.collection.upsert(mode)
    }

    /// Shallow-merge a patch into a mode. The active/default flags are
    /// not patchable; activation goes through [`activate`](Self::activate).
    /// Returns the updated mode, or `None` if the id is unknown.
    pub fn patch(&self, id: &str, patch: ModePatch) -> Option<Arc<Mode>> {
        self.collection.update(id, |m| {
            let mut next = m.clone();
            if let Some(name) = patch.name {
                next.name = name;
            }
            if let Some(description) = patch.description {
                next.description = description;
            }
            if let Some(icon) = patch.icon {
                next.icon = icon;
            }
            if let Some(settings) = patch.settings {
                next.settings = settings;
            }
            next
        })
    }

    /// Make `id` the active mode. Returns the newly active mode, or
    /// `None` if the id is unknown. All other modes are deactivated.
    pub fn activate(&self, id: &str) -> Option<Arc<Mode>> {
        if !self.collection.contains(id) {
            return None;
        }

        let ids: Vec<String> = self.modes().iter().map(|m| m.id.clone()).collect();
        for mode_id in ids {
            let should_be_active = mode_id == id;
            self.collection.update(&mode_id, |m| {
                let mut next = m.clone();
                next.is_active = should_be_active;
                next
            });
        }

        self.active.send_modify(|a| *a = id.to_owned());
        debug!(mode = id, "mode activated");
        self.collection.get(id)
    }

    /// Remove a mode. The default mode cannot be removed (no-op
    /// returning `false`). Removing the active mode activates the
    /// default instead.
    pub fn remove_mode(&self, id: &str) -> bool {
        let Some(mode) = self.collection.get(id) else {
            return false;
        };
        if mode.is_default {
            debug!(mode = id, "refusing to remove the default mode");
            return false;
        }

        let was_active = self.active_mode_id() == id;
        self.collection.remove(id);

        if was_active {
            if let Some(fallback) = self.default_mode_id() {
                self.activate(&fallback);
            }
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seeds_three_modes_with_comfort_active() {
        let store = ModeStore::new();
        assert_eq!(store.modes().len(), 3);
        assert_eq!(store.active_mode_id(), "comfort");
        assert!(store.active_mode().unwrap().is_default);
    }

    #[test]
    fn presets_carry_the_full_settings_bundle() {
        let store = ModeStore::new();
        for mode in store.modes().iter() {
            for key in ["brightness", "temperature", "auto_off", "auto_off_delay"] {
                assert!(
                    mode.settings.contains_key(key),
                    "mode {} is missing {key}",
                    mode.id
                );
            }
        }

        let saver = store.mode("power-saving").unwrap();
        assert_eq!(saver.settings["auto_off"], SettingValue::Flag(true));
        assert_eq!(saver.settings["auto_off_delay"], SettingValue::Number(30.0));
        let perf = store.mode("performance").unwrap();
        assert_eq!(perf.settings["auto_off"], SettingValue::Flag(false));
    }

    #[test]
    fn patch_cannot_touch_the_active_or_default_flags() {
        let store = ModeStore::new();

        let patched = store
            .patch(
                "performance",
                ModePatch {
                    name: Some("Max Power".into()),
                    settings: Some(
                        [("brightness".to_owned(), SettingValue::Number(90.0))]
                            .into_iter()
                            .collect(),
                    ),
                    ..ModePatch::default()
                },
            )
            .unwrap();

        assert_eq!(patched.name, "Max Power");
        assert_eq!(patched.settings.len(), 1);
        assert!(!patched.is_active);
        assert!(!patched.is_default);
        assert_eq!(store.active_mode_id(), "comfort");
        assert!(store.patch("vacation", ModePatch::default()).is_none());
    }

    #[test]
    fn activation_is_exclusive() {
        let store = ModeStore::new();
        store.activate("performance").unwrap();

        assert_eq!(store.active_mode_id(), "performance");
        let active: Vec<String> = store
            .modes()
            .iter()
            .filter(|m| m.is_active)
            .map(|m| m.id.clone())
            .collect();
        assert_eq!(active, vec!["performance"]);
    }

    #[test]
    fn activating_unknown_mode_is_none() {
        let store = ModeStore::new();
        assert!(store.activate("vacation").is_none());
        assert_eq!(store.active_mode_id(), "comfort");
    }

    #[test]
    fn default_mode_cannot_be_removed() {
        let store = ModeStore::new();
        assert!(!store.remove_mode("comfort"));
        assert_eq!(store.modes().len(), 3);
        assert_eq!(store.active_mode_id(), "comfort");
    }

    #[test]
    fn removing_active_mode_falls_back_to_default() {
        let store = ModeStore::new();
        store.activate("power-saving").unwrap();

        assert!(store.remove_mode("power-saving"));
        assert_eq!(store.modes().len(), 2);
        assert_eq!(store.active_mode_id(), "comfort");
        assert!(store.active_mode().unwrap().is_active);
    }

    #[test]
    fn added_modes_start_inactive_and_non_default() {
        let store = ModeStore::new();
        let mut mode = Mode::new("vacation", "Vacation", "Away from home", "✈️");
        mode.is_active = true;
        mode.is_default = true;

        assert!(store.add_mode(mode));
        let stored = store.mode("vacation").unwrap();
        assert!(!stored.is_active);
        assert!(!stored.is_default);
        assert_eq!(store.active_mode_id(), "comfort");
    }
}
