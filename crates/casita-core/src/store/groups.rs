// ── Group store ──
//
// Group membership uses set semantics: adding a device twice is a
// no-op, so repeated drag-and-drop style actions stay idempotent.

use std::sync::Arc;

use tokio::sync::watch;

use chrono::Utc;

use crate::model::{Group, GroupPatch};
use crate::store::collection::{EntityCollection, Keyed};
use crate::stream::EntityStream;

impl Keyed for Group {
    fn key(&self) -> &str {
        &self.id
    }
}

pub struct GroupStore {
    collection: EntityCollection<Group>,
}

impl GroupStore {
    pub(crate) fn new() -> Self {
        Self {
            collection: EntityCollection::new(),
        }
    }

    // ── Selectors ────────────────────────────────────────────────────

    pub fn groups(&self) -> Arc<Vec<Arc<Group>>> {
        self.collection.snapshot()
    }

    pub fn group(&self, id: &str) -> Option<Arc<Group>> {
        self.collection.get(id)
    }

    /// The group a device belongs to, if any.
    pub fn group_for_device(&self, device_id: &str) -> Option<Arc<Group>> {
        self.groups()
            .iter()
            .find(|g| g.contains_device(device_id))
            .cloned()
    }

    /// Groups with at least one member.
    pub fn groups_with_devices(&self) -> Vec<Arc<Group>> {
        self.groups()
            .iter()
            .filter(|g| !g.device_ids.is_empty())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.len() == 0
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn stream(&self) -> EntityStream<Group> {
        EntityStream::new(self.collection.subscribe())
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.collection.subscribe_loading()
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub fn set_groups(&self, groups: Vec<Group>) {
        self.collection.replace_all(groups);
    }

    pub fn upsert(&self, group: Group) -> bool {
        self.collection.upsert(group)
    }

    /// Register a new group. The store mints the id and stamps
    /// `created_at`; new groups start with no members.
    pub fn add(&self, mut group: Group) -> Arc<Group> {
        group.id = super::mint_id();
        group.created_at = Utc::now();
        group.device_ids = Vec::new();

        let stored = Arc::new(group.clone());
        self.collection.upsert(group);
        stored
    }

    /// Shallow-merge a patch into a group's descriptive fields. Returns
    /// the updated group, or `None` if the id is unknown.
    pub fn patch(&self, id: &str, patch: GroupPatch) -> Option<Arc<Group>> {
        self.collection.update(id, |g| {
            let mut next = g.clone();
            if let Some(name) = patch.name {
                next.name = name;
            }
            if let Some(description) = patch.description {
                next.description = description;
            }
            if let Some(color) = patch.color {
                next.color = color;
            }
            if let Some(icon) = patch.icon {
                next.icon = icon;
            }
            next
        })
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Group>> {
        self.collection.remove(id)
    }

    /// Add a device to a group. Idempotent; returns the updated group,
    /// or `None` if the group is unknown.
    pub fn add_device(&self, group_id: &str, device_id: &str) -> Option<Arc<Group>> {
        self.collection.update(group_id, |g| {
            let mut next = g.clone();
            if !next.contains_device(device_id) {
                next.device_ids.push(device_id.to_owned());
            }
            next
        })
    }

    /// Remove a device from a group. Returns the updated group, or
    /// `None` if the group is unknown.
    pub fn remove_device(&self, group_id: &str, device_id: &str) -> Option<Arc<Group>> {
        self.collection.update(group_id, |g| {
            let mut next = g.clone();
            next.device_ids.retain(|id| id != device_id);
            next
        })
    }

    /// Drop a device from every group (device deletion).
    pub fn remove_device_everywhere(&self, device_id: &str) {
        let group_ids: Vec<String> = self
            .groups()
            .iter()
            .filter(|g| g.contains_device(device_id))
            .map(|g| g.id.clone())
            .collect();
        for group_id in group_ids {
            self.remove_device(&group_id, device_id);
        }
    }

    // ── Fetch bookkeeping ────────────────────────────────────────────

    pub fn set_loading(&self, loading: bool) {
        self.collection.set_loading(loading);
    }

    pub fn is_loading(&self) -> bool {
        self.collection.is_loading()
    }

    pub fn set_error(&self, error: Option<String>) {
        self.collection.set_error(error);
    }

    pub fn last_error(&self) -> Option<String> {
        self.collection.last_error()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::convert::group_from_payload;

    fn seeded() -> GroupStore {
        let store = GroupStore::new();
        store.set_groups(
            casita_api::fixtures::groups()
                .into_iter()
                .map(group_from_payload)
                .collect(),
        );
        store
    }

    #[test]
    fn add_device_is_idempotent() {
        let store = seeded();

        let once = store.add_device("bedroom", "3").unwrap();
        assert_eq!(once.device_ids, vec!["2", "3"]);

        let twice = store.add_device("bedroom", "3").unwrap();
        assert_eq!(twice.device_ids, vec!["2", "3"]);
    }

    #[test]
    fn remove_device_everywhere_clears_membership() {
        let store = seeded();
        store.add_device("bedroom", "1").unwrap();

        store.remove_device_everywhere("1");
        assert!(store.group_for_device("1").is_none());
        // Other members are untouched.
        assert!(store.group("living-room").unwrap().contains_device("6"));
    }

    #[test]
    fn group_for_device_finds_membership() {
        let store = seeded();
        assert_eq!(store.group_for_device("4").unwrap().id, "garden");
        assert!(store.group_for_device("999").is_none());
    }

    #[test]
    fn added_groups_mint_an_id_and_start_empty() {
        let store = seeded();
        let template = {
            let mut g = (*store.group("bedroom").unwrap()).clone();
            g.name = "Office".into();
            g
        };

        let added = store.add(template);
        assert_ne!(added.id, "bedroom", "a fresh id should be minted");
        assert!(added.device_ids.is_empty());
        assert_eq!(store.len(), 6);
        assert_eq!(store.group(&added.id).unwrap().name, "Office");
    }

    #[test]
    fn groups_with_devices_skips_empty_groups() {
        let store = seeded();
        assert_eq!(store.groups_with_devices().len(), 5);

        let mut empty = (*store.group("garden").unwrap()).clone();
        empty.name = "Attic".into();
        store.add(empty);

        // The new group has no members yet.
        assert_eq!(store.len(), 6);
        assert_eq!(store.groups_with_devices().len(), 5);
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let store = seeded();
        let before = store.group("kitchen").unwrap();

        let patched = store
            .patch(
                "kitchen",
                GroupPatch {
                    color: Some("#123456".into()),
                    ..GroupPatch::default()
                },
            )
            .unwrap();

        assert_eq!(patched.color, "#123456");
        assert_eq!(patched.name, before.name);
        assert_eq!(patched.device_ids, before.device_ids);
        assert!(store.patch("999", GroupPatch::default()).is_none());
    }
}
