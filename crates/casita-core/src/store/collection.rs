// ── Generic reactive entity collection ──
//
// Ordered storage with push-based change notification via `watch`
// channels. Every mutation bumps a version counter and rebuilds the
// snapshot that subscribers receive. Insertion order is preserved so
// views render stable lists.

use std::sync::Arc;

use tokio::sync::watch;

/// Implemented by every entity stored in a collection.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A reactive, ordered collection for a single entity type.
///
/// The `watch` channel holds the authoritative snapshot; mutations go
/// through `send_modify` so subscribers are notified exactly once per
/// change. Alongside the data, the collection tracks the async-fetch
/// bookkeeping every view needs: a loading flag and the last error.
pub(crate) struct EntityCollection<T: Keyed + Clone + Send + Sync + 'static> {
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
    version: watch::Sender<u64>,
    loading: watch::Sender<bool>,
    last_error: watch::Sender<Option<String>>,
}

impl<T: Keyed + Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        let (loading, _) = watch::channel(false);
        let (last_error, _) = watch::channel(None);

        Self {
            snapshot,
            version,
            loading,
            last_error,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .find(|e| e.key() == key)
            .cloned()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.snapshot.borrow().iter().any(|e| e.key() == key)
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Replace the whole collection (initial load / refresh).
    pub(crate) fn replace_all(&self, entities: Vec<T>) {
        let items: Vec<Arc<T>> = entities.into_iter().map(Arc::new).collect();
        self.snapshot.send_modify(|snap| *snap = Arc::new(items));
        self.bump_version();
    }

    /// Insert or update an entity, keyed by [`Keyed::key`]. Updates keep
    /// the entity's position; inserts append. Returns `true` if the key
    /// was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let mut is_new = false;
        self.snapshot.send_modify(|snap| {
            let items = Arc::make_mut(snap);
            match items.iter_mut().find(|e| e.key() == entity.key()) {
                Some(slot) => *slot = Arc::new(entity),
                None => {
                    is_new = true;
                    items.push(Arc::new(entity));
                }
            }
        });
        self.bump_version();
        is_new
    }

    /// Apply `f` to the entity under `key`, if present. Returns the
    /// updated entity.
    pub(crate) fn update<F>(&self, key: &str, f: F) -> Option<Arc<T>>
    where
        F: FnOnce(&T) -> T,
    {
        let mut updated = None;
        self.snapshot.send_modify(|snap| {
            let items = Arc::make_mut(snap);
            if let Some(slot) = items.iter_mut().find(|e| e.key() == key) {
                let next = Arc::new(f(slot));
                *slot = Arc::clone(&next);
                updated = Some(next);
            }
        });
        if updated.is_some() {
            self.bump_version();
        }
        updated
    }

    /// Remove an entity by key. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, key: &str) -> Option<Arc<T>> {
        let mut removed = None;
        self.snapshot.send_modify(|snap| {
            let items = Arc::make_mut(snap);
            if let Some(pos) = items.iter().position(|e| e.key() == key) {
                removed = Some(items.remove(pos));
            }
        });
        if removed.is_some() {
            self.bump_version();
        }
        removed
    }

    // ── Fetch bookkeeping ────────────────────────────────────────────

    pub(crate) fn set_loading(&self, loading: bool) {
        self.loading.send_modify(|l| *l = loading);
    }

    pub(crate) fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub(crate) fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub(crate) fn set_error(&self, error: Option<String>) {
        self.last_error.send_modify(|e| *e = error);
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Thing {
        id: String,
        value: u32,
    }

    impl Keyed for Thing {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn thing(id: &str, value: u32) -> Thing {
        Thing {
            id: id.into(),
            value,
        }
    }

    #[test]
    fn upsert_returns_true_for_new_key() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        assert!(col.upsert(thing("a", 1)));
        assert!(!col.upsert(thing("a", 2)));
        assert_eq!(col.get("a").unwrap().value, 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        col.upsert(thing("b", 1));
        col.upsert(thing("a", 2));
        col.upsert(thing("b", 3));

        let snap = col.snapshot();
        let order: Vec<&str> = snap.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn update_applies_in_place() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        col.upsert(thing("a", 1));

        let updated = col.update("a", |t| Thing {
            value: t.value + 10,
            ..t.clone()
        });
        assert_eq!(updated.unwrap().value, 11);
        assert!(col.update("missing", |t| t.clone()).is_none());
    }

    #[test]
    fn remove_returns_the_entity() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        col.upsert(thing("a", 1));

        assert_eq!(col.remove("a").unwrap().value, 1);
        assert!(col.remove("a").is_none());
        assert!(col.is_empty());
    }

    #[test]
    fn every_mutation_bumps_the_version() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        assert_eq!(col.version(), 0);

        col.replace_all(vec![thing("a", 1)]);
        col.upsert(thing("b", 2));
        col.update("a", |t| t.clone());
        col.remove("b");
        assert_eq!(col.version(), 4);
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshots() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        let mut rx = col.subscribe();

        col.upsert(thing("a", 1));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn loading_and_error_flags() {
        let col: EntityCollection<Thing> = EntityCollection::new();
        assert!(!col.is_loading());
        assert!(col.last_error().is_none());

        col.set_loading(true);
        col.set_error(Some("boom".into()));
        assert!(col.is_loading());
        assert_eq!(col.last_error().as_deref(), Some("boom"));
    }
}
