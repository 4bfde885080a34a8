// ── Rule store ──
//
// Rules are listed and armed/disarmed from the dashboard; evaluation
// happens elsewhere (or nowhere, in mock mode).

use std::sync::Arc;

use tokio::sync::watch;

use chrono::Utc;

use crate::model::{Rule, RulePatch};
use crate::store::collection::{EntityCollection, Keyed};
use crate::stream::EntityStream;

impl Keyed for Rule {
    fn key(&self) -> &str {
        &self.id
    }
}

pub struct RuleStore {
    collection: EntityCollection<Rule>,
}

impl RuleStore {
    pub(crate) fn new() -> Self {
        Self {
            collection: EntityCollection::new(),
        }
    }

    // ── Selectors ────────────────────────────────────────────────────

    pub fn rules(&self) -> Arc<Vec<Arc<Rule>>> {
        self.collection.snapshot()
    }

    pub fn rule(&self, id: &str) -> Option<Arc<Rule>> {
        self.collection.get(id)
    }

    pub fn active_rules(&self) -> Vec<Arc<Rule>> {
        self.rules()
            .iter()
            .filter(|r| r.is_active)
            .cloned()
            .collect()
    }

    /// Rules that reference a device, on the condition or action side.
    pub fn rules_for_device(&self, device_id: &str) -> Vec<Arc<Rule>> {
        self.rules()
            .iter()
            .filter(|r| r.touches_device(device_id))
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

    pub fn stream(&self) -> EntityStream<Rule> {
        EntityStream::new(self.collection.subscribe())
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.collection.subscribe_loading()
    }

    // ── Actions ──────────────────────────────────────────────────────

    pub fn set_rules(&self, rules: Vec<Rule>) {
        self.collection.replace_all(rules);
    }

    pub fn upsert(&self, rule: Rule) -> bool {
        self.collection.upsert(rule)
    }

    /// Register a new rule. The store mints the id and stamps
    /// `created_at`; new rules start armed and never triggered.
    pub fn add(&self, mut rule: Rule) -> Arc<Rule> {
        rule.id = super::mint_id();
        rule.created_at = Utc::now();
        rule.is_active = true;
        rule.trigger_count = 0;
        rule.last_triggered = None;

        let stored = Arc::new(rule.clone());
        self.collection.upsert(rule);
        stored
    }

    /// Shallow-merge a patch into a rule. Returns the updated rule, or
    /// `None` if the id is unknown.
    pub fn patch(&self, id: &str, patch: RulePatch) -> Option<Arc<Rule>> {
        self.collection.update(id, |r| {
            let mut next = r.clone();
            if let Some(name) = patch.name {
                next.name = name;
            }
            if let Some(description) = patch.description {
                next.description = description;
            }
            if let Some(is_active) = patch.is_active {
                next.is_active = is_active;
            }
            if let Some(condition) = patch.condition {
                next.condition = condition;
            }
            if let Some(action) = patch.action {
                next.action = action;
            }
            next
        })
    }

    /// Record a firing: stamp `last_triggered` and bump the counter.
    pub fn mark_triggered(&self, id: &str) -> Option<Arc<Rule>> {
        self.collection.update(id, |r| {
            let mut next = r.clone();
            next.trigger_count += 1;
            next.last_triggered = Some(Utc::now());
            next
        })
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Rule>> {
        self.collection.remove(id)
    }

    /// Arm or disarm a rule. Returns the updated rule, or `None` if the
    /// id is unknown.
    pub fn toggle(&self, id: &str) -> Option<Arc<Rule>> {
        self.collection.update(id, |r| {
            let mut next = r.clone();
            next.is_active = !r.is_active;
            next
        })
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
    use crate::convert::rule_from_payload;

    fn seeded() -> RuleStore {
        let store = RuleStore::new();
        store.set_rules(
            casita_api::fixtures::rules()
                .into_iter()
                .map(|p| rule_from_payload(p).unwrap())
                .collect(),
        );
        store
    }

    #[test]
    fn toggle_flips_armed_state() {
        let store = seeded();
        assert_eq!(store.active_rules().len(), 2);

        let toggled = store.toggle("3").unwrap();
        assert!(toggled.is_active);
        assert_eq!(store.active_rules().len(), 3);
    }

    #[test]
    fn toggle_unknown_rule_is_none() {
        let store = seeded();
        assert!(store.toggle("999").is_none());
    }

    #[test]
    fn added_rules_start_armed_and_untriggered() {
        let store = seeded();
        let rule = {
            let template = store.rule("1").unwrap();
            let mut r = (*template).clone();
            r.name = "Night lock".into();
            r.is_active = false;
            r.trigger_count = 42;
            r
        };

        let added = store.add(rule);
        assert_ne!(added.id, "1", "a fresh id should be minted");
        assert!(added.is_active);
        assert_eq!(added.trigger_count, 0);
        assert!(added.last_triggered.is_none());
        assert_eq!(store.len(), 4);
        assert_eq!(store.rule(&added.id).unwrap().name, "Night lock");
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let store = seeded();
        let before = store.rule("1").unwrap();

        let patched = store
            .patch(
                "1",
                RulePatch {
                    name: Some("Renamed".into()),
                    ..RulePatch::default()
                },
            )
            .unwrap();

        assert_eq!(patched.name, "Renamed");
        assert_eq!(patched.description, before.description);
        assert_eq!(patched.is_active, before.is_active);
        assert!(store.patch("999", RulePatch::default()).is_none());
    }

    #[test]
    fn mark_triggered_stamps_and_counts() {
        let store = seeded();
        let before = store.rule("1").unwrap().trigger_count;

        let fired = store.mark_triggered("1").unwrap();
        assert_eq!(fired.trigger_count, before + 1);
        assert!(fired.last_triggered.is_some());
    }

    #[test]
    fn rules_for_device_matches_either_side() {
        let store = seeded();

        // Rule 3 conditions on the thermostat (6) and acts on the
        // kitchen fan (3); rule 2 acts on the bedroom light (2).
        let by_condition = store.rules_for_device("6");
        assert!(by_condition.iter().any(|r| r.id == "3"));

        let by_action = store.rules_for_device("2");
        assert!(by_action.iter().any(|r| r.id == "2"));

        assert!(store.rules_for_device("no-such-device").is_empty());
    }
}
