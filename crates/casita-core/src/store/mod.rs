//! Reactive state containers.
//!
//! Each store owns one slice of dashboard state behind `watch`
//! channels: mutations rebuild an immutable snapshot and notify
//! subscribers. Reads are cheap `Arc` clones of the latest snapshot.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

mod collection;
mod devices;
mod groups;
mod modes;
mod rules;
mod theme;

pub use devices::{DeviceCounts, DeviceStore};
pub use groups::GroupStore;
pub use modes::ModeStore;
pub use rules::RuleStore;
pub use theme::{Theme, ThemeStore};

/// All dashboard state under one roof. Created once per [`Hub`] and
/// shared by reference.
///
/// [`Hub`]: crate::Hub
pub struct DataStore {
    pub devices: DeviceStore,
    pub groups: GroupStore,
    pub modes: ModeStore,
    pub rules: RuleStore,
    pub theme: ThemeStore,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            devices: DeviceStore::new(),
            groups: GroupStore::new(),
            modes: ModeStore::new(),
            rules: RuleStore::new(),
            theme: ThemeStore::new(),
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Mint a session-unique id for client-created entities, following the
/// backend's millisecond-timestamp id scheme. Seeded once, then
/// monotonic, so ids never collide within a session.
pub(crate) fn mint_id() -> String {
    static NEXT: OnceLock<AtomicU64> = OnceLock::new();
    let next = NEXT.get_or_init(|| {
        let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        AtomicU64::new(millis)
    });
    next.fetch_add(1, Ordering::Relaxed).to_string()
}
