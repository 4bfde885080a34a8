//! Reactive data layer between `casita-api` and the dashboard views.
//!
//! This crate owns the business logic, domain model, and reactive state
//! infrastructure for the casita workspace:
//!
//! - **[`Hub`]** — Central facade over the API client and the stores.
//!   [`load()`](Hub::load) populates everything; mutations go through
//!   hub operations so they apply optimistically and roll back on
//!   backend failure.
//!
//! - **[`DataStore`]** — One reactive store per entity kind (devices,
//!   groups, modes, rules, theme), built on `tokio::sync::watch`
//!   snapshots. Selectors are cheap reads over the current snapshot.
//!
//! - **[`EntityStream<T>`]** — Subscription handle vended by the
//!   stores. Exposes `current()` / `latest()` / `changed()` for
//!   reactive rendering.
//!
//! - **Domain model** ([`model`]) — Canonical typed entities
//!   (`Device`, `Group`, `Mode`, `Rule`) normalized from the wire
//!   shapes by [`convert`].

pub mod convert;
pub mod error;
pub mod hub;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use hub::Hub;
pub use store::{
    DataStore, DeviceCounts, DeviceStore, GroupStore, ModeStore, RuleStore, Theme, ThemeStore,
};
pub use stream::EntityStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Capability, Device, DeviceStatus, DeviceTimer, DeviceType, DiscoveredDevice, Group,
    GroupPatch, Mode, ModePatch, Position, Rule, RuleAction, RuleCondition, RulePatch,
    SettingValue,
};
