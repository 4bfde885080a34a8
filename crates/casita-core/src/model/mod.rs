//! Canonical domain types for the casita dashboard.

pub mod device;
pub mod group;
pub mod mode;
pub mod rule;

pub use device::{
    Capability, Device, DeviceStatus, DeviceTimer, DeviceType, DiscoveredDevice, Position,
    SettingValue,
};
pub use group::{Group, GroupPatch};
pub use mode::{Mode, ModePatch};
pub use rule::{Rule, RuleAction, RuleCondition, RulePatch};
