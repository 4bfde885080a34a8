//! Helpers shared by the command handlers.

use std::sync::Arc;

use casita_core::{Capability, Device, Hub, SettingValue};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Look up a device in the store, failing with a user-facing error.
pub fn find_device(hub: &Hub, id: &str) -> Result<Arc<Device>, CliError> {
    hub.store()
        .devices
        .device(id)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "device".into(),
            identifier: id.to_owned(),
            list_command: "devices list".into(),
        })
}

/// Control commands are rejected for offline devices before anything
/// is sent to the hub.
pub fn ensure_online(device: &Device) -> Result<(), CliError> {
    if device.is_online() {
        Ok(())
    } else {
        Err(CliError::DeviceOffline {
            identifier: device.id.clone(),
        })
    }
}

pub fn ensure_capability(device: &Device, capability: &Capability) -> Result<(), CliError> {
    if device.has_capability(capability) {
        Ok(())
    } else {
        Err(CliError::UnsupportedCapability {
            identifier: device.id.clone(),
            capability: capability.to_string(),
        })
    }
}

/// Parse a CLI-supplied setting value: booleans and numbers are typed,
/// everything else is text.
pub fn parse_setting_value(raw: &str) -> SettingValue {
    if let Ok(flag) = raw.parse::<bool>() {
        return SettingValue::Flag(flag);
    }
    if let Ok(number) = raw.parse::<f64>() {
        return SettingValue::Number(number);
    }
    SettingValue::Text(raw.to_owned())
}

/// Confirm a destructive action, honoring `--yes` and non-interactive
/// sessions.
pub fn confirm_removal(global: &GlobalOpts, target: &str) -> Result<(), CliError> {
    if global.yes {
        return Ok(());
    }
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(CliError::ConfirmationRequired {
            target: target.to_owned(),
        });
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Remove {target}?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    if confirmed {
        Ok(())
    } else {
        Err(CliError::ConfirmationRequired {
            target: target.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_values_parse_by_shape() {
        assert_eq!(parse_setting_value("true"), SettingValue::Flag(true));
        assert_eq!(parse_setting_value("21.5"), SettingValue::Number(21.5));
        assert_eq!(
            parse_setting_value("cool"),
            SettingValue::Text("cool".into())
        );
    }
}
