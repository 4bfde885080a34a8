//! Device command handlers.

use std::sync::Arc;

use serde_json::Map;
use tabled::Tabled;

use casita_api::types::NewDeviceRequest;
use casita_core::{Capability, Device, Hub};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Watts")]
    watts: String,
}

impl From<&Arc<Device>> for DeviceRow {
    fn from(d: &Arc<Device>) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            dtype: d.device_type.to_string(),
            status: d.status.to_string(),
            power: if d.is_on { "on".into() } else { "off".into() },
            group: d.group_id.clone().unwrap_or_else(|| "-".into()),
            watts: format!("{:.0}", d.energy_usage),
        }
    }
}

fn detail(d: &Arc<Device>) -> String {
    let mut lines = vec![
        format!("ID:           {}", d.id),
        format!("Name:         {}", d.name),
        format!("Type:         {}", d.device_type),
        format!("Brand:        {} {}", d.brand, d.model),
        format!("Status:       {}", d.status),
        format!("Power:        {}", if d.is_on { "on" } else { "off" }),
        format!("Group:        {}", d.group_id.as_deref().unwrap_or("-")),
        format!("Energy:       {:.0} W", d.energy_usage),
        format!("Endpoint:     {}", d.api_endpoint),
    ];
    if !d.capabilities.is_empty() {
        let caps: Vec<String> = d
            .capabilities
            .iter()
            .map(|c| format!("{c} ({})", c.label()))
            .collect();
        lines.push(format!("Capabilities: {}", caps.join(", ")));
    }
    for (key, value) in &d.settings {
        lines.push(format!("  {key}: {value}"));
    }
    if let Some(seen) = d.last_seen {
        lines.push(format!("Last seen:    {seen}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    hub: &Hub,
    args: DevicesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List {
            group,
            device_type,
            online,
        } => {
            let all = hub.store().devices.devices();
            let devices: Vec<Arc<Device>> = all
                .iter()
                .filter(|d| group.as_ref().is_none_or(|g| d.group_id.as_ref() == Some(g)))
                .filter(|d| {
                    device_type
                        .as_ref()
                        .is_none_or(|t| d.device_type.to_string() == *t)
                })
                .filter(|d| !online || d.is_online())
                .cloned()
                .collect();

            let out = output::render_list(format, &devices, |d| DeviceRow::from(d), |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = hub.device(&device).await?;
            let out = output::render_single(format, &found, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add {
            name,
            device_type,
            endpoint,
            capabilities,
            brand,
            model,
            group,
        } => {
            let req = NewDeviceRequest {
                name,
                device_type,
                brand,
                model,
                api_endpoint: endpoint,
                capabilities,
                group_id: group,
                icon: None,
                current_settings: Map::new(),
                energy_usage: 0.0,
            };
            let created = hub.create_device(req).await?;
            if !global.quiet {
                eprintln!("Device '{}' registered with id {}", created.name, created.id);
            }
            let out = output::render_single(format, &created, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Rename { device, name } => {
            util::find_device(hub, &device)?;
            let renamed = hub.rename_device(&device, &name).await?;
            if !global.quiet {
                eprintln!("Device {} renamed to '{}'", renamed.id, renamed.name);
            }
            Ok(())
        }

        DevicesCommand::Remove { device } => {
            let target = util::find_device(hub, &device)?;
            util::confirm_removal(global, &format!("device '{}'", target.name))?;
            hub.delete_device(&device).await?;
            if !global.quiet {
                eprintln!("Device '{}' removed", target.name);
            }
            Ok(())
        }

        DevicesCommand::Toggle { device } => {
            let target = util::find_device(hub, &device)?;
            util::ensure_online(&target)?;

            let toggled = hub.toggle_device(&device).await?;
            if !global.quiet {
                eprintln!(
                    "Device '{}' is now {}",
                    toggled.name,
                    if toggled.is_on { "on" } else { "off" }
                );
            }
            Ok(())
        }

        DevicesCommand::Set { device, key, value } => {
            let target = util::find_device(hub, &device)?;
            util::ensure_online(&target)?;

            let parsed = util::parse_setting_value(&value);
            let updated = hub.set_device_setting(&device, &key, parsed).await?;
            if !global.quiet {
                eprintln!("Device '{}': {key} set to {value}", updated.name);
            }
            Ok(())
        }

        DevicesCommand::Timer {
            device,
            minutes,
            action,
        } => {
            let target = util::find_device(hub, &device)?;
            util::ensure_online(&target)?;
            util::ensure_capability(&target, &Capability::Timer)?;

            let ack = hub.set_timer(&device, minutes, &action).await?;
            if !global.quiet {
                eprintln!(
                    "Timer armed on '{}': {action} in {} min",
                    target.name, ack.timer.duration_minutes
                );
            }
            Ok(())
        }

        DevicesCommand::Status { device } => {
            util::find_device(hub, &device)?;
            let refreshed = hub.refresh_device_status(&device).await?;
            let out = output::render_single(
                format,
                &refreshed,
                |d| {
                    format!(
                        "Status: {}\nPower:  {}\nSeen:   {}",
                        d.status,
                        if d.is_on { "on" } else { "off" },
                        d.last_seen.map_or_else(|| "-".into(), |t| t.to_string())
                    )
                },
                |d| d.status.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
