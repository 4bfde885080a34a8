//! Group command handlers.

use std::sync::Arc;

use tabled::Tabled;

use casita_core::{Group, Hub};

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Devices")]
    devices: usize,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Group>> for GroupRow {
    fn from(g: &Arc<Group>) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            devices: g.device_count(),
            color: g.color.clone(),
            description: g.description.clone(),
        }
    }
}

fn detail(hub: &Hub) -> impl Fn(&Arc<Group>) -> String + '_ {
    move |g| {
        let mut lines = vec![
            format!("ID:          {}", g.id),
            format!("Name:        {} {}", g.icon, g.name),
            format!("Description: {}", g.description),
            format!("Color:       {}", g.color),
        ];
        if g.device_ids.is_empty() {
            lines.push("Devices:     (none)".into());
        } else {
            lines.push("Devices:".into());
            for id in &g.device_ids {
                match hub.store().devices.device(id) {
                    Some(d) => lines.push(format!(
                        "  {id}: {} ({}, {})",
                        d.name,
                        d.status,
                        if d.is_on { "on" } else { "off" }
                    )),
                    None => lines.push(format!("  {id}: (unknown device)")),
                }
            }
        }
        lines.join("\n")
    }
}

fn find_group(hub: &Hub, id: &str) -> Result<Arc<Group>, CliError> {
    hub.store().groups.group(id).ok_or_else(|| CliError::NotFound {
        resource_type: "group".into(),
        identifier: id.to_owned(),
        list_command: "groups list".into(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    hub: &Hub,
    args: GroupsArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List => {
            let groups = hub.store().groups.groups();
            let out = output::render_list(format, &groups, |g| GroupRow::from(g), |g| g.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { group } => {
            let found = find_group(hub, &group)?;
            let out = output::render_single(format, &found, detail(hub), |g| g.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Create {
            name,
            description,
            color,
            icon,
        } => {
            let created = hub
                .store()
                .groups
                .add(Group::new(&name, &description, &color, &icon));
            let out = output::render_single(format, &created, detail(hub), |g| g.id.clone());
            output::print_output(&out, global.quiet);
            if !global.quiet {
                eprintln!("Group '{}' created (id {})", created.name, created.id);
            }
            Ok(())
        }

        GroupsCommand::AddDevice { group, device } => {
            find_group(hub, &group)?;
            util::find_device(hub, &device)?;

            hub.store().groups.add_device(&group, &device);
            hub.store().devices.set_group(&device, Some(group.clone()));
            if !global.quiet {
                eprintln!("Device {device} added to group {group}");
            }
            Ok(())
        }

        GroupsCommand::RemoveDevice { group, device } => {
            find_group(hub, &group)?;
            util::find_device(hub, &device)?;

            hub.store().groups.remove_device(&group, &device);
            hub.store().devices.set_group(&device, None);
            if !global.quiet {
                eprintln!("Device {device} removed from group {group}");
            }
            Ok(())
        }

        GroupsCommand::Delete { group } => {
            let found = find_group(hub, &group)?;
            util::confirm_removal(global, &format!("group '{}'", found.name))?;

            // Members survive the group; drop their back-references.
            for device_id in &found.device_ids {
                hub.store().devices.set_group(device_id, None);
            }
            hub.store().groups.remove(&group);
            if !global.quiet {
                eprintln!("Group '{}' removed", found.name);
            }
            Ok(())
        }
    }
}
