//! Operating-mode command handlers.

use std::sync::Arc;

use tabled::Tabled;

use casita_core::{Hub, Mode};

use crate::cli::{GlobalOpts, ModesArgs, ModesCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ModeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Arc<Mode>> for ModeRow {
    fn from(m: &Arc<Mode>) -> Self {
        Self {
            id: m.id.clone(),
            name: format!("{} {}", m.icon, m.name),
            active: if m.is_active { "●".into() } else { String::new() },
            default: if m.is_default { "✓".into() } else { String::new() },
            description: m.description.clone(),
        }
    }
}

fn not_found(id: &str) -> CliError {
    CliError::NotFound {
        resource_type: "mode".into(),
        identifier: id.to_owned(),
        list_command: "modes list".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    hub: &Hub,
    args: ModesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    let modes = &hub.store().modes;
    match args.command {
        ModesCommand::List => {
            let all = modes.modes();
            let out = output::render_list(format, &all, |m| ModeRow::from(m), |m| m.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModesCommand::Activate { mode } => {
            let activated = modes.activate(&mode).ok_or_else(|| not_found(&mode))?;
            if !global.quiet {
                eprintln!("Mode '{}' activated", activated.name);
            }
            Ok(())
        }

        ModesCommand::Remove { mode } => {
            let target = modes.mode(&mode).ok_or_else(|| not_found(&mode))?;
            if target.is_default {
                return Err(CliError::DefaultModeRemoval);
            }

            modes.remove_mode(&mode);
            if !global.quiet {
                eprintln!(
                    "Mode '{}' removed; active mode is now '{}'",
                    target.name,
                    modes.active_mode_id()
                );
            }
            Ok(())
        }
    }
}
