//! Automation-rule command handlers.

use std::sync::Arc;

use tabled::Tabled;

use casita_core::{Hub, Rule};

use crate::cli::{GlobalOpts, OutputFormat, RulesArgs, RulesCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Armed")]
    armed: String,
    #[tabled(rename = "Condition")]
    condition: String,
    #[tabled(rename = "Triggered")]
    triggered: u64,
}

impl From<&Arc<Rule>> for RuleRow {
    fn from(r: &Arc<Rule>) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            armed: if r.is_active { "yes".into() } else { "no".into() },
            condition: r.condition_summary(),
            triggered: r.trigger_count,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    hub: &Hub,
    args: RulesArgs,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match args.command {
        RulesCommand::List => {
            let rules = hub.store().rules.rules();
            let out = output::render_list(format, &rules, |r| RuleRow::from(r), |r| r.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RulesCommand::Toggle { rule } => {
            let toggled = hub
                .store()
                .rules
                .toggle(&rule)
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "rule".into(),
                    identifier: rule,
                    list_command: "rules list".into(),
                })?;
            if !global.quiet {
                eprintln!(
                    "Rule '{}' is now {}",
                    toggled.name,
                    if toggled.is_active { "armed" } else { "disarmed" }
                );
            }
            Ok(())
        }
    }
}
