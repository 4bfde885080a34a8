//! Home-wide summary view.

use owo_colors::OwoColorize;
use serde::Serialize;

use casita_core::Hub;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything the summary view shows, in one serializable shape so
/// `--output json` gets the same data as the rendered text.
#[derive(Serialize)]
struct Summary {
    total_devices: usize,
    online_devices: usize,
    active_devices: usize,
    current_draw_watts: f64,
    active_mode: String,
    groups: Vec<GroupSummary>,
    armed_rules: usize,
    energy_today_kwh: f64,
    top_consumer: Option<String>,
}

#[derive(Serialize)]
struct GroupSummary {
    id: String,
    name: String,
    devices: usize,
    active: usize,
}

fn build_summary(hub: &Hub) -> Summary {
    let store = hub.store();
    let counts = store.devices.counts();
    let analytics = hub.analytics();

    let groups = store
        .groups
        .groups()
        .iter()
        .map(|g| GroupSummary {
            id: g.id.clone(),
            name: g.name.clone(),
            devices: g.device_count(),
            active: g
                .device_ids
                .iter()
                .filter_map(|id| store.devices.device(id))
                .filter(|d| d.is_active())
                .count(),
        })
        .collect();

    let top_consumer = analytics
        .top_energy_consumers
        .first()
        .and_then(|c| store.devices.device(&c.device_id))
        .map(|d| d.name.clone());

    Summary {
        total_devices: counts.total,
        online_devices: counts.online,
        active_devices: counts.active,
        current_draw_watts: store.devices.total_energy_usage(),
        active_mode: store
            .modes
            .active_mode()
            .map_or_else(|| "-".into(), |m| m.name.clone()),
        groups,
        armed_rules: store.rules.active_rules().len(),
        energy_today_kwh: analytics.energy_usage.today,
        top_consumer,
    }
}

fn render_text(summary: &Summary, color: bool) -> String {
    let heading = |s: &str| {
        if color {
            s.bold().to_string()
        } else {
            s.to_owned()
        }
    };

    let mut lines = vec![
        heading("Home"),
        format!(
            "  Devices:  {} total, {} online, {} active",
            summary.total_devices, summary.online_devices, summary.active_devices
        ),
        format!("  Drawing:  {:.0} W", summary.current_draw_watts),
        format!("  Mode:     {}", summary.active_mode),
        format!("  Rules:    {} armed", summary.armed_rules),
        String::new(),
        heading("Rooms"),
    ];
    for group in &summary.groups {
        lines.push(format!(
            "  {:<14} {} devices, {} active",
            group.name, group.devices, group.active
        ));
    }
    lines.push(String::new());
    lines.push(heading("Energy"));
    lines.push(format!("  Today:    {:.1} kWh", summary.energy_today_kwh));
    if let Some(top) = &summary.top_consumer {
        lines.push(format!("  Top:      {top}"));
    }
    lines.join("\n")
}

pub fn handle(hub: &Hub, global: &GlobalOpts, format: OutputFormat) -> Result<(), CliError> {
    let summary = build_summary(hub);
    let color = output::should_color(global.color);

    let out = output::render_single(
        format,
        &summary,
        |s| render_text(s, color),
        |s| s.active_mode.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
