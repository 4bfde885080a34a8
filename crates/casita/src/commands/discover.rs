//! Network-scan command handler.

use tabled::Tabled;

use casita_core::{DiscoveredDevice, Hub};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DiscoveredRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Capabilities")]
    capabilities: String,
}

impl From<&DiscoveredDevice> for DiscoveredRow {
    fn from(d: &DiscoveredDevice) -> Self {
        Self {
            name: d.name.clone(),
            dtype: d.device_type.to_string(),
            brand: format!("{} {}", d.brand, d.model),
            endpoint: d.api_endpoint.to_string(),
            capabilities: d
                .capabilities
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub async fn handle(hub: &Hub, global: &GlobalOpts, format: OutputFormat) -> Result<(), CliError> {
    if !global.quiet {
        eprintln!("Scanning the network (this takes a moment)...");
    }

    let found = hub.discover_devices().await?;
    if found.is_empty() {
        if !global.quiet {
            eprintln!("No unregistered devices found");
        }
        return Ok(());
    }

    let out = output::render_list(format, &found, |d| DiscoveredRow::from(d), |d| d.name.clone());
    output::print_output(&out, global.quiet);
    if !global.quiet {
        eprintln!(
            "\nRegister one with: casita devices add --name <name> --type <type> \
             --endpoint <url> --capability <cap>"
        );
    }
    Ok(())
}
