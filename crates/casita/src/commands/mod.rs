//! Command handlers, one module per top-level subcommand.

pub mod dashboard;
pub mod devices;
pub mod discover;
pub mod groups;
pub mod modes;
pub mod rules;
mod util;

use casita_core::Hub;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub async fn dispatch(
    command: Command,
    hub: &Hub,
    global: &GlobalOpts,
    format: OutputFormat,
) -> Result<(), CliError> {
    match command {
        Command::Devices(args) => devices::handle(hub, args, global, format).await,
        Command::Groups(args) => groups::handle(hub, args, global, format),
        Command::Modes(args) => modes::handle(hub, args, global, format),
        Command::Rules(args) => rules::handle(hub, args, global, format),
        Command::Discover => discover::handle(hub, global, format).await,
        Command::Dashboard => dashboard::handle(hub, global, format),
    }
}
