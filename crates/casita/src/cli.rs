//! Clap derive structures for the `casita` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// casita -- smart-home dashboard for the terminal
#[derive(Debug, Parser)]
#[command(
    name = "casita",
    version,
    about = "Monitor and control smart-home devices from the command line",
    long_about = "A dashboard for smart-home devices, groups, operating modes,\n\
        and automation rules.\n\n\
        Runs against canned demo data by default; point it at a real hub\n\
        with --api-url or the config file.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Serve canned demo data instead of contacting a hub
    #[arg(long, env = "CASITA_MOCK", global = true)]
    pub mock: bool,

    /// Hub base URL (implies live mode)
    #[arg(long, env = "CASITA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "CASITA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CASITA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage room groups
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Manage operating modes
    #[command(alias = "m")]
    Modes(ModesArgs),

    /// Manage automation rules
    #[command(alias = "r")]
    Rules(RulesArgs),

    /// Scan the network for unregistered devices
    Discover,

    /// Home-wide summary: devices, energy, active mode
    #[command(alias = "dash")]
    Dashboard,
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices
    #[command(alias = "ls")]
    List {
        /// Only devices in this group
        #[arg(long)]
        group: Option<String>,

        /// Only devices of this type (e.g. smart_light)
        #[arg(long = "type")]
        device_type: Option<String>,

        /// Only devices currently online
        #[arg(long)]
        online: bool,
    },

    /// Show one device in detail
    Get { device: String },

    /// Register a new device
    Add {
        /// Display name
        #[arg(long)]
        name: String,

        /// Device type (e.g. smart_plug)
        #[arg(long = "type")]
        device_type: String,

        /// Control endpoint URL
        #[arg(long)]
        endpoint: String,

        /// Capability, repeatable (e.g. --capability power)
        #[arg(long = "capability", required = true)]
        capabilities: Vec<String>,

        #[arg(long, default_value = "")]
        brand: String,

        #[arg(long, default_value = "")]
        model: String,

        /// Group to place the device in
        #[arg(long)]
        group: Option<String>,
    },

    /// Rename a device
    Rename { device: String, name: String },

    /// Remove a device
    #[command(alias = "rm")]
    Remove { device: String },

    /// Flip a device's power state
    Toggle { device: String },

    /// Change one device setting (e.g. set 1 temperature 22)
    Set {
        device: String,
        key: String,
        value: String,
    },

    /// Arm a timer on a device
    Timer {
        device: String,

        /// Minutes until the timer fires
        #[arg(long, short = 'm')]
        minutes: u32,

        /// Effect when the timer fires
        #[arg(long, default_value = "turn_off")]
        action: String,
    },

    /// Poll a device's live status
    Status { device: String },
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List groups
    #[command(alias = "ls")]
    List,

    /// Show one group and its devices
    Get { group: String },

    /// Create a new, empty group
    Create {
        /// Display name
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Accent color as #rrggbb
        #[arg(long, default_value = "#3b82f6")]
        color: String,

        #[arg(long, default_value = "🏠")]
        icon: String,
    },

    /// Add a device to a group (idempotent)
    AddDevice { group: String, device: String },

    /// Remove a device from a group
    RemoveDevice { group: String, device: String },

    /// Delete a group (member devices are kept, just ungrouped)
    #[command(alias = "rm")]
    Delete { group: String },
}

// ── Modes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ModesArgs {
    #[command(subcommand)]
    pub command: ModesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModesCommand {
    /// List operating modes
    #[command(alias = "ls")]
    List,

    /// Activate a mode
    Activate { mode: String },

    /// Remove a mode (the default mode cannot be removed)
    #[command(alias = "rm")]
    Remove { mode: String },
}

// ── Rules ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List automation rules
    #[command(alias = "ls")]
    List,

    /// Arm or disarm a rule
    Toggle { rule: String },
}
