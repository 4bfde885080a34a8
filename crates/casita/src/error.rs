//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use casita_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const OFFLINE: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(casita::not_found),
        help("Run: casita {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Device state ─────────────────────────────────────────────────
    #[error("Device '{identifier}' is offline")]
    #[diagnostic(
        code(casita::device_offline),
        help(
            "Offline devices cannot be controlled.\n\
             Check connectivity with: casita devices status {identifier}"
        )
    )]
    DeviceOffline { identifier: String },

    #[error("Device '{identifier}' does not support '{capability}'")]
    #[diagnostic(
        code(casita::unsupported_capability),
        help("See its capabilities with: casita devices get {identifier}")
    )]
    UnsupportedCapability {
        identifier: String,
        capability: String,
    },

    // ── Modes ────────────────────────────────────────────────────────
    #[error("The default mode cannot be removed")]
    #[diagnostic(
        code(casita::default_mode),
        help("Activate another mode first, or remove a non-default mode.")
    )]
    DefaultModeRemoval,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(casita::validation))]
    Validation { field: String, reason: String },

    // ── Connection / API ─────────────────────────────────────────────
    #[error("Could not reach the hub")]
    #[diagnostic(
        code(casita::connection_failed),
        help(
            "Check that the hub is running and --api-url is correct.\n\
             Or run against demo data with --mock."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Hub error: {message}")]
    #[diagnostic(code(casita::api_error))]
    ApiError { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(casita::config),
        help("Check the config file or CASITA_* environment variables.")
    )]
    Config(#[from] casita_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Removal of '{target}' requires confirmation")]
    #[diagnostic(
        code(casita::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationRequired { target: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::DeviceOffline { .. } | Self::UnsupportedCapability { .. } => exit_code::OFFLINE,
            Self::Validation { .. }
            | Self::DefaultModeRemoval
            | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceNotFound { id } => Self::NotFound {
                resource_type: "device".into(),
                identifier: id,
                list_command: "devices list".into(),
            },
            CoreError::GroupNotFound { id } => Self::NotFound {
                resource_type: "group".into(),
                identifier: id,
                list_command: "groups list".into(),
            },
            CoreError::ModeNotFound { id } => Self::NotFound {
                resource_type: "mode".into(),
                identifier: id,
                list_command: "modes list".into(),
            },
            CoreError::Convert(message) => Self::ApiError { message },
            CoreError::Api(api) => Self::from(api),
        }
    }
}

impl From<casita_api::Error> for CliError {
    fn from(err: casita_api::Error) -> Self {
        use casita_api::Error;
        match err {
            Error::NotFound { id } => Self::NotFound {
                resource_type: "device".into(),
                identifier: id,
                list_command: "devices list".into(),
            },
            Error::Validation { reasons } => Self::Validation {
                field: "device".into(),
                reason: reasons,
            },
            Error::Transport(e) => Self::ConnectionFailed { source: e.into() },
            Error::InvalidUrl(e) => Self::Validation {
                field: "api-url".into(),
                reason: e.to_string(),
            },
            Error::Configuration(reason) => Self::Validation {
                field: "config".into(),
                reason,
            },
            other => Self::ApiError {
                message: other.to_string(),
            },
        }
    }
}
