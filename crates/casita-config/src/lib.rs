//! Configuration for the casita CLI.
//!
//! Layered loading: built-in defaults, then the TOML config file under
//! the platform config directory, then `CASITA_*` environment
//! variables. Translates into `casita_api::ClientConfig` for the hub.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use casita_api::{ClientConfig, RetryPolicy};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Serve canned fixture data instead of contacting a backend.
    /// The safe default: a fresh install works without any hub.
    #[serde(default = "default_use_mock_data")]
    pub use_mock_data: bool,

    /// Backend base URL, e.g. "http://homehub.local:8123/api/".
    /// Required when `use_mock_data` is false.
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Retry behavior for transient backend failures.
    #[serde(default)]
    pub retry: Retry,

    /// Default output format: "table", "json", or "plain".
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_mock_data: default_use_mock_data(),
            api_url: None,
            timeout: default_timeout(),
            retry: Retry::default(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Retry {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_use_mock_data() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    500
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "casita", "casita").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("casita");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults + file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Same, from an explicit file path (tests and `--config`).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CASITA_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ClientConfig` from the loaded configuration.
pub fn to_client_config(cfg: &Config) -> Result<ClientConfig, ConfigError> {
    let base_url = match &cfg.api_url {
        Some(raw) => Some(raw.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {raw}"),
        })?),
        None => None,
    };

    if !cfg.use_mock_data && base_url.is_none() {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: "required when use_mock_data is false".into(),
        });
    }

    Ok(ClientConfig {
        use_mock_data: cfg.use_mock_data,
        base_url,
        timeout: Duration::from_secs(cfg.timeout),
        retry: RetryPolicy {
            max_attempts: cfg.retry.max_attempts,
            delay: Duration::from_millis(cfg.retry.delay_ms),
        },
    })
}
