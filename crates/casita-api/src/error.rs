use thiserror::Error;

/// Top-level error type for the `casita-api` crate.
///
/// Covers every failure mode across both backends: mock-mode lookups,
/// request validation, and HTTP transport. `casita-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Data ────────────────────────────────────────────────────────
    /// Requested device id is absent.
    #[error("Device not found")]
    NotFound { id: String },

    // ── Validation ──────────────────────────────────────────────────
    /// Device configuration rejected before leaving the client.
    #[error("Invalid device configuration: {reasons}")]
    Validation { reasons: String },

    // ── Configuration ───────────────────────────────────────────────
    /// Client construction rejected (e.g. HTTP mode without a base URL).
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response, normalized into a message string.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data shape ──────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }
}
