use thiserror::Error;

/// Error type for the `casita-core` crate.
///
/// Wraps API-level failures and adds domain-level ones (payload
/// normalization, lookups against the local store).
#[derive(Debug, Error)]
pub enum CoreError {
    /// API client error (transport, validation, backend rejection).
    #[error(transparent)]
    Api(#[from] casita_api::Error),

    /// A payload could not be normalized into the domain model.
    #[error("invalid payload: {0}")]
    Convert(String),

    /// Lookup against the local store came up empty.
    #[error("device not found: {id}")]
    DeviceNotFound { id: String },

    /// Group lookup against the local store came up empty.
    #[error("group not found: {id}")]
    GroupNotFound { id: String },

    /// Mode lookup against the local store came up empty.
    #[error("mode not found: {id}")]
    ModeNotFound { id: String },
}

impl CoreError {
    /// Returns `true` if the underlying cause is a missing entity.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api(e) => e.is_not_found(),
            Self::DeviceNotFound { .. } | Self::GroupNotFound { .. } | Self::ModeNotFound { .. } => {
                true
            }
            Self::Convert(_) => false,
        }
    }
}
