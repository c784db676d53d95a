//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered a transaction submit with a non-success status.
    /// Pending changes are preserved; the save may be retried.
    #[error("transaction rejected: HTTP {status}")]
    TransactionRejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Response body, for inspection.
        body: String,
    },

    /// The fetched feature document could not be parsed.
    #[error("invalid feature response: {0}")]
    GeoJson(#[from] zonesync_core::GeoJsonError),

    /// Transaction compilation failed.
    #[error("codec error: {0}")]
    Codec(#[from] zonesync_codec::CodecError),

    /// A save was attempted while another save is in flight.
    #[error("save already in progress")]
    SaveInProgress,

    /// A required configuration value is missing.
    #[error("missing configuration: {name}")]
    MissingConfig {
        /// Name of the missing value.
        name: &'static str,
    },
}

impl SyncError {
    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Transport(_) => true,
            SyncError::TransactionRejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
