//! Error types for the codec.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while compiling transaction documents.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The configured feature type is not a `prefix:name` pair.
    #[error("invalid feature type {value:?}: expected prefix:name")]
    InvalidFeatureType {
        /// The value that failed to parse.
        value: String,
    },
}
