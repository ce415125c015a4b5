//! Summary encoding errors.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a brew summary
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Summary was written by an incompatible version
    #[error("Unsupported summary version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
