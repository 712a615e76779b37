//! Error types for the profile module.

use thiserror::Error;

/// Errors that can occur while publishing credentials.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The credential has an empty field and was not written.
    #[error("invalid credentials: {field} is missing")]
    InvalidCredential { field: &'static str },

    /// The downstream write failed.
    #[error("failed to write {setting} to profile {profile}: {reason}")]
    WriteFailed {
        profile: String,
        setting: &'static str,
        reason: String,
    },
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;
