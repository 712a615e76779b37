//! Error types for the identity module.

use rolecycle_core::RoleId;
use thiserror::Error;

/// Errors reported by an identity provider backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backend service rejected or failed the request.
    #[error("service error: {0}")]
    Service(String),

    /// The caller is not allowed to assume the role.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The response carried no credentials.
    #[error("response contained no credentials")]
    MissingCredentials,

    /// The response carried no caller identity.
    #[error("response contained no caller identity")]
    MissingIdentity,
}

/// Errors surfaced by the authority chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Assuming `role` with the current authority failed.
    #[error("unable to assume role {role}: {source}")]
    AssumeFailed {
        role: RoleId,
        #[source]
        source: ProviderError,
    },

    /// Looking up the current principal failed.
    #[error("unable to get identity: {0}")]
    Identity(#[source] ProviderError),
}

/// Result type for chain operations.
pub type Result<T> = std::result::Result<T, ChainError>;
