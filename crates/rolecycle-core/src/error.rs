//! Error types for rolecycle core.

use thiserror::Error;

use crate::types::RoleId;

/// Errors raised while building the role pool and usable set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Fewer roles than a ring can cycle through.
    #[error("at least {min} roles are required, got {found}")]
    MinRoles { min: usize, found: usize },

    /// A usable role that is not part of the role pool.
    #[error("usable role is missing from roles list: {0}")]
    UnknownUsableRole(RoleId),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
