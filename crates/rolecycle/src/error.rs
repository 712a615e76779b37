//! Error types for rolecycle.

use std::path::PathBuf;

use rolecycle_core::CoreError;
use rolecycle_identity::ChainError;
use rolecycle_profile::SinkError;
use thiserror::Error;

/// Errors that stop the refresh loop or prevent it from starting.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Role pool or usable set could not be built.
    #[error("invalid role configuration: {0}")]
    Core(#[from] CoreError),

    /// A role assumption failed during a pass.
    #[error("unable to assume role: {0}")]
    Chain(#[from] ChainError),

    /// Publishing refreshed credentials failed.
    #[error("unable to write credentials: {0}")]
    Sink(#[from] SinkError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `run` was called on a scheduler that is not idle.
    #[error("scheduler has already been started")]
    AlreadyStarted,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `select_profile` is missing or empty.
    #[error("select_profile is required")]
    ProfileNotSelected,

    /// No profile carries the selected name.
    #[error("selected profile not found: {0}")]
    ProfileNotFound(String),
}

/// Result type for rolecycle operations.
pub type Result<T> = std::result::Result<T, CycleError>;
