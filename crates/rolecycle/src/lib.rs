//! # rolecycle
//!
//! Keeps a named credentials profile stocked with short-lived credentials
//! obtained by walking a ring of roles, each hop assumed as the previous one.
//!
//! ## Overview
//!
//! - **Pool**: roles are visited in configured order, wrapping forever
//! - **Chain**: every hop is authenticated as the role assumed before it
//! - **Selection**: a pass stops at the first usable role (or the first
//!   success when no role is marked usable)
//! - **Refresh**: one pass at start-up, then one per interval, until a pass
//!   fails or the process is asked to stop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rolecycle::{app, Settings};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn example(settings: Settings) -> rolecycle::Result<()> {
//!     let mut scheduler = app::connect(&settings).await?;
//!     scheduler.run(CancellationToken::new(), settings.refresh).await
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `rolecycle::core` - Role pool, usable set, credentials
//! - `rolecycle::identity` - Identity providers and the authority chain
//! - `rolecycle::profile` - Credential sinks

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod selector;
pub mod shutdown;

// Re-export component crates
pub use rolecycle_core as core;
pub use rolecycle_identity as identity;
pub use rolecycle_profile as profile;

pub use cli::Cli;
pub use config::{ConfigFile, ResolvedChain, Settings};
pub use error::{ConfigError, CycleError, Result};
pub use scheduler::{RefreshInterval, RefreshScheduler, SchedulerState};
pub use selector::{RoleSelector, Selection};

pub use rolecycle_core::{Credentials, Region, RoleId, RolePool, SessionDuration, UsableSet};
