//! # rolecycle Profile
//!
//! Publishing of refreshed credentials to a named profile that other local
//! tools can read.
//!
//! ## Key Types
//!
//! - [`CredentialSink`] - The async trait for publishing credentials
//! - [`ProfileWriter`] - Writes a profile through `aws configure set`
//! - [`CommandExecutor`] - Seam for running external commands
//! - [`MemorySink`] - Records published credentials, for tests
//!
//! ## Design Notes
//!
//! - **Validate first**: a credential with an empty field is rejected before
//!   anything is written.
//! - **No secrets in errors**: failures name the setting, never its value.

pub mod error;
pub mod executor;
pub mod memory;
pub mod sink;
pub mod writer;

pub use error::{Result, SinkError};
pub use executor::{CommandExecutor, TokioExecutor};
pub use memory::{MemorySink, Published};
pub use sink::CredentialSink;
pub use writer::{ProfileWriter, DEFAULT_PROFILE_NAME};
