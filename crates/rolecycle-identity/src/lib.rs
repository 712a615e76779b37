//! # rolecycle Identity
//!
//! The identity side of the role-assumption chain.
//!
//! ## Overview
//!
//! An [`IdentityProvider`] turns "who we are now" (an authority) plus a role
//! into fresh credentials and a new authority that acts as that role. The
//! [`AuthorityChain`] owns the current authority and swaps it for the new one
//! after every successful assumption, so each hop is performed as the
//! previous hop rather than as the original caller.
//!
//! ## Key Types
//!
//! - [`IdentityProvider`] - The async trait every backend implements
//! - [`StsProvider`] - AWS STS backend built on `aws-sdk-sts`
//! - [`MemoryProvider`] - Scripted in-memory backend for tests
//! - [`AuthorityChain`] - Holder of the current authority
//!
//! ## Usage
//!
//! ```rust
//! use rolecycle_core::{RoleId, SessionDuration};
//! use rolecycle_identity::{AuthorityChain, MemoryProvider};
//!
//! # async fn example() -> rolecycle_identity::Result<()> {
//! let provider = MemoryProvider::new().allow("role-a").allow("role-b");
//! let ambient = MemoryProvider::ambient("operator");
//! let mut chain = AuthorityChain::new(provider, ambient, SessionDuration::DEFAULT);
//!
//! chain.assume(&RoleId::from("role-a")).await?;
//! // role-b is assumed as role-a, not as the operator
//! chain.assume(&RoleId::from("role-b")).await?;
//! assert_eq!(chain.whoami().await?, "role-b");
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod error;
pub mod memory;
pub mod provider;
pub mod sts;

pub use chain::AuthorityChain;
pub use error::{ChainError, ProviderError, Result};
pub use memory::{AssumeCall, MemoryAuthority, MemoryProvider};
pub use provider::{Assumed, IdentityProvider};
pub use sts::StsProvider;
