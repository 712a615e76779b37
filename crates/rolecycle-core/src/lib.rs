//! # rolecycle Core
//!
//! Pure primitives for the role-assumption chain cycler: the circular role
//! pool, the set of usable roles, and the credential types handed between
//! the identity provider and the profile sink.
//!
//! This crate contains no I/O and no async code.
//!
//! ## Key Types
//!
//! - [`RoleId`] - Opaque role identifier (usually an IAM role ARN)
//! - [`RolePool`] - Fixed-size ring of roles with a single cursor
//! - [`UsableSet`] - Roles that carry meaningful permissions
//! - [`Credentials`] - A temporary access key / secret / session token triple
//!
//! ## Usage
//!
//! ```rust
//! use rolecycle_core::{RolePool, UsableSet};
//!
//! let mut pool = RolePool::new(["role-a", "role-b", "role-c"]).unwrap();
//! let usable = UsableSet::new(["role-b"], &pool).unwrap();
//!
//! assert_eq!(pool.advance().as_str(), "role-a");
//! assert!(usable.contains(&pool.advance()));
//! ```

pub mod credentials;
pub mod error;
pub mod pool;
pub mod types;
pub mod usable;

pub use credentials::Credentials;
pub use error::{CoreError, Result};
pub use pool::RolePool;
pub use types::{Region, RoleId, SessionDuration};
pub use usable::UsableSet;
