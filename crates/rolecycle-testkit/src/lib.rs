//! # rolecycle Testkit
//!
//! Testing utilities for rolecycle.
//!
//! ## Overview
//!
//! - **Fixtures**: role ARNs and a [`ChainFixture`] that wires the in-memory
//!   provider and sink into selectors and schedulers
//! - **Generators**: proptest strategies for role lists and usable subsets
//!
//! ## Test Fixtures
//!
//! ```rust
//! use rolecycle_testkit::{role_arn, ChainFixture};
//!
//! # async fn example() {
//! let fixture = ChainFixture::allowing(&["role-a", "role-b", "role-c"]);
//! let mut selector = fixture.selector(&["role-a", "role-b", "role-c"], &["role-b"]);
//!
//! let selection = selector.select_next().await.unwrap();
//! assert_eq!(selection.role, role_arn("role-b"));
//! # }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{role_arn, role_arns, ChainFixture, ACCOUNT_ID, AMBIENT_PRINCIPAL};
pub use generators::{pool_with_usable, role_list, PoolParams};
