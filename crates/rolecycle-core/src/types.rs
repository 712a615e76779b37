//! Strong type definitions for rolecycle.
//!
//! Identifiers are newtypes over strings so that a role can never be passed
//! where a region is expected.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An opaque role identifier, usually an IAM role ARN.
///
/// No internal structure is interpreted. Two identifiers are equal only when
/// their strings are byte-for-byte equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Create a role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleId({})", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&RoleId> for RoleId {
    fn from(id: &RoleId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for RoleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A cloud region name such as `eu-west-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Region used when nothing else is configured.
    pub const DEFAULT: &'static str = "eu-west-1";

    /// Create a region.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the region name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Region {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How long each assumed credential should stay valid.
///
/// Sent as a request parameter with every assumption. It is not enforced
/// locally; the identity provider decides whether the value is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionDuration(Duration);

impl SessionDuration {
    /// Fifteen minutes, the shortest session STS grants.
    pub const DEFAULT: Self = Self(Duration::from_secs(15 * 60));

    /// Wrap a duration.
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Build from whole minutes.
    pub const fn from_minutes(minutes: u64) -> Self {
        Self(Duration::from_secs(minutes.saturating_mul(60)))
    }

    /// The wrapped duration.
    pub const fn as_duration(&self) -> Duration {
        self.0
    }

    /// Whole seconds, saturated to the `i32` range used on the wire.
    pub fn as_secs_i32(&self) -> i32 {
        i32::try_from(self.0.as_secs()).unwrap_or(i32::MAX)
    }
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
