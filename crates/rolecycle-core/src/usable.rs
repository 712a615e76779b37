//! The usable set: roles that carry meaningful permissions.

use std::collections::HashSet;

use crate::error::{CoreError, Result};
use crate::pool::RolePool;
use crate::types::RoleId;

/// Roles that end a selection pass once assumed.
///
/// Every member is guaranteed to be present in the pool the set was built
/// against. An empty set means "accept the first role that assumes".
#[derive(Debug, Clone, Default)]
pub struct UsableSet {
    roles: HashSet<RoleId>,
}

impl UsableSet {
    /// Build a usable set, checking every entry against `pool`.
    ///
    /// Fails with [`CoreError::UnknownUsableRole`] on the first entry that
    /// the pool does not contain.
    pub fn new<I, R>(roles: I, pool: &RolePool) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        let mut set = HashSet::new();
        for role in roles {
            let role = role.into();
            if !pool.contains(&role) {
                return Err(CoreError::UnknownUsableRole(role));
            }
            set.insert(role);
        }

        Ok(Self { roles: set })
    }

    /// A set with no preference.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `role` is usable.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Number of distinct usable roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Iterate over the members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleId> {
        self.roles.iter()
    }
}
