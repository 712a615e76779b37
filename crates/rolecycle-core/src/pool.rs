//! The role pool: a fixed ring of roles with a single cursor.

use crate::error::{CoreError, Result};
use crate::types::RoleId;

/// A circular sequence of roles.
///
/// The pool size is fixed at construction and is always at least
/// [`RolePool::MIN_ROLES`]. The cursor always points at a valid index and
/// only moves forward, wrapping at the end. Duplicate identifiers are kept
/// as separate positions.
#[derive(Debug, Clone)]
pub struct RolePool {
    roles: Vec<RoleId>,
    cursor: usize,
}

impl RolePool {
    /// Smallest pool that can be cycled.
    pub const MIN_ROLES: usize = 2;

    /// Build a pool from roles in configured order.
    ///
    /// Fails with [`CoreError::MinRoles`] when fewer than two roles are given.
    pub fn new<I, R>(roles: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        let roles: Vec<RoleId> = roles.into_iter().map(Into::into).collect();
        if roles.len() < Self::MIN_ROLES {
            return Err(CoreError::MinRoles {
                min: Self::MIN_ROLES,
                found: roles.len(),
            });
        }

        Ok(Self { roles, cursor: 0 })
    }

    /// Return the role under the cursor and move the cursor forward.
    pub fn advance(&mut self) -> RoleId {
        let role = self.roles[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.roles.len();
        role
    }

    /// The role the next [`advance`](Self::advance) will return.
    pub fn peek(&self) -> &RoleId {
        &self.roles[self.cursor]
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All roles in configured order.
    pub fn roles(&self) -> &[RoleId] {
        &self.roles
    }

    /// Number of positions in the ring.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether `role` appears anywhere in the pool.
    pub fn contains(&self, role: &RoleId) -> bool {
        self.roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pool_requires_two_roles() {
        let empty: [&str; 0] = [];
        assert_eq!(
            RolePool::new(empty).unwrap_err(),
            CoreError::MinRoles { min: 2, found: 0 }
        );
        assert_eq!(
            RolePool::new(["role-a"]).unwrap_err(),
            CoreError::MinRoles { min: 2, found: 1 }
        );
        assert!(RolePool::new(["role-a", "role-b"]).is_ok());
    }

    #[test]
    fn test_pool_advance_wraps() {
        let mut pool = RolePool::new(["role-a", "role-b", "role-c"]).unwrap();

        assert_eq!(pool.advance().as_str(), "role-a");
        assert_eq!(pool.advance().as_str(), "role-b");
        assert_eq!(pool.advance().as_str(), "role-c");
        assert_eq!(pool.cursor(), 0);
        assert_eq!(pool.advance().as_str(), "role-a");
        assert_eq!(pool.peek().as_str(), "role-b");
    }

    #[test]
    fn test_pool_keeps_duplicates() {
        let mut pool = RolePool::new(["role-a", "role-a"]).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.advance(), pool.advance());
        assert_eq!(pool.cursor(), 0);
    }

    proptest! {
        #[test]
        fn prop_advance_visits_every_role_in_order(
            roles in prop::collection::vec("[a-z]{1,8}", 2..16)
        ) {
            let mut pool = RolePool::new(roles.clone()).unwrap();

            for expected in &roles {
                let got = pool.advance();
                prop_assert_eq!(got.as_str(), expected.as_str());
            }
            let wrapped = pool.advance();
            prop_assert_eq!(wrapped.as_str(), roles[0].as_str());
        }

        #[test]
        fn prop_short_pools_are_rejected(roles in prop::collection::vec("[a-z]{1,8}", 0..2)) {
            let is_min_roles = matches!(RolePool::new(roles), Err(CoreError::MinRoles { .. }));
            prop_assert!(is_min_roles);
        }

        #[test]
        fn prop_cursor_stays_in_bounds(
            roles in prop::collection::vec("[a-z]{1,8}", 2..8),
            steps in 0usize..64,
        ) {
            let mut pool = RolePool::new(roles).unwrap();
            for _ in 0..steps {
                pool.advance();
                prop_assert!(pool.cursor() < pool.len());
            }
            prop_assert_eq!(pool.cursor(), steps % pool.len());
        }
    }
}
