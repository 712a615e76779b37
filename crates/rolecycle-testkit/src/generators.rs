//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rolecycle_core::RoleId;

use crate::fixtures::role_arn;

/// Generate a role identifier.
pub fn role_id() -> impl Strategy<Value = RoleId> {
    "[a-z][a-z0-9-]{0,15}".prop_map(|name| role_arn(&name))
}

/// Generate a role list of `min..=max` entries, duplicates allowed.
pub fn role_list(min: usize, max: usize) -> impl Strategy<Value = Vec<RoleId>> {
    prop::collection::vec(role_id(), min..=max)
}

/// A valid pool together with a usable subset of it.
#[derive(Debug, Clone)]
pub struct PoolParams {
    pub roles: Vec<RoleId>,
    pub usable: Vec<RoleId>,
}

/// Generate a pool of 2 to 8 roles and a random subset marked usable.
pub fn pool_with_usable() -> impl Strategy<Value = PoolParams> {
    role_list(2, 8)
        .prop_flat_map(|roles| {
            let len = roles.len();
            (Just(roles), prop::collection::vec(any::<bool>(), len))
        })
        .prop_map(|(roles, picks)| {
            let usable = roles
                .iter()
                .zip(picks)
                .filter(|(_, pick)| *pick)
                .map(|(role, _)| role.clone())
                .collect();
            PoolParams { roles, usable }
        })
}
