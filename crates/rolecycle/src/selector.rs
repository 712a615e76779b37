//! Role selection: one assume-until-usable pass per call.
//!
//! A pass advances the pool and assumes each role through the authority
//! chain until it lands on a usable role (or on the first success when the
//! usable set is empty). Nothing is rolled back on failure: the cursor and
//! the chain's authority stay where the failing hop left them, and the next
//! pass resumes from there.

use rolecycle_core::{CoreError, Credentials, RoleId, RolePool, UsableSet};
use rolecycle_identity::{AuthorityChain, IdentityProvider, Result};
use tracing::{debug, info};

/// Outcome of a successful pass.
#[derive(Debug, Clone)]
pub struct Selection {
    /// The last role assumed, the one the credentials belong to.
    pub role: RoleId,
    /// Credentials for `role`.
    pub credentials: Credentials,
    /// Number of roles assumed during the pass.
    pub attempts: usize,
}

/// Drives the pool, the usable set and the chain for one pass at a time.
pub struct RoleSelector<P: IdentityProvider> {
    pool: RolePool,
    usable: UsableSet,
    chain: AuthorityChain<P>,
}

impl<P: IdentityProvider> RoleSelector<P> {
    /// Assemble a selector.
    ///
    /// Fails with [`CoreError::UnknownUsableRole`] if `usable` names a role
    /// that `pool` does not contain.
    pub fn new(
        pool: RolePool,
        usable: UsableSet,
        chain: AuthorityChain<P>,
    ) -> std::result::Result<Self, CoreError> {
        if let Some(stray) = usable.iter().find(|role| !pool.contains(role)) {
            return Err(CoreError::UnknownUsableRole(stray.clone()));
        }

        Ok(Self {
            pool,
            usable,
            chain,
        })
    }

    /// Run one pass and return the winning credentials.
    ///
    /// With a non-empty usable set this keeps walking the ring until a
    /// usable role is assumed or an assumption fails; there is no cap on
    /// the number of hops.
    pub async fn select_next(&mut self) -> Result<Selection> {
        let mut attempts = 0;

        loop {
            let role = self.pool.advance();
            info!(role = %role, "trying to assume role");

            let credentials = self.chain.assume(&role).await?;
            attempts += 1;

            if self.usable.is_empty() {
                debug!(role = %role, "no usable roles configured, accepting first success");
                return Ok(Selection {
                    role,
                    credentials,
                    attempts,
                });
            }

            if self.usable.contains(&role) {
                info!(role = %role, attempts, "assumed usable role");
                return Ok(Selection {
                    role,
                    credentials,
                    attempts,
                });
            }

            debug!(role = %role, "role is not usable, continuing");
        }
    }

    /// The role pool.
    pub fn pool(&self) -> &RolePool {
        &self.pool
    }

    /// The usable set.
    pub fn usable(&self) -> &UsableSet {
        &self.usable
    }

    /// The authority chain.
    pub fn chain(&self) -> &AuthorityChain<P> {
        &self.chain
    }
}
