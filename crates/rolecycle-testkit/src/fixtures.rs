//! Test fixtures and helpers.

use rolecycle::{RefreshScheduler, RoleSelector};
use rolecycle_core::{Region, RoleId, RolePool, SessionDuration, UsableSet};
use rolecycle_identity::{AuthorityChain, MemoryProvider};
use rolecycle_profile::MemorySink;

/// Account used in fixture ARNs.
pub const ACCOUNT_ID: &str = "0987654321";

/// Principal the fixture chain starts as.
pub const AMBIENT_PRINCIPAL: &str = "arn:aws:iam::0987654321:user/operator";

/// IAM role ARN for a short role name.
pub fn role_arn(name: &str) -> RoleId {
    RoleId::new(format!("arn:aws:iam::{ACCOUNT_ID}:role/{name}"))
}

/// IAM role ARNs for several short names, in order.
pub fn role_arns(names: &[&str]) -> Vec<RoleId> {
    names.iter().map(|name| role_arn(name)).collect()
}

/// An in-memory provider and sink, shared with everything built from them.
#[derive(Debug, Clone, Default)]
pub struct ChainFixture {
    pub provider: MemoryProvider,
    pub sink: MemorySink,
}

impl ChainFixture {
    /// A fixture whose provider denies every role.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixture whose provider lets anyone assume the named roles.
    pub fn allowing(names: &[&str]) -> Self {
        let provider = names
            .iter()
            .fold(MemoryProvider::new(), |provider, name| provider.allow(role_arn(name)));

        Self {
            provider,
            sink: MemorySink::new(),
        }
    }

    /// Selector over the named roles, starting as [`AMBIENT_PRINCIPAL`].
    pub fn selector(&self, roles: &[&str], usable: &[&str]) -> RoleSelector<MemoryProvider> {
        let pool = RolePool::new(role_arns(roles)).expect("fixture pool");
        let usable = UsableSet::new(role_arns(usable), &pool).expect("fixture usable set");
        let chain = AuthorityChain::new(
            self.provider.clone(),
            MemoryProvider::ambient(AMBIENT_PRINCIPAL),
            SessionDuration::DEFAULT,
        );

        RoleSelector::new(pool, usable, chain).expect("fixture selector")
    }

    /// Scheduler over the named roles, publishing to the fixture sink.
    pub fn scheduler(
        &self,
        roles: &[&str],
        usable: &[&str],
    ) -> RefreshScheduler<MemoryProvider, MemorySink> {
        RefreshScheduler::new(
            self.selector(roles, usable),
            self.sink.clone(),
            Region::default(),
        )
    }

    /// Short names of the roles granted so far, in order.
    pub fn granted(&self) -> Vec<String> {
        self.provider
            .granted_roles()
            .iter()
            .map(|role| short_name(role).to_string())
            .collect()
    }
}

fn short_name(role: &RoleId) -> &str {
    role.as_str()
        .rsplit_once('/')
        .map_or(role.as_str(), |(_, name)| name)
}
