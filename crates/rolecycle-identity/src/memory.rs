//! A scripted in-memory identity provider for testing.
//!
//! Roles are registered up front with an outcome. Assuming an unregistered
//! role is denied. A role can also be restricted to a single trusted
//! principal, which models trust policies that only admit the previous hop
//! of a chain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use async_trait::async_trait;
use rolecycle_core::{Credentials, RoleId, SessionDuration};

use crate::error::ProviderError;
use crate::provider::{Assumed, IdentityProvider};

/// Authority handed out by [`MemoryProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAuthority {
    principal: String,
}

impl MemoryAuthority {
    /// The principal this authority acts as.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

/// One recorded `assume_role` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeCall {
    /// Role that was requested.
    pub role: RoleId,
    /// Principal the request was made as.
    pub principal: String,
    /// Requested session duration.
    pub duration: SessionDuration,
    /// Whether credentials were issued.
    pub granted: bool,
}

#[derive(Debug, Clone)]
enum Rule {
    Allow,
    Deny(String),
    TrustOnly(String),
}

#[derive(Debug, Default)]
struct Inner {
    rules: HashMap<RoleId, Rule>,
    calls: Vec<AssumeCall>,
    /// access key id -> role it was issued for
    issued: HashMap<String, RoleId>,
}

/// In-memory [`IdentityProvider`].
///
/// Cloning shares state, so a test can keep one handle for inspection while
/// the chain owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryProvider {
    /// Create a provider that denies everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// An ambient authority acting as `principal`.
    pub fn ambient(principal: impl Into<String>) -> MemoryAuthority {
        MemoryAuthority {
            principal: principal.into(),
        }
    }

    /// Let anyone assume `role`.
    pub fn allow(self, role: impl Into<RoleId>) -> Self {
        self.set_rule(role.into(), Rule::Allow);
        self
    }

    /// Refuse every request for `role` with `reason`.
    pub fn deny(self, role: impl Into<RoleId>, reason: impl Into<String>) -> Self {
        self.set_rule(role.into(), Rule::Deny(reason.into()));
        self
    }

    /// Only let `principal` assume `role`.
    pub fn trust(self, role: impl Into<RoleId>, principal: impl Into<String>) -> Self {
        self.set_rule(role.into(), Rule::TrustOnly(principal.into()));
        self
    }

    /// Change the outcome for `role` on a shared handle.
    pub fn set_denied(&self, role: impl Into<RoleId>, reason: impl Into<String>) {
        self.set_rule(role.into(), Rule::Deny(reason.into()));
    }

    /// Every request seen so far, in order.
    pub fn calls(&self) -> Vec<AssumeCall> {
        self.lock().calls.clone()
    }

    /// Roles that were successfully assumed, in order.
    pub fn granted_roles(&self) -> Vec<RoleId> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.granted)
            .map(|call| call.role.clone())
            .collect()
    }

    /// The role `credentials` were issued for, if this provider issued them.
    pub fn issued_for(&self, credentials: &Credentials) -> Option<RoleId> {
        self.lock().issued.get(credentials.access_key_id()).cloned()
    }

    fn set_rule(&self, role: RoleId, rule: Rule) {
        self.lock().rules.insert(role, rule);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    type Authority = MemoryAuthority;

    async fn assume_role(
        &self,
        authority: &MemoryAuthority,
        role: &RoleId,
        duration: SessionDuration,
    ) -> Result<Assumed<MemoryAuthority>, ProviderError> {
        let mut inner = self.lock();

        let verdict = match inner.rules.get(role) {
            Some(Rule::Allow) => Ok(()),
            Some(Rule::Deny(reason)) => Err(reason.clone()),
            Some(Rule::TrustOnly(trusted)) if trusted == &authority.principal => Ok(()),
            Some(Rule::TrustOnly(_)) => Err(format!(
                "{} is not trusted by {role}",
                authority.principal
            )),
            None => Err(format!("no such role: {role}")),
        };

        inner.calls.push(AssumeCall {
            role: role.clone(),
            principal: authority.principal.clone(),
            duration,
            granted: verdict.is_ok(),
        });
        verdict.map_err(ProviderError::AccessDenied)?;

        let serial = inner.issued.len() + 1;
        let access_key_id = format!("ASIAMEMORY{serial:010}");
        inner.issued.insert(access_key_id.clone(), role.clone());

        let credentials = Credentials::new(
            access_key_id,
            format!("secret-{serial}"),
            format!("token-{serial}"),
            Some(SystemTime::now() + duration.as_duration()),
        );

        Ok(Assumed {
            credentials,
            authority: MemoryAuthority {
                principal: role.to_string(),
            },
        })
    }

    async fn caller_identity(&self, authority: &MemoryAuthority) -> Result<String, ProviderError> {
        Ok(authority.principal.clone())
    }
}
