//! The authority chain.
//!
//! Holds exactly one authority at a time. Every successful assumption
//! replaces it, so the next request is made as the role that was just
//! assumed. Failures leave the held authority untouched.

use rolecycle_core::{Credentials, RoleId, SessionDuration};
use tracing::debug;

use crate::error::{ChainError, Result};
use crate::provider::{Assumed, IdentityProvider};

/// Chained role assumption over an [`IdentityProvider`].
pub struct AuthorityChain<P: IdentityProvider> {
    /// The backend used for every hop.
    provider: P,
    /// Who we currently are.
    authority: P::Authority,
    /// Validity requested for each hop.
    session_duration: SessionDuration,
    /// Number of successful assumptions so far.
    hops: u64,
}

impl<P: IdentityProvider> AuthorityChain<P> {
    /// Start a chain from the process's ambient authority.
    pub fn new(provider: P, ambient: P::Authority, session_duration: SessionDuration) -> Self {
        Self {
            provider,
            authority: ambient,
            session_duration,
            hops: 0,
        }
    }

    /// Assume `role` as the current authority and adopt the result.
    ///
    /// On failure the error is returned as [`ChainError::AssumeFailed`] and
    /// the held authority is unchanged.
    pub async fn assume(&mut self, role: &RoleId) -> Result<Credentials> {
        debug!(role = %role, hop = self.hops, "assuming role");

        let Assumed {
            credentials,
            authority,
        } = self
            .provider
            .assume_role(&self.authority, role, self.session_duration)
            .await
            .map_err(|source| ChainError::AssumeFailed {
                role: role.clone(),
                source,
            })?;

        debug!(role = %role, "replacing authority");
        self.authority = authority;
        self.hops += 1;

        Ok(credentials)
    }

    /// The principal behind the held authority.
    pub async fn whoami(&self) -> Result<String> {
        self.provider
            .caller_identity(&self.authority)
            .await
            .map_err(ChainError::Identity)
    }

    /// Number of successful assumptions performed.
    pub fn hops(&self) -> u64 {
        self.hops
    }

    /// The authority the next assumption will be made as.
    pub fn authority(&self) -> &P::Authority {
        &self.authority
    }

    /// The backend.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validity requested for each hop.
    pub fn session_duration(&self) -> SessionDuration {
        self.session_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::memory::MemoryProvider;

    fn role(name: &str) -> RoleId {
        RoleId::from(name)
    }

    #[tokio::test]
    async fn test_assume_replaces_authority() {
        let provider = MemoryProvider::new().allow("role-a").allow("role-b");
        let mut chain = AuthorityChain::new(
            provider.clone(),
            MemoryProvider::ambient("operator"),
            SessionDuration::DEFAULT,
        );

        assert_eq!(chain.whoami().await.unwrap(), "operator");

        chain.assume(&role("role-a")).await.unwrap();
        assert_eq!(chain.authority().principal(), "role-a");

        chain.assume(&role("role-b")).await.unwrap();
        assert_eq!(chain.whoami().await.unwrap(), "role-b");
        assert_eq!(chain.hops(), 2);

        let calls = provider.calls();
        assert_eq!(calls[0].principal, "operator");
        assert_eq!(calls[1].principal, "role-a");
    }

    #[tokio::test]
    async fn test_failure_keeps_authority() {
        let provider = MemoryProvider::new()
            .allow("role-a")
            .deny("role-b", "not today");
        let mut chain = AuthorityChain::new(
            provider.clone(),
            MemoryProvider::ambient("operator"),
            SessionDuration::DEFAULT,
        );

        chain.assume(&role("role-a")).await.unwrap();
        let err = chain.assume(&role("role-b")).await.unwrap_err();

        match err {
            ChainError::AssumeFailed { role: failed, source } => {
                assert_eq!(failed, role("role-b"));
                assert!(matches!(source, ProviderError::AccessDenied(_)));
            }
            other => panic!("expected AssumeFailed, got {other:?}"),
        }
        assert_eq!(chain.authority().principal(), "role-a");
        assert_eq!(chain.hops(), 1);
    }

    #[tokio::test]
    async fn test_trust_requires_previous_hop() {
        // role-b only trusts role-a, so it cannot be assumed straight away
        let provider = MemoryProvider::new()
            .allow("role-a")
            .trust("role-b", "role-a");
        let mut chain = AuthorityChain::new(
            provider,
            MemoryProvider::ambient("operator"),
            SessionDuration::DEFAULT,
        );

        assert!(chain.assume(&role("role-b")).await.is_err());
        chain.assume(&role("role-a")).await.unwrap();
        assert!(chain.assume(&role("role-b")).await.is_ok());
    }

    #[tokio::test]
    async fn test_session_duration_is_forwarded() {
        let provider = MemoryProvider::new().allow("role-a");
        let duration = SessionDuration::from_minutes(30);
        let mut chain = AuthorityChain::new(
            provider.clone(),
            MemoryProvider::ambient("operator"),
            duration,
        );

        chain.assume(&role("role-a")).await.unwrap();
        assert_eq!(provider.calls()[0].duration, duration);
    }
}
