//! Identity provider abstraction.
//!
//! A provider is a black box: given the current authority and a role it
//! either returns new credentials together with an authority acting as that
//! role, or fails. Providers never retry on their own.

use async_trait::async_trait;
use rolecycle_core::{Credentials, RoleId, SessionDuration};

use crate::error::ProviderError;

/// Outcome of a successful assumption.
#[derive(Debug)]
pub struct Assumed<A> {
    /// Credentials issued for the assumed role.
    pub credentials: Credentials,
    /// An authority that acts as the assumed role.
    pub authority: A,
}

/// Provider trait for assuming roles.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// "Who we are" for the purpose of issuing requests, e.g. an API client.
    type Authority: Send + Sync;

    /// Assume `role` as `authority`, requesting `duration` of validity.
    async fn assume_role(
        &self,
        authority: &Self::Authority,
        role: &RoleId,
        duration: SessionDuration,
    ) -> Result<Assumed<Self::Authority>, ProviderError>;

    /// The principal (e.g. an ARN) behind `authority`.
    async fn caller_identity(&self, authority: &Self::Authority) -> Result<String, ProviderError>;
}
