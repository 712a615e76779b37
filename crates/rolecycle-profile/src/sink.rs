//! Credential sink trait.

use std::sync::Arc;

use async_trait::async_trait;
use rolecycle_core::{Credentials, Region};

use crate::error::Result;

/// Destination for refreshed credentials.
///
/// Implementations must reject credentials with a missing field as
/// [`SinkError::InvalidCredential`](crate::SinkError::InvalidCredential)
/// before writing anything.
#[async_trait]
pub trait CredentialSink: Send + Sync {
    /// Publish `credentials` for use in `region`.
    async fn publish(&self, credentials: &Credentials, region: &Region) -> Result<()>;
}

#[async_trait]
impl<S: CredentialSink + ?Sized> CredentialSink for Arc<S> {
    async fn publish(&self, credentials: &Credentials, region: &Region) -> Result<()> {
        (**self).publish(credentials, region).await
    }
}
