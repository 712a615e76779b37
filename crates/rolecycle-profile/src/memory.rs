//! In-memory credential sink.
//!
//! Keeps every published credential. Primarily for testing; it applies the
//! same validation as [`ProfileWriter`](crate::ProfileWriter).

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rolecycle_core::{Credentials, Region};

use crate::error::{Result, SinkError};
use crate::sink::CredentialSink;

/// One successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub credentials: Credentials,
    pub region: Region,
}

#[derive(Debug, Default)]
struct Inner {
    published: Vec<Published>,
    /// Fail once this many publishes have succeeded.
    fail_after: Option<usize>,
}

/// In-memory [`CredentialSink`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` publishes, then fail every following one.
    pub fn fail_after(self, count: usize) -> Self {
        self.lock().fail_after = Some(count);
        self
    }

    /// Everything published so far, oldest first.
    pub fn published(&self) -> Vec<Published> {
        self.lock().published.clone()
    }

    /// The most recent publish.
    pub fn latest(&self) -> Option<Published> {
        self.lock().published.last().cloned()
    }

    /// Number of successful publishes.
    pub fn len(&self) -> usize {
        self.lock().published.len()
    }

    /// Whether nothing has been published.
    pub fn is_empty(&self) -> bool {
        self.lock().published.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CredentialSink for MemorySink {
    async fn publish(&self, credentials: &Credentials, region: &Region) -> Result<()> {
        if let Some(field) = credentials.missing_field() {
            return Err(SinkError::InvalidCredential { field });
        }

        let mut inner = self.lock();
        if inner.fail_after.is_some_and(|limit| inner.published.len() >= limit) {
            return Err(SinkError::WriteFailed {
                profile: "memory".to_string(),
                setting: "aws_access_key_id",
                reason: "sink closed".to_string(),
            });
        }

        inner.published.push(Published {
            credentials: credentials.clone(),
            region: region.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records() {
        let sink = MemorySink::new();
        let creds = Credentials::new("a", "b", "c", None);

        sink.publish(&creds, &Region::default()).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.latest().unwrap().credentials, creds);
    }

    #[tokio::test]
    async fn test_memory_sink_fail_after() {
        let sink = MemorySink::new().fail_after(1);
        let creds = Credentials::new("a", "b", "c", None);

        assert!(sink.publish(&creds, &Region::default()).await.is_ok());
        assert!(matches!(
            sink.publish(&creds, &Region::default()).await,
            Err(SinkError::WriteFailed { .. })
        ));
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_sink_rejects_incomplete() {
        let sink = MemorySink::new();
        let creds = Credentials::new("a", "b", "", None);

        assert!(matches!(
            sink.publish(&creds, &Region::default()).await,
            Err(SinkError::InvalidCredential {
                field: "session_token"
            })
        ));
        assert!(sink.is_empty());
    }
}
