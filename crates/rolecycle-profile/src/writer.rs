//! Profile writer backed by the `aws` command line tool.
//!
//! Each credential field is written with one `aws configure set` call into
//! the shared config and credentials files, under a dedicated profile name.

use async_trait::async_trait;
use rolecycle_core::{Credentials, Region};
use tracing::{debug, error};

use crate::error::{Result, SinkError};
use crate::executor::{CommandExecutor, TokioExecutor};
use crate::sink::CredentialSink;

/// Profile name used when none is configured.
pub const DEFAULT_PROFILE_NAME: &str = "rolecycle-jump-credentials";

/// Program invoked for every write.
const AWS_CLI: &str = "aws";

/// Writes credentials to a named AWS CLI profile.
#[derive(Debug, Clone)]
pub struct ProfileWriter<E: CommandExecutor = TokioExecutor> {
    executor: E,
    profile_name: String,
}

impl ProfileWriter<TokioExecutor> {
    /// Writer for the default profile using real processes.
    pub fn new() -> Self {
        Self::with_executor(TokioExecutor)
    }
}

impl Default for ProfileWriter<TokioExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> ProfileWriter<E> {
    /// Writer for the default profile using `executor`.
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor,
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
        }
    }

    /// Write to `name` instead of the default profile.
    pub fn profile_name(mut self, name: impl Into<String>) -> Self {
        self.profile_name = name.into();
        self
    }

    /// The profile being written.
    pub fn profile(&self) -> &str {
        &self.profile_name
    }

    /// The executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn set(&self, key: &'static str, value: &str) -> Result<()> {
        let args = vec![
            "configure".to_string(),
            "set".to_string(),
            key.to_string(),
            value.to_string(),
            "--profile".to_string(),
            self.profile_name.clone(),
        ];

        self.executor
            .execute(AWS_CLI, &args)
            .await
            .map_err(|err| {
                error!(profile = %self.profile_name, setting = key, "profile write failed");
                SinkError::WriteFailed {
                    profile: self.profile_name.clone(),
                    setting: key,
                    reason: err.to_string(),
                }
            })?;

        Ok(())
    }
}

#[async_trait]
impl<E: CommandExecutor> CredentialSink for ProfileWriter<E> {
    async fn publish(&self, credentials: &Credentials, region: &Region) -> Result<()> {
        if let Some(field) = credentials.missing_field() {
            return Err(SinkError::InvalidCredential { field });
        }

        self.set("aws_access_key_id", credentials.access_key_id())
            .await?;
        self.set("aws_secret_access_key", credentials.secret_access_key())
            .await?;
        self.set("aws_session_token", credentials.session_token())
            .await?;
        self.set("region", region.as_str()).await?;

        debug!(profile = %self.profile_name, "aws credentials updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records invocations and optionally fails on a given setting.
    #[derive(Clone, Default)]
    struct RecordingExecutor {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl CommandExecutor for RecordingExecutor {
        async fn execute(&self, program: &str, args: &[String]) -> std::io::Result<Vec<u8>> {
            assert_eq!(program, "aws");
            self.calls.lock().unwrap().push(args.to_vec());
            match self.fail_on {
                Some(key) if args[2] == key => Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "failed to write profile",
                )),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("access-key-id", "secret-access-key", "session-token", None)
    }

    #[tokio::test]
    async fn test_writes_all_settings() {
        let executor = RecordingExecutor::default();
        let writer = ProfileWriter::with_executor(executor.clone()).profile_name("testing-profile");

        writer
            .publish(&credentials(), &Region::from("eu-west-1"))
            .await
            .unwrap();

        let calls = executor.calls.lock().unwrap();
        let keys: Vec<&str> = calls.iter().map(|args| args[2].as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "aws_access_key_id",
                "aws_secret_access_key",
                "aws_session_token",
                "region"
            ]
        );
        assert_eq!(
            calls[3],
            vec!["configure", "set", "region", "eu-west-1", "--profile", "testing-profile"]
        );
    }

    #[tokio::test]
    async fn test_rejects_missing_field_before_writing() {
        let executor = RecordingExecutor::default();
        let writer = ProfileWriter::with_executor(executor.clone());
        let incomplete = Credentials::new("access-key-id", "", "session-token", None);

        let err = writer
            .publish(&incomplete, &Region::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SinkError::InvalidCredential {
                field: "secret_access_key"
            }
        ));
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_stops_and_hides_secret() {
        let executor = RecordingExecutor {
            fail_on: Some("aws_secret_access_key"),
            ..Default::default()
        };
        let writer = ProfileWriter::with_executor(executor.clone());

        let err = writer
            .publish(&credentials(), &Region::default())
            .await
            .unwrap_err();

        match &err {
            SinkError::WriteFailed {
                profile, setting, ..
            } => {
                assert_eq!(profile, DEFAULT_PROFILE_NAME);
                assert_eq!(*setting, "aws_secret_access_key");
            }
            other => panic!("expected WriteFailed, got {other:?}"),
        }
        assert!(!err.to_string().contains("secret-access-key"));
        assert_eq!(executor.calls.lock().unwrap().len(), 2);
    }
}
