//! External command execution.

use async_trait::async_trait;
use tokio::process::Command;

/// Runs an external program and returns its combined output.
///
/// A non-zero exit status is an error whose message carries the program's
/// output.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[String]) -> std::io::Result<Vec<u8>>;
}

/// [`CommandExecutor`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

#[async_trait]
impl CommandExecutor for TokioExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> std::io::Result<Vec<u8>> {
        let output = Command::new(program).args(args).output().await?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!(
                    "{program} exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&combined).trim()
                ),
            ));
        }

        Ok(combined)
    }
}
