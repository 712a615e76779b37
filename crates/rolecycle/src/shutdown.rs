//! Termination signal handling.
//!
//! A background task waits for a termination signal and fires the
//! cancellation token consumed by the refresh loop. It never touches the
//! loop's state.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Spawn a task that cancels `token` on SIGINT, SIGTERM or SIGHUP.
///
/// The task also exits quietly if `token` is cancelled by someone else.
pub fn spawn_signal_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = shutdown_signal() => {
                match result {
                    Ok(name) => info!(signal = name, "signal received, shutting down..."),
                    Err(err) => warn!(error = %err, "signal handler failed, shutting down..."),
                }
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}

/// Wait for the listener task to finish.
///
/// Returns `false`, after logging, if the task panicked or was aborted.
pub async fn join_listener(listener: JoinHandle<()>) -> bool {
    match listener.await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "signal listener did not stop cleanly");
            false
        }
    }
}

/// Wait for the first termination signal and return its name.
#[cfg(unix)]
pub async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut hangup = signal(SignalKind::hangup())?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = hangup.recv() => "SIGHUP",
    };
    Ok(name)
}

/// Wait for Ctrl-C; the only signal available off unix.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listener_exits_when_token_cancelled() {
        let token = CancellationToken::new();
        let handle = spawn_signal_listener(token.clone());

        token.cancel();
        assert!(join_listener(handle).await);
    }

    #[tokio::test]
    async fn test_join_reports_panicked_listener() {
        let handle = tokio::spawn(async {
            panic!("listener crashed");
        });

        assert!(!join_listener(handle).await);
    }
}
