//! `rolecycle` binary: parse flags, start the refresh loop, stop on signal.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rolecycle::{app, shutdown, Cli};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Pause before exiting so in-flight log lines and child processes settle.
const CLEANUP_WAIT: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => {
            info!("application terminated gracefully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "rolecycle stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings().context("failed to load configuration")?;

    let cancel = CancellationToken::new();
    let listener = shutdown::spawn_signal_listener(cancel.clone());

    info!(version = env!("CARGO_PKG_VERSION"), "starting app");
    let mut scheduler = app::connect(&settings)
        .await
        .context("failed to initialize app")?;

    let outcome = scheduler.run(cancel.clone(), settings.refresh).await;

    info!("cleaning up resources...");
    cancel.cancel();
    shutdown::join_listener(listener).await;
    tokio::time::sleep(CLEANUP_WAIT).await;

    outcome.context("refresh loop failed")
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}
