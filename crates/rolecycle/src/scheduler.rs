//! The refresh scheduler.
//!
//! Runs one selection pass immediately, then one per interval tick,
//! publishing every result to the credential sink. Any failure ends the
//! run; cancellation ends it cleanly. Cancellation is observed at the top
//! of the loop and while waiting for a tick, never in the middle of a pass.

use std::time::Duration;

use rolecycle_core::Region;
use rolecycle_identity::IdentityProvider;
use rolecycle_profile::CredentialSink;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{CycleError, Result};
use crate::selector::{RoleSelector, Selection};

/// Time between refresh passes, kept within
/// [`RefreshInterval::MIN`]..=[`RefreshInterval::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshInterval(Duration);

impl RefreshInterval {
    /// Shortest supported interval.
    pub const MIN: Duration = Duration::from_secs(60);

    /// Longest supported interval, one day.
    pub const MAX: Duration = Duration::from_secs(24 * 60 * 60);

    /// Wrap `period`, clamped to [`Self::MIN`]..=[`Self::MAX`].
    pub fn new(period: Duration) -> Self {
        Self(period.clamp(Self::MIN, Self::MAX))
    }

    /// Interval of `minutes` minutes. Values below one are clamped up,
    /// values above a day are clamped down.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes < 1 {
            warn!(requested = minutes, "refresh interval too low, setting to 1 minute");
            return Self(Self::MIN);
        }
        let period = Duration::from_secs(minutes.unsigned_abs().saturating_mul(60));
        if period > Self::MAX {
            warn!(requested = minutes, "refresh interval too high, setting to 1 day");
        }
        Self::new(period)
    }

    /// The period.
    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

/// Lifecycle of a [`RefreshScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, not yet run.
    Idle,
    /// Inside `run`.
    Running,
    /// `run` has returned.
    Stopped,
}

/// Periodic driver for a [`RoleSelector`].
pub struct RefreshScheduler<P: IdentityProvider, S: CredentialSink> {
    selector: RoleSelector<P>,
    sink: S,
    /// Region written alongside every credential.
    region: Region,
    state: SchedulerState,
    /// Completed passes, each one published.
    passes: u64,
}

impl<P: IdentityProvider, S: CredentialSink> RefreshScheduler<P, S> {
    /// Create an idle scheduler.
    pub fn new(selector: RoleSelector<P>, sink: S, region: Region) -> Self {
        Self {
            selector,
            sink,
            region,
            state: SchedulerState::Idle,
            passes: 0,
        }
    }

    /// Run until a pass fails or `cancel` fires.
    ///
    /// Returns `Ok(())` on cancellation. The first pass happens before the
    /// first tick; a failure there is as fatal as any later one.
    pub async fn run(
        &mut self,
        cancel: CancellationToken,
        interval: RefreshInterval,
    ) -> Result<()> {
        if self.state != SchedulerState::Idle {
            return Err(CycleError::AlreadyStarted);
        }

        self.state = SchedulerState::Running;
        let result = self.drive(&cancel, interval.as_duration()).await;
        self.state = SchedulerState::Stopped;

        result
    }

    async fn drive(&mut self, cancel: &CancellationToken, period: Duration) -> Result<()> {
        if cancel.is_cancelled() {
            info!("cancelled before the first refresh");
            return Ok(());
        }

        self.refresh().await?;
        info!(pass = self.passes, "initial credentials published");

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if cancel.is_cancelled() {
                break;
            }

            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.refresh().await?;
                    info!(pass = self.passes, "credentials refreshed");
                }
            }
        }

        info!(passes = self.passes, "refresh loop stopped");
        Ok(())
    }

    /// One pass: select, then publish.
    async fn refresh(&mut self) -> Result<Selection> {
        let selection = self.selector.select_next().await?;
        self.sink
            .publish(&selection.credentials, &self.region)
            .await?;

        self.passes += 1;
        debug!(role = %selection.role, attempts = selection.attempts, "published credentials");
        Ok(selection)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of passes that were selected and published.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// The selector being driven.
    pub fn selector(&self) -> &RoleSelector<P> {
        &self.selector
    }

    /// The sink receiving credentials.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Region published with every credential.
    pub fn region(&self) -> &Region {
        &self.region
    }
}
