//! Production wiring: STS for identity, the `aws` CLI for profiles.

use rolecycle_identity::{AuthorityChain, StsProvider};
use rolecycle_profile::ProfileWriter;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::scheduler::RefreshScheduler;
use crate::selector::RoleSelector;

/// Scheduler used by the `rolecycle` binary.
pub type StsScheduler = RefreshScheduler<StsProvider, ProfileWriter>;

/// Build the production scheduler from `settings`.
///
/// The role lists are validated before the ambient identity is loaded, so a
/// bad configuration fails without touching the network.
pub async fn connect(settings: &Settings) -> Result<StsScheduler> {
    let (pool, usable) = settings.role_sets()?;

    let provider = StsProvider::new(settings.region.clone());
    let ambient = provider.ambient().await;
    let chain = AuthorityChain::new(provider, ambient, settings.session_duration);

    match chain.whoami().await {
        Ok(principal) => info!(identity = %principal, "starting from ambient identity"),
        Err(err) => warn!(error = %err, "unable to determine ambient identity"),
    }

    let selector = RoleSelector::new(pool, usable, chain)?;
    let sink = ProfileWriter::new().profile_name(settings.profile_name.as_str());
    info!(
        profile = %sink.profile(),
        roles = selector.pool().len(),
        usable = selector.usable().len(),
        "refresh scheduler ready"
    );

    Ok(RefreshScheduler::new(selector, sink, settings.region.clone()))
}
