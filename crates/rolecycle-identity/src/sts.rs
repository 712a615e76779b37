//! AWS STS identity provider.
//!
//! The authority is an STS client. After each `AssumeRole` a fresh client is
//! built from the previous one's config with the returned static
//! credentials swapped in, so the next hop is signed as the assumed role.

use std::time::SystemTime;

use async_trait::async_trait;
use aws_sdk_sts::config::{BehaviorVersion, Credentials as StaticCredentials, Region as SdkRegion};
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client;
use rolecycle_core::{Credentials, Region, RoleId, SessionDuration};
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::{Assumed, IdentityProvider};

/// Session name attached to every assumed-role session.
pub const DEFAULT_SESSION_NAME: &str = "rolecycle";

/// Name under which chained static credentials are reported to the SDK.
const PROVIDER_NAME: &str = "rolecycle-chain";

/// [`IdentityProvider`] backed by the AWS Security Token Service.
#[derive(Debug, Clone)]
pub struct StsProvider {
    region: Region,
    session_name: String,
}

impl StsProvider {
    /// Create a provider issuing requests in `region`.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            session_name: DEFAULT_SESSION_NAME.to_string(),
        }
    }

    /// Override the role session name.
    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = name.into();
        self
    }

    /// Region used for every client.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Load the process's ambient identity from the default credential chain.
    pub async fn ambient(&self) -> Client {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(SdkRegion::new(self.region.as_str().to_string()))
            .load()
            .await;
        Client::new(&config)
    }

    /// Build a client that acts with `credentials`.
    ///
    /// Everything except the credentials is inherited from `base`, so the
    /// region, retry settings and HTTP client of the ambient client carry
    /// through every hop.
    fn client_for(&self, base: &Client, credentials: &Credentials) -> Client {
        let provider = StaticCredentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            Some(credentials.session_token().to_string()),
            credentials.expiration(),
            PROVIDER_NAME,
        );

        let config = base
            .config()
            .to_builder()
            .region(SdkRegion::new(self.region.as_str().to_string()))
            .credentials_provider(provider)
            .build();

        Client::from_conf(config)
    }
}

#[async_trait]
impl IdentityProvider for StsProvider {
    type Authority = Client;

    async fn assume_role(
        &self,
        authority: &Client,
        role: &RoleId,
        duration: SessionDuration,
    ) -> Result<Assumed<Client>, ProviderError> {
        let output = authority
            .assume_role()
            .role_arn(role.as_str())
            .role_session_name(&self.session_name)
            .duration_seconds(duration.as_secs_i32())
            .send()
            .await
            .map_err(|err| ProviderError::Service(DisplayErrorContext(&err).to_string()))?;

        let issued = output
            .credentials()
            .ok_or(ProviderError::MissingCredentials)?;
        let expiration = SystemTime::try_from(*issued.expiration()).ok();

        let credentials = Credentials::new(
            issued.access_key_id(),
            issued.secret_access_key(),
            issued.session_token(),
            expiration,
        );

        debug!(role = %role, region = %self.region, "building client for assumed role");
        let authority = self.client_for(authority, &credentials);

        Ok(Assumed {
            credentials,
            authority,
        })
    }

    async fn caller_identity(&self, authority: &Client) -> Result<String, ProviderError> {
        let output = authority
            .get_caller_identity()
            .send()
            .await
            .map_err(|err| ProviderError::Service(DisplayErrorContext(&err).to_string()))?;

        output
            .arn()
            .map(str::to_string)
            .ok_or(ProviderError::MissingIdentity)
    }
}
