//! Configuration: the TOML config file and the resolved runtime settings.
//!
//! A config file holds any number of named profiles and selects one of
//! them. The selected profile's chain lists roles in ring order; roles
//! marked `usable` end a selection pass.
//!
//! ```toml
//! select_profile = "complex"
//!
//! [[profile]]
//! name = "complex"
//! region = "eu-west-1"
//!
//! [profile.chain]
//! ttl = 15
//!
//! [[profile.chain.use]]
//! arn = "arn:aws:iam::0987654321:role/role-a"
//!
//! [[profile.chain.use]]
//! arn = "arn:aws:iam::0987654321:role/role-b"
//! usable = true
//! ```

use std::path::Path;

use rolecycle_core::{CoreError, Region, RoleId, RolePool, SessionDuration, UsableSet};
use rolecycle_identity::{AuthorityChain, IdentityProvider};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, CycleError};
use crate::scheduler::RefreshInterval;
use crate::selector::RoleSelector;

/// Refresh interval, in minutes, when a chain does not set `ttl`.
pub const DEFAULT_REFRESH_MINUTES: i64 = 12;

/// A parsed config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Name of the profile to run.
    #[serde(default)]
    pub select_profile: String,
    #[serde(default, rename = "profile")]
    pub profiles: Vec<ProfileConfig>,
}

/// One `[[profile]]` block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub chain: Option<ChainConfig>,
}

/// The `[profile.chain]` block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// Refresh interval in minutes.
    #[serde(default)]
    pub ttl: Option<i64>,
    #[serde(default, rename = "use")]
    pub roles: Vec<ChainRole>,
}

/// One `[[profile.chain.use]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainRole {
    pub arn: RoleId,
    /// Whether assuming this role ends a pass.
    #[serde(default, alias = "skip")]
    pub usable: bool,
}

/// The selected profile flattened into runtime values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    pub refresh_minutes: i64,
    pub region: Region,
    pub roles: Vec<RoleId>,
    pub usable: Vec<RoleId>,
}

impl ConfigFile {
    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config file");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config file contents.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Flatten the selected profile.
    ///
    /// A selected profile without a chain resolves to empty role lists,
    /// which the role pool later rejects.
    pub fn resolve(&self) -> Result<ResolvedChain, ConfigError> {
        if self.select_profile.is_empty() {
            return Err(ConfigError::ProfileNotSelected);
        }

        let profile = self
            .profiles
            .iter()
            .find(|profile| profile.name == self.select_profile)
            .ok_or_else(|| ConfigError::ProfileNotFound(self.select_profile.clone()))?;

        let region = profile.region.clone().unwrap_or_else(|| {
            debug!(profile = %profile.name, region = Region::DEFAULT, "setting default region");
            Region::default()
        });

        let Some(chain) = &profile.chain else {
            debug!(
                profile = %profile.name,
                reason = "no chain defined",
                "skipping profile parsing"
            );
            return Ok(ResolvedChain {
                refresh_minutes: DEFAULT_REFRESH_MINUTES,
                region,
                roles: Vec::new(),
                usable: Vec::new(),
            });
        };

        let refresh_minutes = match chain.ttl {
            Some(ttl) if ttl != 0 => ttl,
            _ => {
                debug!(
                    profile = %profile.name,
                    ttl = DEFAULT_REFRESH_MINUTES,
                    "setting default ttl"
                );
                DEFAULT_REFRESH_MINUTES
            }
        };

        let roles = chain.roles.iter().map(|role| role.arn.clone()).collect();
        let usable = chain
            .roles
            .iter()
            .filter(|role| role.usable)
            .map(|role| role.arn.clone())
            .collect();

        Ok(ResolvedChain {
            refresh_minutes,
            region,
            roles,
            usable,
        })
    }
}

/// Everything the refresh loop needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Roles in ring order.
    pub roles: Vec<RoleId>,
    /// Roles that end a pass.
    pub usable: Vec<RoleId>,
    pub refresh: RefreshInterval,
    pub region: Region,
    /// Profile the credentials are published under.
    pub profile_name: String,
    pub session_duration: SessionDuration,
}

impl Settings {
    /// Build the role pool and usable set, checking their invariants.
    pub fn role_sets(&self) -> Result<(RolePool, UsableSet), CoreError> {
        let pool = RolePool::new(self.roles.iter())?;
        let usable = UsableSet::new(self.usable.iter(), &pool)?;
        Ok((pool, usable))
    }

    /// Build a selector over `provider`, starting from `ambient`.
    ///
    /// Fails with `MinRoles` or `UnknownUsableRole` before any request is
    /// made.
    pub fn selector<P: IdentityProvider>(
        &self,
        provider: P,
        ambient: P::Authority,
    ) -> Result<RoleSelector<P>, CycleError> {
        let (pool, usable) = self.role_sets()?;
        let chain = AuthorityChain::new(provider, ambient, self.session_duration);

        Ok(RoleSelector::new(pool, usable, chain)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLEX: &str = r#"
        select_profile = "complex"

        [[profile]]
        name = "simple"

        [profile.chain]
        ttl = 5

        [[profile.chain.use]]
        arn = "arn::42::role-a"

        [[profile.chain.use]]
        arn = "arn::42::role-b"

        [[profile]]
        name = "complex"
        region = "us-east-1"

        [profile.chain]
        ttl = 15

        [[profile.chain.use]]
        arn = "arn::42::role-a"

        [[profile.chain.use]]
        arn = "arn::42::role-b"
        usable = true

        [[profile.chain.use]]
        arn = "arn::42::role-c"
        skip = true

        [[profile.chain.use]]
        arn = "arn::42::role-d"

        [[profile]]
        name = "empty-chain"
    "#;

    fn roles(names: &[&str]) -> Vec<RoleId> {
        names.iter().map(|name| RoleId::from(*name)).collect()
    }

    #[test]
    fn test_resolve_selected_profile() {
        let config = ConfigFile::from_toml(COMPLEX).unwrap();
        let resolved = config.resolve().unwrap();

        assert_eq!(resolved.refresh_minutes, 15);
        assert_eq!(resolved.region, Region::from("us-east-1"));
        assert_eq!(
            resolved.roles,
            roles(&["arn::42::role-a", "arn::42::role-b", "arn::42::role-c", "arn::42::role-d"])
        );
        assert_eq!(resolved.usable, roles(&["arn::42::role-b", "arn::42::role-c"]));
    }

    #[test]
    fn test_resolve_applies_defaults() {
        let mut config = ConfigFile::from_toml(COMPLEX).unwrap();
        config.select_profile = "simple".to_string();
        config.profiles[0].chain.as_mut().unwrap().ttl = None;

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.refresh_minutes, DEFAULT_REFRESH_MINUTES);
        assert_eq!(resolved.region, Region::default());
        assert!(resolved.usable.is_empty());
    }

    #[test]
    fn test_resolve_empty_chain() {
        let mut config = ConfigFile::from_toml(COMPLEX).unwrap();
        config.select_profile = "empty-chain".to_string();

        let resolved = config.resolve().unwrap();
        assert!(resolved.roles.is_empty());
        assert!(resolved.usable.is_empty());
    }

    #[test]
    fn test_resolve_requires_selection() {
        let config = ConfigFile::from_toml("[[profile]]\nname = \"a\"\n").unwrap();
        assert!(matches!(config.resolve(), Err(ConfigError::ProfileNotSelected)));
    }

    #[test]
    fn test_resolve_unknown_profile() {
        let config = ConfigFile::from_toml("select_profile = \"ghost\"\n").unwrap();
        assert!(matches!(
            config.resolve(),
            Err(ConfigError::ProfileNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(ConfigFile::from_toml("select_profile = \"a\"\nrefresh = 3\n").is_err());
    }

    #[test]
    fn test_settings_validate_roles() {
        let settings = Settings {
            roles: roles(&["a"]),
            usable: Vec::new(),
            refresh: RefreshInterval::from_minutes(12),
            region: Region::default(),
            profile_name: "p".to_string(),
            session_duration: SessionDuration::DEFAULT,
        };
        let provider = rolecycle_identity::MemoryProvider::new();
        let ambient = rolecycle_identity::MemoryProvider::ambient("operator");

        assert!(matches!(
            settings.selector(provider, ambient),
            Err(CycleError::Core(rolecycle_core::CoreError::MinRoles { found: 1, .. }))
        ));
    }
}
