//! Command line interface.

use std::path::PathBuf;

use clap::Parser;
use rolecycle_core::{Region, RoleId, SessionDuration};
use rolecycle_profile::DEFAULT_PROFILE_NAME;
use tracing::debug;

use crate::config::{ConfigFile, Settings};
use crate::error::ConfigError;
use crate::scheduler::RefreshInterval;

/// Keep a local AWS profile stocked with chained role credentials.
#[derive(Debug, Clone, Parser)]
#[command(name = "rolecycle", version)]
pub struct Cli {
    /// Path to a config file; replaces --role, --use, --refresh and --region
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Refresh credentials every N minutes
    #[arg(long, value_name = "MINUTES", default_value_t = 12, allow_negative_numbers = true)]
    pub refresh: i64,

    /// AWS region used for STS and written to the profile
    #[arg(long, default_value = Region::DEFAULT)]
    pub region: String,

    /// Role ARN to assume (repeatable, at least 2 required)
    #[arg(long = "role", value_name = "ARN")]
    pub roles: Vec<String>,

    /// Role ARN with meaningful permissions (repeatable, must also be a --role)
    #[arg(long = "use", value_name = "ARN")]
    pub usable: Vec<String>,

    /// Profile the credentials are written to
    #[arg(long, default_value = DEFAULT_PROFILE_NAME)]
    pub profile_name: String,

    /// Validity requested for each assumed session, in minutes
    #[arg(long, value_name = "MINUTES", default_value_t = 15)]
    pub session_duration: u64,

    /// Verbose log output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve flags and the optional config file into [`Settings`].
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let profile_name = self.profile_name.clone();
        let session_duration = SessionDuration::from_minutes(self.session_duration);

        if let Some(path) = &self.config {
            let resolved = ConfigFile::load(path)?.resolve()?;
            debug!(
                roles = resolved.roles.len(),
                usable = resolved.usable.len(),
                "using roles from config file"
            );

            return Ok(Settings {
                roles: resolved.roles,
                usable: resolved.usable,
                refresh: RefreshInterval::from_minutes(resolved.refresh_minutes),
                region: resolved.region,
                profile_name,
                session_duration,
            });
        }

        Ok(Settings {
            roles: self.roles.iter().map(|arn| RoleId::from(arn.as_str())).collect(),
            usable: self.usable.iter().map(|arn| RoleId::from(arn.as_str())).collect(),
            refresh: RefreshInterval::from_minutes(self.refresh),
            region: Region::from(self.region.as_str()),
            profile_name,
            session_duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flags_to_settings() {
        let cli = Cli::parse_from([
            "rolecycle",
            "--role",
            "arn:aws:iam::0987654321:role/role-a",
            "--role",
            "arn:aws:iam::0987654321:role/role-b",
            "--use",
            "arn:aws:iam::0987654321:role/role-b",
            "--refresh",
            "5",
        ]);

        let settings = cli.settings().unwrap();
        assert_eq!(settings.roles.len(), 2);
        assert_eq!(
            settings.usable,
            vec![RoleId::from("arn:aws:iam::0987654321:role/role-b")]
        );
        assert_eq!(settings.refresh.as_duration(), Duration::from_secs(300));
        assert_eq!(settings.region, Region::default());
        assert_eq!(settings.profile_name, DEFAULT_PROFILE_NAME);
        assert_eq!(settings.session_duration, SessionDuration::DEFAULT);
    }

    #[test]
    fn test_low_refresh_is_clamped() {
        let cli = Cli::parse_from(["rolecycle", "--refresh", "-3"]);
        assert_eq!(
            cli.settings().unwrap().refresh.as_duration(),
            RefreshInterval::MIN
        );
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["rolecycle", "--config", "./file-does-not-exist.toml"]);
        assert!(matches!(cli.settings(), Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
