//! Stack configuration
//!
//! Settings are layered: built-in defaults, then `frontstack.kdl`, then
//! environment variables, then explicit overrides from the command line.

pub mod discovery;
pub mod error;
pub mod parser;

pub use discovery::{CONFIG_ENV, find_config_file};
pub use error::*;
pub use parser::{load_config, parse_config};

use frontstack_core::{Prefix, Tags};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_PREFIX: &str = "frontend";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Suffix of the stack name, `{prefix}-FrontendInfraStack`
pub const STACK_NAME_SUFFIX: &str = "FrontendInfraStack";

/// Resolved settings for one frontend stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    pub prefix: String,
    pub account: Option<String>,
    pub region: String,
    pub domain: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub certificate_arn: Option<String>,
    /// Extra tags applied to every taggable resource
    pub tags: BTreeMap<String, String>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            account: None,
            region: DEFAULT_REGION.to_string(),
            domain: None,
            hosted_zone_id: None,
            certificate_arn: None,
            tags: BTreeMap::new(),
        }
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub prefix: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
    pub domain: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub certificate_arn: Option<String>,
}

impl StackConfig {
    /// Load from `path` if given, otherwise from a discovered config file
    /// (defaults when none exists), then layer the process environment on
    /// top. Returns the file that was read, if any.
    pub fn resolve(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let (mut config, source) = match path {
            Some(path) => (load_config(path)?, Some(path.to_path_buf())),
            None => match find_config_file() {
                Ok(found) => (load_config(&found)?, Some(found)),
                Err(ConfigError::ConfigFileNotFound) => {
                    debug!("no config file, using defaults");
                    (StackConfig::default(), None)
                }
                Err(e) => return Err(e),
            },
        };

        config.apply_env();
        if let Some(source) = &source {
            info!(path = %source.display(), prefix = %config.prefix, "config resolved");
        }
        Ok((config, source))
    }

    /// Layer the process environment on top
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Layer environment values from `lookup` on top. Empty values count
    /// as unset.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(prefix) = get("PREFIX") {
            self.prefix = prefix;
        }
        if let Some(account) = get("CDK_DEFAULT_ACCOUNT").or_else(|| get("AWS_ACCOUNT_ID")) {
            self.account = Some(account);
        }
        if let Some(region) = get("CDK_DEFAULT_REGION").or_else(|| get("AWS_REGION")) {
            self.region = region;
        }
        if let Some(domain) = get("DOMAIN_NAME") {
            self.domain = Some(domain);
        }
        if let Some(zone) = get("HOSTED_ZONE_ID") {
            self.hosted_zone_id = Some(zone);
        }
        if let Some(arn) = get("CERTIFICATE_ARN") {
            self.certificate_arn = Some(arn);
        }
    }

    /// Layer command-line values on top
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(prefix) = overrides.prefix {
            self.prefix = prefix;
        }
        if overrides.account.is_some() {
            self.account = overrides.account;
        }
        if let Some(region) = overrides.region {
            self.region = region;
        }
        if overrides.domain.is_some() {
            self.domain = overrides.domain;
        }
        if overrides.hosted_zone_id.is_some() {
            self.hosted_zone_id = overrides.hosted_zone_id;
        }
        if overrides.certificate_arn.is_some() {
            self.certificate_arn = overrides.certificate_arn;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.prefix()?;

        if let Some(account) = &self.account {
            if account.len() != 12 || !account.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidValue {
                    field: "account",
                    reason: format!("expected a 12-digit account id, got '{}'", account),
                });
            }
        }

        if self.region.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "region",
                reason: "must not be empty".to_string(),
            });
        }

        if self.hosted_zone_id.is_some() && self.domain.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "hosted-zone-id",
                reason: "requires a domain".to_string(),
            });
        }

        Ok(())
    }

    pub fn prefix(&self) -> Result<Prefix> {
        Prefix::new(self.prefix.as_str()).map_err(|e| ConfigError::InvalidValue {
            field: "prefix",
            reason: e.to_string(),
        })
    }

    pub fn stack_name(&self) -> String {
        format!("{}-{}", self.prefix, STACK_NAME_SUFFIX)
    }

    pub fn stack_tags(&self) -> Tags {
        self.tags.iter().collect()
    }
}
