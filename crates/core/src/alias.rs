//! Endpoint aliases
//!
//! An alias names a storage endpoint together with the credentials and
//! connection tuning used to reach it. Leaving out the endpoint targets AWS;
//! leaving out the keys hands credential discovery to the SDK (environment
//! variables, shared profiles, instance metadata).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};
use crate::path::is_valid_alias_name;
use crate::region::{resolve_region, DEFAULT_REGION};

/// How bucket names are placed in request URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketLookup {
    /// Path style for custom endpoints, virtual-host style for AWS
    #[default]
    Auto,
    /// `https://endpoint/bucket/key`
    Path,
    /// `https://bucket.endpoint/key`
    Dns,
}

impl BucketLookup {
    pub const fn as_str(self) -> &'static str {
        match self {
            BucketLookup::Auto => "auto",
            BucketLookup::Path => "path",
            BucketLookup::Dns => "dns",
        }
    }
}

impl fmt::Display for BucketLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketLookup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(BucketLookup::Auto),
            "path" => Ok(BucketLookup::Path),
            "dns" | "virtual" => Ok(BucketLookup::Dns),
            _ => Err(Error::InvalidArgument(format!(
                "Unknown bucket lookup '{s}'. Expected auto, path or dns"
            ))),
        }
    }
}

/// SDK retry tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per request, including the first
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 100,
        }
    }
}

/// SDK timeouts in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub read_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 5_000,
            read_ms: 30_000,
        }
    }
}

/// A named storage endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,

    /// Custom endpoint URL; AWS when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Region code, already resolved from any friendly name
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    #[serde(default)]
    pub bucket_lookup: BucketLookup,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Alias {
    /// An AWS alias in the default region using ambient credentials
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            region: default_region(),
            access_key: None,
            secret_key: None,
            bucket_lookup: BucketLookup::Auto,
            retry: None,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the region, accepting friendly names such as `frankfurt`
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = resolve_region(region);
        self
    }

    /// Access and secret key, when both are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        self.access_key
            .as_deref()
            .zip(self.secret_key.as_deref())
    }

    pub fn force_path_style(&self) -> bool {
        match self.bucket_lookup {
            BucketLookup::Path => true,
            BucketLookup::Dns => false,
            // custom endpoints rarely have wildcard DNS
            BucketLookup::Auto => self.endpoint.is_some(),
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    /// Reject aliases that could never connect
    pub fn validate(&self) -> Result<()> {
        if !is_valid_alias_name(&self.name) {
            return Err(Error::InvalidArgument(format!(
                "Invalid alias name '{}'. Use letters, digits, '_' or '-'",
                self.name
            )));
        }

        if let Some(endpoint) = &self.endpoint {
            let url = url::Url::parse(endpoint)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::InvalidArgument(format!(
                    "Endpoint '{endpoint}' must use http or https"
                )));
            }
        }

        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::InvalidArgument(
                "Access key and secret key must be given together".into(),
            ));
        }

        if self.retry.as_ref().is_some_and(|r| r.max_attempts == 0) {
            return Err(Error::InvalidArgument(
                "Retry attempts must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Alias storage on top of the configuration file
pub struct AliasManager {
    config: ConfigManager,
}

impl AliasManager {
    pub fn with_config_manager(config: ConfigManager) -> Self {
        Self { config }
    }

    /// Use the configuration file from the environment
    pub fn new() -> Result<Self> {
        Ok(Self::with_config_manager(ConfigManager::new()?))
    }

    pub fn list(&self) -> Result<Vec<Alias>> {
        Ok(self.config.load()?.aliases)
    }

    pub fn get(&self, name: &str) -> Result<Alias> {
        self.list()?
            .into_iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))
    }

    /// Add an alias, replacing one of the same name in place
    pub fn set(&self, alias: Alias) -> Result<()> {
        alias.validate()?;

        let mut config = self.config.load()?;
        match config.aliases.iter_mut().find(|a| a.name == alias.name) {
            Some(existing) => *existing = alias,
            None => config.aliases.push(alias),
        }
        self.config.save(&config)
    }

    /// Remove an alias, returning what was stored
    pub fn remove(&self, name: &str) -> Result<Alias> {
        let mut config = self.config.load()?;
        let index = config
            .aliases
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))?;

        let removed = config.aliases.remove(index);
        self.config.save(&config)?;
        Ok(removed)
    }
}
