//! Configuration file handling
//!
//! Aliases and output defaults live in one TOML file, `config.toml`, inside
//! `$S3MGR_CONFIG_DIR` or the platform config directory (`~/.config/s3mgr` on
//! Linux). The file may hold static credentials, so it is written owner-only.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alias::Alias;
use crate::error::{Error, Result};

/// Layout version written to new files
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3MGR_CONFIG_DIR";

const FILE_NAME: &str = "config.toml";

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: u32,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            aliases: Vec::new(),
        }
    }
}

/// Output defaults applied when no flag overrides them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub output: OutputFormat,
    pub color: ColorMode,
    /// Show spinners for slow operations
    pub progress: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: OutputFormat::Human,
            color: ColorMode::Auto,
            progress: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Reads and writes the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Locate the configuration file from the environment
    pub fn new() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .map(|dir| dir.join("s3mgr"))
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?,
        };
        Ok(Self::with_path(dir.join(FILE_NAME)))
    }

    /// Use an explicit file path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the file, or return defaults when it does not exist yet
    pub fn load(&self) -> Result<Config> {
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Config = toml::from_str(&content)?;
        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "{} uses schema version {}, newer than supported version {SCHEMA_VERSION}. Please upgrade s3mgr.",
                self.config_path.display(),
                config.schema_version
            )));
        }

        Ok(Config {
            schema_version: SCHEMA_VERSION,
            ..config
        })
    }

    /// Write the file through a sibling temp file, then rename it into place
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let staging = self.config_path.with_extension("toml.tmp");
        write_private(&staging, toml::to_string_pretty(config)?.as_bytes())?;
        std::fs::rename(&staging, &self.config_path)?;

        tracing::debug!(
            path = %self.config_path.display(),
            aliases = config.aliases.len(),
            "configuration saved"
        );
        Ok(())
    }
}

/// Write a file that is owner-only from the moment it exists
fn write_private(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    // a stale file from an interrupted save would keep its old mode
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}
