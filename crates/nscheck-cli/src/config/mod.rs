//! Configuration management.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// CLI configuration file.
///
/// Every key is optional; flags and environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Organization to audit
    pub organization: Option<String>,

    /// Use Application Default Credentials instead of gcloud
    pub use_default_credentials: Option<bool>,

    /// Audit private zones too
    pub include_private_zones: Option<bool>,

    /// Zones audited concurrently
    pub concurrency: Option<usize>,

    /// Nameserver used for live lookups
    pub nameserver: Option<IpAddr>,

    /// Timeout of a single NS lookup, in seconds
    pub lookup_timeout_secs: Option<u64>,

    /// Default output format
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "nscheck", "nscheck")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load the default config file, if there is one.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(config)
    }
}
