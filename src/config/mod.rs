//! Configuration handling for depsize
//!
//! Parses the optional depsize.toml configuration file. Every section is
//! optional and command-line flags take precedence over it.

mod schema;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// What the analysis measures
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Console list filters
    #[serde(default)]
    pub list: ListConfig,

    /// Report server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Config {
    /// Load configuration from a file path
    ///
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if let Some(entry) = &self.analysis.entry {
            globset::Glob::new(entry)
                .with_context(|| format!("Invalid entry pattern '{}'", entry))?;
        }

        if let Some(gt) = self.list.gt {
            if gt < 0.0 {
                anyhow::bail!("list.gt must not be negative, got {}", gt);
            }
        }

        Ok(())
    }
}
