//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::analyzer::SizeMetric;

/// Analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Report figure to attribute (parsed, stat or gzip)
    #[serde(default)]
    pub size_type: SizeMetric,

    /// Glob selecting each chunk's entry modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

/// Console list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Nesting depth of printed packages
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Only list packages larger than this many kilobytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            gt: None,
        }
    }
}

fn default_depth() -> usize {
    1
}

/// Report server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Port to serve the report on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Open browser automatically
    #[serde(default)]
    pub open: bool,

    /// Re-run the analysis when a snapshot changes
    #[serde(default = "default_true")]
    pub watch: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            open: false,
            watch: true,
        }
    }
}

fn default_port() -> u16 {
    8888
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_true() -> bool {
    true
}
