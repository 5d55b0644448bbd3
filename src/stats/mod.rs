//! Input snapshots
//!
//! Serde models for the two files the analysis consumes:
//! - the bundler's `stats.json` (chunks, modules and their inclusion reasons)
//! - the bundle analyzer's `report.json` (per-chunk tree of sized groups)
//!
//! Only the fields the analysis reads are modelled; everything else in the
//! producing tools' output is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The bundler's module graph snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Output chunks
    pub chunks: Vec<Chunk>,

    /// Every module in the compilation
    pub modules: Vec<Module>,
}

/// One bundler output unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    /// Generated files, the first one names the chunk
    pub files: Vec<String>,

    /// Modules bundled into this chunk
    #[serde(default)]
    pub modules: Vec<Module>,

    /// Requests that caused this chunk to exist
    #[serde(default)]
    pub origins: Vec<Origin>,
}

/// A chunk origin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Origin {
    /// The request string, absent for some origins
    #[serde(default)]
    pub request: Option<String>,
}

/// A bundled module as recorded in the stats snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    /// Path-like module name, e.g. `./node_modules/lodash/lodash.js`
    pub name: String,

    /// Raw size as reported by the bundler (the analysis uses the report instead)
    #[serde(default)]
    pub size: u64,

    /// Modules that caused this module to be included
    #[serde(default)]
    pub reasons: Vec<Reason>,
}

/// Why a module was included
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    /// Name of the requiring module, absent for entry reasons
    #[serde(default)]
    pub module_name: Option<String>,

    /// The request as written in the requiring module
    #[serde(default)]
    pub user_request: Option<String>,
}

/// The bundle analyzer's size report, one entry per chunk
pub type Report = Vec<ReportChunk>;

/// Sizes of one output chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportChunk {
    /// Output file label
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub is_asset: bool,

    #[serde(default)]
    pub stat_size: u64,

    #[serde(default)]
    pub parsed_size: u64,

    #[serde(default)]
    pub gzip_size: u64,

    /// Top-level groups (folders and modules)
    #[serde(default)]
    pub groups: Vec<ReportGroup>,
}

/// A node in a chunk's size tree
///
/// Leaves carry a numeric `id`; folders carry child `groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGroup {
    /// Module id; only numeric ids mark a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    /// Path matching a stats module name
    pub path: String,

    #[serde(default)]
    pub stat_size: u64,

    #[serde(default)]
    pub parsed_size: u64,

    #[serde(default)]
    pub gzip_size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ReportGroup>>,
}

impl ReportGroup {
    /// Whether this node is an indexed module rather than a folder
    pub fn is_leaf(&self) -> bool {
        self.id.as_ref().map_or(false, serde_json::Value::is_number)
    }
}

/// Both input snapshots, loaded together
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub stats: Stats,
    pub report: Report,
}

/// Where the two snapshots live on disk
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub stats: PathBuf,
    pub report: PathBuf,
}

impl Snapshot {
    /// Load both snapshots concurrently
    pub async fn load(paths: &SnapshotPaths) -> Result<Self> {
        let (stats, report) = tokio::try_join!(
            load_json::<Stats>(&paths.stats),
            load_json::<Report>(&paths.report),
        )?;

        debug!(
            "Loaded {} chunks, {} modules, {} report entries",
            stats.chunks.len(),
            stats.modules.len(),
            report.len()
        );

        Ok(Self { stats, report })
    }

    /// Load both snapshots on the current thread
    ///
    /// Used from the file watcher, which runs outside the async runtime.
    pub fn load_blocking(paths: &SnapshotPaths) -> Result<Self> {
        let stats = read_json::<Stats>(&paths.stats)?;
        let report = read_json::<Report>(&paths.report)?;
        Ok(Self { stats, report })
    }
}

/// Read and parse a JSON snapshot asynchronously
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    parse_json(&content, path)
}

/// Read and parse a JSON snapshot
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    parse_json(&content, path)
}

fn parse_json<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    serde_json::from_str(content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}
