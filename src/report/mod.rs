//! Report rendering
//!
//! Turns analysis results into the formats the CLI emits:
//! - JSON (the canonical hierarchy)
//! - a self-contained HTML page
//! - a colored console list

mod html;
mod list;

use std::path::Path;

use anyhow::{Context, Result};

use crate::analyzer::ChunkSizeInfo;

pub use html::{render_html, RELOAD_ENDPOINT};
pub use list::{render_list, ListOptions, SizeBand};

/// Output file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    /// Determine the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(OutputFormat::Json),
            Some("html") | Some("htm") => Ok(OutputFormat::Html),
            _ => anyhow::bail!(
                "Unsupported output file '{}', use a .json or .html extension",
                path.display()
            ),
        }
    }

    /// Render the results in this format
    pub fn render(self, chunks: &[ChunkSizeInfo]) -> Result<String> {
        match self {
            OutputFormat::Json => render_json(chunks),
            OutputFormat::Html => render_html(chunks, false),
        }
    }
}

/// Pretty-printed JSON of the full hierarchy
pub fn render_json(chunks: &[ChunkSizeInfo]) -> Result<String> {
    serde_json::to_string_pretty(chunks).context("Failed to serialize analysis result")
}
