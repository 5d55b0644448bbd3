//! Analyze command implementation

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::SnapshotArgs;
use crate::analyzer::{analyze, ChunkSizeInfo};
use crate::config::Config;
use crate::report::{render_json, render_list, ListOptions, OutputFormat};
use crate::stats::Snapshot;
use crate::utils::format_duration;

/// Analyze a build and output the package size hierarchy
#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Output files, .json or .html (default: JSON on stdout)
    #[arg(short, long, num_args = 1..)]
    pub output: Vec<PathBuf>,

    /// List the packages each chunk requires directly
    #[arg(short, long)]
    pub list: bool,

    /// Only list packages larger than this many KB
    #[arg(long)]
    pub gt: Option<f64>,

    /// Nesting depth of listed packages
    #[arg(short, long)]
    pub depth: Option<usize>,
}

impl AnalyzeCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let start = Instant::now();

        // Reject unknown output formats before doing any work
        let outputs = self
            .output
            .iter()
            .map(|path| OutputFormat::from_path(path).map(|format| (path, format)))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loading {} and {}",
            self.snapshot.stats.display(),
            self.snapshot.report.display()
        );
        let snapshot = Snapshot::load(&self.snapshot.paths()).await?;

        let chunks = self.run_analysis(&snapshot, config)?;

        for (path, format) in outputs {
            write_output(path, &format.render(&chunks)?).await?;
            eprintln!(
                "  {} Wrote {}",
                "✓".green(),
                path.display().to_string().cyan()
            );
        }

        if self.list {
            let options = ListOptions {
                depth: self.depth.unwrap_or(config.list.depth),
                gt: self.gt.or(config.list.gt),
            };
            print!("{}", render_list(&chunks, &options));
        } else if self.output.is_empty() {
            println!("{}", render_json(&chunks)?);
        }

        eprintln!(
            "\n{} Analyzed {} chunk(s) in {}\n",
            "✓".green().bold(),
            chunks.len(),
            format_duration(start.elapsed())
        );

        Ok(())
    }

    fn run_analysis(&self, snapshot: &Snapshot, config: &Config) -> Result<Vec<ChunkSizeInfo>> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.set_message(format!("Analyzing {} chunk(s)...", snapshot.stats.chunks.len()));
        spinner.enable_steady_tick(Duration::from_millis(80));

        let result = analyze(snapshot, &self.snapshot.options(config));

        spinner.finish_and_clear();
        Ok(result?)
    }
}

async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write output: {}", path.display()))
}
