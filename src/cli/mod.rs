//! Command-line interface for depsize
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `analyze`: attribute package sizes and write/print the result
//! - `serve`: serve the HTML report, re-analyzing when snapshots change

mod analyze;
mod serve;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::analyzer::{AnalyzeOptions, SizeMetric};
use crate::config::Config;
use crate::stats::SnapshotPaths;

pub use analyze::AnalyzeCommand;
pub use serve::{ServeCommand, ServeOptions};

/// depsize - attribute third-party package size to the chunks that require it
#[derive(Parser, Debug)]
#[command(name = "depsize")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to depsize.toml config file
    #[arg(short, long, global = true, default_value = "depsize.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a build and output the package size hierarchy
    Analyze(AnalyzeCommand),

    /// Serve the report in the browser, updating it when the build changes
    Serve(ServeCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        let config = Config::load(&self.config)?;

        match &self.command {
            Commands::Analyze(cmd) => cmd.execute(&config).await,
            Commands::Serve(cmd) => cmd.execute(&config).await,
        }
    }
}

/// Input snapshots and analysis options shared by all commands
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Bundler stats.json file
    #[arg(short = 's', long = "stats", visible_alias = "stats-data", env = "DEPSIZE_STATS")]
    pub stats: PathBuf,

    /// Bundle analyzer report.json file
    #[arg(short = 'r', long = "report", visible_alias = "report-data", env = "DEPSIZE_REPORT")]
    pub report: PathBuf,

    /// Glob selecting each chunk's entry modules (default: chunk origins)
    #[arg(short, long)]
    pub entry: Option<String>,

    /// Size figure to attribute
    #[arg(long, value_enum)]
    pub size_type: Option<SizeMetric>,
}

impl SnapshotArgs {
    pub fn paths(&self) -> SnapshotPaths {
        SnapshotPaths {
            stats: self.stats.clone(),
            report: self.report.clone(),
        }
    }

    /// Analysis options, flags taking precedence over the config file
    pub fn options(&self, config: &Config) -> AnalyzeOptions {
        AnalyzeOptions {
            size_metric: self.size_type.unwrap_or(config.analysis.size_type),
            entry: self.entry.clone().or_else(|| config.analysis.entry.clone()),
        }
    }
}

/// Print the depsize banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "◆".cyan(),
        "depsize".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
