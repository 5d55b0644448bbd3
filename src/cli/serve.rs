//! Serve command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use super::SnapshotArgs;
use crate::analyzer::analyze;
use crate::config::Config;
use crate::server::ReportServer;
use crate::stats::Snapshot;

/// Serve the report in the browser, updating it when the build changes
#[derive(Args, Debug)]
pub struct ServeCommand {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Port to serve the report on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Do not re-analyze when the snapshots change
    #[arg(long)]
    pub no_watch: bool,
}

impl ServeCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let options = ServeOptions {
            host: self.host.clone().unwrap_or_else(|| config.serve.host.clone()),
            port: self.port.unwrap_or(config.serve.port),
            open: self.open || config.serve.open,
            watch: !self.no_watch && config.serve.watch,
        };
        let analyze_options = self.snapshot.options(config);
        let paths = self.snapshot.paths();

        info!("Loading {} and {}", paths.stats.display(), paths.report.display());
        let snapshot = Snapshot::load(&paths).await?;
        let chunks = analyze(&snapshot, &analyze_options)?;

        let addr = format!("{}:{}", options.host, options.port);

        eprintln!(
            "{} Serving report for {} chunk(s) at {}\n",
            "→".blue(),
            chunks.len(),
            format!("http://{}", addr).cyan().underline()
        );

        if options.watch {
            eprintln!(
                "  {} Watching {} and {}",
                "•".dimmed(),
                paths.stats.display().to_string().cyan(),
                paths.report.display().to_string().cyan()
            );
        }

        eprintln!(
            "  {} Press {} to stop\n",
            "•".dimmed(),
            "Ctrl+C".yellow()
        );

        let server = ReportServer::new(paths, analyze_options, chunks, options)?;
        server.start().await
    }
}

/// Report server options
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub open: bool,
    pub watch: bool,
}
