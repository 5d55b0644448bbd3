//! depsize - bundle dependency size attribution
//!
//! Reads a bundler's stats snapshot and a bundle analyzer size report, works
//! out which third-party packages each output chunk pulls in, and reports
//! their cumulative size as a chunk -> package -> file hierarchy.
//!
//! # Features
//! - Per-chunk package trees with nested transitive packages
//! - JSON and self-contained HTML output
//! - Colored console listing with depth and size filters
//! - Local report server that re-analyzes when the build changes

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use depsize_lib::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("depsize_lib=debug,depsize=debug,tower_http=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("depsize_lib=info,depsize=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
