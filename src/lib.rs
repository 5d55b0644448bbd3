//! depsize library
//!
//! Attributes the size of third-party packages to the bundle chunks that
//! require them, from a bundler stats snapshot and a bundle size report.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod report;
pub mod server;
pub mod stats;
pub mod utils;

pub use analyzer::{analyze, AnalyzeOptions, Analyzer, ChunkSizeInfo};
pub use cli::Cli;
pub use config::Config;
pub use stats::{Snapshot, SnapshotPaths};
