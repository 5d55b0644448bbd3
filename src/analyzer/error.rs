//! Analysis errors

use thiserror::Error;

/// Errors raised while attributing package sizes
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// A module path has no recognizable dependency-folder package segment
    #[error("{module} is not from a package in node_modules")]
    NotAPackage { module: String },

    /// The entry glob could not be compiled
    #[error("invalid entry pattern '{pattern}'")]
    InvalidEntryPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The size report has no entry for a chunk of the stats snapshot
    #[error("size report has no entry for chunk #{index} ({chunk})")]
    MissingReportChunk { index: usize, chunk: String },
}
