//! Dependency size attribution
//!
//! Turns a module graph snapshot and a size report into a per-chunk
//! breakdown of the third-party packages each chunk requires:
//!
//! 1. index report sizes by module path
//! 2. invert module reasons into a forward dependency map
//! 3. per chunk, resolve entries and walk to the directly required packages
//! 4. aggregate one package tree per direct package
//! 5. format the trees into the output hierarchy

mod dependency_map;
mod entry;
mod error;
mod hierarchy;
mod package;
mod package_name;
mod size_index;
mod walker;

use tracing::{debug, info, warn};

use crate::stats::{Chunk, ReportChunk, Snapshot};

pub use dependency_map::DependencyMap;
pub use entry::EntryResolver;
pub use error::AnalyzeError;
pub use hierarchy::{
    format_packages, sort_chunks, ChunkSizeInfo, FileSizeInfo, HierarchyNode, PackageSizeInfo,
};
pub use package::{Exclusions, Package};
pub use package_name::{is_dependency_folder, is_traversable, package_relative, PackageName};
pub use size_index::{ReportSizes, SizeIndex, SizeMetric, SizedModule};
pub use walker::required_packages;

/// Path of the report group holding third-party code
const DEPENDENCY_GROUP: &str = "./node_modules";

/// Options that change what the analysis measures
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Report figure to attribute
    pub size_metric: SizeMetric,

    /// Glob selecting entry modules; chunk origins are used when absent
    pub entry: Option<String>,
}

/// Analysis over one loaded snapshot
///
/// The size index and dependency map are built once; chunks are then
/// analyzed independently of each other.
pub struct Analyzer<'s> {
    snapshot: &'s Snapshot,
    sizes: SizeIndex,
    dependencies: DependencyMap,
    entries: EntryResolver,
}

impl<'s> Analyzer<'s> {
    /// Prepare the shared indexes
    pub fn new(snapshot: &'s Snapshot, options: &AnalyzeOptions) -> Result<Self, AnalyzeError> {
        let entries = EntryResolver::new(options.entry.as_deref())?;
        let sizes = SizeIndex::build(&snapshot.report, options.size_metric);
        let dependencies = DependencyMap::build(&snapshot.stats.modules, &sizes);

        debug!(
            "Indexed {} module sizes, {} requiring modules",
            sizes.len(),
            dependencies.len()
        );

        Ok(Self {
            snapshot,
            sizes,
            dependencies,
            entries,
        })
    }

    /// Analyze every chunk, largest chunk first
    pub fn analyze(&self) -> Result<Vec<ChunkSizeInfo>, AnalyzeError> {
        let mut chunks = self
            .snapshot
            .stats
            .chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| self.analyze_chunk(index, chunk))
            .collect::<Result<Vec<_>, _>>()?;

        sort_chunks(&mut chunks);

        info!("Analyzed {} chunks", chunks.len());

        Ok(chunks)
    }

    /// Analyze the chunk at `index` of the stats snapshot
    pub fn analyze_chunk(&self, index: usize, chunk: &Chunk) -> Result<ChunkSizeInfo, AnalyzeError> {
        let name = chunk
            .files
            .first()
            .cloned()
            .unwrap_or_else(|| format!("chunk-{}", index));

        let report = self
            .snapshot
            .report
            .get(index)
            .ok_or_else(|| AnalyzeError::MissingReportChunk {
                index,
                chunk: name.clone(),
            })?;

        let entries = self
            .entries
            .resolve(chunk, &self.snapshot.stats.modules, &self.sizes);
        let direct = required_packages(&entries, &self.dependencies);

        debug!(
            "Chunk {}: {} entries, {} directly required packages",
            name,
            entries.len(),
            direct.len()
        );

        let excludes = Exclusions::new(direct.iter().map(|module| module.name.as_str()));
        let packages = direct
            .iter()
            .filter_map(|module| {
                match Package::analyze(module.clone(), &self.dependencies, &excludes) {
                    Ok(package) => Some(package),
                    Err(err) => {
                        warn!("{}", err);
                        None
                    }
                }
            })
            .collect();

        Ok(ChunkSizeInfo {
            name,
            chunk_size: self.sizes.metric().of(report),
            node_modules_size: self.dependency_group_size(report),
            children: format_packages(packages),
        })
    }

    fn dependency_group_size(&self, report: &ReportChunk) -> u64 {
        report
            .groups
            .iter()
            .find(|group| group.path == DEPENDENCY_GROUP)
            .map(|group| self.sizes.metric().of(group))
            .unwrap_or(0)
    }
}

/// Run the whole analysis over a snapshot
pub fn analyze(snapshot: &Snapshot, options: &AnalyzeOptions) -> Result<Vec<ChunkSizeInfo>, AnalyzeError> {
    Analyzer::new(snapshot, options)?.analyze()
}
