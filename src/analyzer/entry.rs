//! Entry resolution
//!
//! Finds the modules a chunk starts from, either by an explicit glob over the
//! chunk's own modules or by matching chunk origins against module names.

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};

use crate::stats::{Chunk, Module};

use super::error::AnalyzeError;
use super::size_index::{SizeIndex, SizedModule};

/// Resolves the entry modules of a chunk
#[derive(Debug, Clone, Default)]
pub struct EntryResolver {
    /// Explicit entry glob; origins are used when absent
    pattern: Option<GlobMatcher>,
}

impl EntryResolver {
    /// Create a resolver, compiling the entry glob if one is given
    pub fn new(pattern: Option<&str>) -> Result<Self, AnalyzeError> {
        let pattern = pattern
            .map(|pattern| {
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map(|glob| glob.compile_matcher())
                    .map_err(|source| AnalyzeError::InvalidEntryPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .transpose()?;

        Ok(Self { pattern })
    }

    /// Resolve the entry modules of `chunk`, sized through `sizes`
    pub fn resolve(&self, chunk: &Chunk, modules: &[Module], sizes: &SizeIndex) -> Vec<SizedModule> {
        let entries: Vec<&str> = match &self.pattern {
            Some(matcher) => self.resolve_by_pattern(matcher, chunk),
            None => self.resolve_by_origins(chunk, modules),
        };

        debug!("Entry files {:?}", entries);

        entries.into_iter().map(|name| sizes.sized(name)).collect()
    }

    fn resolve_by_pattern<'a>(&self, matcher: &GlobMatcher, chunk: &'a Chunk) -> Vec<&'a str> {
        let entries: Vec<&str> = chunk
            .modules
            .iter()
            .map(|module| module.name.as_str())
            .filter(|name| matcher.is_match(name))
            .collect();

        if entries.is_empty() {
            warn!(
                "Entry pattern '{}' matched no module of chunk {:?}",
                matcher.glob(),
                chunk.files
            );
        }

        entries
    }

    fn resolve_by_origins<'a>(&self, chunk: &Chunk, modules: &'a [Module]) -> Vec<&'a str> {
        chunk
            .origins
            .iter()
            .filter_map(|origin| origin.request.as_deref())
            .filter_map(|request| {
                let found = modules
                    .iter()
                    .find(|module| origin_matches(request, &module.name));
                if found.is_none() {
                    warn!("Can't find entry module for request {}", request);
                }
                found.map(|module| module.name.as_str())
            })
            .collect()
    }
}

/// Whether an origin request refers to a module
///
/// The module name's leading character (the `.` of `./src/...`) is dropped so
/// that absolute and relative requests both match.
fn origin_matches(request: &str, module_name: &str) -> bool {
    let mut chars = module_name.chars();
    chars.next();
    let tail = chars.as_str();
    !tail.is_empty() && request.contains(tail)
}
