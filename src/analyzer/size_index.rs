//! Size index
//!
//! Flattens the size report's group tree into `path -> size` for one metric.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::stats::{ReportChunk, ReportGroup};

/// Which of the report's size figures to attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeMetric {
    /// Size after minification, as emitted
    #[default]
    Parsed,
    /// Size of the module source before processing
    Stat,
    /// Gzipped output size
    Gzip,
}

/// Anything in the report carrying the three size figures
pub trait ReportSizes {
    fn stat_size(&self) -> u64;
    fn parsed_size(&self) -> u64;
    fn gzip_size(&self) -> u64;
}

impl ReportSizes for ReportChunk {
    fn stat_size(&self) -> u64 {
        self.stat_size
    }

    fn parsed_size(&self) -> u64 {
        self.parsed_size
    }

    fn gzip_size(&self) -> u64 {
        self.gzip_size
    }
}

impl ReportSizes for ReportGroup {
    fn stat_size(&self) -> u64 {
        self.stat_size
    }

    fn parsed_size(&self) -> u64 {
        self.parsed_size
    }

    fn gzip_size(&self) -> u64 {
        self.gzip_size
    }
}

impl SizeMetric {
    /// Pick this metric's figure from a report node
    pub fn of<T: ReportSizes>(self, item: &T) -> u64 {
        match self {
            SizeMetric::Parsed => item.parsed_size(),
            SizeMetric::Stat => item.stat_size(),
            SizeMetric::Gzip => item.gzip_size(),
        }
    }
}

/// A module name paired with its resolved size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizedModule {
    pub name: String,
    pub size: u64,
}

/// Flat map from module path to size
#[derive(Debug, Default)]
pub struct SizeIndex {
    metric: SizeMetric,
    sizes: HashMap<String, u64>,
}

impl SizeIndex {
    /// Index every leaf of every chunk's group tree
    pub fn build(report: &[ReportChunk], metric: SizeMetric) -> Self {
        let mut index = Self {
            metric,
            sizes: HashMap::new(),
        };

        for chunk in report {
            for group in &chunk.groups {
                index.walk(group);
            }
        }

        index
    }

    fn walk(&mut self, group: &ReportGroup) {
        if group.is_leaf() {
            self.sizes.insert(group.path.clone(), self.metric.of(group));
        } else if let Some(groups) = &group.groups {
            for child in groups {
                self.walk(child);
            }
        }
    }

    /// Size of a module, zero when the report does not know it
    pub fn size_of(&self, name: &str) -> u64 {
        self.sizes.get(name).copied().unwrap_or(0)
    }

    /// Attach the indexed size to a module name
    pub fn sized(&self, name: &str) -> SizedModule {
        SizedModule {
            name: name.to_string(),
            size: self.size_of(name),
        }
    }

    pub fn metric(&self) -> SizeMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
