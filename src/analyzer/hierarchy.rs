//! Output hierarchy
//!
//! Plain, serializable records produced from package trees:
//! chunk -> package -> nested package / file.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::package::Package;
use super::package_name::package_relative;

/// Size breakdown of one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkSizeInfo {
    /// First output file of the chunk
    pub name: String,

    /// Size of the whole chunk
    pub chunk_size: u64,

    /// Size of the chunk's dependency folder group
    pub node_modules_size: u64,

    /// Directly required packages, largest first
    pub children: Vec<PackageSizeInfo>,
}

/// A package and everything it pulls in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSizeInfo {
    pub name: String,
    pub total_size: u64,

    /// Nested packages first, then this package's own files
    pub children: Vec<HierarchyNode>,
}

/// A file inside a package, named relative to the package root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSizeInfo {
    pub name: String,
    pub size: u64,
}

/// Child of a package node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HierarchyNode {
    Package(PackageSizeInfo),
    File(FileSizeInfo),
}

impl HierarchyNode {
    /// Total size of a package node, size of a file node
    pub fn size(&self) -> u64 {
        match self {
            HierarchyNode::Package(package) => package.total_size,
            HierarchyNode::File(file) => file.size,
        }
    }
}

impl From<&Package> for PackageSizeInfo {
    fn from(package: &Package) -> Self {
        let children = package
            .dependencies()
            .iter()
            .map(|dependency| HierarchyNode::Package(dependency.into()))
            .chain(package.files().iter().map(|file| {
                HierarchyNode::File(FileSizeInfo {
                    name: package_relative(&file.name, package.name()).into_owned(),
                    size: file.size,
                })
            }))
            .collect();

        Self {
            name: package.name().to_string(),
            total_size: package.total_size(),
            children,
        }
    }
}

/// Render a chunk's top-level packages
///
/// Sorted by total size, largest first; a package name seen twice keeps only
/// its first (largest) occurrence.
pub fn format_packages(mut packages: Vec<Package>) -> Vec<PackageSizeInfo> {
    packages.sort_by_key(|package| Reverse(package.total_size()));

    let mut seen = HashSet::new();
    packages
        .iter()
        .filter(|package| seen.insert(package.name().to_string()))
        .map(PackageSizeInfo::from)
        .collect()
}

/// Order chunks by size, largest first
pub fn sort_chunks(chunks: &mut [ChunkSizeInfo]) {
    chunks.sort_by_key(|chunk| Reverse(chunk.chunk_size));
}
