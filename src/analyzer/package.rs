//! Package aggregation
//!
//! Builds a tree of packages rooted at one directly-required module. Files of
//! the same package reached from the same parent are merged into one node;
//! every other package reached through it becomes a nested child.
//!
//! Termination relies on [`Exclusions`]: every filtering pass extends the set
//! with all siblings it kept, and a module is never entered once excluded.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::warn;

use super::dependency_map::DependencyMap;
use super::error::AnalyzeError;
use super::package_name::{is_traversable, PackageName};
use super::size_index::SizedModule;

/// Module names that must not be visited again
///
/// Each scope only adds names on top of its parent, so sibling branches
/// never see each other's extensions.
#[derive(Debug, Default)]
pub struct Exclusions<'a> {
    names: HashSet<&'a str>,
    parent: Option<&'a Exclusions<'a>>,
}

impl<'a> Exclusions<'a> {
    /// A root scope
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            names: names.into_iter().collect(),
            parent: None,
        }
    }

    /// A child scope excluding `names` in addition to everything here
    pub fn extend<I>(&'a self, names: I) -> Exclusions<'a>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Exclusions {
            names: names.into_iter().collect(),
            parent: Some(self),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.names.contains(name) {
                return true;
            }
            scope = current.parent;
        }
        false
    }
}

/// One external package as required from one point of a chunk's tree
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    entry: SizedModule,
    files: Vec<SizedModule>,
    dependencies: Vec<Package>,
    size: u64,
    total_size: u64,
}

impl Package {
    /// Create a package holding only its entry module
    pub fn new(entry: SizedModule) -> Result<Self, AnalyzeError> {
        match PackageName::parse(&entry.name) {
            PackageName::Matched(name) => {
                let name = name.to_string();
                Ok(Self::with_name(entry, name))
            }
            PackageName::Unmatched => Err(AnalyzeError::NotAPackage { module: entry.name }),
        }
    }

    fn with_name(entry: SizedModule, name: String) -> Self {
        let mut package = Self {
            name,
            files: vec![entry.clone()],
            entry,
            dependencies: Vec::new(),
            size: 0,
            total_size: 0,
        };
        package.recompute_size();
        package
    }

    /// Build the full package tree reachable from `entry`
    ///
    /// Modules in `excludes` are treated as already counted elsewhere.
    pub fn analyze(
        entry: SizedModule,
        dependencies: &DependencyMap,
        excludes: &Exclusions<'_>,
    ) -> Result<Self, AnalyzeError> {
        let mut package = Self::new(entry)?;
        let entry_name = package.entry.name.clone();
        package.aggregate(&entry_name, dependencies, excludes);
        package.sort();
        Ok(package)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// This package's own files, largest first
    pub fn files(&self) -> &[SizedModule] {
        &self.files
    }

    /// Packages required through this one, largest first
    pub fn dependencies(&self) -> &[Package] {
        &self.dependencies
    }

    /// Sum of this package's own files
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Own size plus every nested package
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    fn aggregate(&mut self, module: &str, dependencies: &DependencyMap, excludes: &Exclusions<'_>) {
        let pass: Vec<&SizedModule> = dependencies
            .dependencies_of(module)
            .iter()
            .filter(|dep| is_traversable(&dep.name) && !excludes.contains(&dep.name))
            .collect();

        if pass.is_empty() {
            return;
        }

        let scope = excludes.extend(pass.iter().map(|&dep| dep.name.as_str()));

        for dep in pass {
            match PackageName::parse(&dep.name) {
                PackageName::Matched(name) if name == self.name => {
                    if self.add_file(dep.clone()) {
                        self.aggregate(&dep.name, dependencies, &scope);
                    }
                }
                PackageName::Matched(name) => {
                    self.aggregate_child(name, dep, dependencies, &scope);
                }
                PackageName::Unmatched => {
                    warn!("{} is not from a package in node_modules", dep.name);
                }
            }
        }
    }

    /// Merge `dep` into the child package `name`, creating it if needed
    fn aggregate_child(
        &mut self,
        name: &str,
        dep: &SizedModule,
        dependencies: &DependencyMap,
        scope: &Exclusions<'_>,
    ) {
        match self.dependencies.iter_mut().find(|child| child.name == name) {
            Some(child) => {
                // Already merged modules were fully walked the first time
                if !child.add_file(dep.clone()) {
                    return;
                }
                child.aggregate(&dep.name, dependencies, scope);
                child.sort();
            }
            None => {
                let mut child = Self::with_name(dep.clone(), name.to_string());
                child.aggregate(&dep.name, dependencies, scope);
                child.sort();
                self.dependencies.push(child);
            }
        }
        self.recompute_total_size();
    }

    /// Add a file unless one with the same name is present, reporting
    /// whether it was added
    fn add_file(&mut self, module: SizedModule) -> bool {
        if self.files.iter().any(|file| file.name == module.name) {
            return false;
        }
        self.files.push(module);
        self.recompute_size();
        true
    }

    fn recompute_size(&mut self) {
        self.size = self.files.iter().map(|file| file.size).sum();
        self.recompute_total_size();
    }

    fn recompute_total_size(&mut self) {
        self.total_size = self.size
            + self
                .dependencies
                .iter()
                .map(Package::total_size)
                .sum::<u64>();
    }

    fn sort(&mut self) {
        self.files.sort_by_key(|file| Reverse(file.size));
        self.dependencies.sort_by_key(|dep| Reverse(dep.total_size));
    }
}
