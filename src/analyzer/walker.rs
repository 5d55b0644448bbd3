//! Required-module walker
//!
//! Walks a chunk's first-party code from its entries and collects the
//! dependency-folder modules it reaches first on every path. Dependency-folder
//! modules are recorded but not expanded; the package aggregator takes over
//! from there.

use std::collections::HashSet;

use super::dependency_map::DependencyMap;
use super::package_name::is_dependency_folder;
use super::size_index::SizedModule;

/// Collect the packages a chunk requires directly
///
/// The result is deduplicated by name and ordered by discovery: at every
/// step the dependency-folder modules of the current list are recorded first,
/// then each not-yet-expanded first-party module is expanded depth-first.
pub fn required_packages(entries: &[SizedModule], dependencies: &DependencyMap) -> Vec<SizedModule> {
    let mut walk = Walk {
        found: Vec::new(),
        found_names: HashSet::new(),
        expanded: HashSet::new(),
        stack: Vec::new(),
    };

    walk.visit_list(entries);

    while let Some(module) = walk.stack.pop() {
        if !walk.expanded.insert(module.name.as_str()) {
            continue;
        }
        walk.visit_list(dependencies.dependencies_of(&module.name));
    }

    walk.found
}

struct Walk<'a> {
    /// Dependency-folder modules, in discovery order
    found: Vec<SizedModule>,
    found_names: HashSet<&'a str>,

    /// First-party modules whose dependencies were already listed
    expanded: HashSet<&'a str>,

    /// First-party modules waiting to be expanded, next on top
    stack: Vec<&'a SizedModule>,
}

impl<'a> Walk<'a> {
    fn visit_list(&mut self, modules: &'a [SizedModule]) {
        for module in modules.iter().filter(|m| is_dependency_folder(&m.name)) {
            if self.found_names.insert(module.name.as_str()) {
                self.found.push(module.clone());
            }
        }

        // Pushed in reverse so the first sibling is expanded first
        let expanded = &self.expanded;
        self.stack.extend(
            modules
                .iter()
                .rev()
                .filter(|m| !is_dependency_folder(&m.name) && !expanded.contains(m.name.as_str())),
        );
    }
}
