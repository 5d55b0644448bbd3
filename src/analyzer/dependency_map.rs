//! Dependency map
//!
//! Inverts each module's inclusion reasons into forward edges:
//! requiring module -> modules it pulls in, in first-seen order.

use std::collections::{HashMap, HashSet};

use crate::stats::Module;

use super::size_index::{SizeIndex, SizedModule};

/// Forward adjacency over the module graph
#[derive(Debug, Default)]
pub struct DependencyMap {
    edges: HashMap<String, Vec<SizedModule>>,
}

impl DependencyMap {
    /// Build the map from the full module list
    pub fn build(modules: &[Module], sizes: &SizeIndex) -> Self {
        let mut edges: HashMap<String, Vec<SizedModule>> = HashMap::new();
        let mut seen: HashSet<(&str, &str)> = HashSet::new();

        for module in modules {
            for requirer in module.reasons.iter().filter_map(|r| r.module_name.as_deref()) {
                let list = edges.entry(requirer.to_string()).or_default();
                if seen.insert((requirer, module.name.as_str())) {
                    list.push(sizes.sized(&module.name));
                }
            }
        }

        Self { edges }
    }

    /// Modules directly included because of `name`
    pub fn dependencies_of(&self, name: &str) -> &[SizedModule] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of requiring modules
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
