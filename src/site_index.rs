use std::collections::BTreeMap;

use crate::content::Node;

/// Nodes grouped by base directory. Built once by the tree walk and only read
/// afterwards. Directories iterate in lexical order, nodes in walk order.
#[derive(Debug, Default)]
pub struct SiteIndex {
    directories: BTreeMap<String, Vec<Node>>,
}

impl SiteIndex {
    pub fn new() -> Self {
        SiteIndex::default()
    }

    pub fn ensure_directory(&mut self, base_directory: &str) {
        self.directories.entry(base_directory.to_string()).or_default();
    }

    pub fn push(&mut self, node: Node) {
        self.directories.entry(node.base_directory.clone()).or_default().push(node);
    }

    pub fn get(&self, base_directory: &str) -> Option<&[Node]> {
        self.directories.get(base_directory).map(|nodes| nodes.as_slice())
    }

    pub fn directories(&self) -> impl Iterator<Item = (&str, &[Node])> {
        self.directories.iter().map(|(dir, nodes)| (dir.as_str(), nodes.as_slice()))
    }

    /// Every node of every directory, directory by directory.
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.directories.values().flatten().collect()
    }

    pub fn node_count(&self) -> usize {
        self.directories.values().map(|nodes| nodes.len()).sum()
    }
}
