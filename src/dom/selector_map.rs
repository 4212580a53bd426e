use crate::dom::tree::{DomTree, NodeId};
use indexmap::IndexMap;

/// Cache of locators keyed by node id.
/// Uses IndexMap to preserve insertion order
#[derive(Debug, Clone, Default)]
pub struct SelectorMap {
    map: IndexMap<NodeId, String>,
}

impl SelectorMap {
    /// Create a new empty SelectorMap
    pub fn new() -> Self {
        Self { map: IndexMap::new() }
    }

    /// Locator for `id`, computing and caching it on first use
    pub fn resolve(&mut self, tree: &DomTree, id: NodeId) -> &str {
        self.map.entry(id).or_insert_with(|| tree.locate(id))
    }

    /// Get a cached locator
    pub fn get(&self, id: NodeId) -> Option<&str> {
        self.map.get(&id).map(String::as_str)
    }

    /// Check if a locator is cached for `id`
    pub fn contains(&self, id: NodeId) -> bool {
        self.map.contains_key(&id)
    }

    /// Get the number of cached locators
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all (id, locator) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> {
        self.map.iter().map(|(id, css)| (*id, css.as_str()))
    }
}
