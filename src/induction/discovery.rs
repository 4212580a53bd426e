//! Candidate discovery: every signature that repeats, at every nesting level

use crate::dom::{DomTree, NodeId};
use crate::induction::signature::{is_compatible, SignatureKey};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Elements sharing one signature key at one nesting level, in document order.
///
/// The nesting level of an element is the number of its proper ancestors that
/// carry the same key, so no instance of a cluster is an ancestor of another.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCluster {
    pub key: SignatureKey,
    pub level: usize,
    pub instances: Vec<NodeId>,
}

impl CandidateCluster {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Smallest depth among the instances
    pub fn depth(&self, tree: &DomTree) -> usize {
        self.instances
            .iter()
            .map(|&id| tree[id].depth)
            .min()
            .unwrap_or(0)
    }
}

impl fmt::Display for CandidateCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} x{}", self.key, self.level, self.instances.len())
    }
}

/// Enumerate every cluster with at least `min_instances` members.
///
/// Clusters come out ordered by the document position of the first element
/// that opened them. A cluster whose member set equals an earlier one (the
/// members share more than one class token) is dropped.
pub fn discover(tree: &DomTree, min_instances: usize) -> Vec<CandidateCluster> {
    let mut buckets: IndexMap<(SignatureKey, usize), Vec<NodeId>> = IndexMap::new();

    // Keys of the elements on the current root path, and how often each occurs there
    let mut path: Vec<Vec<SignatureKey>> = Vec::new();
    let mut open: HashMap<SignatureKey, usize> = HashMap::new();

    for (id, element) in tree.iter() {
        // arena order is pre-order, so the path above `id` is exactly `depth` long
        while path.len() > element.depth {
            if let Some(closed) = path.pop() {
                for key in closed {
                    if let Some(count) = open.get_mut(&key) {
                        *count -= 1;
                    }
                }
            }
        }

        let keys = SignatureKey::keys_of(element);
        for key in &keys {
            let level = open.get(key).copied().unwrap_or(0);
            buckets.entry((key.clone(), level)).or_default().push(id);
        }

        for key in &keys {
            *open.entry(key.clone()).or_insert(0) += 1;
        }
        path.push(keys);
    }

    let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
    let clusters: Vec<CandidateCluster> = buckets
        .into_iter()
        .filter(|(_, instances)| instances.len() >= min_instances)
        .filter(|(_, instances)| seen.insert(instances.clone()))
        .map(|((key, level), instances)| CandidateCluster { key, level, instances })
        .collect();

    debug_assert!(clusters.iter().all(|cluster| {
        let first = &tree[cluster.instances[0]];
        cluster
            .instances
            .iter()
            .all(|&id| cluster.key.matches(&tree[id]) && is_compatible(first, &tree[id]))
    }));

    log::debug!("discovered {} candidate clusters", clusters.len());
    for cluster in &clusters {
        log::trace!("candidate {}", cluster);
    }

    clusters
}
