//! Overlap resolution between valid clusters.
//!
//! Two clusters conflict when they share an element or when an instance of one
//! is an ancestor of an instance of the other. Clusters are visited in policy
//! order and kept unless they conflict with one already kept; survivors are
//! returned in document order of their first instance.

use crate::dom::{DomTree, NodeId};
use crate::induction::discovery::CandidateCluster;
use crate::induction::fields::FieldGroup;
use crate::induction::options::OverlapPolicy;
use std::cmp::{Ordering, Reverse};

/// A cluster that passed validity filtering, with its accepted fields
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCluster {
    pub cluster: CandidateCluster,
    pub fields: Vec<FieldGroup>,
}

/// Keep the non-conflicting clusters preferred by `policy`
pub fn resolve_overlaps(
    tree: &DomTree,
    clusters: Vec<ValidCluster>,
    policy: OverlapPolicy,
) -> Vec<ValidCluster> {
    let mut ranked: Vec<(usize, ValidCluster)> = clusters
        .into_iter()
        .map(|valid| (valid.cluster.depth(tree), valid))
        .collect();

    // stable sort: discovery order settles what the policy leaves equal
    ranked.sort_by(|(depth_a, a), (depth_b, b)| compare(policy, (*depth_a, a), (*depth_b, b)));

    let mut kept: Vec<ValidCluster> = Vec::new();
    for (_, candidate) in ranked {
        let instances = &candidate.cluster.instances;
        let winner = kept
            .iter()
            .position(|other| conflicts(tree, &other.cluster.instances, instances));

        match winner {
            Some(index) => {
                log::debug!("dropping {}: overlaps {}", candidate.cluster, kept[index].cluster);
            }
            None => kept.push(candidate),
        }
    }

    kept.sort_by_key(|valid| valid.cluster.instances.first().copied());
    kept
}

fn compare(
    policy: OverlapPolicy,
    a: (usize, &ValidCluster),
    b: (usize, &ValidCluster),
) -> Ordering {
    let (depth_a, a) = a;
    let (depth_b, b) = b;
    let count_a = a.cluster.len();
    let count_b = b.cluster.len();

    match policy {
        OverlapPolicy::MostInstances => {
            (Reverse(count_a), depth_a).cmp(&(Reverse(count_b), depth_b))
        }
        OverlapPolicy::Deepest => {
            (Reverse(depth_a), Reverse(count_a)).cmp(&(Reverse(depth_b), Reverse(count_b)))
        }
        OverlapPolicy::Shallowest => (depth_a, Reverse(count_a)).cmp(&(depth_b, Reverse(count_b))),
    }
}

/// Shared element, or an ancestor/descendant pair across the two instance sets
pub fn conflicts(tree: &DomTree, a: &[NodeId], b: &[NodeId]) -> bool {
    a.iter().any(|&x| {
        b.iter()
            .any(|&y| x == y || tree.is_ancestor(x, y) || tree.is_ancestor(y, x))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementNode;
    use crate::induction::signature::SignatureKey;

    fn valid(tree: &DomTree, class: &str, level: usize) -> ValidCluster {
        let instances: Vec<NodeId> = tree
            .iter()
            .filter(|(_, e)| e.has_class(class))
            .map(|(id, _)| id)
            .filter(|&id| tree.ancestors(id).filter(|&a| tree[a].has_class(class)).count() == level)
            .collect();
        ValidCluster {
            cluster: CandidateCluster {
                key: SignatureKey { tag: "div".to_string(), token: Some(class.to_string()) },
                level,
                instances,
            },
            fields: vec![Vec::new(), Vec::new()],
        }
    }

    fn card() -> ElementNode {
        ElementNode::new("div").with_class("card").with_children(vec![
            ElementNode::new("div").with_class("inner").with_children(vec![
                ElementNode::new("span").with_text("a"),
                ElementNode::new("span").with_text("b"),
            ]),
        ])
    }

    fn row() -> ElementNode {
        ElementNode::new("div").with_class("row").with_children(vec![card(), card()])
    }

    #[test]
    fn test_more_instances_wins_on_chain() {
        let tree = DomTree::new(ElementNode::new("body").with_children(vec![row(), row()]));
        let rows = valid(&tree, "row", 0);
        let cards = valid(&tree, "card", 0);

        let kept = resolve_overlaps(&tree, vec![rows, cards], OverlapPolicy::MostInstances);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].cluster.instances.len(), 4);
    }

    #[test]
    fn test_tie_keeps_shallower() {
        let tree =
            DomTree::new(ElementNode::new("body").with_children(vec![card(), card(), card()]));
        let cards = valid(&tree, "card", 0);
        let inners = valid(&tree, "inner", 0);

        let kept = resolve_overlaps(&tree, vec![inners, cards], OverlapPolicy::MostInstances);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].cluster.key.to_string(), "div.card");
    }

    #[test]
    fn test_policies_pick_ends_of_chain() {
        let tree =
            DomTree::new(ElementNode::new("body").with_children(vec![card(), card(), card()]));

        let deepest = resolve_overlaps(
            &tree,
            vec![valid(&tree, "card", 0), valid(&tree, "inner", 0)],
            OverlapPolicy::Deepest,
        );
        assert_eq!(deepest[0].cluster.key.to_string(), "div.inner");

        let tree = DomTree::new(ElementNode::new("body").with_children(vec![row(), row()]));
        let shallowest = resolve_overlaps(
            &tree,
            vec![valid(&tree, "card", 0), valid(&tree, "row", 0)],
            OverlapPolicy::Shallowest,
        );
        assert_eq!(shallowest.len(), 1);
        assert_eq!(shallowest[0].cluster.key.to_string(), "div.row");
    }

    #[test]
    fn test_disjoint_clusters_are_both_kept_in_document_order() {
        let section = |class: &str| {
            ElementNode::new("section").with_children(vec![
                ElementNode::new("div").with_class(class),
                ElementNode::new("div").with_class(class),
                ElementNode::new("div").with_class(class),
            ])
        };
        let tree = DomTree::new(
            ElementNode::new("body").with_children(vec![section("first"), section("second")]),
        );

        let second = valid(&tree, "second", 0);
        let mut first = valid(&tree, "first", 0);
        first.cluster.instances.truncate(2);

        let kept = resolve_overlaps(&tree, vec![second, first], OverlapPolicy::MostInstances);
        let keys: Vec<String> = kept.iter().map(|v| v.cluster.key.to_string()).collect();
        assert_eq!(keys, vec!["div.first", "div.second"]);
    }

    #[test]
    fn test_conflicts() {
        let tree = DomTree::new(ElementNode::new("body").with_children(vec![card(), card()]));
        let cards = valid(&tree, "card", 0).cluster.instances;
        let inners = valid(&tree, "inner", 0).cluster.instances;

        assert!(conflicts(&tree, &cards, &inners));
        assert!(conflicts(&tree, &inners, &cards));
        assert!(conflicts(&tree, &cards[..1], &cards));
        assert!(!conflicts(&tree, &cards[..1], &inners[1..]));
    }
}
