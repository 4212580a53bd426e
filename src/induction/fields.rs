//! Field resolution: align the text-bearing endpoints of every instance of a
//! cluster into field groups.
//!
//! Each instance is walked on its own, from its root down:
//! - a text-bearing element is an endpoint and is not descended into;
//! - an element with exactly one child subtree holding text is passed through
//!   without adding to the slot path;
//! - an element with several such children branches, each child extending the
//!   slot path with its position among the element's children.
//!
//! Endpoints with equal slot paths are the same field. Within a slot, the
//! signature carried by most endpoints wins; the field is accepted when that
//! majority covers enough instances.

use crate::dom::{DomTree, NodeId};
use crate::induction::options::InductionOptions;
use crate::induction::signature::SignatureKey;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Child positions taken at every branching element, from the instance root
pub type SlotPath = Vec<usize>;

/// Elements playing the same role across instances, in instance order
pub type FieldGroup = Vec<NodeId>;

/// Text-bearing endpoints of one instance, in document order
pub fn instance_endpoints(tree: &DomTree, instance: NodeId) -> Vec<(SlotPath, NodeId)> {
    let mut endpoints = Vec::new();
    let mut stack: Vec<(NodeId, SlotPath)> = vec![(instance, SlotPath::new())];

    while let Some((node, path)) = stack.pop() {
        if tree.is_text_bearing(node) {
            endpoints.push((path, node));
            continue;
        }

        let children = tree.children(node);
        let content_children: Vec<(usize, NodeId)> = children
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, child)| tree.has_text_content(child))
            .collect();

        match content_children.as_slice() {
            [] => {}
            [(_, only)] => stack.push((*only, path)),
            _ => {
                // reversed so the first child is popped first
                for &(position, child) in content_children.iter().rev() {
                    let mut child_path = path.clone();
                    child_path.push(position);
                    stack.push((child, child_path));
                }
            }
        }
    }

    endpoints
}

/// Resolve the accepted field groups of a cluster.
///
/// Instances that are themselves text-bearing contribute no fields, so a
/// wrapper is never reported as its own field.
pub fn resolve_fields(
    tree: &DomTree,
    instances: &[NodeId],
    options: &InductionOptions,
) -> Vec<FieldGroup> {
    let mut slots: BTreeMap<SlotPath, Vec<NodeId>> = BTreeMap::new();

    for &instance in instances {
        for (path, endpoint) in instance_endpoints(tree, instance) {
            if endpoint != instance {
                slots.entry(path).or_default().push(endpoint);
            }
        }
    }

    let mut fields = Vec::new();

    for (path, endpoints) in slots {
        let Some(members) = dominant_members(tree, &endpoints) else {
            continue;
        };

        if options.covers(members.len(), instances.len()) {
            fields.push(members);
        } else {
            log::trace!(
                "slot {:?} dropped: {} of {} instances",
                path,
                members.len(),
                instances.len()
            );
        }
    }

    fields
}

/// Endpoints sharing the most common signature key; the first key seen wins a tie
fn dominant_members(tree: &DomTree, endpoints: &[NodeId]) -> Option<FieldGroup> {
    let mut by_key: IndexMap<SignatureKey, FieldGroup> = IndexMap::new();

    for &endpoint in endpoints {
        for key in SignatureKey::keys_of(&tree[endpoint]) {
            by_key.entry(key).or_default().push(endpoint);
        }
    }

    by_key
        .into_values()
        .reduce(|best, candidate| if candidate.len() > best.len() { candidate } else { best })
}
