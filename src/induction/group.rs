use crate::dom::NodeId;
use crate::induction::fields::FieldGroup;
use serde::{Deserialize, Serialize};

/// One discovered template: its repeated wrappers and their aligned fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementGroup {
    /// Cluster instances in document order
    pub wrapper_elements: Vec<NodeId>,

    /// Field groups, each ordered by instance
    pub element_groups: Vec<FieldGroup>,
}

impl ElementGroup {
    pub fn new(wrapper_elements: Vec<NodeId>, element_groups: Vec<FieldGroup>) -> Self {
        Self {
            wrapper_elements,
            element_groups,
        }
    }

    /// Number of wrapper instances
    pub fn instance_count(&self) -> usize {
        self.wrapper_elements.len()
    }

    /// Number of field groups
    pub fn field_count(&self) -> usize {
        self.element_groups.len()
    }

    /// Whether `id` is a wrapper or a field element of this group
    pub fn contains(&self, id: NodeId) -> bool {
        self.wrapper_elements.contains(&id)
            || self.element_groups.iter().any(|field| field.contains(&id))
    }

    /// Document position of the first wrapper
    pub fn first_instance(&self) -> Option<NodeId> {
        self.wrapper_elements.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomTree, ElementNode};

    #[test]
    fn test_counts_and_contains() {
        let tree = DomTree::new(ElementNode::new("ul").with_children(vec![
            ElementNode::new("li").with_text("a"),
            ElementNode::new("li").with_text("b"),
            ElementNode::new("li").with_text("c"),
        ]));
        let ids: Vec<NodeId> = tree.node_ids().collect();

        let group = ElementGroup::new(vec![ids[0]], vec![vec![ids[1]], vec![ids[2]]]);
        assert_eq!(group.instance_count(), 1);
        assert_eq!(group.field_count(), 2);
        assert!(group.contains(ids[2]));
        assert!(!group.contains(ids[3]));
        assert_eq!(group.first_instance(), Some(ids[0]));
    }

    #[test]
    fn test_serializes_ids_as_numbers() {
        let tree = DomTree::new(ElementNode::new("p"));
        let group = ElementGroup::new(vec![tree.root()], Vec::new());

        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, r#"{"wrapper_elements":[0],"element_groups":[]}"#);
    }
}
