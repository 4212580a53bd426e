use crate::dom::element::ElementNode;
use crate::error::{InductionError, Result};
use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Deepest element depth the JSON form supports.
///
/// `serde_json` reads at most 127 nested containers. Every element level opens
/// an object and a `children` array, and the deepest element adds its
/// `attributes` map.
pub const MAX_JSON_DEPTH: usize = 62;

/// Index of an element inside a [`DomTree`] arena.
///
/// Ids are assigned in document (pre-order) order, so comparing two ids
/// compares their document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the element in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// One element of the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name as given by the producer of the tree
    pub tag_name: String,

    /// Attributes in source order
    pub attributes: IndexMap<String, String>,

    /// Class tokens in source order, without duplicates
    pub classes: Vec<String>,

    /// Direct text, excluding descendants
    pub text: Option<String>,

    /// Child element ids in document order
    pub children: Vec<NodeId>,

    /// Parent id; `None` only for the root
    pub parent: Option<NodeId>,

    /// Number of ancestors
    pub depth: usize,

    /// 1-based position among non-text siblings
    pub sibling_index: usize,
}

impl Element {
    /// Element ID attribute
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }
}

/// Read-only document tree stored as an arena of elements.
///
/// Children are owned through their parent's forward list; the parent link is
/// a plain index used for upward navigation.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Element>,

    /// Exclusive end of each node's subtree in arena order
    subtree_end: Vec<usize>,

    /// Whether each node's subtree contains a text-bearing element
    has_content: Vec<bool>,
}

impl DomTree {
    /// Flatten an owned element description into an arena
    pub fn new(root: ElementNode) -> Self {
        let mut nodes: Vec<Element> = Vec::with_capacity(root.count_elements());

        // (node, parent, depth, fallback position)
        let mut stack: Vec<(ElementNode, Option<NodeId>, usize, usize)> = vec![(root, None, 0, 1)];

        while let Some((mut node, parent, depth, fallback_position)) = stack.pop() {
            let id = NodeId(nodes.len());
            let classes = node.class_list().into_iter().map(String::from).collect();
            let children = std::mem::take(&mut node.children);

            nodes.push(Element {
                tag_name: std::mem::take(&mut node.tag_name),
                attributes: std::mem::take(&mut node.attributes),
                classes,
                text: node.text_content.take(),
                children: Vec::with_capacity(children.len()),
                parent,
                depth,
                sibling_index: node.position.unwrap_or(fallback_position),
            });

            if let Some(parent) = parent {
                nodes[parent.0].children.push(id);
            }

            for (i, child) in children.into_iter().enumerate().rev() {
                stack.push((child, Some(id), depth + 1, i + 1));
            }
        }

        let mut subtree_end: Vec<usize> = (1..=nodes.len()).collect();
        let mut has_content: Vec<bool> = nodes.iter().map(Self::element_is_text_bearing).collect();

        // Children always come after their parent, so a reverse sweep sees
        // every subtree complete before its root.
        for i in (0..nodes.len()).rev() {
            if let Some(parent) = nodes[i].parent {
                subtree_end[parent.0] = subtree_end[parent.0].max(subtree_end[i]);
                has_content[parent.0] |= has_content[i];
            }
        }

        Self {
            nodes,
            subtree_end,
            has_content,
        }
    }

    /// Parse an HTML document into a tree rooted at its `<html>` element
    pub fn from_html(html: &str) -> Self {
        Self::new(crate::dom::html::parse_element_node(html))
    }

    /// Build a tree from the JSON form of an [`ElementNode`]
    pub fn from_json(json: &str) -> Result<Self> {
        let root: ElementNode = serde_json::from_str(json)
            .map_err(|e| InductionError::ParseFailed(format!("Failed to parse tree JSON: {}", e)))?;
        Ok(Self::new(root))
    }

    /// Id of the root element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is never true for built trees
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.len()
    }

    /// Get an element by id
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Get an element by id, reporting ids that do not belong to this tree
    pub fn element(&self, id: NodeId) -> Result<&Element> {
        self.get(id).ok_or_else(|| {
            InductionError::MalformedTree(format!(
                "node {} is outside a tree of {} elements",
                id.0,
                self.nodes.len()
            ))
        })
    }

    /// Child ids in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self[id].children
    }

    /// Parent id, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Proper ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Whether `ancestor` is a proper ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor.0 < node.0 && node.0 < self.subtree_end[ancestor.0]
    }

    /// All ids in document order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// All elements with their ids in document order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.nodes.iter().enumerate().map(|(i, element)| (NodeId(i), element))
    }

    /// True iff the element has direct, non-blank text
    pub fn is_text_bearing(&self, id: NodeId) -> bool {
        Self::element_is_text_bearing(&self[id])
    }

    /// True iff the element or one of its descendants is text-bearing
    pub fn has_text_content(&self, id: NodeId) -> bool {
        self.has_content[id.0]
    }

    /// 1-based position among non-text siblings
    pub fn sibling_index(&self, id: NodeId) -> usize {
        self[id].sibling_index
    }

    /// Root-to-node locator: `tag.class:nth-child(i)` per level joined by `" > "`
    pub fn locate(&self, id: NodeId) -> String {
        let mut path: Vec<String> = std::iter::once(id)
            .chain(self.ancestors(id))
            .map(|node| self.path_segment(node))
            .collect();
        path.reverse();
        path.join(" > ")
    }

    fn path_segment(&self, id: NodeId) -> String {
        let element = &self[id];
        let mut segment = element.tag_name.to_lowercase();
        for class in &element.classes {
            segment.push('.');
            segment.push_str(class);
        }
        segment.push_str(&format!(":nth-child({})", element.sibling_index));
        segment
    }

    /// Resolve a path of sibling indices, starting with the root's own index
    pub fn node_at_position_path(&self, path: &[usize]) -> Option<NodeId> {
        let (&first, rest) = path.split_first()?;
        let root = self.root();
        if self.sibling_index(root) != first {
            return None;
        }

        rest.iter().try_fold(root, |current, &position| {
            self.children(current)
                .iter()
                .copied()
                .find(|&child| self.sibling_index(child) == position)
        })
    }

    /// Rebuild the owned description of a subtree
    pub fn to_element_node(&self, id: NodeId) -> ElementNode {
        // the subtree of `id` is the contiguous arena range starting at `id`
        let flat: Vec<(Option<usize>, ElementNode)> = (id.0..self.subtree_end[id.0])
            .map(|index| {
                let element = &self.nodes[index];
                let slot = element
                    .parent
                    .filter(|_| index != id.0)
                    .map(|parent| parent.0 - id.0);

                let mut node = ElementNode::new(element.tag_name.clone())
                    .with_attributes(element.attributes.clone())
                    .with_position(element.sibling_index);
                node.text_content = element.text.clone();

                (slot, node)
            })
            .collect();

        ElementNode::assemble(flat).unwrap_or_else(|| ElementNode::new(self[id].tag_name.clone()))
    }

    /// Number of ancestors of the deepest element
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|element| element.depth).max().unwrap_or(0)
    }

    /// Convert the DOM tree to JSON.
    ///
    /// Trees deeper than [`MAX_JSON_DEPTH`] are refused, since `from_json`
    /// could not read them back.
    pub fn to_json(&self) -> Result<String> {
        let depth = self.max_depth();
        if depth > MAX_JSON_DEPTH {
            return Err(serde_json::Error::custom(format!(
                "tree is {} levels deep, JSON form holds at most {}",
                depth, MAX_JSON_DEPTH
            ))
            .into());
        }

        Ok(serde_json::to_string_pretty(&self.to_element_node(self.root()))?)
    }

    fn element_is_text_bearing(element: &Element) -> bool {
        element
            .text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

impl Index<NodeId> for DomTree {
    type Output = Element;

    fn index(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }
}
