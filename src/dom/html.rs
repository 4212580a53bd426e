//! HTML ingestion backed by `scraper`
//!
//! Converts a parsed HTML document into [`ElementNode`]s and answers CSS queries
//! with arena ids, so matched elements can be compared with induction output.

use crate::dom::element::ElementNode;
use crate::dom::tree::{DomTree, NodeId};
use crate::error::{InductionError, Result};
use scraper::{ElementRef, Html, Node, Selector};

/// Parse HTML and convert its `<html>` element into an owned description
pub fn parse_element_node(html: &str) -> ElementNode {
    let document = Html::parse_document(html);
    convert_document(&document)
}

fn convert_document(document: &Html) -> ElementNode {
    if !document.errors.is_empty() {
        log::debug!("HTML parser recovered from {} error(s)", document.errors.len());
    }

    let root = document.root_element();
    let mut flat: Vec<(Option<usize>, ElementNode)> = Vec::new();
    let mut stack: Vec<(ElementRef<'_>, Option<usize>, usize)> =
        vec![(root, None, element_position(root))];

    // pre-order: children are pushed reversed so the first one is visited first
    while let Some((element, parent, position)) = stack.pop() {
        let slot = flat.len();
        let (node, children) = convert_element(element, position);
        flat.push((parent, node));

        for (child, ordinal) in children.into_iter().rev() {
            stack.push((child, Some(slot), ordinal));
        }
    }

    ElementNode::assemble(flat).unwrap_or_else(|| ElementNode::new(root.value().name()))
}

/// Convert one element without its children, collecting its direct text.
///
/// Returns the child elements with their sibling positions.
fn convert_element<'a>(
    element: ElementRef<'a>,
    position: usize,
) -> (ElementNode, Vec<(ElementRef<'a>, usize)>) {
    let value = element.value();
    let mut node = ElementNode::new(value.name()).with_position(position);

    for (key, val) in value.attrs() {
        node.add_attribute(key, val);
    }

    let mut text = String::new();
    let mut ordinal = 0;
    let mut children = Vec::new();

    for child in element.children() {
        match child.value() {
            Node::Text(fragment) => text.push_str(fragment),
            Node::Element(_) => {
                ordinal += 1;
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push((child_element, ordinal));
                }
            }
            // comments, doctypes and processing instructions still occupy a position
            _ => ordinal += 1,
        }
    }

    if !text.is_empty() {
        node.text_content = Some(text);
    }

    (node, children)
}

/// 1-based position among preceding non-text siblings
fn element_position(element: ElementRef<'_>) -> usize {
    1 + element
        .prev_siblings()
        .filter(|sibling| !sibling.value().is_text())
        .count()
}

/// Sibling positions from the root element down to `element`
fn position_path(element: ElementRef<'_>) -> Vec<usize> {
    let mut path = vec![element_position(element)];
    let mut current = element;

    while let Some(parent) = current.parent().and_then(ElementRef::wrap) {
        path.push(element_position(parent));
        current = parent;
    }

    path.reverse();
    path
}

/// A parsed HTML document together with its arena tree
pub struct HtmlDocument {
    html: Html,
    tree: DomTree,
}

impl HtmlDocument {
    /// Parse an HTML document
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let tree = DomTree::new(convert_document(&document));
        Self {
            html: document,
            tree,
        }
    }

    /// Parse an HTML document, dropping script, style and noscript subtrees
    pub fn parse_simplified(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut root = convert_document(&document);
        root.simplify();
        Self {
            html: document,
            tree: DomTree::new(root),
        }
    }

    /// The arena tree built from the document
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Consume the document, keeping only the tree
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Ids of every element matching a CSS selector, in document order.
    ///
    /// Elements that are not part of the tree (e.g. removed by simplification)
    /// are skipped.
    pub fn query(&self, css: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(css)
            .map_err(|e| InductionError::InvalidSelector(format!("'{}': {}", css, e)))?;

        let mut ids: Vec<NodeId> = self
            .html
            .select(&selector)
            .filter_map(|element| self.tree.node_at_position_path(&position_path(element)))
            .collect();

        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
