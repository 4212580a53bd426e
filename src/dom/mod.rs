//! Document model and structural addressing
//!
//! This module provides the read-only tree the induction engine works on.
//! It includes:
//! - ElementNode: Owned description of an element (builder, JSON, parser output)
//! - DomTree: Arena of elements with parent links, text predicates and locators
//! - HtmlDocument: HTML parsing and CSS querying backed by `scraper`
//! - SelectorMap: Cache of element locators used for reporting

pub mod element;
pub mod html;
pub mod selector_map;
pub mod tree;

pub use element::ElementNode;
pub use html::HtmlDocument;
pub use selector_map::SelectorMap;
pub use tree::{DomTree, Element, NodeId};

/// Parse an HTML document into a tree
pub fn parse_document(html: &str) -> DomTree {
    DomTree::from_html(html)
}

/// Parse an HTML document into a tree without script, style and noscript subtrees
pub fn parse_simplified_document(html: &str) -> DomTree {
    let mut root = html::parse_element_node(html);
    root.simplify();
    DomTree::new(root)
}
