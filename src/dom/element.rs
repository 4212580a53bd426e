use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tags whose subtrees never carry page content
const NON_CONTENT_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Owned description of a DOM element.
///
/// This is the input form of a document: it can be built by hand, deserialized
/// from JSON, or produced by the HTML parser. [`DomTree`](crate::dom::DomTree)
/// flattens it into an arena before induction runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML tag name (e.g., "div", "span", "li")
    pub tag_name: String,

    /// Element attributes in source order (e.g., id, class, href)
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Direct text of the element, excluding text that belongs to descendants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,

    /// 1-based position among non-text siblings as reported by the parser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            text_content: None,
            children: Vec::new(),
            position: None,
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder method: append one or more whitespace-separated class tokens
    pub fn with_class(mut self, class: &str) -> Self {
        let merged = match self.attributes.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.attributes.insert("class".to_string(), merged);
        self
    }

    /// Builder method: set direct text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<ElementNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: set the parser-reported sibling position
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_list().contains(&class_name)
    }

    /// Class tokens in source order, duplicates removed
    pub fn class_list(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = Vec::new();
        if let Some(classes) = self.attributes.get("class") {
            for token in classes.split_whitespace() {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id")
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Remove script, style and noscript subtrees.
    ///
    /// Parser-reported positions are left untouched so locators still address
    /// the original document.
    pub fn simplify(&mut self) {
        let mut stack: Vec<&mut ElementNode> = vec![self];

        while let Some(node) = stack.pop() {
            node.children
                .retain(|child| !NON_CONTENT_TAGS.iter().any(|&tag| child.is_tag(tag)));
            stack.extend(node.children.iter_mut());
        }
    }

    /// Count this element and all of its descendants
    pub fn count_elements(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&ElementNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }

        count
    }

    /// Rebuild a tree from `(parent slot, node)` pairs listed in pre-order.
    ///
    /// Every node must come after its parent and before its next sibling,
    /// and the nodes must carry no children yet. Returns the first node.
    pub(crate) fn assemble(mut flat: Vec<(Option<usize>, ElementNode)>) -> Option<ElementNode> {
        while let Some((parent, mut node)) = flat.pop() {
            // descendants are attached last-first, so the list is complete but reversed
            node.children.reverse();

            match parent {
                Some(slot) => flat.get_mut(slot)?.1.children.push(node),
                None => return Some(node),
            }
        }

        None
    }
}

impl Drop for ElementNode {
    // Unlinks descendants one level at a time so deep trees drop without recursion
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}
