//! Structural signatures used to decide whether two elements look alike

use crate::dom::Element;
use std::fmt;

/// One matching key of an element: its tag plus one of its class tokens,
/// or its tag alone when it has no classes.
///
/// Two elements share a key exactly when they are structurally compatible
/// through that key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureKey {
    /// Lowercased tag name
    pub tag: String,

    /// Shared class token; `None` stands for "no classes at all"
    pub token: Option<String>,
}

impl SignatureKey {
    /// Every key an element can be matched through, in class order
    pub fn keys_of(element: &Element) -> Vec<SignatureKey> {
        let tag = element.tag_name.to_ascii_lowercase();

        if element.classes.is_empty() {
            return vec![SignatureKey { tag, token: None }];
        }

        element
            .classes
            .iter()
            .map(|class| SignatureKey {
                tag: tag.clone(),
                token: Some(class.clone()),
            })
            .collect()
    }

    /// Whether `element` carries this key
    pub fn matches(&self, element: &Element) -> bool {
        if !element.tag_name.eq_ignore_ascii_case(&self.tag) {
            return false;
        }

        match &self.token {
            Some(token) => element.has_class(token),
            None => element.classes.is_empty(),
        }
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{}.{}", self.tag, token),
            None => write!(f, "{}", self.tag),
        }
    }
}

/// Same tag, and either overlapping class sets or no classes on both sides.
///
/// Discovery groups elements through shared [`SignatureKey`]s, so every pair
/// of members in a candidate cluster satisfies this predicate.
pub fn is_compatible(a: &Element, b: &Element) -> bool {
    if !a.tag_name.eq_ignore_ascii_case(&b.tag_name) {
        return false;
    }

    if a.classes.is_empty() || b.classes.is_empty() {
        return a.classes.is_empty() && b.classes.is_empty();
    }

    a.classes.iter().any(|class| b.has_class(class))
}
