//! Selector-based reports of induction results

use crate::dom::{DomTree, NodeId, SelectorMap};
use crate::error::Result;
use crate::induction::ElementGroup;
use serde::{Deserialize, Serialize};

/// One element group with every element replaced by its locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReport {
    pub wrapper_elements: Vec<String>,
    pub element_groups: Vec<Vec<String>>,
}

impl GroupReport {
    /// Order-insensitive form: selectors sorted within each list, field groups sorted
    pub fn normalized(&self) -> Self {
        let mut wrapper_elements = self.wrapper_elements.clone();
        wrapper_elements.sort();

        let mut element_groups: Vec<Vec<String>> = self
            .element_groups
            .iter()
            .map(|field| {
                let mut field = field.clone();
                field.sort();
                field
            })
            .collect();
        element_groups.sort();

        Self {
            wrapper_elements,
            element_groups,
        }
    }
}

/// Report for a whole induction run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InductionReport {
    pub groups: Vec<GroupReport>,
}

impl InductionReport {
    /// Describe `groups` by locators in `tree`
    pub fn new(tree: &DomTree, groups: &[ElementGroup]) -> Result<Self> {
        let mut selectors = SelectorMap::new();
        let mut reports = Vec::with_capacity(groups.len());

        for group in groups {
            reports.push(GroupReport {
                wrapper_elements: locate_all(tree, &mut selectors, &group.wrapper_elements)?,
                element_groups: group
                    .element_groups
                    .iter()
                    .map(|field| locate_all(tree, &mut selectors, field))
                    .collect::<Result<_>>()?,
            });
        }

        Ok(Self { groups: reports })
    }

    /// Every group in its order-insensitive form
    pub fn normalized(&self) -> Self {
        Self {
            groups: self.groups.iter().map(GroupReport::normalized).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn locate_all(tree: &DomTree, selectors: &mut SelectorMap, ids: &[NodeId]) -> Result<Vec<String>> {
    ids.iter()
        .map(|&id| {
            tree.element(id)?;
            Ok(selectors.resolve(tree, id).to_string())
        })
        .collect()
}
