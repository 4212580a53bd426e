//! # template-induction
//!
//! A Rust library that discovers repeated structural templates in HTML documents:
//! sets of wrapper elements sharing the same shape (e.g. product cards), together
//! with the sub-elements that play the same role inside every wrapper (e.g. title,
//! price). No selectors or keyword lists are involved; structural repetition is the
//! only evidence.
//!
//! ## Features
//!
//! - **Arena DOM**: Read-only element tree with parent links, built from HTML or by hand
//! - **Structural Addressing**: Text-bearing test, sibling positions, root-to-node locators
//! - **Template Induction**: Candidate discovery, field alignment, validity filtering and
//!   overlap resolution
//! - **Reporting**: Selector-based JSON reports of the discovered groups
//!
//! ## Library Usage
//!
//! ```rust
//! use template_induction::{induce, DomTree, InductionReport};
//!
//! # fn main() -> template_induction::Result<()> {
//! let tree = DomTree::from_html(r#"
//!     <div class="card"><span class="title">Lamp</span><span class="price">12</span></div>
//!     <div class="card"><span class="title">Desk</span><span class="price">80</span></div>
//! "#);
//!
//! let groups = induce(&tree);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].element_groups.len(), 2);
//!
//! let report = InductionReport::new(&tree, &groups)?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Custom Options
//!
//! ```rust
//! use template_induction::{DomTree, InductionOptions, OverlapPolicy, TemplateInducer};
//!
//! # fn main() -> template_induction::Result<()> {
//! let options = InductionOptions::new()
//!     .field_coverage(0.6)
//!     .overlap_policy(OverlapPolicy::Deepest);
//! let inducer = TemplateInducer::with_options(options)?;
//!
//! let tree = DomTree::from_html("<ul><li>a</li><li>b</li></ul>");
//! assert!(inducer.induce(&tree).is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: Document tree, HTML ingestion, locators and selector cache
//! - [`induction`]: The template induction engine and its options
//! - [`report`]: Selector-based reports
//! - [`error`]: Error types and result aliases

pub mod dom;
pub mod error;
pub mod induction;
pub mod report;

pub use dom::{DomTree, Element, ElementNode, HtmlDocument, NodeId, SelectorMap};
pub use error::{InductionError, Result};
pub use induction::{
    induce, is_compatible, ElementGroup, FieldGroup, InductionOptions, OverlapPolicy,
    TemplateInducer,
};
pub use report::{GroupReport, InductionReport};
