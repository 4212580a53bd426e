//! Template induction engine
//!
//! Finds repeated wrapper elements and the fields aligned inside them:
//! - discovery: clusters of structurally compatible elements, per nesting level
//! - fields: per-instance endpoint walk and positional alignment
//! - validity: clusters with too few fields are noise or pass-through layers
//! - overlap: one cluster per ancestor chain, unrelated clusters kept apart

pub mod discovery;
pub mod fields;
pub mod group;
pub mod options;
pub mod overlap;
pub mod signature;

pub use discovery::CandidateCluster;
pub use fields::{FieldGroup, SlotPath};
pub use group::ElementGroup;
pub use options::{InductionOptions, OverlapPolicy};
pub use overlap::ValidCluster;
pub use signature::{is_compatible, SignatureKey};

use crate::dom::DomTree;
use crate::error::Result;

/// Runs induction over read-only trees with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct TemplateInducer {
    options: InductionOptions,
}

impl TemplateInducer {
    /// Create an inducer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inducer after validating `options`
    pub fn with_options(options: InductionOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &InductionOptions {
        &self.options
    }

    /// Discover the templates of a document, ordered by their first wrapper.
    ///
    /// The same tree always produces the same result.
    pub fn induce(&self, tree: &DomTree) -> Vec<ElementGroup> {
        let candidates = discovery::discover(tree, self.options.min_instances);
        let valid = self.validate_clusters(tree, candidates);
        log::debug!("{} clusters passed validity filtering", valid.len());

        overlap::resolve_overlaps(tree, valid, self.options.overlap_policy)
            .into_iter()
            .map(|valid| ElementGroup::new(valid.cluster.instances, valid.fields))
            .collect()
    }

    /// Resolve fields of a single cluster and keep it when it has enough of them
    pub fn validate_cluster(
        &self,
        tree: &DomTree,
        cluster: CandidateCluster,
    ) -> Option<ValidCluster> {
        let fields = fields::resolve_fields(tree, &cluster.instances, &self.options);

        if fields.len() < self.options.min_fields {
            log::trace!("rejecting {}: {} field(s)", cluster, fields.len());
            return None;
        }

        Some(ValidCluster { cluster, fields })
    }

    #[cfg(not(feature = "parallel"))]
    fn validate_clusters(
        &self,
        tree: &DomTree,
        candidates: Vec<CandidateCluster>,
    ) -> Vec<ValidCluster> {
        candidates
            .into_iter()
            .filter_map(|cluster| self.validate_cluster(tree, cluster))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn validate_clusters(
        &self,
        tree: &DomTree,
        candidates: Vec<CandidateCluster>,
    ) -> Vec<ValidCluster> {
        use rayon::prelude::*;

        let resolved: Vec<Option<ValidCluster>> = candidates
            .into_par_iter()
            .map(|cluster| self.validate_cluster(tree, cluster))
            .collect();

        resolved.into_iter().flatten().collect()
    }
}

/// Discover the templates of a document with default options
pub fn induce(tree: &DomTree) -> Vec<ElementGroup> {
    TemplateInducer::new().induce(tree)
}
