use crate::error::{InductionError, Result};
use serde::{Deserialize, Serialize};

/// How competing clusters on one ancestor chain (or sharing elements) are decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Keep the cluster with more instances; the shallower one wins a tie
    #[default]
    MostInstances,
    /// Always keep the deepest cluster
    Deepest,
    /// Always keep the outermost cluster
    Shallowest,
}

/// Tuning knobs for template induction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InductionOptions {
    /// Smallest number of instances a cluster needs
    pub min_instances: usize,

    /// Smallest number of accepted field groups for a cluster to be valid
    pub min_fields: usize,

    /// A field is kept when strictly more than this share of instances has it
    pub field_coverage: f64,

    /// Tie-break between nested or overlapping valid clusters
    pub overlap_policy: OverlapPolicy,
}

impl Default for InductionOptions {
    fn default() -> Self {
        Self {
            min_instances: 2,
            min_fields: 2,
            field_coverage: 0.5,
            overlap_policy: OverlapPolicy::MostInstances,
        }
    }
}

impl InductionOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the minimum cluster size
    pub fn min_instances(mut self, min_instances: usize) -> Self {
        self.min_instances = min_instances;
        self
    }

    /// Builder method: set the minimum number of fields
    pub fn min_fields(mut self, min_fields: usize) -> Self {
        self.min_fields = min_fields;
        self
    }

    /// Builder method: set the field coverage ratio
    pub fn field_coverage(mut self, field_coverage: f64) -> Self {
        self.field_coverage = field_coverage;
        self
    }

    /// Builder method: set the overlap policy
    pub fn overlap_policy(mut self, overlap_policy: OverlapPolicy) -> Self {
        self.overlap_policy = overlap_policy;
        self
    }

    /// Load options from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every value is in range
    pub fn validate(&self) -> Result<()> {
        if self.min_instances < 2 {
            return Err(InductionError::InvalidOptions(format!(
                "min_instances must be at least 2, got {}",
                self.min_instances
            )));
        }

        if self.min_fields < 1 {
            return Err(InductionError::InvalidOptions(
                "min_fields must be at least 1".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.field_coverage) {
            return Err(InductionError::InvalidOptions(format!(
                "field_coverage must be in [0, 1), got {}",
                self.field_coverage
            )));
        }

        Ok(())
    }

    /// Whether `present` out of `total` instances is enough to accept a field
    pub fn covers(&self, present: usize, total: usize) -> bool {
        present as f64 > self.field_coverage * total as f64
    }
}
