//! Configuration and result types of the estimator.

use crate::overlap::OverlapRelation;
use crate::relation::PropagationResult;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EstimateCfg {
    /// Stop after collecting this many complete matrices.
    pub max_solutions: usize,
    /// Maximum number of nested speculative assignments.
    pub max_depth: usize,
}

impl Default for EstimateCfg {
    fn default() -> Self {
        Self {
            max_solutions: 16,
            max_depth: 64,
        }
    }
}

/// Summary of one [`super::propagate`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Propagation {
    /// `Changed` if any cell was claimed, `NotChanged` at an untouched fixed
    /// point, `Unfoldable` on the first contradiction.
    pub outcome: PropagationResult,
    /// Derive-and-apply rounds run.
    pub passes: usize,
    /// Conditions applied, duplicates included.
    pub applied: usize,
    /// Cells claimed.
    pub changed: usize,
}

/// Outcome of an [`super::Estimator`] run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Estimation {
    /// Exactly one complete, condition-consistent matrix.
    Unique(OverlapRelation),
    /// Several complete matrices; all of them were found.
    Multiple(Vec<OverlapRelation>),
    /// A budget was hit: a completion beyond `max_solutions` exists, or
    /// `max_depth` cut a branch. The listed matrices are complete.
    Truncated(Vec<OverlapRelation>),
    /// Every branch ended in a contradiction.
    Unfoldable,
}

impl Estimation {
    pub fn solutions(&self) -> &[OverlapRelation] {
        match self {
            Estimation::Unique(m) => std::slice::from_ref(m),
            Estimation::Multiple(ms) | Estimation::Truncated(ms) => ms,
            Estimation::Unfoldable => &[],
        }
    }

    pub fn is_unfoldable(&self) -> bool {
        matches!(self, Estimation::Unfoldable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Estimation::Unique(_) => "unique",
            Estimation::Multiple(_) => "multiple",
            Estimation::Truncated(_) => "truncated",
            Estimation::Unfoldable => "unfoldable",
        }
    }
}
