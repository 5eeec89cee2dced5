use crate::error::MatrixError;
use crate::overlap::OverlapRelation;
use crate::relation::{PropagationResult, Relation};

/// `relation(lower, other) == relation(upper, other)` must hold in any valid
/// final matrix. `lower` lies below `upper` and both share a crease that
/// `other` covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackCondition3 {
    pub lower: usize,
    pub upper: usize,
    pub other: usize,
}

impl StackCondition3 {
    pub fn new(lower: usize, upper: usize, other: usize) -> Self {
        Self {
            lower,
            upper,
            other,
        }
    }

    /// Copy a known side onto the unknown one.
    ///
    /// - both sides definite: `NotChanged` if equal, `Unfoldable` otherwise;
    /// - one side definite, the other unresolved: guarded write of the known value;
    /// - anything else (unresolved on both sides, or a `NoOverlap` cell the
    ///   oracles disagree with): `NotChanged`.
    pub fn apply(&self, matrix: &mut OverlapRelation) -> Result<PropagationResult, MatrixError> {
        let below_side = matrix.get(self.lower, self.other)?;
        let above_side = matrix.get(self.upper, self.other)?;
        match (below_side, above_side) {
            (a, b) if a.is_definite() && b.is_definite() => Ok(if a == b {
                PropagationResult::NotChanged
            } else {
                PropagationResult::Unfoldable
            }),
            (a, Relation::Unresolved) if a.is_definite() => {
                matrix.set_if_possible(self.upper, self.other, a)
            }
            (Relation::Unresolved, b) if b.is_definite() => {
                matrix.set_if_possible(self.lower, self.other, b)
            }
            _ => Ok(PropagationResult::NotChanged),
        }
    }

    /// Both sides definite and different.
    pub fn is_violated(&self, matrix: &OverlapRelation) -> Result<bool, MatrixError> {
        let a = matrix.get(self.lower, self.other)?;
        let b = matrix.get(self.upper, self.other)?;
        Ok(a.is_definite() && b.is_definite() && a != b)
    }
}
