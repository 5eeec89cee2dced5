use tracing::trace;

use crate::condition::{derive_all, OverlapOracles};
use crate::error::MatrixError;
use crate::mesh::FoldedMesh;
use crate::overlap::OverlapRelation;
use crate::relation::PropagationResult;

use super::types::Propagation;

/// Derive conditions and apply them until nothing changes or a contradiction appears.
///
/// Newly decided creases can unlock new conditions, hence the re-derivation
/// on every pass. Each productive pass claims at least one cell, so the loop
/// ends after at most `n(n-1)/2 + 1` passes.
pub fn propagate(
    mesh: &FoldedMesh,
    oracles: &OverlapOracles,
    matrix: &mut OverlapRelation,
) -> Result<Propagation, MatrixError> {
    let mut summary = Propagation {
        outcome: PropagationResult::NotChanged,
        passes: 0,
        applied: 0,
        changed: 0,
    };
    loop {
        summary.passes += 1;
        let conditions = derive_all(mesh, matrix, &oracles.intersections, &oracles.coverage)?;
        let mut changed_this_pass = 0;
        for cond in &conditions {
            summary.applied += 1;
            match cond.apply(matrix)? {
                PropagationResult::Changed => changed_this_pass += 1,
                PropagationResult::NotChanged => {}
                PropagationResult::Unfoldable => {
                    trace!(?cond, pass = summary.passes, "condition violated");
                    summary.outcome = PropagationResult::Unfoldable;
                    return Ok(summary);
                }
            }
        }
        summary.changed += changed_this_pass;
        if changed_this_pass == 0 {
            break;
        }
    }
    if summary.changed > 0 {
        summary.outcome = PropagationResult::Changed;
    }
    Ok(summary)
}
