use crate::error::MatrixError;
use crate::mesh::{Crease, FoldedMesh};
use crate::overlap::OverlapRelation;
use crate::relation::{PropagationResult, Relation};

/// Order every mountain/valley-creased pair of faces.
///
/// A valley folds the neighbour onto the front side: a front-facing face ends
/// up below its neighbour across a valley and above it across a mountain; a
/// back-facing face sees the opposite. Pairs already decided are re-asserted,
/// so contradicting crease data yields `Unfoldable`.
pub fn seed_from_creases(
    mesh: &FoldedMesh,
    matrix: &mut OverlapRelation,
) -> Result<PropagationResult, MatrixError> {
    let mut outcome = PropagationResult::NotChanged;
    for face in mesh.faces() {
        let i = face.index;
        for he in mesh.cycle(i) {
            let crease = mesh.halfedge(he).crease;
            if !matches!(crease, Crease::Mountain | Crease::Valley) {
                continue;
            }
            let Some(j) = mesh.pair_face(he) else {
                continue;
            };
            let value = match (face.is_front, crease) {
                (true, Crease::Valley) | (false, Crease::Mountain) => Relation::Below,
                _ => Relation::Above,
            };
            outcome = outcome.merge(matrix.set_if_possible(i, j, value)?);
            if outcome == PropagationResult::Unfoldable {
                return Ok(outcome);
            }
        }
    }
    Ok(outcome)
}
