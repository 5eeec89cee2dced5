use std::time::Instant;

use tracing::debug;

use crate::error::MatrixError;
use crate::mesh::FoldedMesh;
use crate::overlap::OverlapRelation;

use super::oracle::{EdgeCoverage, OverlapIntersections};
use super::types::StackCondition3;

/// All three-face conditions implied by the creases whose order is known.
///
/// For each face `i` (index order) and each paired half-edge `he` of `i`
/// (cycle order) with `j` across it: if `i` is below `j`, every `k` in
/// `intersections[i][j]` covering `he` (other than `i`, `j`) yields
/// `(lower = i, upper = j, other = k)`.
///
/// Reads `matrix` only. Errors come from matrix lookups with indices the mesh
/// or oracles got wrong.
pub fn derive_all(
    mesh: &FoldedMesh,
    matrix: &OverlapRelation,
    intersections: &OverlapIntersections,
    coverage: &EdgeCoverage,
) -> Result<Vec<StackCondition3>, MatrixError> {
    let watch = Instant::now();
    let mut conditions = Vec::new();

    for face in mesh.faces() {
        let i = face.index;
        for he in mesh.cycle(i) {
            let Some(j) = mesh.pair_face(he) else {
                continue;
            };
            if !matrix.is_below(i, j)? {
                continue;
            }
            let covering = coverage.faces(he);
            conditions.extend(
                intersections
                    .get(i, j)
                    .iter()
                    .copied()
                    .filter(|&k| k != i && k != j && covering.contains(&k))
                    .map(|k| StackCondition3::new(i, j, k)),
            );
        }
    }

    debug!(
        conditions = conditions.len(),
        elapsed_ms = watch.elapsed().as_secs_f64() * 1e3,
        "derived three-face conditions"
    );
    Ok(conditions)
}
