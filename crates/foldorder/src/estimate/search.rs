//! Depth-first enumeration of completions with clone-per-branch backtracking.

use tracing::{debug, debug_span, trace};

use crate::condition::OverlapOracles;
use crate::error::MatrixError;
use crate::mesh::FoldedMesh;
use crate::overlap::OverlapRelation;
use crate::relation::{PropagationResult, Relation};

use super::propagate::propagate;
use super::seed::seed_from_creases;
use super::types::{EstimateCfg, Estimation};

/// Runs seeding, propagation and branching for one model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Estimator {
    cfg: EstimateCfg,
}

impl Estimator {
    pub fn new(cfg: EstimateCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> EstimateCfg {
        self.cfg
    }

    /// Estimate layer orders starting from `seeded`, a matrix in which the
    /// geometry collaborator already marked non-overlapping pairs. `seeded`
    /// itself is left untouched.
    pub fn run(
        &self,
        mesh: &FoldedMesh,
        oracles: &OverlapOracles,
        seeded: &OverlapRelation,
    ) -> Result<Estimation, MatrixError> {
        let _span = debug_span!("estimate", faces = mesh.face_count()).entered();
        let mut matrix = seeded.clone();
        if seed_from_creases(mesh, &mut matrix)? == PropagationResult::Unfoldable {
            debug!("crease assignment contradicts itself");
            return Ok(Estimation::Unfoldable);
        }

        let mut runner = BranchRunner::new(mesh, oracles, self.cfg);
        runner.recur(matrix, 0)?;
        debug!(
            solutions = runner.solutions.len(),
            branches = runner.branches,
            truncated = runner.truncated,
            "estimation finished"
        );

        Ok(match (runner.truncated, runner.solutions.len()) {
            (true, _) => Estimation::Truncated(runner.solutions),
            (false, 0) => Estimation::Unfoldable,
            (false, 1) => Estimation::Unique(runner.solutions.remove(0)),
            (false, _) => Estimation::Multiple(runner.solutions),
        })
    }
}

/// DFS runner carrying shared context and accumulators.
struct BranchRunner<'a> {
    mesh: &'a FoldedMesh,
    oracles: &'a OverlapOracles,
    cfg: EstimateCfg,
    solutions: Vec<OverlapRelation>,
    branches: usize,
    truncated: bool,
}

impl<'a> BranchRunner<'a> {
    fn new(mesh: &'a FoldedMesh, oracles: &'a OverlapOracles, cfg: EstimateCfg) -> Self {
        Self {
            mesh,
            oracles,
            cfg,
            solutions: Vec::new(),
            branches: 0,
            truncated: false,
        }
    }

    fn recur(&mut self, mut matrix: OverlapRelation, depth: usize) -> Result<(), MatrixError> {
        // Budget spent and a further completion seen: nothing left to learn.
        if self.truncated && self.solutions.len() >= self.cfg.max_solutions {
            return Ok(());
        }
        let summary = propagate(self.mesh, self.oracles, &mut matrix)?;
        if summary.outcome == PropagationResult::Unfoldable {
            trace!(depth, "branch unfoldable");
            return Ok(());
        }
        let Some((i, j)) = matrix.first_unresolved() else {
            // Only a completion beyond the budget makes the answer partial.
            if self.solutions.len() >= self.cfg.max_solutions {
                self.truncated = true;
            } else {
                self.solutions.push(matrix);
            }
            return Ok(());
        };
        if depth >= self.cfg.max_depth {
            self.truncated = true;
            return Ok(());
        }
        for value in [Relation::Below, Relation::Above] {
            self.branches += 1;
            let mut branch = matrix.clone();
            branch.set(i, j, value)?;
            trace!(depth, i, j, %value, "branch");
            self.recur(branch, depth + 1)?;
        }
        Ok(())
    }
}
