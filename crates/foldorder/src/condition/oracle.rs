use std::collections::BTreeSet;

use crate::mesh::HalfEdgeId;

/// `get(i, j)`: faces overlapping both `i` and `j`, regardless of stacking.
///
/// Lookups outside `[0, n)` panic; the oracle is a precondition, not input to
/// validate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapIntersections {
    n: usize,
    cells: Vec<Vec<usize>>,
}

impl OverlapIntersections {
    /// Every pair starts with an empty intersection.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![Vec::new(); n * n],
        }
    }

    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> Vec<usize>) -> Self {
        let mut out = Self::new(n);
        for i in 0..n {
            for j in 0..n {
                out.cells[i * n + j] = f(i, j);
            }
        }
        out
    }

    /// Build from per-face overlap lists (`overlaps[i]`: faces overlapping `i`).
    /// Each intersection is sorted ascending.
    pub fn from_overlaps(overlaps: &[Vec<usize>]) -> Self {
        let sets: Vec<BTreeSet<usize>> = overlaps
            .iter()
            .map(|o| o.iter().copied().collect())
            .collect();
        Self::from_fn(sets.len(), |i, j| {
            sets[i].intersection(&sets[j]).copied().collect()
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &[usize] {
        assert!(i < self.n && j < self.n, "intersection ({i}, {j}) outside {n}", n = self.n);
        &self.cells[i * self.n + j]
    }

    pub fn set(&mut self, i: usize, j: usize, faces: Vec<usize>) {
        assert!(i < self.n && j < self.n, "intersection ({i}, {j}) outside {n}", n = self.n);
        self.cells[i * self.n + j] = faces;
    }
}

/// For each half-edge, the faces whose polygon covers that edge's segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeCoverage {
    per_halfedge: Vec<BTreeSet<usize>>,
}

impl EdgeCoverage {
    pub fn new(halfedge_count: usize) -> Self {
        Self {
            per_halfedge: vec![BTreeSet::new(); halfedge_count],
        }
    }

    pub fn insert(&mut self, he: HalfEdgeId, face: usize) {
        self.per_halfedge[he.0].insert(face);
    }

    #[inline]
    pub fn faces(&self, he: HalfEdgeId) -> &BTreeSet<usize> {
        &self.per_halfedge[he.0]
    }

    #[inline]
    pub fn covers(&self, he: HalfEdgeId, face: usize) -> bool {
        self.per_halfedge[he.0].contains(&face)
    }

    pub fn halfedge_count(&self) -> usize {
        self.per_halfedge.len()
    }
}

/// Both oracles of one model, as handed over by the geometry collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlapOracles {
    pub intersections: OverlapIntersections,
    pub coverage: EdgeCoverage,
}
