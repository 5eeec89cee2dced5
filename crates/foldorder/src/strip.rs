//! Synthetic flat-folded paper strips with a known layer order.
//!
//! Purpose
//! - Stand in for the geometry collaborator in tests, benches and the CLI:
//!   produce a mesh, the two overlap oracles, a `NoOverlap`-seeded matrix
//!   and the true bottom-to-top order, all from one reproducible draw.
//!
//! Model
//! - A strip of unit width is folded back and forth along the x axis. Face `k`
//!   runs from crease `x_k` to crease `x_{k+1}`, alternating direction, and is
//!   laid over (`StackDirection::Up`) or under (`Down`) every earlier face.
//!   Adding a face on the outside of the stack never forces paper through
//!   paper, so any lengths give a valid fold.
//! - [`draw_strip`] grows each face longer than the previous one (a spiral),
//!   which makes every later face cover every earlier crease; three-face
//!   propagation then pins down the full order.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::condition::{EdgeCoverage, OverlapIntersections, OverlapOracles};
use crate::error::{MatrixError, MeshError};
use crate::mesh::{Crease, FoldedMesh, MeshBuilder};
use crate::overlap::OverlapRelation;
use crate::relation::Relation;

const EPS: f64 = 1e-9;

/// Errors of the strip generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StripError {
    #[error("invalid strip params: {reason}")]
    InvalidParams { reason: String },

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl StripError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Face count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl FaceCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            FaceCount::Fixed(n) => n.max(1),
            FaceCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Where each new face goes relative to the stack built so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackDirection {
    #[default]
    Up,
    Down,
}

/// Spiral strip sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripCfg {
    pub faces: FaceCount,
    /// Length of face 0.
    pub first_len: f64,
    /// Each face is longer than the previous by a uniform draw from `[growth_min, growth_max]`.
    pub growth_min: f64,
    pub growth_max: f64,
    pub direction: StackDirection,
}

impl Default for StripCfg {
    fn default() -> Self {
        Self {
            faces: FaceCount::Fixed(8),
            first_len: 1.0,
            growth_min: 0.1,
            growth_max: 0.5,
            direction: StackDirection::Up,
        }
    }
}

impl StripCfg {
    fn validate(&self) -> Result<(), StripError> {
        if !(self.first_len.is_finite() && self.first_len > 0.0) {
            return Err(StripError::invalid("first_len must be finite and > 0"));
        }
        if !(self.growth_min.is_finite() && self.growth_max.is_finite()) {
            return Err(StripError::invalid("growth bounds must be finite"));
        }
        if self.growth_min <= 0.0 {
            return Err(StripError::invalid("growth_min must be > 0"));
        }
        if self.growth_min > self.growth_max {
            return Err(StripError::invalid("growth_min <= growth_max required"));
        }
        Ok(())
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// A folded strip plus everything the estimator consumes.
#[derive(Clone, Debug)]
pub struct StripFold {
    pub mesh: FoldedMesh,
    /// Corners of each face in the folded plane, counter-clockwise from `(lo, 0)`.
    pub rects: Vec<[Vector2<f64>; 4]>,
    pub oracles: OverlapOracles,
    /// All pairs unresolved except geometrically disjoint ones (`NoOverlap`).
    pub seeded: OverlapRelation,
    /// Face indices from bottom to top.
    pub true_order: Vec<usize>,
}

impl StripFold {
    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    /// The fully resolved matrix of the true fold.
    pub fn truth(&self) -> Result<OverlapRelation, MatrixError> {
        let n = self.face_count();
        let mut rank = vec![0usize; n];
        for (r, &f) in self.true_order.iter().enumerate() {
            rank[f] = r;
        }
        let mut m = self.seeded.clone();
        for i in 0..n {
            for j in (i + 1)..n {
                if m.is_no_overlap(i, j)? {
                    continue;
                }
                let value = if rank[i] < rank[j] {
                    Relation::Below
                } else {
                    Relation::Above
                };
                m.set(i, j, value)?;
            }
        }
        Ok(m)
    }
}

/// Draw a random spiral strip.
pub fn draw_strip(cfg: StripCfg, tok: ReplayToken) -> Result<StripFold, StripError> {
    cfg.validate()?;
    let mut rng = tok.to_std_rng();
    let n = cfg.faces.sample(&mut rng);
    let mut lengths = Vec::with_capacity(n);
    let mut len = cfg.first_len;
    for _ in 0..n {
        lengths.push(len);
        len += rng.gen_range(cfg.growth_min..=cfg.growth_max);
    }
    strip_from_lengths(&lengths, cfg.direction)
}

/// Fold a strip whose faces have the given lengths, in order.
pub fn strip_from_lengths(
    lengths: &[f64],
    direction: StackDirection,
) -> Result<StripFold, StripError> {
    if lengths.iter().any(|l| !(l.is_finite() && *l > EPS)) {
        return Err(StripError::invalid("face lengths must be finite and > 0"));
    }
    let n = lengths.len();

    // Crease positions x_0..x_n along the folded axis.
    let mut xs = Vec::with_capacity(n + 1);
    xs.push(0.0f64);
    for (k, len) in lengths.iter().enumerate() {
        let dir = if k % 2 == 0 { 1.0 } else { -1.0 };
        xs.push(xs[k] + dir * len);
    }
    let rects: Vec<[Vector2<f64>; 4]> = (0..n)
        .map(|k| {
            let (lo, hi) = (xs[k].min(xs[k + 1]), xs[k].max(xs[k + 1]));
            [
                Vector2::new(lo, 0.0),
                Vector2::new(hi, 0.0),
                Vector2::new(hi, 1.0),
                Vector2::new(lo, 1.0),
            ]
        })
        .collect();

    // Cycle slots: 0 bottom, 1 right, 2 top, 3 left.
    let mut builder = MeshBuilder::new();
    for k in 0..n {
        builder.add_face(4, k % 2 == 0)?;
    }
    for k in 0..n.saturating_sub(1) {
        // Face k runs rightwards on even k, so the shared crease is on the right.
        let side = if k % 2 == 0 { 1 } else { 3 };
        let below_first = direction == StackDirection::Up;
        let front = k % 2 == 0;
        let crease = if front == below_first {
            Crease::Valley
        } else {
            Crease::Mountain
        };
        let (a, b) = builder
            .halfedge_of(k, side)
            .zip(builder.halfedge_of(k + 1, side))
            .ok_or_else(|| StripError::invalid("missing crease half-edge"))?;
        builder.connect(a, b, crease)?;
    }
    let mesh = builder.build();

    let overlaps: Vec<Vec<usize>> = (0..n)
        .map(|i| (0..n).filter(|&j| j != i && overlap(&rects[i], &rects[j])).collect())
        .collect();
    let mut seeded = OverlapRelation::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if !overlaps[i].contains(&j) {
                seeded.set_no_overlap(i, j)?;
            }
        }
    }

    let mut coverage = EdgeCoverage::new(mesh.halfedge_count());
    for face in mesh.faces() {
        let corners = &rects[face.index];
        for (slot, he) in mesh.cycle(face.index).enumerate() {
            let mid = (corners[slot] + corners[(slot + 1) % 4]) * 0.5;
            for (m, rect) in rects.iter().enumerate() {
                if contains_strict(rect, mid) {
                    coverage.insert(he, m);
                }
            }
        }
    }

    let true_order = match direction {
        StackDirection::Up => (0..n).collect(),
        StackDirection::Down => (0..n).rev().collect(),
    };

    Ok(StripFold {
        mesh,
        rects,
        oracles: OverlapOracles {
            intersections: OverlapIntersections::from_overlaps(&overlaps),
            coverage,
        },
        seeded,
        true_order,
    })
}

/// Positive-area intersection of two axis-aligned rectangles.
fn overlap(a: &[Vector2<f64>; 4], b: &[Vector2<f64>; 4]) -> bool {
    let lo = a[0].sup(&b[0]);
    let hi = a[2].inf(&b[2]);
    hi.x - lo.x > EPS && hi.y - lo.y > EPS
}

fn contains_strict(rect: &[Vector2<f64>; 4], p: Vector2<f64>) -> bool {
    let (lo, hi) = (rect[0], rect[2]);
    p.x > lo.x + EPS && p.x < hi.x - EPS && p.y > lo.y + EPS && p.y < hi.y - EPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_token_is_deterministic() {
        let cfg = StripCfg {
            faces: FaceCount::Uniform { min: 3, max: 9 },
            ..StripCfg::default()
        };
        let tok = ReplayToken { seed: 5, index: 2 };
        let a = draw_strip(cfg, tok).unwrap();
        let b = draw_strip(cfg, tok).unwrap();
        assert_eq!(a.rects, b.rects);
        assert_eq!(a.true_order, b.true_order);
        assert_eq!(a.oracles, b.oracles);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let tok = ReplayToken { seed: 0, index: 0 };
        for cfg in [
            StripCfg {
                first_len: 0.0,
                ..StripCfg::default()
            },
            StripCfg {
                growth_min: 0.0,
                ..StripCfg::default()
            },
            StripCfg {
                growth_min: 0.6,
                growth_max: 0.5,
                ..StripCfg::default()
            },
        ] {
            assert!(matches!(
                draw_strip(cfg, tok),
                Err(StripError::InvalidParams { .. })
            ));
        }
        assert!(strip_from_lengths(&[1.0, -2.0], StackDirection::Up).is_err());
    }

    #[test]
    fn creases_link_consecutive_faces() {
        let s = strip_from_lengths(&[1.0, 2.0, 3.0, 4.0], StackDirection::Up).unwrap();
        assert_eq!(s.mesh.face_count(), 4);
        assert_eq!(s.mesh.crease_count(), 3);
        for k in 0..3 {
            let linked = s
                .mesh
                .cycle(k)
                .any(|he| s.mesh.pair_face(he) == Some(k + 1));
            assert!(linked, "face {k} not creased to {}", k + 1);
        }
    }

    #[test]
    fn disjoint_faces_are_seeded_no_overlap() {
        // Face 0: [0,1], face 1: [0.5,1], face 2: [0.5,0.7].
        let s = strip_from_lengths(&[1.0, 0.5, 0.2], StackDirection::Up).unwrap();
        assert!(s.seeded.is_unresolved(0, 1).unwrap());
        assert!(s.seeded.is_unresolved(1, 2).unwrap());
        assert!(s.seeded.is_unresolved(0, 2).unwrap());

        // Face 0: [0,1], face 1: [-2,1], face 2: [-2,-1.5] misses face 0.
        let s = strip_from_lengths(&[1.0, 3.0, 0.5], StackDirection::Up).unwrap();
        assert!(s.seeded.is_no_overlap(0, 2).unwrap());
        assert!(s.seeded.is_unresolved(1, 2).unwrap());
    }

    #[test]
    fn spiral_faces_cover_earlier_creases() {
        let s = strip_from_lengths(&[1.0, 1.5, 2.0, 2.5], StackDirection::Up).unwrap();
        // Crease 0-1 sits at x = 1; faces 2 ([-0.5, 1.5]) and 3 ([-1, 1.5]) cover it.
        let he = s
            .mesh
            .cycle(0)
            .find(|&he| s.mesh.pair_face(he) == Some(1))
            .unwrap();
        let covering: Vec<usize> = s.oracles.coverage.faces(he).iter().copied().collect();
        assert_eq!(covering, vec![2, 3]);
    }

    #[test]
    fn truth_follows_direction() {
        let up = strip_from_lengths(&[1.0, 1.5, 2.0], StackDirection::Up).unwrap();
        let t = up.truth().unwrap();
        assert!(t.is_below(0, 1).unwrap() && t.is_below(1, 2).unwrap() && t.is_below(0, 2).unwrap());

        let down = strip_from_lengths(&[1.0, 1.5, 2.0], StackDirection::Down).unwrap();
        assert_eq!(down.true_order, vec![2, 1, 0]);
        let t = down.truth().unwrap();
        assert!(t.is_above(0, 1).unwrap() && t.is_above(0, 2).unwrap());
    }
}
