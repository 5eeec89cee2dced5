//! Layer-order estimation core for flat-folded paper models.
//!
//! The crate answers one question: for every pair of overlapping faces of a
//! folded model, which one lies above the other? Two pieces carry the weight:
//!
//! - [`OverlapRelation`]: the per-pair relation store. Every write keeps
//!   `get(i, j)` and `get(j, i)` mutual inverses, and the guarded writers
//!   report contradictions as [`PropagationResult::Unfoldable`].
//! - [`condition::derive_all`]: turns mesh adjacency plus the currently known
//!   relations into three-face stacking conditions.
//!
//! Around them sit a small half-edge [`mesh`], typed overlap oracles, a
//! reference [`estimate`] loop (seeding, propagation, bounded backtracking),
//! and synthetic folded [`strip`]s for tests, benches and the CLI.
//!
//! Geometry (deciding whether two faces overlap at all) is owned by callers;
//! the oracles only carry its answers.

pub mod api;
pub mod condition;
pub mod error;
pub mod estimate;
pub mod mesh;
pub mod overlap;
pub mod relation;
pub mod storage;
pub mod strip;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{MatrixError, MeshError};
pub use overlap::OverlapRelation;
pub use relation::{PropagationResult, Relation};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::condition::{derive_all, EdgeCoverage, OverlapIntersections, StackCondition3};
    pub use crate::estimate::{propagate, seed_from_creases, EstimateCfg, Estimation, Estimator};
    pub use crate::mesh::{Crease, FoldedMesh, HalfEdgeId, MeshBuilder};
    pub use crate::overlap::{FaceOrder, OverlapRelation};
    pub use crate::relation::{PropagationResult, Relation};
    pub use crate::storage::StorageKind;
}
