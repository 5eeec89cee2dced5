//! Curated internal API (UNSTABLE).
//!
//! - A convenience surface for the CLI and experiments. Breaking changes are
//!   allowed and expected; prefer these re-exports over deep paths.

// Relation store
pub use crate::overlap::{FaceOrder, OverlapRelation};
pub use crate::relation::{PropagationResult, Relation};
pub use crate::storage::{ByteMatrix, StorageKind};
// Mesh and oracles
pub use crate::condition::{
    derive_all, EdgeCoverage, OverlapIntersections, OverlapOracles, StackCondition3,
};
pub use crate::mesh::{Crease, FoldedMesh, HalfEdgeId, MeshBuilder};
// Estimation
pub use crate::estimate::{
    propagate, seed_from_creases, EstimateCfg, Estimation, Estimator, Propagation,
};
// Synthetic strips
pub use crate::strip::{
    draw_strip, strip_from_lengths, FaceCount, ReplayToken as StripReplay, StackDirection,
    StripCfg, StripError, StripFold,
};
