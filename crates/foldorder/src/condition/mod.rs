//! Three-face stacking conditions and their derivation.
//!
//! Purpose
//! - When faces `i` and `j` share a crease and a third face `k` covers that
//!   crease, `k` cannot slide between them: it must be above both or below
//!   both. [`derive_all`] lists these constraints for every crease whose
//!   order is already known; [`StackCondition3::apply`] propagates one of them
//!   into the relation matrix.
//!
//! Inputs
//! - Mesh adjacency ([`crate::mesh::FoldedMesh`]).
//! - Two geometric oracles computed elsewhere: faces overlapping both `i` and
//!   `j` ([`OverlapIntersections`]) and faces covering each half-edge
//!   ([`EdgeCoverage`]). They are trusted to be well formed.
//!
//! Derivation is a pure query and may list the same condition more than once;
//! conditions are idempotent, so callers simply apply duplicates again.

mod derive;
mod oracle;
mod types;

pub use derive::derive_all;
pub use oracle::{EdgeCoverage, OverlapIntersections, OverlapOracles};
pub use types::StackCondition3;
