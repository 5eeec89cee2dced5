//! Programmer-error taxonomy for the relation store.
//!
//! Contradictions between stacking hypotheses are not errors; they surface as
//! [`crate::PropagationResult::Unfoldable`].

use thiserror::Error;

/// Misuse of the relation matrix API. Fatal for the current run, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("index ({i}, {j}) out of range for {size}x{size} relation matrix")]
    IndexOutOfRange { i: usize, j: usize, size: usize },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl MatrixError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Invalid topology edits while assembling a [`crate::mesh::FoldedMesh`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("half-edge {id} does not exist")]
    UnknownHalfEdge { id: usize },

    #[error("half-edge {id} is already paired")]
    AlreadyPaired { id: usize },

    #[error("half-edges {a} and {b} belong to the same face {face}")]
    SameFace { a: usize, b: usize, face: usize },

    #[error("a paired crease cannot be of kind boundary")]
    BoundaryCrease,

    #[error("face {face} needs at least {min} half-edges, got {got}")]
    DegenerateFace { face: usize, min: usize, got: usize },
}
