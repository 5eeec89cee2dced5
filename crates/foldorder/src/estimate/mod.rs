//! Reference estimator: seeding, propagation and bounded backtracking.
//!
//! Purpose
//! - Drive the relation store and the condition deriver to an answer:
//!   [`seed_from_creases`] orders every creased pair from its mountain/valley
//!   assignment, [`propagate`] applies derived conditions until a fixed point
//!   or a contradiction, and [`Estimator`] branches on the remaining
//!   unresolved pairs.
//!
//! Contract with the core
//! - Branches never share a matrix: each one works on its own clone and is
//!   dropped on `Unfoldable`.
//! - Residual ambiguity is a result ([`Estimation::Multiple`]), not an error.
//!
//! Only three-face conditions are propagated, so a completed matrix is
//! consistent with those conditions, not certified flat-foldable in general.

mod propagate;
mod search;
mod seed;
mod types;

pub use propagate::propagate;
pub use search::Estimator;
pub use seed::seed_from_creases;
pub use types::{EstimateCfg, Estimation, Propagation};
