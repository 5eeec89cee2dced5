//! The overlap relation: pairwise stacking facts with a symmetry invariant.
//!
//! Purpose
//! - Single source of truth for "face `i` is above/below face `j`" during one
//!   estimation run. Cell `(i, j)` and cell `(j, i)` are always mutual
//!   inverses; every writer goes through [`OverlapRelation::set`], which writes
//!   both after validating the indices, so a failed call leaves nothing behind.
//! - Give the solver conflict-detecting writers: [`OverlapRelation::set_if_possible`]
//!   reports [`PropagationResult::Unfoldable`] instead of overwriting a
//!   contradicting fact.
//!
//! Backtracking is done by cloning: each speculative branch owns its own copy.

use std::fmt;

use crate::error::MatrixError;
use crate::relation::{PropagationResult, Relation};
use crate::storage::{ByteMatrix, StorageKind};

/// One resolved pair in export form: `s = +1` when `f` lies above `g`, `-1` when below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceOrder {
    pub f: usize,
    pub g: usize,
    pub s: i8,
}

/// `n x n` stacking relation over face indices.
#[derive(Clone, Debug)]
pub struct OverlapRelation {
    cells: Box<dyn ByteMatrix>,
}

impl OverlapRelation {
    /// All cells unresolved, default (bit-block) storage.
    pub fn new(face_count: usize) -> Self {
        Self::with_storage(face_count, StorageKind::default())
    }

    /// All cells unresolved, explicit storage strategy.
    pub fn with_storage(face_count: usize, kind: StorageKind) -> Self {
        Self {
            cells: kind.allocate(face_count, face_count, Relation::Unresolved.code()),
        }
    }

    /// Same as [`OverlapRelation::new`] for callers holding a signed count.
    pub fn try_from_count(face_count: i64) -> Result<Self, MatrixError> {
        let n = usize::try_from(face_count).map_err(|_| {
            MatrixError::invalid(format!("face count must be >= 0, got {face_count}"))
        })?;
        Ok(Self::new(n))
    }

    /// The `n` of the `n x n` matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.rows()
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.cells.kind()
    }

    #[inline]
    fn check(&self, i: usize, j: usize) -> Result<(), MatrixError> {
        let size = self.size();
        if i >= size || j >= size {
            return Err(MatrixError::IndexOutOfRange { i, j, size });
        }
        Ok(())
    }

    /// Relation of face `i` with respect to face `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Result<Relation, MatrixError> {
        self.check(i, j)?;
        Relation::from_code(self.cells.get(i, j))
    }

    /// Write `value` at `(i, j)` and its inverse at `(j, i)`.
    ///
    /// A face cannot be above or below itself: definite values on the diagonal
    /// are rejected.
    pub fn set(&mut self, i: usize, j: usize, value: Relation) -> Result<(), MatrixError> {
        self.check(i, j)?;
        if i == j && value.is_definite() {
            return Err(MatrixError::invalid(format!(
                "face {i} cannot be {value} itself"
            )));
        }
        self.cells.set(i, j, value.code());
        self.cells.set(j, i, value.inverse().code());
        Ok(())
    }

    /// [`OverlapRelation::set`] from a raw relation code.
    pub fn set_code(&mut self, i: usize, j: usize, code: u8) -> Result<(), MatrixError> {
        let value = Relation::from_code(code)?;
        self.set(i, j, value)
    }

    pub fn set_above(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        self.set(i, j, Relation::Above)
    }

    pub fn set_below(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        self.set(i, j, Relation::Below)
    }

    pub fn set_no_overlap(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        self.set(i, j, Relation::NoOverlap)
    }

    pub fn set_unresolved(&mut self, i: usize, j: usize) -> Result<(), MatrixError> {
        self.set(i, j, Relation::Unresolved)
    }

    /// Claim a free pair. Returns whether the write happened.
    pub fn set_if_unresolved(
        &mut self,
        i: usize,
        j: usize,
        value: Relation,
    ) -> Result<bool, MatrixError> {
        if !self.is_unresolved(i, j)? {
            return Ok(false);
        }
        self.set(i, j, value)?;
        Ok(true)
    }

    /// Assert `value` at `(i, j)` without destroying existing information.
    ///
    /// `Changed` if the cell was unresolved, `NotChanged` if it already held
    /// `value`, `Unfoldable` (matrix untouched) otherwise.
    pub fn set_if_possible(
        &mut self,
        i: usize,
        j: usize,
        value: Relation,
    ) -> Result<PropagationResult, MatrixError> {
        if self.set_if_unresolved(i, j, value)? {
            return Ok(PropagationResult::Changed);
        }
        if self.get(i, j)? != value {
            return Ok(PropagationResult::Unfoldable);
        }
        Ok(PropagationResult::NotChanged)
    }

    pub fn set_above_if_possible(
        &mut self,
        i: usize,
        j: usize,
    ) -> Result<PropagationResult, MatrixError> {
        self.set_if_possible(i, j, Relation::Above)
    }

    pub fn set_below_if_possible(
        &mut self,
        i: usize,
        j: usize,
    ) -> Result<PropagationResult, MatrixError> {
        self.set_if_possible(i, j, Relation::Below)
    }

    /// Face `i` lies above face `j`.
    #[inline]
    pub fn is_above(&self, i: usize, j: usize) -> Result<bool, MatrixError> {
        Ok(self.get(i, j)? == Relation::Above)
    }

    /// Face `i` lies below face `j`.
    #[inline]
    pub fn is_below(&self, i: usize, j: usize) -> Result<bool, MatrixError> {
        Ok(self.get(i, j)? == Relation::Below)
    }

    #[inline]
    pub fn is_unresolved(&self, i: usize, j: usize) -> Result<bool, MatrixError> {
        Ok(self.get(i, j)? == Relation::Unresolved)
    }

    #[inline]
    pub fn is_no_overlap(&self, i: usize, j: usize) -> Result<bool, MatrixError> {
        Ok(self.get(i, j)? == Relation::NoOverlap)
    }

    /// Overwrite `other` with the contents of `self`. Sizes must match.
    pub fn copy_to(&self, other: &mut OverlapRelation) -> Result<(), MatrixError> {
        if other.size() != self.size() {
            return Err(MatrixError::invalid(format!(
                "cannot copy a {n}x{n} relation into a {m}x{m} one",
                n = self.size(),
                m = other.size()
            )));
        }
        for i in 0..self.size() {
            for j in i..self.size() {
                other.set(i, j, self.get(i, j)?)?;
            }
        }
        Ok(())
    }

    /// Re-layout the cells into `kind` storage; no cell changes value.
    pub fn switch_storage(&mut self, kind: StorageKind) {
        if kind == self.storage_kind() {
            return;
        }
        self.cells = self.relayout(kind, Relation::Unresolved.code());
    }

    /// Re-layout into sparse storage whose background is the most frequent code.
    pub fn switch_to_sparse(&mut self) {
        let mut histogram = [0usize; 4];
        for i in 0..self.size() {
            for code in self.cells.row(i) {
                histogram[usize::from(code & 0b11)] += 1;
            }
        }
        let background = (0u8..4)
            .max_by_key(|&c| (histogram[usize::from(c)], std::cmp::Reverse(c)))
            .unwrap_or(Relation::NoOverlap.code());
        self.cells = self.relayout(StorageKind::Sparse, background);
    }

    /// Best-effort copy for concurrent experiments, backed by atomic cells.
    /// Write it from several threads with [`OverlapRelation::set_shared`].
    pub fn clone_concurrent(&self) -> Self {
        Self {
            cells: self.relayout(StorageKind::Atomic, Relation::Unresolved.code()),
        }
    }

    /// [`OverlapRelation::set`] through a shared reference, for relations made
    /// by [`OverlapRelation::clone_concurrent`]; other storage is rejected.
    ///
    /// The two symmetric cells are stored one after the other, so concurrent
    /// writers to the same pair can observe or produce a broken pair.
    pub fn set_shared(&self, i: usize, j: usize, value: Relation) -> Result<(), MatrixError> {
        self.check(i, j)?;
        let Some(cells) = self.cells.as_atomic() else {
            return Err(MatrixError::invalid(format!(
                "shared writes need atomic storage, found {}",
                self.storage_kind()
            )));
        };
        if i == j && value.is_definite() {
            return Err(MatrixError::invalid(format!(
                "face {i} cannot be {value} itself"
            )));
        }
        cells.store(i, j, value.code());
        cells.store(j, i, value.inverse().code());
        Ok(())
    }

    fn relayout(&self, kind: StorageKind, fill: u8) -> Box<dyn ByteMatrix> {
        let n = self.size();
        let mut cells = kind.allocate(n, n, fill);
        for i in 0..n {
            for (j, code) in self.cells.row(i).into_iter().enumerate() {
                if code != fill {
                    cells.set(i, j, code);
                }
            }
        }
        cells
    }

    /// Number of unordered pairs `i < j` holding `relation`.
    pub fn count(&self, relation: Relation) -> usize {
        let code = relation.code();
        (0..self.size())
            .map(|i| ((i + 1)..self.size()).filter(|&j| self.cells.get(i, j) == code).count())
            .sum()
    }

    /// Unresolved pairs `i < j` in row-major order.
    pub fn unresolved_pairs(&self) -> Vec<(usize, usize)> {
        let code = Relation::Unresolved.code();
        let n = self.size();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.cells.get(i, j) == code)
            .collect()
    }

    /// First unresolved pair `i < j` in row-major order.
    pub fn first_unresolved(&self) -> Option<(usize, usize)> {
        let code = Relation::Unresolved.code();
        let n = self.size();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .find(|&(i, j)| self.cells.get(i, j) == code)
    }

    /// Resolved pairs in export form, each unordered pair once (`f < g`).
    pub fn face_orders(&self) -> Vec<FaceOrder> {
        let n = self.size();
        let mut orders = Vec::new();
        for f in 0..n {
            for g in (f + 1)..n {
                let s = match Relation::from_code(self.cells.get(f, g)) {
                    Ok(Relation::Above) => 1,
                    Ok(Relation::Below) => -1,
                    _ => continue,
                };
                orders.push(FaceOrder { f, g, s });
            }
        }
        orders
    }
}

impl PartialEq for OverlapRelation {
    /// Cell-wise equality, independent of the storage strategy.
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && (0..self.size()).all(|i| self.cells.row(i) == other.cells.row(i))
    }
}

impl Eq for OverlapRelation {}

impl fmt::Display for OverlapRelation {
    /// One row per line, codes separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size() {
            let line: Vec<String> = self.cells.row(i).iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
