use std::sync::atomic::{AtomicU8, Ordering};

use super::{ByteMatrix, StorageKind};

/// Dense matrix of `AtomicU8` cells.
///
/// Individual cells can be written through `&self` ([`Self::store`]), which makes
/// the type usable from several threads for experiments. Nothing ties two cells
/// together: a pair of symmetric writes from different threads can interleave.
/// Do not share one instance between writers; clone per branch instead.
#[derive(Debug)]
pub struct AtomicByteDenseMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<AtomicU8>,
}

impl AtomicByteDenseMatrix {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 0)
    }

    pub fn filled(rows: usize, columns: usize, fill: u8) -> Self {
        Self {
            rows,
            columns,
            cells: (0..rows * columns).map(|_| AtomicU8::new(fill)).collect(),
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.columns);
        i * self.columns + j
    }

    /// Shared-reference write of a single cell.
    #[inline]
    pub fn store(&self, i: usize, j: usize, value: u8) {
        self.cells[self.offset(i, j)].store(value, Ordering::Relaxed);
    }
}

impl Clone for AtomicByteDenseMatrix {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: self
                .cells
                .iter()
                .map(|c| AtomicU8::new(c.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

impl ByteMatrix for AtomicByteDenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[self.offset(i, j)].load(Ordering::Relaxed)
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: u8) {
        let k = self.offset(i, j);
        *self.cells[k].get_mut() = value;
    }

    fn boxed_clone(&self) -> Box<dyn ByteMatrix> {
        Box::new(self.clone())
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Atomic
    }

    fn as_atomic(&self) -> Option<&AtomicByteDenseMatrix> {
        Some(self)
    }
}
