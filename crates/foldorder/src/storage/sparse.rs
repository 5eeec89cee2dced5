use std::collections::HashMap;

use super::{ByteMatrix, StorageKind};

/// Stores only the cells that differ from a background code.
///
/// Writing the background code removes the entry, so memory tracks the number
/// of "interesting" cells rather than `rows * columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteSparseMatrix {
    rows: usize,
    columns: usize,
    background: u8,
    cells: HashMap<(usize, usize), u8>,
}

impl ByteSparseMatrix {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::with_background(rows, columns, 0)
    }

    pub fn with_background(rows: usize, columns: usize, background: u8) -> Self {
        Self {
            rows,
            columns,
            background,
            cells: HashMap::new(),
        }
    }

    pub fn background(&self) -> u8 {
        self.background
    }

    /// Number of explicitly stored cells.
    pub fn stored(&self) -> usize {
        self.cells.len()
    }
}

impl ByteMatrix for ByteSparseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u8 {
        debug_assert!(i < self.rows && j < self.columns);
        self.cells.get(&(i, j)).copied().unwrap_or(self.background)
    }

    fn set(&mut self, i: usize, j: usize, value: u8) {
        debug_assert!(i < self.rows && j < self.columns);
        if value == self.background {
            self.cells.remove(&(i, j));
        } else {
            self.cells.insert((i, j), value);
        }
    }

    fn boxed_clone(&self) -> Box<dyn ByteMatrix> {
        Box::new(self.clone())
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Sparse
    }
}
