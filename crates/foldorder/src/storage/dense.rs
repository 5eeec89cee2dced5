use super::{ByteMatrix, StorageKind};

/// Row-major `Vec<u8>`, one byte per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteDenseMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<u8>,
}

impl ByteDenseMatrix {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, 0)
    }

    pub fn filled(rows: usize, columns: usize, fill: u8) -> Self {
        Self {
            rows,
            columns,
            cells: vec![fill; rows * columns],
        }
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.columns);
        i * self.columns + j
    }
}

impl ByteMatrix for ByteDenseMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[self.offset(i, j)]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: u8) {
        let k = self.offset(i, j);
        self.cells[k] = value;
    }

    fn boxed_clone(&self) -> Box<dyn ByteMatrix> {
        Box::new(self.clone())
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Dense
    }

    fn row(&self, i: usize) -> Vec<u8> {
        let start = self.offset(i, 0);
        self.cells[start..start + self.columns].to_vec()
    }
}
