//! Byte-matrix storage strategies behind the relation store.
//!
//! Purpose
//! - Hold one small code per `(row, column)` cell. The relation store only needs
//!   four codes, but the backends are generic over bytes (bit-block packing
//!   truncates to its bit width).
//! - Let callers trade memory for speed without any behavioral difference:
//!   `n` can reach the thousands, so a dense `n²` byte array is not always
//!   affordable, while most cells of a typical model are `NoOverlap`.
//!
//! Backends do not bounds-check beyond debug assertions; the relation store
//! validates indices before it touches storage.

mod atomic;
mod bitblock;
mod dense;
mod sparse;

use std::fmt;
use std::str::FromStr;

pub use atomic::AtomicByteDenseMatrix;
pub use bitblock::BitBlockByteMatrix;
pub use dense::ByteDenseMatrix;
pub use sparse::ByteSparseMatrix;

/// Common interface of all storage strategies.
pub trait ByteMatrix: fmt::Debug + Send + Sync {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;
    fn get(&self, i: usize, j: usize) -> u8;
    fn set(&mut self, i: usize, j: usize, value: u8);
    /// Deep copy sharing no storage with `self`.
    fn boxed_clone(&self) -> Box<dyn ByteMatrix>;
    fn kind(&self) -> StorageKind;

    /// The backend as an atomic matrix, if it is one.
    fn as_atomic(&self) -> Option<&AtomicByteDenseMatrix> {
        None
    }

    /// Copy of row `i`.
    fn row(&self, i: usize) -> Vec<u8> {
        (0..self.columns()).map(|j| self.get(i, j)).collect()
    }
}

impl Clone for Box<dyn ByteMatrix> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// Selects a storage strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// One byte per cell.
    Dense,
    /// Two bits per cell packed into 64-bit words.
    #[default]
    BitBlock,
    /// Hash map holding only cells that differ from a background code.
    Sparse,
    /// One atomic byte per cell; best effort only, see [`AtomicByteDenseMatrix`].
    Atomic,
}

impl StorageKind {
    /// Bits per cell used by [`StorageKind::BitBlock`].
    pub const RELATION_BITS: u32 = 2;

    /// Allocate a `rows x columns` matrix with every cell set to `fill`.
    pub fn allocate(self, rows: usize, columns: usize, fill: u8) -> Box<dyn ByteMatrix> {
        match self {
            StorageKind::Dense => Box::new(ByteDenseMatrix::filled(rows, columns, fill)),
            StorageKind::BitBlock => Box::new(BitBlockByteMatrix::filled(
                rows,
                columns,
                Self::RELATION_BITS,
                fill,
            )),
            StorageKind::Sparse => Box::new(ByteSparseMatrix::with_background(rows, columns, fill)),
            StorageKind::Atomic => Box::new(AtomicByteDenseMatrix::filled(rows, columns, fill)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StorageKind::Dense => "dense",
            StorageKind::BitBlock => "bitblock",
            StorageKind::Sparse => "sparse",
            StorageKind::Atomic => "atomic",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(StorageKind::Dense),
            "bitblock" | "bit-block" => Ok(StorageKind::BitBlock),
            "sparse" => Ok(StorageKind::Sparse),
            "atomic" => Ok(StorageKind::Atomic),
            other => Err(format!(
                "unknown storage '{other}' (expected dense, bitblock, sparse or atomic)"
            )),
        }
    }
}
