use super::{ByteMatrix, StorageKind};

const WORD_BITS: u32 = u64::BITS;

/// Cells of `bits` bits packed row-major into 64-bit words.
///
/// `bits` must divide 64 and be at most 8; values are truncated to the low
/// `bits` bits on write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitBlockByteMatrix {
    rows: usize,
    columns: usize,
    bits: u32,
    mask: u64,
    words: Vec<u64>,
}

impl BitBlockByteMatrix {
    pub fn new(rows: usize, columns: usize, bits: u32) -> Self {
        Self::filled(rows, columns, bits, 0)
    }

    pub fn filled(rows: usize, columns: usize, bits: u32, fill: u8) -> Self {
        assert!(
            matches!(bits, 1 | 2 | 4 | 8),
            "bit width {bits} must be one of 1, 2, 4, 8"
        );
        let mask = (1u64 << bits) - 1;
        let per_word = (WORD_BITS / bits) as usize;
        let word_count = (rows * columns).div_ceil(per_word);
        // Replicate the fill code into every slot of a word.
        let code = u64::from(fill) & mask;
        let pattern = (0..per_word).fold(0u64, |acc, k| acc | (code << (k as u32 * bits)));
        Self {
            rows,
            columns,
            bits,
            mask,
            words: vec![pattern; word_count],
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    fn locate(&self, i: usize, j: usize) -> (usize, u32) {
        debug_assert!(i < self.rows && j < self.columns);
        let per_word = (WORD_BITS / self.bits) as usize;
        let index = i * self.columns + j;
        (index / per_word, (index % per_word) as u32 * self.bits)
    }
}

impl ByteMatrix for BitBlockByteMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> u8 {
        let (w, shift) = self.locate(i, j);
        ((self.words[w] >> shift) & self.mask) as u8
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, value: u8) {
        let (w, shift) = self.locate(i, j);
        let word = &mut self.words[w];
        *word = (*word & !(self.mask << shift)) | ((u64::from(value) & self.mask) << shift);
    }

    fn boxed_clone(&self) -> Box<dyn ByteMatrix> {
        Box::new(self.clone())
    }

    fn kind(&self) -> StorageKind {
        StorageKind::BitBlock
    }
}
