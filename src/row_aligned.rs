use banded_view::{BandError, BandShape, Block, Diagonal, Lane, Result};

/// A merged row-aligned block sequence together with the band it describes.
///
/// The sequence holds `n / W` blocks per diagonal, diagonals in
/// [`BandShape::layout`] order. Lane `j` of block `b` within a diagonal's run
/// is the entry of that diagonal on row `b * W + j`, or zero where the
/// diagonal has left the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAligned<T, const W: usize> {
    blocks: Vec<Block<T, W>>,
    shape: BandShape,
}

impl<T: Lane, const W: usize> RowAligned<T, W> {
    /// Wrap a finished sequence. Its length must match the shape exactly.
    pub fn new(blocks: Vec<Block<T, W>>, shape: BandShape) -> Result<Self> {
        let expected = shape.output_blocks(W);
        if blocks.len() != expected {
            return Err(BandError::LengthMismatch(blocks.len(), expected));
        }
        Ok(Self { blocks, shape })
    }

    #[inline]
    pub fn shape(&self) -> BandShape {
        self.shape
    }

    #[inline]
    pub fn blocks(&self) -> &[Block<T, W>] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block<T, W>> {
        self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn blocks_per_diagonal(&self) -> usize {
        self.shape.blocks_per_diagonal(W)
    }

    pub fn layout(&self) -> Vec<Diagonal> {
        self.shape.layout()
    }

    /// Block indices at which each diagonal's run begins, in layout order.
    pub fn diagonal_starts(&self) -> impl Iterator<Item = usize> {
        let per = self.blocks_per_diagonal();
        (0..self.shape.num_diagonals()).map(move |pos| pos * per)
    }

    /// The run of blocks belonging to `diag`, or `None` if the band does not
    /// contain it.
    pub fn run(&self, diag: Diagonal) -> Option<&[Block<T, W>]> {
        let pos = self.layout().iter().position(|&d| d == diag)?;
        let per = self.blocks_per_diagonal();
        self.blocks.get(pos * per..(pos + 1) * per)
    }

    /// Lanes of `diag` flattened by row.
    pub fn lanes(&self, diag: Diagonal) -> Option<Vec<T>> {
        let run = self.run(diag)?;
        Some(run.iter().flat_map(|b| b.iter().copied()).collect())
    }

    /// Scatter the band back into a dense row-major `n x n` matrix.
    ///
    /// Lanes that fall outside the matrix are dropped; entries outside the
    /// band are zero.
    pub fn to_dense(&self) -> Vec<T> {
        let n = self.shape.n();
        let mut dense = vec![T::zero(); n * n];
        let per = self.blocks_per_diagonal();
        if per == 0 {
            return dense;
        }
        for (diag, run) in self.layout().into_iter().zip(self.blocks.chunks_exact(per)) {
            let lanes = run.iter().flat_map(|b| b.iter().copied());
            for (row, value) in lanes.enumerate() {
                if let Some(col) = diag.column(row, n) {
                    dense[row * n + col] = value;
                }
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // n = 4, ku = 1, kl = 0, W = 2
    fn upper_pair() -> RowAligned<i32, 2> {
        let shape = BandShape::upper_triangular(4, 1).unwrap();
        let blocks = vec![
            Block::new([2, 13]),
            Block::new([24, 0]),
            Block::new([1, 12]),
            Block::new([23, 34]),
        ];
        RowAligned::new(blocks, shape).unwrap()
    }

    #[test]
    fn test_length_checked() {
        let shape = BandShape::symmetric(4, 1).unwrap();
        let err = RowAligned::<f32, 2>::new(vec![Block::zero(); 5], shape).unwrap_err();
        assert!(matches!(err, BandError::LengthMismatch(5, 6)));
    }

    #[test]
    fn test_runs_and_starts() {
        let ra = upper_pair();
        assert_eq!(ra.len(), 4);
        assert_eq!(ra.diagonal_starts().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(ra.lanes(Diagonal::Super(1)), Some(vec![2, 13, 24, 0]));
        assert_eq!(ra.lanes(Diagonal::Main), Some(vec![1, 12, 23, 34]));
        assert!(ra.run(Diagonal::Sub(1)).is_none());
    }

    #[test]
    fn test_to_dense() {
        let dense = upper_pair().to_dense();
        #[rustfmt::skip]
        let expected = vec![
            1, 2, 0, 0,
            0, 12, 13, 0,
            0, 0, 23, 24,
            0, 0, 0, 34,
        ];
        assert_eq!(dense, expected);
    }
}
