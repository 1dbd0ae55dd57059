//! Borrowed diagonal-major buffers.

use crate::{BandError, Block, Lane, Result};

/// Read-only view of `count` consecutive diagonals of length `n`.
///
/// Diagonal `d` occupies `data[d * n..(d + 1) * n]`. What each slot means
/// (which matrix entry, which slots are padding) is decided by the typed
/// matrix views built on top of this one.
#[derive(Debug)]
pub struct DiagonalMajor<'a, T> {
    data: &'a [T],
    n: usize,
    count: usize,
}

impl<T> Clone for DiagonalMajor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DiagonalMajor<'_, T> {}

impl<'a, T> DiagonalMajor<'a, T> {
    /// Wrap `data`, which must hold at least `count * n` scalars.
    pub fn new(data: &'a [T], n: usize, count: usize) -> Result<Self> {
        let expected = n
            .checked_mul(count)
            .ok_or(BandError::BufferTooShort {
                len: data.len(),
                expected: usize::MAX,
            })?;
        if data.len() < expected {
            return Err(BandError::BufferTooShort {
                len: data.len(),
                expected,
            });
        }
        Ok(Self { data, n, count })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored diagonals.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The `d`-th stored diagonal.
    ///
    /// # Panics
    /// Panics if `d >= self.count()`.
    #[inline]
    pub fn diagonal(&self, d: usize) -> &'a [T] {
        assert!(d < self.count, "diagonal {d} out of {}", self.count);
        &self.data[d * self.n..(d + 1) * self.n]
    }
}

impl<'a, T: Lane> DiagonalMajor<'a, T> {
    /// Blocks of the `d`-th stored diagonal in storage order.
    ///
    /// A trailing remainder shorter than `W` is not yielded; callers check
    /// alignment first.
    pub fn blocks<const W: usize>(&self, d: usize) -> impl Iterator<Item = Block<T, W>> + 'a {
        self.diagonal(d).chunks_exact(W).map(Block::from_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_slices() {
        let data: Vec<i32> = (0..12).collect();
        let view = DiagonalMajor::new(&data, 4, 3).unwrap();
        assert_eq!(view.diagonal(0), &[0, 1, 2, 3]);
        assert_eq!(view.diagonal(2), &[8, 9, 10, 11]);
    }

    #[test]
    fn test_blocks_in_storage_order() {
        let data: Vec<i32> = (0..16).collect();
        let view = DiagonalMajor::new(&data, 8, 2).unwrap();
        let blocks: Vec<Block<i32, 4>> = view.blocks(1).collect();
        assert_eq!(
            blocks,
            vec![Block::new([8, 9, 10, 11]), Block::new([12, 13, 14, 15])]
        );
    }

    #[test]
    fn test_short_buffer_rejected() {
        let data = vec![0.0f64; 7];
        assert!(matches!(
            DiagonalMajor::new(&data, 4, 2),
            Err(BandError::BufferTooShort { len: 7, expected: 8 })
        ));
    }

    #[test]
    fn test_longer_buffer_accepted() {
        let data = vec![1.0f32; 20];
        let view = DiagonalMajor::new(&data, 4, 2).unwrap();
        assert_eq!(view.count(), 2);
        assert_eq!(view.n(), 4);
    }

    #[test]
    #[should_panic]
    fn test_diagonal_out_of_range() {
        let data = vec![0u8; 8];
        let view = DiagonalMajor::new(&data, 4, 2).unwrap();
        let _ = view.diagonal(2);
    }
}
