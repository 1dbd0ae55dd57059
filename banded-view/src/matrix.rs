//! Typed views over diagonal-major banded matrices.
//!
//! Storage conventions shared by all views (`n x n` matrix, slots indexed by
//! column `c`):
//!
//! - super-diagonal `i`: slot `c` holds `A[c - i][c]`, slots `0..i` are padding
//! - main diagonal: slot `c` holds `A[c][c]`
//! - sub-diagonal `i`: slot `c` holds `A[c + i][c]`, slots `n - i..n` are padding
//!
//! Stored diagonal order:
//!
//! | View | Stored diagonals |
//! |------|------------------|
//! | [`GeneralBanded`] | super `ku..=1`, main, sub `1..=kl` |
//! | [`SymmetricBanded`], [`Triangle::Upper`] | super `k..=1`, main |
//! | [`SymmetricBanded`], [`Triangle::Lower`] | main, sub `1..=k` |
//! | [`TriangularBanded`] | same as the symmetric view of the same triangle |

use crate::{BandShape, DiagonalMajor, Result};

/// Which side of the main diagonal a one-sided band stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    Upper,
    Lower,
}

/// General banded matrix with `ku` super- and `kl` sub-diagonals.
#[derive(Debug, Clone, Copy)]
pub struct GeneralBanded<'a, T> {
    shape: BandShape,
    diagonals: DiagonalMajor<'a, T>,
}

impl<'a, T> GeneralBanded<'a, T> {
    pub fn new(data: &'a [T], n: usize, ku: usize, kl: usize) -> Result<Self> {
        let shape = BandShape::general(n, ku, kl)?;
        let diagonals = DiagonalMajor::new(data, n, ku + kl + 1)?;
        Ok(Self { shape, diagonals })
    }

    #[inline]
    pub fn shape(&self) -> BandShape {
        self.shape
    }

    #[inline]
    pub fn diagonals(&self) -> DiagonalMajor<'a, T> {
        self.diagonals
    }
}

/// Symmetric banded matrix storing one triangle of its band.
///
/// Only `k + 1` diagonals are stored; the other side is implied by symmetry,
/// so the row-aligned output still has `2k + 1` diagonals.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricBanded<'a, T> {
    shape: BandShape,
    triangle: Triangle,
    diagonals: DiagonalMajor<'a, T>,
}

impl<'a, T> SymmetricBanded<'a, T> {
    pub fn new(data: &'a [T], n: usize, k: usize, triangle: Triangle) -> Result<Self> {
        let shape = BandShape::symmetric(n, k)?;
        let diagonals = DiagonalMajor::new(data, n, k + 1)?;
        Ok(Self {
            shape,
            triangle,
            diagonals,
        })
    }

    #[inline]
    pub fn shape(&self) -> BandShape {
        self.shape
    }

    /// Off-diagonals on each side.
    #[inline]
    pub fn k(&self) -> usize {
        self.shape.ku()
    }

    #[inline]
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    #[inline]
    pub fn diagonals(&self) -> DiagonalMajor<'a, T> {
        self.diagonals
    }
}

/// Triangular banded matrix: main diagonal plus `k` diagonals on one side.
#[derive(Debug, Clone, Copy)]
pub struct TriangularBanded<'a, T> {
    shape: BandShape,
    triangle: Triangle,
    diagonals: DiagonalMajor<'a, T>,
}

impl<'a, T> TriangularBanded<'a, T> {
    pub fn new(data: &'a [T], n: usize, k: usize, triangle: Triangle) -> Result<Self> {
        let shape = match triangle {
            Triangle::Upper => BandShape::upper_triangular(n, k)?,
            Triangle::Lower => BandShape::lower_triangular(n, k)?,
        };
        let diagonals = DiagonalMajor::new(data, n, k + 1)?;
        Ok(Self {
            shape,
            triangle,
            diagonals,
        })
    }

    #[inline]
    pub fn shape(&self) -> BandShape {
        self.shape
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.shape.ku().max(self.shape.kl())
    }

    #[inline]
    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    #[inline]
    pub fn diagonals(&self) -> DiagonalMajor<'a, T> {
        self.diagonals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BandError;

    #[test]
    fn test_general_storage_size() {
        let data = vec![0.0f64; 4 * 8];
        let m = GeneralBanded::new(&data, 8, 2, 1).unwrap();
        assert_eq!(m.diagonals().count(), 4);
        assert_eq!(m.shape().num_diagonals(), 4);
        assert!(matches!(
            GeneralBanded::new(&data, 8, 2, 2),
            Err(BandError::BufferTooShort { len: 32, expected: 40 })
        ));
    }

    #[test]
    fn test_symmetric_stores_half() {
        let data = vec![0i64; 3 * 4];
        let m = SymmetricBanded::new(&data, 4, 2, Triangle::Lower).unwrap();
        assert_eq!(m.k(), 2);
        assert_eq!(m.diagonals().count(), 3);
        assert_eq!(m.shape().num_diagonals(), 5);
    }

    #[test]
    fn test_triangular_shape() {
        let data = vec![0i32; 2 * 4];
        let up = TriangularBanded::new(&data, 4, 1, Triangle::Upper).unwrap();
        assert_eq!((up.shape().ku(), up.shape().kl()), (1, 0));
        assert_eq!(up.k(), 1);
        let lo = TriangularBanded::new(&data, 4, 1, Triangle::Lower).unwrap();
        assert_eq!((lo.shape().ku(), lo.shape().kl()), (0, 1));
        assert_eq!(lo.k(), 1);
    }

    #[test]
    fn test_band_wider_than_matrix() {
        let data = vec![0i32; 64];
        assert!(matches!(
            TriangularBanded::new(&data, 4, 4, Triangle::Upper),
            Err(BandError::BandTooWide { .. })
        ));
    }
}
