//! Band descriptor and row-aligned layout.

use crate::{BandError, Result};

/// One diagonal of a square matrix, named by its side of the main diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagonal {
    /// `i`-th super-diagonal: entries `A[r][r + i]`.
    Super(usize),
    Main,
    /// `i`-th sub-diagonal: entries `A[r][r - i]`.
    Sub(usize),
}

impl Diagonal {
    /// Column minus row for every entry on this diagonal.
    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Diagonal::Super(i) => i as isize,
            Diagonal::Main => 0,
            Diagonal::Sub(i) => -(i as isize),
        }
    }

    /// Column paired with `row` on this diagonal, if it lies inside an
    /// `n x n` matrix.
    #[inline]
    pub fn column(self, row: usize, n: usize) -> Option<usize> {
        let col = row as isize + self.offset();
        (col >= 0 && (col as usize) < n).then_some(col as usize)
    }
}

/// Band descriptor: matrix order plus the number of super- and
/// sub-diagonals that may be non-zero.
///
/// The lane width is not stored here. It is a const parameter of the block
/// type, and every size derived from it takes it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandShape {
    n: usize,
    ku: usize,
    kl: usize,
}

impl BandShape {
    /// General band with `ku` super- and `kl` sub-diagonals.
    ///
    /// An empty matrix (`n == 0`) only admits `ku == kl == 0`.
    pub fn general(n: usize, ku: usize, kl: usize) -> Result<Self> {
        for k in [ku, kl] {
            if k >= n.max(1) {
                return Err(BandError::BandTooWide { diagonals: k, n });
            }
        }
        Ok(Self { n, ku, kl })
    }

    /// Symmetric band: `k` diagonals on each side once the stored half is
    /// mirrored.
    pub fn symmetric(n: usize, k: usize) -> Result<Self> {
        Self::general(n, k, k)
    }

    pub fn upper_triangular(n: usize, k: usize) -> Result<Self> {
        Self::general(n, k, 0)
    }

    pub fn lower_triangular(n: usize, k: usize) -> Result<Self> {
        Self::general(n, 0, k)
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn ku(&self) -> usize {
        self.ku
    }

    #[inline]
    pub fn kl(&self) -> usize {
        self.kl
    }

    /// Diagonals in the row-aligned output, main diagonal included.
    #[inline]
    pub fn num_diagonals(&self) -> usize {
        self.ku + self.kl + 1
    }

    /// Reject orders that are not a multiple of `align` scalars.
    pub fn check_aligned(&self, align: usize) -> Result<()> {
        if align == 0 || self.n % align != 0 {
            return Err(BandError::Misaligned { n: self.n, align });
        }
        Ok(())
    }

    /// Blocks of `lanes` scalars spanning one diagonal.
    #[inline]
    pub fn blocks_per_diagonal(&self, lanes: usize) -> usize {
        self.n.checked_div(lanes).unwrap_or(0)
    }

    /// Length of the merged row-aligned output in blocks.
    #[inline]
    pub fn output_blocks(&self, lanes: usize) -> usize {
        self.blocks_per_diagonal(lanes) * self.num_diagonals()
    }

    /// Order in which diagonals appear in the row-aligned output: the
    /// super-diagonals from the outermost inwards, then the main diagonal,
    /// then the sub-diagonals from the innermost outwards.
    pub fn layout(&self) -> Vec<Diagonal> {
        (1..=self.ku)
            .rev()
            .map(Diagonal::Super)
            .chain(std::iter::once(Diagonal::Main))
            .chain((1..=self.kl).map(Diagonal::Sub))
            .collect()
    }
}
