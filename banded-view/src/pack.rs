//! Build diagonal-major buffers from dense row-major matrices.
//!
//! The output follows the storage conventions documented on the
//! [matrix views](crate::GeneralBanded). Padding slots are written with the
//! scalar zero. Entries of `dense` outside the requested band are ignored.

use crate::{BandError, BandShape, Diagonal, Lane, Result, Triangle};

fn check_dense<T>(dense: &[T], n: usize) -> Result<()> {
    let expected = n * n;
    if dense.len() < expected {
        return Err(BandError::BufferTooShort {
            len: dense.len(),
            expected,
        });
    }
    Ok(())
}

/// Append diagonal `diag` in column-indexed storage.
fn push_diagonal<T: Lane>(out: &mut Vec<T>, dense: &[T], n: usize, diag: Diagonal) {
    out.extend((0..n).map(|c| {
        let row = c as isize - diag.offset();
        if row >= 0 && (row as usize) < n {
            dense[row as usize * n + c]
        } else {
            T::zero()
        }
    }));
}

/// Pack a general band: super `ku..=1`, main, sub `1..=kl`.
pub fn pack_general<T: Lane>(dense: &[T], n: usize, ku: usize, kl: usize) -> Result<Vec<T>> {
    let shape = BandShape::general(n, ku, kl)?;
    check_dense(dense, n)?;
    let mut out = Vec::with_capacity(shape.num_diagonals() * n);
    for diag in shape.layout() {
        push_diagonal(&mut out, dense, n, diag);
    }
    Ok(out)
}

/// Pack one triangle of the band plus the main diagonal.
///
/// This is the storage of both [`SymmetricBanded`](crate::SymmetricBanded)
/// and [`TriangularBanded`](crate::TriangularBanded).
pub fn pack_triangle<T: Lane>(
    dense: &[T],
    n: usize,
    k: usize,
    triangle: Triangle,
) -> Result<Vec<T>> {
    match triangle {
        Triangle::Upper => pack_general(dense, n, k, 0),
        Triangle::Lower => pack_general(dense, n, 0, k),
    }
}
