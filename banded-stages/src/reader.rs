//! Memory readers: diagonal-major buffers and dense vectors to block streams.
//!
//! Every reader emits whole diagonals of `n / W` blocks. Readers that feed
//! two paths write the complete upper sequence before the lower one, which is
//! also the order [`merge`](crate::merge) consumes them in, so bounded links
//! between the stages cannot deadlock.

use banded_view::{Block, DiagonalMajor, Lane, Result};

use crate::link::BlockSink;

fn emit_diagonal<T: Lane, const W: usize>(
    diagonals: &DiagonalMajor<'_, T>,
    d: usize,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for block in diagonals.blocks::<W>(d) {
        out.push(block)?;
        count += 1;
    }
    Ok(count)
}

/// Symmetric band stored as super-diagonals `k..=1` followed by the main
/// diagonal.
///
/// `upper` gets the `k` stored super-diagonals, still head padded. `lower`
/// gets the stored diagonals from the main one outwards; by symmetry each
/// one already is the row-aligned sub-diagonal of the same index.
pub fn read_symmetric_super<T: Lane, const W: usize>(
    diagonals: &DiagonalMajor<'_, T>,
    k: usize,
    upper: &mut impl BlockSink<T, W>,
    lower: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for d in 0..k {
        count += emit_diagonal(diagonals, d, upper)?;
    }
    for d in (0..=k).rev() {
        count += emit_diagonal(diagonals, d, lower)?;
    }
    Ok(count)
}

/// Symmetric band stored as the main diagonal followed by sub-diagonals
/// `1..=k`.
///
/// `upper` gets the sub-diagonals from the outermost inwards; by symmetry
/// each one already is the row-aligned super-diagonal of the same index.
/// `lower` gets all stored diagonals, still tail padded.
pub fn read_symmetric_sub<T: Lane, const W: usize>(
    diagonals: &DiagonalMajor<'_, T>,
    k: usize,
    upper: &mut impl BlockSink<T, W>,
    lower: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for d in (1..=k).rev() {
        count += emit_diagonal(diagonals, d, upper)?;
    }
    for d in 0..=k {
        count += emit_diagonal(diagonals, d, lower)?;
    }
    Ok(count)
}

/// General band: the first `ku` stored diagonals go to `upper`, the main and
/// `kl` sub-diagonals to `lower`.
pub fn read_general<T: Lane, const W: usize>(
    diagonals: &DiagonalMajor<'_, T>,
    ku: usize,
    kl: usize,
    upper: &mut impl BlockSink<T, W>,
    lower: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for d in 0..ku {
        count += emit_diagonal(diagonals, d, upper)?;
    }
    for d in ku..=ku + kl {
        count += emit_diagonal(diagonals, d, lower)?;
    }
    Ok(count)
}

/// One-sided band: all `k + 1` stored diagonals in storage order.
pub fn read_triangular<T: Lane, const W: usize>(
    diagonals: &DiagonalMajor<'_, T>,
    k: usize,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for d in 0..=k {
        count += emit_diagonal(diagonals, d, out)?;
    }
    Ok(count)
}

fn emit_copies<T: Lane, const W: usize>(
    x: &[T],
    copies: usize,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let mut count = 0;
    for _ in 0..copies {
        for chunk in x.chunks_exact(W) {
            out.push(Block::from_slice(chunk))?;
            count += 1;
        }
    }
    Ok(count)
}

/// Dense vector for a two-sided band: `ku` copies to `upper`, `kl + 1`
/// copies to `lower`.
pub fn read_vector_split<T: Lane, const W: usize>(
    x: &[T],
    ku: usize,
    kl: usize,
    upper: &mut impl BlockSink<T, W>,
    lower: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    Ok(emit_copies(x, ku, upper)? + emit_copies(x, kl + 1, lower)?)
}

/// Dense vector for a one-sided band: `k + 1` copies.
pub fn read_vector<T: Lane, const W: usize>(
    x: &[T],
    k: usize,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    emit_copies(x, k + 1, out)
}
