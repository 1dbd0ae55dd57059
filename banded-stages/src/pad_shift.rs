//! Padding shifts that turn column-indexed diagonals into row-aligned ones.
//!
//! A diagonal stored by column carries its padding where the column index
//! leaves the matrix: at the head for a super-diagonal, at the tail for a
//! sub-diagonal. Indexed by row, the padding sits on the opposite end. For
//! a stored diagonal `d` and offset `i`, the row-aligned run is
//!
//! ```text
//! upper:  out[r] = d[r + i]   (zero once r + i >= n)
//! lower:  out[r] = d[r - i]   (zero while r < i)
//! ```
//!
//! Both stages produce this by sliding a window of `W` lanes across two
//! consecutive input blocks (see [`Block::window`]). Whole blocks of padding
//! are skipped or emitted directly; only the remaining `i mod W` lanes need
//! blending.

use banded_view::{BandError, Block, Lane, Result};

use crate::link::{BlockSink, BlockSource};

/// Innermost diagonal handled by [`shift_upper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperFloor {
    /// Stop at super-diagonal 1. The main diagonal travels with the lower
    /// group (symmetric and general bands).
    ExcludeMain,
    /// Continue through the main diagonal (upper triangular bands).
    IncludeMain,
}

fn check_offsets(n: usize, k: usize) -> Result<()> {
    if k >= n.max(1) {
        return Err(BandError::BandTooWide { diagonals: k, n });
    }
    Ok(())
}

impl UpperFloor {
    fn lowest(self) -> usize {
        match self {
            UpperFloor::ExcludeMain => 1,
            UpperFloor::IncludeMain => 0,
        }
    }
}

/// Move the head padding of each super-diagonal to its tail.
///
/// Consumes diagonals `k, k - 1, ...` down to the floor, `n / W` blocks each,
/// and emits the same number of blocks per diagonal. Returns the number of
/// blocks emitted. Fails with [`BandError::BandTooWide`] before touching
/// either stream when `k >= n`.
pub fn shift_upper<T, const W: usize>(
    n: usize,
    k: usize,
    floor: UpperFloor,
    input: &mut impl BlockSource<T, W>,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize>
where
    T: Lane,
{
    check_offsets(n, k)?;
    let par_blocks = n / W;
    if par_blocks == 0 {
        return Ok(0);
    }
    let mut emitted = 0;
    for i in (floor.lowest()..=k).rev() {
        let num_paddings = i % W;

        // skip the blocks holding only padding, keep the one where data starts
        let mut carry = Block::zero();
        let mut read = 0;
        while read * W <= i {
            carry = input.pull()?;
            read += 1;
        }

        let mut num_out = 0;
        while read < par_blocks {
            let next = input.pull()?;
            out.push(carry.window(num_paddings, &next))?;
            carry = next;
            read += 1;
            num_out += 1;
        }

        // zeros at the tail
        while num_out < par_blocks {
            out.push(carry.window(num_paddings, &Block::zero()))?;
            carry = Block::zero();
            num_out += 1;
        }
        emitted += num_out;
    }
    Ok(emitted)
}

/// Move the tail padding of each sub-diagonal to its head.
///
/// Consumes diagonals `0..=k` (main diagonal first), `n / W` blocks each,
/// and emits the same number of blocks per diagonal. Returns the number of
/// blocks emitted. Fails with [`BandError::BandTooWide`] before touching
/// either stream when `k >= n`.
pub fn shift_lower<T, const W: usize>(
    n: usize,
    k: usize,
    input: &mut impl BlockSource<T, W>,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize>
where
    T: Lane,
{
    check_offsets(n, k)?;
    let par_blocks = n / W;
    let mut emitted = 0;
    for i in 0..=k {
        let num_paddings = i % W;
        let ent_begin = W - num_paddings;
        let lead = i / W;

        for _ in 0..lead {
            out.push(Block::zero())?;
        }

        let mut carry = Block::zero();
        for _ in lead..par_blocks {
            let next = input.pull()?;
            out.push(carry.window(ent_begin, &next))?;
            carry = next;
        }

        // the tail of the stored diagonal is padding; drain it
        for _ in 0..lead {
            input.pull()?;
        }
        emitted += par_blocks;
    }
    Ok(emitted)
}
