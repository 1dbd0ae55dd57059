//! Order-preserving relays: forward, merge and swap.

use banded_view::Result;

use crate::link::{BlockSink, BlockSource};

/// Forward `diagonals` whole diagonals unchanged.
pub fn forward<T, const W: usize>(
    n: usize,
    diagonals: usize,
    input: &mut impl BlockSource<T, W>,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let total = diagonals * (n / W);
    for _ in 0..total {
        out.push(input.pull()?)?;
    }
    Ok(total)
}

/// Append the lower path after the upper one.
///
/// Reads `ku` diagonals from `upper` and then `kl + 1` diagonals (main
/// included) from `lower`.
pub fn merge<T, const W: usize>(
    n: usize,
    ku: usize,
    kl: usize,
    upper: &mut impl BlockSource<T, W>,
    lower: &mut impl BlockSource<T, W>,
    out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let from_upper = forward(n, ku, upper, out)?;
    let from_lower = forward(n, kl + 1, lower, out)?;
    Ok(from_upper + from_lower)
}

/// Exchange two vector streams of `n / W` blocks each.
///
/// Blocks are taken pairwise, so both outputs advance together.
pub fn swap<T, const W: usize>(
    n: usize,
    x: &mut impl BlockSource<T, W>,
    y: &mut impl BlockSource<T, W>,
    x_out: &mut impl BlockSink<T, W>,
    y_out: &mut impl BlockSink<T, W>,
) -> Result<usize> {
    let par_blocks = n / W;
    for _ in 0..par_blocks {
        let val_x = x.pull()?;
        let val_y = y.pull()?;
        x_out.push(val_y)?;
        y_out.push(val_x)?;
    }
    Ok(par_blocks)
}
