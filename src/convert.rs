//! Top-level conversions to row-aligned block streams.
//!
//! Every conversion comes in two forms: `*_into` pushes the merged sequence
//! into any [`BlockSink`] and `*_to_stream` collects it into a
//! [`RowAligned`]. Both check their preconditions before a single block is
//! produced.
//!
//! | Input | Stages |
//! |-------|--------|
//! | symmetric, upper stored | read, shift upper `k` / forward `k + 1`, merge |
//! | symmetric, lower stored | read, forward `k` / shift lower `k`, merge |
//! | general | read, shift upper `ku` / shift lower `kl`, merge |
//! | triangular upper | read, shift upper `k` through the main diagonal |
//! | triangular lower | read, shift lower `k` |
//! | vector for a two-sided band | `ku` / `kl + 1` copies, shifted and merged like the matrix |
//! | vector for a one-sided band | `k + 1` copies, shifted like the matrix |

use banded_stages::reader::{
    read_general, read_symmetric_sub, read_symmetric_super, read_triangular, read_vector,
    read_vector_split,
};
use banded_stages::{forward, merge, shift_lower, shift_upper, BlockSink, UpperFloor};
use banded_view::{
    BandShape, Block, GeneralBanded, Lane, Result, SymmetricBanded, Triangle, TriangularBanded,
};
use crossbeam_channel::Receiver;

use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;
use crate::row_aligned::RowAligned;

/// Matrix orders must be a multiple of this many scalars.
#[inline]
fn matrix_alignment<const W: usize>(config: &PipelineConfig) -> usize {
    W.saturating_mul(config.block_group)
}

fn collect<T: Lane, const W: usize>(
    shape: BandShape,
    fill: impl FnOnce(&mut Vec<Block<T, W>>) -> Result<()>,
) -> Result<RowAligned<T, W>> {
    let mut blocks = Vec::with_capacity(shape.output_blocks(W));
    fill(&mut blocks)?;
    RowAligned::new(blocks, shape)
}

// ============================================================================
// Matrices
// ============================================================================

/// Symmetric band to its full `2k + 1` row-aligned diagonals.
pub fn symmetric_into<T, const W: usize, S>(
    matrix: &SymmetricBanded<'_, T>,
    config: &PipelineConfig,
    out: &mut S,
) -> Result<()>
where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    let shape = matrix.shape();
    shape.check_aligned(matrix_alignment::<W>(config))?;
    let (n, k) = (shape.n(), matrix.k());
    let span = tracing::debug_span!("symmetric", n, k, lanes = W, triangle = ?matrix.triangle());
    let _enter = span.enter();

    let diagonals = matrix.diagonals();
    let mut pipeline = Pipeline::new(config, shape.output_blocks(W));
    let (mut upper_tx, mut upper_rx) = pipeline.link::<T, W>();
    let (mut lower_tx, mut lower_rx) = pipeline.link::<T, W>();
    let (mut upper_out, mut upper_in) = pipeline.link::<T, W>();
    let (mut lower_out, mut lower_in) = pipeline.link::<T, W>();
    match matrix.triangle() {
        Triangle::Upper => {
            pipeline
                .stage("read", move || {
                    read_symmetric_super(&diagonals, k, &mut upper_tx, &mut lower_tx)
                })
                .stage("shift_upper", move || {
                    shift_upper(n, k, UpperFloor::ExcludeMain, &mut upper_rx, &mut upper_out)
                })
                .stage("forward", move || {
                    forward(n, k + 1, &mut lower_rx, &mut lower_out)
                });
        }
        Triangle::Lower => {
            pipeline
                .stage("read", move || {
                    read_symmetric_sub(&diagonals, k, &mut upper_tx, &mut lower_tx)
                })
                .stage("forward", move || forward(n, k, &mut upper_rx, &mut upper_out))
                .stage("shift_lower", move || {
                    shift_lower(n, k, &mut lower_rx, &mut lower_out)
                });
        }
    }
    pipeline.stage("merge", move || {
        merge(n, k, k, &mut upper_in, &mut lower_in, out)
    });
    pipeline.run()
}

pub fn symmetric_to_stream<T: Lane, const W: usize>(
    matrix: &SymmetricBanded<'_, T>,
    config: &PipelineConfig,
) -> Result<RowAligned<T, W>> {
    collect(matrix.shape(), |out| symmetric_into(matrix, config, out))
}

/// General band to its `ku + kl + 1` row-aligned diagonals.
pub fn general_into<T, const W: usize, S>(
    matrix: &GeneralBanded<'_, T>,
    config: &PipelineConfig,
    out: &mut S,
) -> Result<()>
where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    let shape = matrix.shape();
    shape.check_aligned(matrix_alignment::<W>(config))?;
    let (n, ku, kl) = (shape.n(), shape.ku(), shape.kl());
    let span = tracing::debug_span!("general", n, ku, kl, lanes = W);
    let _enter = span.enter();

    let diagonals = matrix.diagonals();
    let mut pipeline = Pipeline::new(config, shape.output_blocks(W));
    let (mut upper_tx, mut upper_rx) = pipeline.link::<T, W>();
    let (mut lower_tx, mut lower_rx) = pipeline.link::<T, W>();
    let (mut upper_out, mut upper_in) = pipeline.link::<T, W>();
    let (mut lower_out, mut lower_in) = pipeline.link::<T, W>();
    pipeline
        .stage("read", move || {
            read_general(&diagonals, ku, kl, &mut upper_tx, &mut lower_tx)
        })
        .stage("shift_upper", move || {
            shift_upper(n, ku, UpperFloor::ExcludeMain, &mut upper_rx, &mut upper_out)
        })
        .stage("shift_lower", move || {
            shift_lower(n, kl, &mut lower_rx, &mut lower_out)
        })
        .stage("merge", move || {
            merge(n, ku, kl, &mut upper_in, &mut lower_in, out)
        });
    pipeline.run()
}

pub fn general_to_stream<T: Lane, const W: usize>(
    matrix: &GeneralBanded<'_, T>,
    config: &PipelineConfig,
) -> Result<RowAligned<T, W>> {
    collect(matrix.shape(), |out| general_into(matrix, config, out))
}

/// Triangular band to its `k + 1` row-aligned diagonals.
///
/// There is only one path, so no merge stage runs.
pub fn triangular_into<T, const W: usize, S>(
    matrix: &TriangularBanded<'_, T>,
    config: &PipelineConfig,
    out: &mut S,
) -> Result<()>
where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    let shape = matrix.shape();
    shape.check_aligned(matrix_alignment::<W>(config))?;
    let (n, k, triangle) = (shape.n(), matrix.k(), matrix.triangle());
    let span = tracing::debug_span!("triangular", n, k, lanes = W, triangle = ?triangle);
    let _enter = span.enter();

    let diagonals = matrix.diagonals();
    let mut pipeline = Pipeline::new(config, shape.output_blocks(W));
    let (mut tx, rx) = pipeline.link::<T, W>();
    pipeline.stage("read", move || read_triangular(&diagonals, k, &mut tx));
    shift_one_sided(&mut pipeline, n, k, triangle, rx, out);
    pipeline.run()
}

pub fn triangular_to_stream<T: Lane, const W: usize>(
    matrix: &TriangularBanded<'_, T>,
    config: &PipelineConfig,
) -> Result<RowAligned<T, W>> {
    collect(matrix.shape(), |out| triangular_into(matrix, config, out))
}

fn shift_one_sided<'env, T, const W: usize, S>(
    pipeline: &mut Pipeline<'env>,
    n: usize,
    k: usize,
    triangle: Triangle,
    mut input: Receiver<Block<T, W>>,
    out: &'env mut S,
) where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    match triangle {
        Triangle::Upper => pipeline.stage("shift_upper", move || {
            shift_upper(n, k, UpperFloor::IncludeMain, &mut input, out)
        }),
        Triangle::Lower => pipeline.stage("shift_lower", move || {
            shift_lower(n, k, &mut input, out)
        }),
    };
}

// ============================================================================
// Vectors
// ============================================================================

/// Expand `x` to match a two-sided band with `ku` super- and `kl`
/// sub-diagonals.
///
/// Each output diagonal run holds the entries of `x` that the matching
/// matrix run multiplies, so the two sequences can be consumed in lock-step.
/// A symmetric band of half-width `k` uses `ku = kl = k`.
pub fn vector_general_into<T, const W: usize, S>(
    x: &[T],
    ku: usize,
    kl: usize,
    config: &PipelineConfig,
    out: &mut S,
) -> Result<()>
where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    let shape = BandShape::general(x.len(), ku, kl)?;
    shape.check_aligned(W)?;
    let n = shape.n();
    let span = tracing::debug_span!("vector_general", n, ku, kl, lanes = W);
    let _enter = span.enter();

    let mut pipeline = Pipeline::new(config, shape.output_blocks(W));
    let (mut upper_tx, mut upper_rx) = pipeline.link::<T, W>();
    let (mut lower_tx, mut lower_rx) = pipeline.link::<T, W>();
    let (mut upper_out, mut upper_in) = pipeline.link::<T, W>();
    let (mut lower_out, mut lower_in) = pipeline.link::<T, W>();
    pipeline
        .stage("read", move || {
            read_vector_split(x, ku, kl, &mut upper_tx, &mut lower_tx)
        })
        .stage("shift_upper", move || {
            shift_upper(n, ku, UpperFloor::ExcludeMain, &mut upper_rx, &mut upper_out)
        })
        .stage("shift_lower", move || {
            shift_lower(n, kl, &mut lower_rx, &mut lower_out)
        })
        .stage("merge", move || {
            merge(n, ku, kl, &mut upper_in, &mut lower_in, out)
        });
    pipeline.run()
}

pub fn vector_general_to_stream<T: Lane, const W: usize>(
    x: &[T],
    ku: usize,
    kl: usize,
    config: &PipelineConfig,
) -> Result<RowAligned<T, W>> {
    let shape = BandShape::general(x.len(), ku, kl)?;
    collect(shape, |out| vector_general_into(x, ku, kl, config, out))
}

/// Expand `x` to match a one-sided band of `k` off-diagonals.
pub fn vector_triangular_into<T, const W: usize, S>(
    x: &[T],
    k: usize,
    triangle: Triangle,
    config: &PipelineConfig,
    out: &mut S,
) -> Result<()>
where
    T: Lane,
    S: BlockSink<T, W> + Send,
{
    let shape = one_sided_shape(x.len(), k, triangle)?;
    shape.check_aligned(W)?;
    let n = shape.n();
    let span = tracing::debug_span!("vector_triangular", n, k, lanes = W, triangle = ?triangle);
    let _enter = span.enter();

    let mut pipeline = Pipeline::new(config, shape.output_blocks(W));
    let (mut tx, rx) = pipeline.link::<T, W>();
    pipeline.stage("read", move || read_vector(x, k, &mut tx));
    shift_one_sided(&mut pipeline, n, k, triangle, rx, out);
    pipeline.run()
}

pub fn vector_triangular_to_stream<T: Lane, const W: usize>(
    x: &[T],
    k: usize,
    triangle: Triangle,
    config: &PipelineConfig,
) -> Result<RowAligned<T, W>> {
    let shape = one_sided_shape(x.len(), k, triangle)?;
    collect(shape, |out| {
        vector_triangular_into(x, k, triangle, config, out)
    })
}

fn one_sided_shape(n: usize, k: usize, triangle: Triangle) -> Result<BandShape> {
    match triangle {
        Triangle::Upper => BandShape::upper_triangular(n, k),
        Triangle::Lower => BandShape::lower_triangular(n, k),
    }
}
