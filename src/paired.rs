//! Matrix and vector streams for a downstream consumer that reads both in
//! lock-step.
//!
//! Each `*_operands` function runs the matrix conversion and the matching
//! vector expansion side by side (on the rayon pool with the `parallel`
//! feature, one after the other otherwise) and returns both sequences.

use banded_view::{
    BandError, Block, GeneralBanded, Lane, Result, SymmetricBanded, TriangularBanded,
};

use crate::config::PipelineConfig;
use crate::convert::{
    general_to_stream, symmetric_to_stream, triangular_to_stream, vector_general_to_stream,
    vector_triangular_to_stream,
};
use crate::row_aligned::RowAligned;

/// A row-aligned matrix sequence and the vector expansion that lines up with
/// it block for block.
#[derive(Debug, Clone, PartialEq)]
pub struct Operands<T, const W: usize> {
    matrix: RowAligned<T, W>,
    vector: RowAligned<T, W>,
}

impl<T: Lane, const W: usize> Operands<T, W> {
    /// Pair two sequences. Fails unless they have the same length.
    pub fn new(matrix: RowAligned<T, W>, vector: RowAligned<T, W>) -> Result<Self> {
        if matrix.len() != vector.len() {
            return Err(BandError::LengthMismatch(matrix.len(), vector.len()));
        }
        Ok(Self { matrix, vector })
    }

    pub fn matrix(&self) -> &RowAligned<T, W> {
        &self.matrix
    }

    pub fn vector(&self) -> &RowAligned<T, W> {
        &self.vector
    }

    /// Matrix and vector blocks in lock-step.
    pub fn lockstep(&self) -> impl Iterator<Item = (&Block<T, W>, &Block<T, W>)> + '_ {
        self.matrix.blocks().iter().zip(self.vector.blocks())
    }

    pub fn into_parts(self) -> (RowAligned<T, W>, RowAligned<T, W>) {
        (self.matrix, self.vector)
    }
}

fn check_vector_len(x: &[impl Sized], n: usize) -> Result<()> {
    if x.len() != n {
        return Err(BandError::LengthMismatch(x.len(), n));
    }
    Ok(())
}

pub fn general_operands<T: Lane, const W: usize>(
    matrix: &GeneralBanded<'_, T>,
    x: &[T],
    config: &PipelineConfig,
) -> Result<Operands<T, W>> {
    let shape = matrix.shape();
    check_vector_len(x, shape.n())?;
    let (a, v) = join(
        || general_to_stream(matrix, config),
        || vector_general_to_stream(x, shape.ku(), shape.kl(), config),
    );
    Operands::new(a?, v?)
}

pub fn symmetric_operands<T: Lane, const W: usize>(
    matrix: &SymmetricBanded<'_, T>,
    x: &[T],
    config: &PipelineConfig,
) -> Result<Operands<T, W>> {
    check_vector_len(x, matrix.shape().n())?;
    let k = matrix.k();
    let (a, v) = join(
        || symmetric_to_stream(matrix, config),
        || vector_general_to_stream(x, k, k, config),
    );
    Operands::new(a?, v?)
}

pub fn triangular_operands<T: Lane, const W: usize>(
    matrix: &TriangularBanded<'_, T>,
    x: &[T],
    config: &PipelineConfig,
) -> Result<Operands<T, W>> {
    check_vector_len(x, matrix.shape().n())?;
    let (a, v) = join(
        || triangular_to_stream(matrix, config),
        || vector_triangular_to_stream(x, matrix.k(), matrix.triangle(), config),
    );
    Operands::new(a?, v?)
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}
