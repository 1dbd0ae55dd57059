//! Data model for streaming banded matrices.
//!
//! This crate holds everything the stream stages agree on but never move
//! themselves:
//!
//! - [`Lane`]: bounds on the scalar carried in each lane
//! - [`Block`]: a fixed-width group of lanes, the unit moved between stages
//! - [`BandShape`] / [`Diagonal`]: the band descriptor and the row-aligned
//!   output layout it implies
//! - [`DiagonalMajor`] and the typed matrix views ([`GeneralBanded`],
//!   [`SymmetricBanded`], [`TriangularBanded`]) over borrowed diagonal-major
//!   buffers
//! - [`pack`]: helpers that build diagonal-major buffers from dense matrices
//!
//! # Dependency graph
//!
//! ```text
//! banded-view -> banded-stages -> banded-mover
//! ```

mod band;
mod block;
mod diagonal;
mod matrix;
pub mod pack;
mod scalar;

pub use band::{BandShape, Diagonal};
pub use block::Block;
pub use diagonal::DiagonalMajor;
pub use matrix::{GeneralBanded, SymmetricBanded, Triangle, TriangularBanded};
pub use scalar::Lane;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while reformatting banded streams.
///
/// The first three variants are caller contract violations and are always
/// reported before a single block is produced. The remaining ones report
/// sequences of different lengths, or a pipeline stage that stopped early,
/// which only happens when another stage failed.
#[derive(Debug, thiserror::Error)]
pub enum BandError {
    /// Matrix order is not a multiple of the required block alignment.
    #[error("matrix order {n} is not a multiple of the block alignment {align}")]
    Misaligned { n: usize, align: usize },

    /// A side of the band holds more diagonals than the matrix has.
    #[error("{diagonals} off-diagonals do not fit a {n}x{n} matrix")]
    BandTooWide { diagonals: usize, n: usize },

    /// Source buffer is shorter than the declared band requires.
    #[error("buffer holds {len} elements, expected at least {expected}")]
    BufferTooShort { len: usize, expected: usize },

    /// Two sequences that must line up have different lengths. Raised up
    /// front for a vector of the wrong order, or after streaming when a
    /// collected sequence does not match its band.
    #[error("stream length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),

    /// An input stream ended before delivering the expected blocks.
    #[error("upstream closed before delivering all blocks")]
    UpstreamClosed,

    /// An output stream was dropped before accepting all blocks.
    #[error("downstream closed before accepting all blocks")]
    DownstreamClosed,

    /// A pipeline stage panicked.
    #[error("stage `{stage}` panicked")]
    StagePanicked { stage: &'static str },
}

impl BandError {
    /// True for caller contract violations detected before streaming starts.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BandError::Misaligned { .. }
                | BandError::BandTooWide { .. }
                | BandError::BufferTooShort { .. }
        )
    }

    /// True when the error is only a consequence of a peer stage going away.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, BandError::UpstreamClosed | BandError::DownstreamClosed)
    }
}

/// Result type for banded stream operations.
pub type Result<T> = std::result::Result<T, BandError>;
