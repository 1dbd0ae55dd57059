//! Streaming reformatter for banded matrices.
//!
//! Banded matrices are usually stored diagonal-major and indexed by column:
//! a super-diagonal carries its padding at the head, a sub-diagonal at the
//! tail. A consumer that multiplies the band against a vector row by row
//! wants every diagonal indexed by row instead, delivered as fixed-width
//! blocks of `W` lanes. This crate converts the former into the latter with
//! a small pipeline of stream stages.
//!
//! # Core Types
//!
//! - [`Block`]: `W` scalar lanes, the unit moved between stages
//! - [`GeneralBanded`], [`SymmetricBanded`], [`TriangularBanded`]: borrowed
//!   diagonal-major inputs
//! - [`RowAligned`]: a finished output sequence with its band layout
//! - [`PipelineConfig`]: execution mode, link capacity and block grouping
//!
//! # Conversions
//!
//! - [`symmetric_to_stream`], [`general_to_stream`], [`triangular_to_stream`]:
//!   matrices to `ku + kl + 1` row-aligned diagonals
//! - [`vector_general_to_stream`], [`vector_triangular_to_stream`]: a dense
//!   vector expanded to line up with the matching matrix sequence
//! - [`general_operands`], [`symmetric_operands`], [`triangular_operands`]:
//!   both at once, ready for lock-step consumption
//!
//! Each conversion also has an `*_into` form that writes into any
//! [`BlockSink`].
//!
//! # Example
//!
//! ```rust
//! use banded_mover::{general_to_stream, pack, Diagonal, GeneralBanded, PipelineConfig, RowAligned};
//!
//! // 4x4 tridiagonal with A[r][c] = 10 * r + c + 1 on the band
//! let dense: Vec<f64> = (0..16).map(|i| (10 * (i / 4) + i % 4 + 1) as f64).collect();
//! let data = pack::pack_general(&dense, 4, 1, 1).unwrap();
//! let matrix = GeneralBanded::new(&data, 4, 1, 1).unwrap();
//!
//! let out: RowAligned<f64, 2> = general_to_stream(&matrix, &PipelineConfig::default()).unwrap();
//! assert_eq!(out.len(), 6);
//! assert_eq!(out.lanes(Diagonal::Super(1)).unwrap(), vec![2.0, 13.0, 24.0, 0.0]);
//! assert_eq!(out.lanes(Diagonal::Sub(1)).unwrap(), vec![0.0, 11.0, 22.0, 33.0]);
//! ```
//!
//! # Dependency graph
//!
//! ```text
//! banded-view -> banded-stages -> banded-mover
//! ```

pub mod config;
pub mod convert;
pub mod paired;
mod pipeline;
mod row_aligned;

pub use banded_stages::{swap, BlockSink, BlockSource};
pub use banded_view::{
    pack, BandError, BandShape, Block, Diagonal, DiagonalMajor, GeneralBanded, Lane, Result,
    SymmetricBanded, Triangle, TriangularBanded,
};
pub use config::{ExecMode, PipelineConfig};
pub use convert::{
    general_into, general_to_stream, symmetric_into, symmetric_to_stream, triangular_into,
    triangular_to_stream, vector_general_into, vector_general_to_stream, vector_triangular_into,
    vector_triangular_to_stream,
};
pub use paired::{general_operands, symmetric_operands, triangular_operands, Operands};
pub use row_aligned::RowAligned;
