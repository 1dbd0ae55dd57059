//! Stream transducers for banded matrix reformatting.
//!
//! Each stage is a plain function that pulls blocks from one or two
//! [`BlockSource`]s and pushes blocks into one or two [`BlockSink`]s, in
//! strict FIFO order, exactly once per block. The number of blocks a stage
//! moves is fixed by the band parameters, so a stage never waits for an
//! end-of-stream marker.
//!
//! - [`reader`]: memory to block streams (upper / lower split)
//! - [`shift_upper`], [`shift_lower`]: move per-diagonal padding so entries
//!   line up by row
//! - [`forward`], [`merge`]: relay and concatenate
//! - [`swap`]: exchange two streams block by block
//!
//! Stages are wired together by `banded-mover`, which runs them on threads
//! connected by bounded channels or one after another.
//!
//! # Dependency graph
//!
//! ```text
//! banded-view -> banded-stages -> banded-mover
//! ```

pub mod link;
pub mod pad_shift;
pub mod reader;
pub mod relay;

pub use link::{BlockSink, BlockSource};
pub use pad_shift::{shift_lower, shift_upper, UpperFloor};
pub use relay::{forward, merge, swap};
