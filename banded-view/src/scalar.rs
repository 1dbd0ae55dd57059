//! Scalar type bounds for lane contents.

/// Bounds shared by every scalar that can travel in a [`Block`](crate::Block) lane.
///
/// Only `Zero` is needed from the numeric tower: the stages never do
/// arithmetic, they only move values and insert padding. This keeps custom
/// semiring types usable as long as they name their additive identity.
pub trait Lane: Copy + Send + Sync + num_traits::Zero + PartialEq + 'static {}

impl<T> Lane for T where T: Copy + Send + Sync + num_traits::Zero + PartialEq + 'static {}
