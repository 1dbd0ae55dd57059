//! Fixed-width lane groups.

use std::ops::{Index, IndexMut};

use crate::Lane;

/// `W` scalars moved between stages as one unit.
///
/// Blocks have value semantics: a stage that keeps a block around for the
/// next step holds its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block<T, const W: usize>([T; W]);

impl<T, const W: usize> Block<T, W> {
    /// Number of lanes.
    pub const LANES: usize = W;

    #[inline]
    pub fn new(lanes: [T; W]) -> Self {
        Self(lanes)
    }

    #[inline]
    pub fn lanes(&self) -> &[T; W] {
        &self.0
    }

    #[inline]
    pub fn into_lanes(self) -> [T; W] {
        self.0
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: Lane, const W: usize> Block<T, W> {
    /// A block of padding.
    #[inline]
    pub fn zero() -> Self {
        Self([T::zero(); W])
    }

    #[inline]
    pub fn splat(value: T) -> Self {
        Self([value; W])
    }

    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Copy the leading `W` scalars of `src`.
    ///
    /// # Panics
    /// Panics if `src` holds fewer than `W` scalars.
    #[inline]
    pub fn from_slice(src: &[T]) -> Self {
        Self::from_fn(|b| src[b])
    }

    /// `W` consecutive lanes of the concatenation `self ++ next`, starting at
    /// lane `offset` of `self`.
    ///
    /// `offset == 0` yields `self`, `offset == W` yields `next`.
    #[inline]
    pub fn window(&self, offset: usize, next: &Self) -> Self {
        debug_assert!(offset <= W);
        let split = W - offset;
        Self::from_fn(|b| {
            if b < split {
                self.0[offset + b]
            } else {
                next.0[b - split]
            }
        })
    }

    /// Number of lanes holding the padding value.
    pub fn count_zeros(&self) -> usize {
        self.0.iter().filter(|v| v.is_zero()).count()
    }
}

impl<T: Lane, const W: usize> Default for Block<T, W> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T, const W: usize> From<[T; W]> for Block<T, W> {
    fn from(lanes: [T; W]) -> Self {
        Self(lanes)
    }
}

impl<T, const W: usize> Index<usize> for Block<T, W> {
    type Output = T;

    #[inline]
    fn index(&self, lane: usize) -> &T {
        &self.0[lane]
    }
}

impl<T, const W: usize> IndexMut<usize> for Block<T, W> {
    #[inline]
    fn index_mut(&mut self, lane: usize) -> &mut T {
        &mut self.0[lane]
    }
}

impl<'a, T, const W: usize> IntoIterator for &'a Block<T, W> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
