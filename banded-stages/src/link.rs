//! Endpoints stages read from and write to.

use std::collections::VecDeque;

use banded_view::{BandError, Block, Result};
use crossbeam_channel::{Receiver, Sender};

/// Blocking, in-order source of blocks.
pub trait BlockSource<T, const W: usize> {
    /// Take the next block. Fails with [`BandError::UpstreamClosed`] when no
    /// more blocks will arrive.
    fn pull(&mut self) -> Result<Block<T, W>>;
}

/// Blocking, in-order sink of blocks.
pub trait BlockSink<T, const W: usize> {
    /// Hand over one block. Fails with [`BandError::DownstreamClosed`] when
    /// the consumer is gone.
    fn push(&mut self, block: Block<T, W>) -> Result<()>;
}

impl<T, const W: usize> BlockSource<T, W> for Receiver<Block<T, W>> {
    #[inline]
    fn pull(&mut self) -> Result<Block<T, W>> {
        self.recv().map_err(|_| BandError::UpstreamClosed)
    }
}

impl<T, const W: usize> BlockSink<T, W> for Sender<Block<T, W>> {
    #[inline]
    fn push(&mut self, block: Block<T, W>) -> Result<()> {
        self.send(block).map_err(|_| BandError::DownstreamClosed)
    }
}

impl<T, const W: usize> BlockSource<T, W> for VecDeque<Block<T, W>> {
    #[inline]
    fn pull(&mut self) -> Result<Block<T, W>> {
        self.pop_front().ok_or(BandError::UpstreamClosed)
    }
}

impl<T, const W: usize> BlockSink<T, W> for VecDeque<Block<T, W>> {
    #[inline]
    fn push(&mut self, block: Block<T, W>) -> Result<()> {
        self.push_back(block);
        Ok(())
    }
}

impl<T, const W: usize> BlockSink<T, W> for Vec<Block<T, W>> {
    #[inline]
    fn push(&mut self, block: Block<T, W>) -> Result<()> {
        Vec::push(self, block);
        Ok(())
    }
}

impl<T, const W: usize, S: BlockSink<T, W> + ?Sized> BlockSink<T, W> for &mut S {
    #[inline]
    fn push(&mut self, block: Block<T, W>) -> Result<()> {
        (**self).push(block)
    }
}
