//! Stage scheduling for one conversion.
//!
//! A conversion registers its stages in topological order, each stage owning
//! the channel endpoints it reads from and writes to. [`Pipeline::run`] then
//! either spawns one scoped thread per stage (links are bounded, so a fast
//! producer blocks on a slow consumer) or calls the stages in registration
//! order on the current thread (links are unbounded, so each stage can run to
//! completion before its consumer starts).
//!
//! A stage that fails drops its endpoints; its neighbours then stop with
//! [`BandError::UpstreamClosed`] / [`BandError::DownstreamClosed`]. The error
//! reported for the whole pipeline is the first one that is not merely such a
//! disconnect.

use std::panic::{catch_unwind, AssertUnwindSafe};

use banded_view::{BandError, Block, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::config::{ExecMode, PipelineConfig};

type StageFn<'env> = Box<dyn FnOnce() -> Result<usize> + Send + 'env>;

struct Stage<'env> {
    name: &'static str,
    run: StageFn<'env>,
}

pub(crate) struct Pipeline<'env> {
    mode: ExecMode,
    capacity: usize,
    stages: Vec<Stage<'env>>,
}

impl<'env> Pipeline<'env> {
    pub(crate) fn new(config: &PipelineConfig, output_blocks: usize) -> Self {
        Self {
            mode: config.resolve(output_blocks),
            capacity: config.channel_capacity,
            stages: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> ExecMode {
        self.mode
    }

    /// A point-to-point link between two stages.
    pub(crate) fn link<T, const W: usize>(&self) -> (Sender<Block<T, W>>, Receiver<Block<T, W>>) {
        match self.mode {
            ExecMode::Threaded => bounded(self.capacity),
            _ => unbounded(),
        }
    }

    /// Register a stage. It returns the number of blocks it emitted.
    pub(crate) fn stage<F>(&mut self, name: &'static str, run: F) -> &mut Self
    where
        F: FnOnce() -> Result<usize> + Send + 'env,
    {
        self.stages.push(Stage {
            name,
            run: Box::new(run),
        });
        self
    }

    pub(crate) fn run(self) -> Result<()> {
        tracing::debug!(mode = ?self.mode, stages = self.stages.len(), "running pipeline");
        match self.mode {
            ExecMode::Threaded => self.run_threaded(),
            _ => self.run_sequential(),
        }
    }

    fn run_sequential(self) -> Result<()> {
        for stage in self.stages {
            let outcome = catch_unwind(AssertUnwindSafe(stage.run))
                .unwrap_or(Err(BandError::StagePanicked { stage: stage.name }));
            report(stage.name, &outcome);
            outcome?;
        }
        Ok(())
    }

    fn run_threaded(self) -> Result<()> {
        let span = tracing::Span::current();
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .stages
                .into_iter()
                .map(|stage| {
                    let span = span.clone();
                    let name = stage.name;
                    let handle = scope.spawn(move || {
                        span.in_scope(|| {
                            let outcome = (stage.run)();
                            report(name, &outcome);
                            outcome
                        })
                    });
                    (name, handle)
                })
                .collect();

            let mut first = None;
            for (name, handle) in handles {
                let outcome = handle
                    .join()
                    .unwrap_or(Err(BandError::StagePanicked { stage: name }));
                if let Err(err) = outcome {
                    keep_root_cause(&mut first, err);
                }
            }
            first.map_or(Ok(()), Err)
        })
    }
}

fn report(name: &'static str, outcome: &Result<usize>) {
    match outcome {
        Ok(blocks) => tracing::debug!(stage = name, blocks = *blocks, "stage finished"),
        Err(err) => tracing::warn!(stage = name, error = %err, "stage failed"),
    }
}

fn keep_root_cause(first: &mut Option<BandError>, err: BandError) {
    match first {
        Some(prev) if !prev.is_disconnect() || err.is_disconnect() => {}
        _ => *first = Some(err),
    }
}
