//! Pipeline tuning.

/// How the stages of one conversion are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// One thread per stage, connected by bounded channels.
    Threaded,
    /// Stages run one after another on the calling thread, each draining its
    /// input completely before the next one starts.
    Sequential,
    /// `Sequential` below [`PipelineConfig::auto_threshold`] output blocks,
    /// `Threaded` otherwise.
    #[default]
    Auto,
}

/// Runtime knobs for a conversion.
///
/// None of these change the produced sequence; they only trade memory and
/// thread overhead against overlap between stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub mode: ExecMode,
    /// Capacity of every link between stages, in blocks.
    pub channel_capacity: usize,
    /// Matrix orders must be a multiple of `W * block_group`.
    pub block_group: usize,
    /// Output size (in blocks) from which `Auto` starts threads.
    pub auto_threshold: usize,
}

/// Default link capacity in blocks.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Output length in blocks from which [`ExecMode::Auto`] spawns stage threads.
pub const DEFAULT_AUTO_THRESHOLD: usize = 1 << 14;

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: ExecMode::Auto,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            block_group: 1,
            auto_threshold: DEFAULT_AUTO_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    pub fn threaded() -> Self {
        Self::default().with_mode(ExecMode::Threaded)
    }

    pub fn sequential() -> Self {
        Self::default().with_mode(ExecMode::Sequential)
    }

    pub fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_block_group(mut self, block_group: usize) -> Self {
        self.block_group = block_group;
        self
    }

    pub fn with_auto_threshold(mut self, blocks: usize) -> Self {
        self.auto_threshold = blocks;
        self
    }

    /// Concrete mode for a conversion producing `output_blocks` blocks.
    pub fn resolve(&self, output_blocks: usize) -> ExecMode {
        match self.mode {
            ExecMode::Auto if output_blocks < self.auto_threshold => ExecMode::Sequential,
            ExecMode::Auto => ExecMode::Threaded,
            mode => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.mode, ExecMode::Auto);
        assert_eq!(config.block_group, 1);
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_auto_resolution() {
        let config = PipelineConfig::default().with_auto_threshold(100);
        assert_eq!(config.resolve(99), ExecMode::Sequential);
        assert_eq!(config.resolve(100), ExecMode::Threaded);
        assert_eq!(
            PipelineConfig::sequential().resolve(usize::MAX),
            ExecMode::Sequential
        );
        assert_eq!(PipelineConfig::threaded().resolve(0), ExecMode::Threaded);
    }

    #[test]
    fn test_builders_chain() {
        let config = PipelineConfig::threaded()
            .with_channel_capacity(2)
            .with_block_group(4);
        assert_eq!(config.channel_capacity, 2);
        assert_eq!(config.block_group, 4);
        assert_eq!(config.mode, ExecMode::Threaded);
    }
}
