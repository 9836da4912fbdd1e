use crate::downsampler::{DownsampleStrategy, TreeHeight};
use crate::graph::GraphStrategy;
use crate::partitioner::PartitionAlgorithm;

/// Everything a pipeline run depends on besides the points themselves.
///
/// Passed explicitly into every `ensure` call; there is no process-wide
/// settings state. Changing a field reruns exactly the stages that depend
/// on it (see [`super::PipelineCache`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub downsample: DownsampleStrategy,
    pub target_count: usize,
    pub graph: GraphStrategy,
    pub partition: PartitionAlgorithm,
    /// Seed for the randomized strategies; `None` means OS entropy.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            downsample: DownsampleStrategy::BucketFps(TreeHeight::Medium),
            target_count: 2048,
            graph: GraphStrategy::Mst,
            partition: PartitionAlgorithm::LabelPropagation,
            seed: None,
        }
    }
}
