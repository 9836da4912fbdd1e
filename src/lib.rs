// Public API exports
pub mod cloud;
pub mod downsampler;
pub mod error;
pub mod graph;
pub mod partitioner;
pub mod pipeline;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use cloud::{KdTree, Point3, PointSet};
pub use error::{PipelineError, Result};

pub use downsampler::{downsample, DownsampleStrategy, TreeHeight, DEFAULT_FPS_WINDOW};

pub use graph::{build_knn, build_mst, Graph, GraphStrategy};

pub use partitioner::{partition, Cluster, Partition, PartitionAlgorithm};

pub use pipeline::{Artifacts, PipelineCache, PipelineConfig, Stage, StageRuns};

pub use store::{AnnotationStore, ClusterRecord, Label, LabelState};

pub use session::AnnotationSession;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 when the caller wants reproducibility, OS entropy
/// otherwise. Shared by every randomized stage.
pub(crate) fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
