mod bucket;
mod fps;
mod random;

#[cfg(test)]
mod tests;

use crate::cloud::PointSet;
use crate::error::{PipelineError, Result};
use crate::seeded_rng;

/// Index window size used by the windowed farthest-point variants.
pub const DEFAULT_FPS_WINDOW: usize = 16;

/// Kd-tree height presets for the bucketed farthest-point variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeHeight {
    Small,
    Medium,
    Large,
}

impl TreeHeight {
    /// Tree height in levels: 4 for small, 7 for medium, 9 for large clouds.
    pub fn levels(self) -> usize {
        match self {
            TreeHeight::Small => 4,
            TreeHeight::Medium => 7,
            TreeHeight::Large => 9,
        }
    }
}

/// Selectable downsampling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownsampleStrategy {
    /// Uniform sample without replacement.
    Random,
    /// Exact farthest-point sampling.
    FpsVanilla,
    /// Farthest-point with min-distance updates restricted to an index
    /// window around the selected point.
    FpsWindowed,
    /// Farthest-point with updates restricted to the selected point's
    /// nearest neighbors from a kd-tree.
    FpsWindowedTree,
    /// Exact farthest-point over kd-tree buckets with bounding-box pruning.
    BucketFps(TreeHeight),
}

/// Reduce `points` to at most `target_count` points under `strategy`.
///
/// Returns the input unchanged when it is already small enough. Selected
/// coordinates are carried over exactly; no point is fabricated or selected
/// twice. Nondeterministic unless `seed` is given.
pub fn downsample(
    points: &PointSet,
    target_count: usize,
    strategy: DownsampleStrategy,
    seed: Option<u64>,
) -> Result<PointSet> {
    if points.is_empty() {
        return Err(PipelineError::EmptyPointSet);
    }
    if target_count < 1 {
        return Err(PipelineError::InvalidParameter(
            "target_count must be at least 1".to_string(),
        ));
    }
    if points.len() <= target_count {
        return Ok(points.clone());
    }

    let mut rng = seeded_rng(seed);
    let indices = match strategy {
        DownsampleStrategy::Random => random::sample_indices(points.len(), target_count, &mut rng),
        DownsampleStrategy::FpsVanilla => fps::vanilla(points, target_count, &mut rng),
        DownsampleStrategy::FpsWindowed => {
            fps::windowed(points, target_count, DEFAULT_FPS_WINDOW, &mut rng)
        }
        DownsampleStrategy::FpsWindowedTree => {
            fps::windowed_tree(points, target_count, DEFAULT_FPS_WINDOW, &mut rng)
        }
        DownsampleStrategy::BucketFps(height) => {
            bucket::bucket_fps(points, target_count, height.levels(), &mut rng)
        }
    };
    Ok(points.select(&indices))
}
