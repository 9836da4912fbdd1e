use super::*;
use crate::cloud::{Point3, PointSet};
use crate::error::PipelineError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_cloud(n: usize, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Point3> = (0..n)
        .map(|_| {
            [
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            ]
        })
        .collect();
    PointSet::new(points)
}

fn all_strategies() -> Vec<DownsampleStrategy> {
    vec![
        DownsampleStrategy::Random,
        DownsampleStrategy::FpsVanilla,
        DownsampleStrategy::FpsWindowed,
        DownsampleStrategy::FpsWindowedTree,
        DownsampleStrategy::BucketFps(TreeHeight::Small),
        DownsampleStrategy::BucketFps(TreeHeight::Medium),
        DownsampleStrategy::BucketFps(TreeHeight::Large),
    ]
}

#[test]
fn test_identity_when_target_at_least_input() {
    let cloud = random_cloud(30, 1);
    for strategy in all_strategies() {
        let same = downsample(&cloud, 30, strategy, Some(0)).unwrap();
        assert_eq!(same, cloud);
        let bigger = downsample(&cloud, 1000, strategy, Some(0)).unwrap();
        assert_eq!(bigger, cloud);
    }
}

#[test]
fn test_cardinality_subset_no_duplicates() {
    let cloud = random_cloud(200, 2);
    for strategy in all_strategies() {
        let sampled = downsample(&cloud, 40, strategy, Some(9)).unwrap();
        assert_eq!(sampled.len(), 40, "{strategy:?}");

        // Every output point exists in the input, and no point repeats.
        // Coordinates are random f64s, so value identity is index identity.
        let mut matched: Vec<usize> = sampled
            .iter()
            .map(|p| {
                cloud
                    .iter()
                    .position(|q| q == p)
                    .unwrap_or_else(|| panic!("{strategy:?} fabricated a point"))
            })
            .collect();
        matched.sort_unstable();
        matched.dedup();
        assert_eq!(matched.len(), 40, "{strategy:?} selected a duplicate");
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let cloud = random_cloud(150, 3);
    for strategy in all_strategies() {
        let a = downsample(&cloud, 25, strategy, Some(77)).unwrap();
        let b = downsample(&cloud, 25, strategy, Some(77)).unwrap();
        assert_eq!(a, b, "{strategy:?}");
    }
}

#[test]
fn test_target_count_zero_is_invalid() {
    let cloud = random_cloud(10, 4);
    let err = downsample(&cloud, 0, DownsampleStrategy::Random, None).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidParameter(_)));
}

#[test]
fn test_empty_input_is_rejected() {
    let empty = PointSet::new(vec![]);
    let err = downsample(&empty, 10, DownsampleStrategy::FpsVanilla, None).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyPointSet));
}

#[test]
fn test_fps_covers_separated_clusters() {
    // Two tight blobs far apart: FPS with target 2 must take one from each
    let mut points: Vec<Point3> = Vec::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..20 {
        points.push([rng.gen_range(-0.5..0.5), 0.0, 0.0]);
    }
    for _ in 0..20 {
        points.push([100.0 + rng.gen_range(-0.5..0.5), 0.0, 0.0]);
    }
    let cloud = PointSet::new(points);

    let sampled = downsample(&cloud, 2, DownsampleStrategy::FpsVanilla, Some(11)).unwrap();
    let near = sampled.iter().filter(|p| p[0] < 50.0).count();
    let far = sampled.iter().filter(|p| p[0] >= 50.0).count();
    assert_eq!((near, far), (1, 1));
}

#[test]
fn test_bucket_fps_matches_vanilla() {
    // Both are exact; bucket pruning only skips provably no-op updates, so
    // with equal seeds they select the same points on a general-position cloud
    let cloud = random_cloud(300, 6);
    let vanilla = downsample(&cloud, 32, DownsampleStrategy::FpsVanilla, Some(21)).unwrap();
    for height in [TreeHeight::Small, TreeHeight::Medium, TreeHeight::Large] {
        let bucketed =
            downsample(&cloud, 32, DownsampleStrategy::BucketFps(height), Some(21)).unwrap();
        assert_eq!(bucketed, vanilla, "{height:?}");
    }
}
