use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_cloud(n: usize, seed: u64) -> Vec<Point3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            ]
        })
        .collect()
}

fn brute_force_k_nearest(points: &[Point3], query: &Point3, k: usize, exclude: Option<usize>) -> Vec<usize> {
    let mut dists: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .filter(|(i, _)| exclude != Some(*i))
        .map(|(i, p)| (distance_squared(query, p), i))
        .collect();
    dists.sort_by(|a, b| a.0.total_cmp(&b.0));
    dists.into_iter().take(k).map(|(_, i)| i).collect()
}

#[test]
fn test_select_preserves_coordinates() {
    let set = PointSet::new(vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let subset = set.select(&[2, 0]);

    assert_eq!(subset.len(), 2);
    assert_eq!(subset[0], [4.0, 5.0, 6.0]);
    assert_eq!(subset[1], [0.0, 0.0, 0.0]);
}

#[test]
fn test_digest_depends_on_order() {
    let a = PointSet::new(vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
    let b = PointSet::new(vec![[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]]);

    assert_eq!(a.digest(), a.clone().digest());
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn test_k_nearest_matches_brute_force() {
    let points = random_cloud(200, 7);
    let tree = KdTree::build(&points);

    for (qi, query) in points.iter().enumerate().step_by(17) {
        let from_tree = tree.k_nearest(query, 5, Some(qi));
        let expected = brute_force_k_nearest(&points, query, 5, Some(qi));

        // Distances must agree even if equidistant points tie differently
        let td: Vec<f64> = from_tree
            .iter()
            .map(|&i| distance_squared(query, &points[i]))
            .collect();
        let ed: Vec<f64> = expected
            .iter()
            .map(|&i| distance_squared(query, &points[i]))
            .collect();
        assert_eq!(td, ed);
        assert!(!from_tree.contains(&qi));
    }
}

#[test]
fn test_k_nearest_small_tree() {
    let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    let tree = KdTree::build(&points);

    let found = tree.k_nearest(&[0.1, 0.0, 0.0], 5, None);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0], 0);
}

#[test]
fn test_fixed_height_buckets_cover_all_points() {
    let points = random_cloud(100, 3);
    let tree = KdTree::with_height(&points, 3);
    let buckets = tree.buckets();

    assert!(buckets.len() <= 8);
    let mut seen: Vec<usize> = buckets.iter().flat_map(|b| b.indices.iter().copied()).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..100).collect::<Vec<_>>());

    // Every point sits inside its bucket's bounding box
    for bucket in &buckets {
        for &i in bucket.indices {
            assert_eq!(bucket.bounds.min_distance_squared(&points[i]), 0.0);
        }
    }
}
