use super::*;
use crate::cloud::{distance, Point3, PointSet};
use crate::error::PipelineError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_cloud(n: usize, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Point3> = (0..n)
        .map(|_| {
            [
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            ]
        })
        .collect();
    PointSet::new(points)
}

#[test]
fn test_add_edge_drops_self_loops() {
    let mut graph = Graph::new(3);
    graph.add_edge(1, 1, 5.0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_add_edge_last_write_wins() {
    let mut graph = Graph::new(3);
    graph.add_edge(0, 1, 5.0);
    graph.add_edge(1, 0, 2.0);

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.neighbors(0).next(), Some((1, 2.0)));
    assert_eq!(graph.neighbors(1).next(), Some((0, 2.0)));
}

#[test]
fn test_knn_rejects_bad_k() {
    let cloud = random_cloud(10, 1);
    assert!(matches!(
        build_knn(&cloud, 0),
        Err(PipelineError::InvalidParameter(_))
    ));
    assert!(matches!(
        build_knn(&cloud, 10),
        Err(PipelineError::InvalidParameter(_))
    ));
    assert!(build_knn(&cloud, 9).is_ok());
}

#[test]
fn test_knn_degree_and_weights() {
    let cloud = random_cloud(10, 2);
    let k = 3;
    let graph = build_knn(&cloud, k).unwrap();

    assert_eq!(graph.vertex_count(), 10);
    for v in 0..10 {
        // Own neighbor list guarantees k incident edges; reverse listings
        // may add more
        assert!(graph.degree(v) >= k);
    }
    for (u, v, w) in graph.edges() {
        assert!((w - distance(&cloud[u], &cloud[v])).abs() < 1e-12);
    }
}

#[test]
fn test_mst_rejects_single_point() {
    let cloud = PointSet::new(vec![[0.0, 0.0, 0.0]]);
    assert!(matches!(
        build_mst(&cloud),
        Err(PipelineError::InvalidParameter(_))
    ));
}

#[test]
fn test_mst_is_connected_with_n_minus_one_edges() {
    for (n, seed) in [(2, 1), (5, 2), (60, 3)] {
        let cloud = random_cloud(n, seed);
        let graph = build_mst(&cloud).unwrap();
        assert_eq!(graph.edge_count(), n - 1);
        assert!(graph.is_connected());
    }
}

#[test]
fn test_mst_picks_minimum_edges() {
    // Colinear at x = 0, 1, 3: the MST must join 0-1 and 1-2, never 0-2
    let cloud = PointSet::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [3.0, 0.0, 0.0]]);
    let graph = build_mst(&cloud).unwrap();

    assert!(graph.has_edge(0, 1));
    assert!(graph.has_edge(1, 2));
    assert!(!graph.has_edge(0, 2));
    assert!((graph.total_weight() - 3.0).abs() < 1e-12);
}

#[test]
fn test_knn_may_be_disconnected() {
    // Two distant pairs with k=1 stay two components
    let cloud = PointSet::new(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [100.0, 0.0, 0.0],
        [101.0, 0.0, 0.0],
    ]);
    let graph = build_knn(&cloud, 1).unwrap();
    assert!(!graph.is_connected());
    assert_eq!(graph.edge_count(), 2);
}
