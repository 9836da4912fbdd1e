use crate::cloud::{distance, KdTree, PointSet};
use crate::error::{PipelineError, Result};
use crate::graph::Graph;

/// Build a k-nearest-neighbor graph.
///
/// Each point contributes edges to its `k` nearest neighbors (Euclidean,
/// excluding itself). The neighbor relation is not symmetric, but the graph
/// is undirected: if A lists B, edge {A, B} exists either way. Requires
/// `1 <= k < N`.
pub fn build_knn(points: &PointSet, k: usize) -> Result<Graph> {
    let n = points.len();
    if n == 0 {
        return Err(PipelineError::EmptyPointSet);
    }
    if k < 1 || k >= n {
        return Err(PipelineError::InvalidParameter(format!(
            "k must satisfy 1 <= k < {}, got {}",
            n, k
        )));
    }

    let tree = KdTree::build(points.as_slice());
    let mut graph = Graph::new(n);
    for i in 0..n {
        for j in tree.k_nearest(&points[i], k, Some(i)) {
            graph.add_edge(i, j, distance(&points[i], &points[j]));
        }
    }
    Ok(graph)
}
