use crate::cloud::{distance_squared, PointSet};
use crate::error::{PipelineError, Result};
use crate::graph::Graph;

/// Build the minimum spanning tree of the complete Euclidean graph.
///
/// Prim's algorithm over the implicit dense graph: O(N²) pairwise distance
/// work, no explicit N×N matrix. Comparisons run on squared distances (the
/// minimum is the same); stored edge weights are true distances. Only ever
/// run at post-downsampling cardinality.
pub fn build_mst(points: &PointSet) -> Result<Graph> {
    let n = points.len();
    if n < 2 {
        return Err(PipelineError::InvalidParameter(format!(
            "MST requires at least 2 points, got {}",
            n
        )));
    }

    let mut in_tree = vec![false; n];
    let mut best_dist = vec![f64::INFINITY; n];
    let mut best_from = vec![0usize; n];
    let mut graph = Graph::new(n);

    in_tree[0] = true;
    for i in 1..n {
        best_dist[i] = distance_squared(&points[i], &points[0]);
    }

    for _ in 1..n {
        let mut u = usize::MAX;
        let mut u_dist = f64::INFINITY;
        for i in 0..n {
            if !in_tree[i] && best_dist[i] < u_dist {
                u = i;
                u_dist = best_dist[i];
            }
        }

        in_tree[u] = true;
        graph.add_edge(u, best_from[u], u_dist.sqrt());

        for i in 0..n {
            if in_tree[i] {
                continue;
            }
            let d = distance_squared(&points[i], &points[u]);
            if d < best_dist[i] {
                best_dist[i] = d;
                best_from[i] = u;
            }
        }
    }
    Ok(graph)
}
