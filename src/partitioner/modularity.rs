use std::collections::BTreeMap;

use crate::error::{PipelineError, Result};
use crate::graph::Graph;
use crate::partitioner::Partition;

/// Greedy modularity maximization by pairwise community merging.
///
/// Every vertex starts as its own community. Each step merges the connected
/// pair of communities with the largest modularity gain
/// `w_ab/m − deg_a·deg_b/(2m²)`; the process stops once no merge has a
/// positive gain. Disconnected pairs never improve modularity, so only
/// pairs joined by at least one edge are considered.
pub fn modularity_greedy(graph: &Graph) -> Result<Partition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PipelineError::EmptyGraph);
    }

    let mut members: BTreeMap<usize, Vec<usize>> = (0..n).map(|v| (v, vec![v])).collect();
    let m = graph.total_weight();
    if m == 0.0 {
        // No edges: nothing to merge, all singletons
        return Ok(Partition::from_communities(members.into_values().collect()));
    }

    let mut degree: BTreeMap<usize, f64> =
        (0..n).map(|v| (v, graph.weighted_degree(v))).collect();
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for (u, v, w) in graph.edges() {
        *between.entry((u, v)).or_insert(0.0) += w;
    }

    loop {
        let mut best: Option<((usize, usize), f64)> = None;
        for (&pair, &w) in &between {
            let gain = w / m - degree[&pair.0] * degree[&pair.1] / (2.0 * m * m);
            if best.map_or(true, |(_, g)| gain > g) {
                best = Some((pair, gain));
            }
        }
        let Some(((a, b), gain)) = best else { break };
        if gain <= 0.0 {
            break;
        }

        // Merge community b into a
        let absorbed = members.remove(&b).unwrap_or_default();
        members.entry(a).or_default().extend(absorbed);
        let deg_b = degree.remove(&b).unwrap_or(0.0);
        *degree.entry(a).or_insert(0.0) += deg_b;

        let incident: Vec<((usize, usize), f64)> = between
            .iter()
            .filter(|(&(x, y), _)| x == b || y == b)
            .map(|(&key, &w)| (key, w))
            .collect();
        for ((x, y), w) in incident {
            between.remove(&(x, y));
            let other = if x == b { y } else { x };
            if other == a {
                // The merged edge becomes internal weight
                continue;
            }
            let key = if a < other { (a, other) } else { (other, a) };
            *between.entry(key).or_insert(0.0) += w;
        }
    }
    Ok(Partition::from_communities(members.into_values().collect()))
}
