use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::{PipelineError, Result};
use crate::graph::Graph;
use crate::partitioner::Partition;

/// Rounds after which propagation gives up on an oscillating labeling.
const MAX_ITERATIONS: usize = 100;

/// Synchronous label propagation.
///
/// Every vertex starts with a unique label. Each round, every vertex adopts
/// the most frequent label among its neighbors as of the previous round's
/// snapshot, ties going to the lowest label id. Stops when a round changes
/// nothing or the iteration cap is hit. Isolated vertices keep their own
/// label and come out as singletons.
pub fn label_propagation(graph: &Graph) -> Result<Partition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PipelineError::EmptyGraph);
    }

    let mut labels: Vec<usize> = (0..n).collect();
    for _ in 0..MAX_ITERATIONS {
        let mut next = labels.clone();
        let mut changed = false;
        for v in 0..n {
            if graph.degree(v) == 0 {
                continue;
            }
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for (u, _) in graph.neighbors(v) {
                *counts.entry(labels[u]).or_insert(0) += 1;
            }
            let majority = majority_label(&counts);
            if majority != labels[v] {
                next[v] = majority;
                changed = true;
            }
        }
        labels = next;
        if !changed {
            break;
        }
    }
    Ok(Partition::from_labels(&labels))
}

/// Asynchronous, edge-weighted label propagation.
///
/// Vertices update one at a time in a freshly shuffled order each round,
/// against whatever labels their neighbors hold at that instant. A vertex
/// adopts the label with the largest incident edge-weight sum; when several
/// labels tie for the maximum, one of them is picked at random. A vertex
/// whose current label already ties the maximum keeps it.
pub fn async_label_propagation(graph: &Graph, rng: &mut ChaCha8Rng) -> Result<Partition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PipelineError::EmptyGraph);
    }

    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();
    for _ in 0..MAX_ITERATIONS {
        order.shuffle(rng);
        let mut changed = false;
        for &v in &order {
            if graph.degree(v) == 0 {
                continue;
            }
            let mut weights: HashMap<usize, f64> = HashMap::new();
            for (u, w) in graph.neighbors(v) {
                *weights.entry(labels[u]).or_insert(0.0) += w;
            }
            let best = weights.values().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let mut candidates: Vec<usize> = weights
                .iter()
                .filter(|&(_, &w)| w == best)
                .map(|(&label, _)| label)
                .collect();
            candidates.sort_unstable();

            if candidates.contains(&labels[v]) {
                continue;
            }
            labels[v] = candidates[rng.gen_range(0..candidates.len())];
            changed = true;
        }
        if !changed {
            break;
        }
    }
    Ok(Partition::from_labels(&labels))
}

/// Most frequent label; ties resolved to the lowest label id.
fn majority_label(counts: &HashMap<usize, usize>) -> usize {
    let mut best_label = usize::MAX;
    let mut best_count = 0;
    for (&label, &count) in counts {
        if count > best_count || (count == best_count && label < best_label) {
            best_label = label;
            best_count = count;
        }
    }
    best_label
}
