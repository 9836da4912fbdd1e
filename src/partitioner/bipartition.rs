use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::{PipelineError, Result};
use crate::graph::Graph;
use crate::partitioner::Partition;

/// Improvement passes before the refinement gives up.
const MAX_PASSES: usize = 10;

/// Two-way balanced min-cut heuristic (Kernighan–Lin).
///
/// Starts from a random balanced split (sizes differ by at most one) and
/// runs swap-improvement passes: each pass greedily pairs up the best
/// cross-side swap among unlocked vertices, locks the pair, and finally
/// commits the prefix of swaps with the best cumulative cut reduction.
/// Passes repeat until one yields no gain. A single-vertex graph comes
/// back as one singleton cluster.
pub fn bipartition(graph: &Graph, rng: &mut ChaCha8Rng) -> Result<Partition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PipelineError::EmptyGraph);
    }
    if n == 1 {
        return Ok(Partition::from_communities(vec![vec![0]]));
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let mut in_a = vec![false; n];
    for &v in order.iter().take(n - n / 2) {
        in_a[v] = true;
    }

    let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
    for (u, v, w) in graph.edges() {
        weights.insert((u, v), w);
    }

    for _ in 0..MAX_PASSES {
        if improvement_pass(&weights, &mut in_a) <= 0.0 {
            break;
        }
    }

    let side_a: Vec<usize> = (0..n).filter(|&v| in_a[v]).collect();
    let side_b: Vec<usize> = (0..n).filter(|&v| !in_a[v]).collect();
    Ok(Partition::from_communities(vec![side_a, side_b]))
}

fn weight_between(weights: &HashMap<(usize, usize), f64>, u: usize, v: usize) -> f64 {
    let key = if u < v { (u, v) } else { (v, u) };
    weights.get(&key).copied().unwrap_or(0.0)
}

/// One Kernighan–Lin pass. Returns the committed cut reduction.
fn improvement_pass(weights: &HashMap<(usize, usize), f64>, in_a: &mut [bool]) -> f64 {
    let n = in_a.len();

    // D[v] = external minus internal incident weight
    let mut d = vec![0.0; n];
    for (&(u, v), &w) in weights {
        if in_a[u] == in_a[v] {
            d[u] -= w;
            d[v] -= w;
        } else {
            d[u] += w;
            d[v] += w;
        }
    }

    let mut locked = vec![false; n];
    let mut swaps: Vec<(f64, usize, usize)> = Vec::new();
    for _ in 0..n / 2 {
        let mut best: Option<(f64, usize, usize)> = None;
        for a in 0..n {
            if locked[a] || !in_a[a] {
                continue;
            }
            for b in 0..n {
                if locked[b] || in_a[b] {
                    continue;
                }
                let gain = d[a] + d[b] - 2.0 * weight_between(weights, a, b);
                if best.map_or(true, |(g, _, _)| gain > g) {
                    best = Some((gain, a, b));
                }
            }
        }
        let Some((gain, a, b)) = best else { break };
        locked[a] = true;
        locked[b] = true;
        swaps.push((gain, a, b));

        // D values as if a and b had already traded sides
        for v in 0..n {
            if locked[v] {
                continue;
            }
            let w_va = weight_between(weights, v, a);
            let w_vb = weight_between(weights, v, b);
            if in_a[v] {
                d[v] += 2.0 * w_va - 2.0 * w_vb;
            } else {
                d[v] += 2.0 * w_vb - 2.0 * w_va;
            }
        }
    }

    // Commit the prefix with the best cumulative gain
    let mut best_sum = 0.0;
    let mut best_len = 0;
    let mut run = 0.0;
    for (i, &(g, _, _)) in swaps.iter().enumerate() {
        run += g;
        if run > best_sum {
            best_sum = run;
            best_len = i + 1;
        }
    }
    for &(_, a, b) in &swaps[..best_len] {
        in_a[a] = false;
        in_a[b] = true;
    }
    best_sum
}
