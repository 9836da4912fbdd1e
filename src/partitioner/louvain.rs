use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::error::{PipelineError, Result};
use crate::graph::Graph;
use crate::partitioner::Partition;

/// Louvain community detection.
///
/// Phase 1 greedily moves single vertices into the neighboring community
/// with the best modularity gain until no move helps; phase 2 contracts
/// every community into a super-vertex (intra weight becomes a self-loop)
/// and phase 1 reruns on the contracted graph. Stops at the first level
/// that makes no move. Edge weights are respected throughout.
pub fn louvain(graph: &Graph, rng: &mut ChaCha8Rng) -> Result<Partition> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(PipelineError::EmptyGraph);
    }

    let mut adj: Vec<Vec<(usize, f64)>> = (0..n).map(|v| graph.neighbors(v).collect()).collect();
    let mut loops: Vec<f64> = vec![0.0; n];
    let mut members: Vec<Vec<usize>> = (0..n).map(|v| vec![v]).collect();

    loop {
        let (improved, community) = one_level(&adj, &loops, rng);
        if !improved {
            break;
        }
        let (next_adj, next_loops, next_members) = contract(&adj, &loops, &members, &community);
        let stalled = next_members.len() == members.len();
        adj = next_adj;
        loops = next_loops;
        members = next_members;
        if stalled {
            // Moves that only trade vertices between communities cannot
            // contract the graph further
            break;
        }
    }
    Ok(Partition::from_communities(members))
}

/// Phase 1: local vertex moves until a full sweep changes nothing.
///
/// Returns whether any move happened and the community of each vertex.
/// The comparative gain of placing vertex `v` into community `c` is
/// `w(v→c) − deg(v)·tot(c)/2m`, evaluated with `v` taken out of its own
/// community; strictly better only, so equal-gain options never flap.
fn one_level(
    adj: &[Vec<(usize, f64)>],
    loops: &[f64],
    rng: &mut ChaCha8Rng,
) -> (bool, Vec<usize>) {
    let n = adj.len();
    let degree: Vec<f64> = (0..n)
        .map(|v| adj[v].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * loops[v])
        .collect();
    let m2: f64 = degree.iter().sum();
    let mut community: Vec<usize> = (0..n).collect();
    if m2 == 0.0 {
        return (false, community);
    }

    let mut tot = degree.clone();
    let mut order: Vec<usize> = (0..n).collect();
    let mut improved = false;
    loop {
        order.shuffle(rng);
        let mut moves = 0;
        for &v in &order {
            let c_old = community[v];
            let mut w_to: BTreeMap<usize, f64> = BTreeMap::new();
            for &(u, w) in &adj[v] {
                *w_to.entry(community[u]).or_insert(0.0) += w;
            }

            tot[c_old] -= degree[v];
            let mut best_c = c_old;
            let mut best_gain = w_to.get(&c_old).copied().unwrap_or(0.0) - degree[v] * tot[c_old] / m2;
            for (&c, &w) in &w_to {
                if c == c_old {
                    continue;
                }
                let gain = w - degree[v] * tot[c] / m2;
                if gain > best_gain {
                    best_c = c;
                    best_gain = gain;
                }
            }
            community[v] = best_c;
            tot[best_c] += degree[v];
            if best_c != c_old {
                moves += 1;
                improved = true;
            }
        }
        if moves == 0 {
            break;
        }
    }
    (improved, community)
}

/// Phase 2: collapse each community into one super-vertex.
fn contract(
    adj: &[Vec<(usize, f64)>],
    loops: &[f64],
    members: &[Vec<usize>],
    community: &[usize],
) -> (Vec<Vec<(usize, f64)>>, Vec<f64>, Vec<Vec<usize>>) {
    let mut ids: Vec<usize> = community.to_vec();
    ids.sort_unstable();
    ids.dedup();
    let remap: BTreeMap<usize, usize> = ids.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let k = ids.len();

    let mut new_members: Vec<Vec<usize>> = vec![Vec::new(); k];
    let mut new_loops = vec![0.0; k];
    for v in 0..adj.len() {
        let c = remap[&community[v]];
        new_members[c].extend(members[v].iter().copied());
        new_loops[c] += loops[v];
    }

    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
    for v in 0..adj.len() {
        let cv = remap[&community[v]];
        for &(u, w) in &adj[v] {
            let cu = remap[&community[u]];
            if cu == cv {
                // Each intra-community edge shows up from both endpoints
                new_loops[cv] += w / 2.0;
            } else if cv < cu {
                *between.entry((cv, cu)).or_insert(0.0) += w;
            }
        }
    }

    let mut new_adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); k];
    for (&(a, b), &w) in &between {
        new_adj[a].push((b, w));
        new_adj[b].push((a, w));
    }
    (new_adj, new_loops, new_members)
}
