mod bipartition;
mod label_propagation;
mod louvain;
mod modularity;
mod types;


pub use types::{Cluster, Partition};

use crate::error::Result;
use crate::graph::Graph;
use crate::seeded_rng;

/// Selectable community-detection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionAlgorithm {
    /// Synchronous label propagation, ties to the lowest label.
    LabelPropagation,
    /// Asynchronous, edge-weighted label propagation in randomized order.
    AsyncLabelPropagation,
    /// Two-phase modularity optimization with graph contraction.
    Louvain,
    /// Greedy pairwise community merging by modularity gain.
    ModularityGreedy,
    /// Two-way balanced min-cut refinement (Kernighan–Lin).
    Bipartition,
}

/// Partition the graph's vertices into communities using `algorithm`.
///
/// Every returned partition is disjoint and exhaustive over the vertex set;
/// isolated vertices come back as singleton clusters. The randomized
/// algorithms draw from `seed` the same way the downsampler does.
pub fn partition(graph: &Graph, algorithm: PartitionAlgorithm, seed: Option<u64>) -> Result<Partition> {
    match algorithm {
        PartitionAlgorithm::LabelPropagation => label_propagation::label_propagation(graph),
        PartitionAlgorithm::AsyncLabelPropagation => {
            label_propagation::async_label_propagation(graph, &mut seeded_rng(seed))
        }
        PartitionAlgorithm::Louvain => louvain::louvain(graph, &mut seeded_rng(seed)),
        PartitionAlgorithm::ModularityGreedy => modularity::modularity_greedy(graph),
        PartitionAlgorithm::Bipartition => bipartition::bipartition(graph, &mut seeded_rng(seed)),
    }
}
