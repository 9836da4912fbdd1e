mod knn;
mod mst;
mod types;

#[cfg(test)]
mod tests;

pub use knn::build_knn;
pub use mst::build_mst;
pub use types::Graph;

use crate::cloud::PointSet;
use crate::error::Result;

/// Selectable proximity-graph constructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphStrategy {
    /// Connect each point to its `k` nearest neighbors.
    Knn { k: usize },
    /// Minimum spanning tree of the complete Euclidean graph.
    Mst,
}

/// Build the proximity graph selected by `strategy`.
pub fn build(points: &PointSet, strategy: GraphStrategy) -> Result<Graph> {
    match strategy {
        GraphStrategy::Knn { k } => build_knn(points, k),
        GraphStrategy::Mst => build_mst(points),
    }
}
