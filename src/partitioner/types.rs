use std::collections::HashMap;

/// A set of vertices treated as one annotatable unit (a superpoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Position of this cluster within its partition.
    pub id: u32,
    /// Member vertex indices, ascending.
    pub members: Vec<usize>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// An ordered sequence of disjoint clusters covering a vertex set.
///
/// Cluster order is stable within a pipeline run; the position of a cluster
/// is its user-facing ordinal and carries no other meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Cluster>,
}

impl Partition {
    /// Build from raw communities.
    ///
    /// Empty communities are dropped, members are sorted ascending and
    /// clusters are ordered by their smallest member, so equal community
    /// structures produce equal partitions no matter how the algorithm
    /// happened to emit them.
    pub fn from_communities(mut communities: Vec<Vec<usize>>) -> Self {
        communities.retain(|c| !c.is_empty());
        for community in &mut communities {
            community.sort_unstable();
        }
        communities.sort_by_key(|c| c[0]);
        let clusters = communities
            .into_iter()
            .enumerate()
            .map(|(id, members)| Cluster {
                id: id as u32,
                members,
            })
            .collect();
        Self { clusters }
    }

    /// Build by grouping vertices that share a label.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
        for (vertex, &label) in labels.iter().enumerate() {
            groups.entry(label).or_default().push(vertex);
        }
        Self::from_communities(groups.into_values().collect())
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Cluster> {
        self.clusters.get(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    /// Total number of vertices across all clusters.
    pub fn vertex_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// Whether the clusters are pairwise disjoint and cover exactly 0..n.
    pub fn is_partition_of(&self, n: usize) -> bool {
        let mut seen = vec![false; n];
        for cluster in &self.clusters {
            for &v in &cluster.members {
                if v >= n || seen[v] {
                    return false;
                }
                seen[v] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }
}
