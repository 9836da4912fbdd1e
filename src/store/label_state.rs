use std::collections::{HashMap, HashSet};

use crate::store::Label;

/// In-memory labeling state for the current partition.
///
/// Keyed by cluster ordinal. Holds only explicit assignments; an absent
/// ordinal is unlabeled. The unsure set is a side annotation independent of
/// the label mapping and is never persisted. Reset whenever a new point set
/// or a recomputed partition comes in.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabelState {
    labels: HashMap<u32, Label>,
    unsure: HashSet<u32>,
}

impl LabelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_label(&mut self, ordinal: u32, label: impl Into<Label>) {
        self.labels.insert(ordinal, label.into());
    }

    pub fn label(&self, ordinal: u32) -> Option<&Label> {
        self.labels.get(&ordinal)
    }

    pub fn labels(&self) -> impl Iterator<Item = (u32, &Label)> {
        self.labels.iter().map(|(&ordinal, label)| (ordinal, label))
    }

    pub fn labeled_count(&self) -> usize {
        self.labels.len()
    }

    pub fn mark_unsure(&mut self, ordinal: u32) {
        self.unsure.insert(ordinal);
    }

    pub fn is_unsure(&self, ordinal: u32) -> bool {
        self.unsure.contains(&ordinal)
    }

    /// Ordinals marked unsure, ascending.
    pub fn unsure_clusters(&self) -> Vec<u32> {
        let mut out: Vec<u32> = self.unsure.iter().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.unsure.clear();
    }
}
