use crate::cloud::{Point3, PointSet};
use crate::error::Result;
use crate::partitioner::Partition;
use crate::pipeline::{PipelineCache, PipelineConfig};
use crate::store::{AnnotationStore, Label, LabelState};

/// One annotation session over a single source point cloud.
///
/// Owns the pipeline cache, the store for the source's record, the label
/// state and the cluster cursor. Opening applies the precedence rule: an
/// existing record replaces the freshly computed partition, never the
/// other way around and never a merge.
pub struct AnnotationSession {
    source: PointSet,
    config: PipelineConfig,
    cache: PipelineCache,
    store: AnnotationStore,
    points: PointSet,
    partition: Partition,
    labels: LabelState,
    cursor: usize,
}

impl AnnotationSession {
    /// Open a session: load the existing record if present, otherwise run
    /// the pipeline and seed a fresh record.
    pub fn open(source: PointSet, config: PipelineConfig, store: AnnotationStore) -> Result<Self> {
        let mut cache = PipelineCache::new();
        let (points, partition, labels) = if store.exists() {
            store.load()?
        } else {
            let artifacts = cache.ensure(&source, config)?;
            let points = artifacts.points.clone();
            let partition = artifacts.partition.clone();
            store.initialize(&partition, &points)?;
            (points, partition, LabelState::new())
        };
        Ok(Self {
            source,
            config,
            cache,
            store,
            points,
            partition,
            labels,
            cursor: 0,
        })
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn labels(&self) -> &LabelState {
        &self.labels
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Coordinate lookup for a rendering collaborator.
    pub fn point(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    /// Materialized coordinates of one cluster, in member order.
    pub fn cluster_points(&self, ordinal: usize) -> Option<Vec<Point3>> {
        self.partition
            .get(ordinal)
            .map(|cluster| cluster.members.iter().map(|&i| self.points[i]).collect())
    }

    pub fn cluster_count(&self) -> usize {
        self.partition.len()
    }

    pub fn current_cluster(&self) -> usize {
        self.cursor
    }

    /// Advance the cursor; stays on the last cluster at the end.
    pub fn next_cluster(&mut self) -> usize {
        if self.cursor + 1 < self.partition.len() {
            self.cursor += 1;
        }
        self.cursor
    }

    pub fn previous_cluster(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    /// Label the cluster under the cursor and persist immediately.
    pub fn label_current(&mut self, label: impl Into<Label>) -> Result<()> {
        self.labels.set_label(self.cursor as u32, label);
        self.store.save(&self.labels)
    }

    /// Side-mark the cluster under the cursor; not persisted.
    pub fn mark_current_unsure(&mut self) {
        self.labels.mark_unsure(self.cursor as u32);
    }

    pub fn unsure_clusters(&self) -> Vec<u32> {
        self.labels.unsure_clusters()
    }

    /// Persist the current label assignments.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.labels)
    }

    /// Apply new pipeline parameters.
    ///
    /// While a record exists it keeps precedence, so the loaded partition
    /// stays in place. Without one, the pipeline reruns whatever stages
    /// the parameter diff requires and the label state resets with the new
    /// partition.
    pub fn reconfigure(&mut self, config: PipelineConfig) -> Result<()> {
        self.config = config;
        if self.store.exists() {
            return Ok(());
        }
        let artifacts = self.cache.ensure(&self.source, config)?;
        self.points = artifacts.points.clone();
        self.partition = artifacts.partition.clone();
        self.labels.clear();
        self.cursor = 0;
        self.store.initialize(&self.partition, &self.points)
    }

    /// Delete the record, recompute the partition, and seed a fresh
    /// all-unlabeled record.
    pub fn reset(&mut self) -> Result<()> {
        self.store.delete()?;
        let artifacts = self.cache.ensure(&self.source, self.config)?;
        self.points = artifacts.points.clone();
        self.partition = artifacts.partition.clone();
        self.labels.clear();
        self.cursor = 0;
        self.store.initialize(&self.partition, &self.points)
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }
}
