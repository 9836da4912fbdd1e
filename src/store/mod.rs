mod label_state;
mod record;

#[cfg(test)]
mod tests;

pub use label_state::LabelState;
pub use record::{ClusterRecord, Label};

use std::fs;
use std::path::{Path, PathBuf};

use crate::cloud::{Point3, PointSet};
use crate::error::{PipelineError, Result};
use crate::partitioner::Partition;

/// Durable per-source-file annotation record.
///
/// One JSON array per source point cloud at
/// `<dest_folder>/<source_filename>.json`. The record is the sole source of
/// truth once written: on reload it replaces a freshly computed partition
/// instead of being merged with it.
pub struct AnnotationStore {
    record_path: PathBuf,
}

impl AnnotationStore {
    /// Store for the record belonging to `source_file`, kept in
    /// `dest_folder`.
    pub fn for_source(dest_folder: &Path, source_file: &Path) -> Result<Self> {
        let name = source_file.file_name().ok_or_else(|| {
            PipelineError::InvalidParameter(format!(
                "source path has no file name: {}",
                source_file.display()
            ))
        })?;
        let mut file_name = name.to_os_string();
        file_name.push(".json");
        Ok(Self {
            record_path: dest_folder.join(file_name),
        })
    }

    /// Store over an explicit record path.
    pub fn at(record_path: impl Into<PathBuf>) -> Self {
        Self {
            record_path: record_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.record_path
    }

    pub fn exists(&self) -> bool {
        self.record_path.exists()
    }

    /// Seed a fresh record: every cluster unlabeled, its `points` the
    /// materialized coordinates of its members in member order.
    ///
    /// A no-op when a record already exists; the persisted record always
    /// wins over recomputation.
    pub fn initialize(&self, partition: &Partition, points: &PointSet) -> Result<()> {
        if self.exists() {
            return Ok(());
        }
        let records: Vec<ClusterRecord> = partition
            .iter()
            .map(|cluster| ClusterRecord {
                cluster: cluster.id,
                label: Label::UNLABELED,
                points: cluster.members.iter().map(|&i| points[i]).collect(),
            })
            .collect();
        self.write_records(&records)
    }

    /// Rebuild (points, partition, labels) from the record.
    ///
    /// The point set is every cluster's points concatenated in record
    /// order; cluster *i* covers the half-open index range starting at the
    /// cumulative length of clusters before it. The original global point
    /// order is not preserved, only partition structure and per-cluster
    /// point order.
    pub fn load(&self) -> Result<(PointSet, Partition, LabelState)> {
        let data = fs::read_to_string(&self.record_path)?;
        let records: Vec<ClusterRecord> = serde_json::from_str(&data)
            .map_err(|e| PipelineError::RecordCorrupt(e.to_string()))?;
        if records.is_empty() {
            return Err(PipelineError::RecordCorrupt(
                "record holds no clusters".to_string(),
            ));
        }

        let mut points: Vec<Point3> = Vec::new();
        let mut communities: Vec<Vec<usize>> = Vec::with_capacity(records.len());
        let mut labels = LabelState::new();
        for (ordinal, record) in records.iter().enumerate() {
            if record.cluster as usize != ordinal {
                return Err(PipelineError::RecordCorrupt(format!(
                    "cluster ordinal {} found at position {}",
                    record.cluster, ordinal
                )));
            }
            if record.points.is_empty() {
                return Err(PipelineError::RecordCorrupt(format!(
                    "cluster {} has no points",
                    ordinal
                )));
            }
            let start = points.len();
            points.extend_from_slice(&record.points);
            communities.push((start..points.len()).collect());
            if !record.label.is_unlabeled() {
                labels.set_label(ordinal as u32, record.label.clone());
            }
        }
        Ok((
            PointSet::new(points),
            Partition::from_communities(communities),
            labels,
        ))
    }

    /// Write `label_state`'s assignments into the existing record.
    ///
    /// Clusters without an entry keep their previous label; `points` fields
    /// are never rewritten. Fails with an I/O error when the record is
    /// missing rather than silently recreating it.
    pub fn save(&self, label_state: &LabelState) -> Result<()> {
        let data = fs::read_to_string(&self.record_path)?;
        let mut records: Vec<ClusterRecord> = serde_json::from_str(&data)
            .map_err(|e| PipelineError::RecordCorrupt(e.to_string()))?;
        for record in &mut records {
            if let Some(label) = label_state.label(record.cluster) {
                record.label = label.clone();
            }
        }
        self.write_records(&records)
    }

    /// Remove the record. Irreversible; `initialize` must run again before
    /// any further label operations.
    pub fn delete(&self) -> Result<()> {
        fs::remove_file(&self.record_path)?;
        Ok(())
    }

    /// Write-new-then-replace: serialize to a sibling temp file, then
    /// rename over the record, so a failed write never corrupts a
    /// previously valid record.
    fn write_records(&self, records: &[ClusterRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| PipelineError::RecordCorrupt(e.to_string()))?;
        let mut tmp = self.record_path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.record_path)?;
        Ok(())
    }
}
