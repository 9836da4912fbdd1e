use super::*;
use crate::cloud::PointSet;
use crate::error::PipelineError;
use crate::partitioner::Partition;
use tempfile::tempdir;

fn sample_points() -> PointSet {
    PointSet::new(vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [11.0, 0.0, 0.0],
    ])
}

fn sample_partition() -> Partition {
    Partition::from_communities(vec![vec![0, 1, 2], vec![3, 4]])
}

#[test]
fn test_initialize_writes_unlabeled_record() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "scan.las".as_ref()).unwrap();

    store.initialize(&sample_partition(), &sample_points()).unwrap();
    assert!(dir.path().join("scan.las.json").exists());

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let records: Vec<ClusterRecord> = serde_json::from_str(&raw).unwrap();
    assert_eq!(records.len(), 2);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.cluster, i as u32);
        assert_eq!(record.label, Label::UNLABELED);
    }
    assert_eq!(records[0].points, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    assert_eq!(records[1].points, vec![[10.0, 0.0, 0.0], [11.0, 0.0, 0.0]]);
}

#[test]
fn test_initialize_never_overwrites_existing_record() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "scan.las".as_ref()).unwrap();

    store.initialize(&sample_partition(), &sample_points()).unwrap();
    let mut state = LabelState::new();
    state.set_label(1, "wall");
    store.save(&state).unwrap();

    // A replayed initialize must not reset the saved label
    store.initialize(&sample_partition(), &sample_points()).unwrap();
    let (_, _, labels) = store.load().unwrap();
    assert_eq!(labels.label(1), Some(&Label::from("wall")));
}

#[test]
fn test_save_then_load_keeps_other_labels_unset() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "cloud.txt".as_ref()).unwrap();
    store.initialize(&sample_partition(), &sample_points()).unwrap();

    let mut state = LabelState::new();
    state.set_label(0, "tree");
    store.save(&state).unwrap();

    let (_, _, labels) = store.load().unwrap();
    assert_eq!(labels.label(0), Some(&Label::from("tree")));
    assert_eq!(labels.label(1), None);
}

#[test]
fn test_integer_labels_survive_round_trip() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "cloud.txt".as_ref()).unwrap();
    store.initialize(&sample_partition(), &sample_points()).unwrap();

    let mut state = LabelState::new();
    state.set_label(1, 4i64);
    store.save(&state).unwrap();

    let (_, _, labels) = store.load().unwrap();
    assert_eq!(labels.label(1), Some(&Label::Id(4)));
}

#[test]
fn test_load_reconstructs_partition_by_cumulative_lengths() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "cloud.txt".as_ref()).unwrap();
    store.initialize(&sample_partition(), &sample_points()).unwrap();

    let (points, partition, _) = store.load().unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(partition.len(), 2);
    assert_eq!(partition.get(0).unwrap().members, vec![0, 1, 2]);
    assert_eq!(partition.get(1).unwrap().members, vec![3, 4]);
    assert!(partition.is_partition_of(5));

    // Per-cluster point order is preserved exactly
    assert_eq!(points[3], [10.0, 0.0, 0.0]);
    assert_eq!(points[4], [11.0, 0.0, 0.0]);
}

#[test]
fn test_round_trip_is_field_equal() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "cloud.txt".as_ref()).unwrap();
    store.initialize(&sample_partition(), &sample_points()).unwrap();

    let (points, partition, _) = store.load().unwrap();
    let reserialized = AnnotationStore::at(dir.path().join("reserialized.json"));
    reserialized.initialize(&partition, &points).unwrap();

    let original: Vec<ClusterRecord> =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    let rewritten: Vec<ClusterRecord> =
        serde_json::from_str(&std::fs::read_to_string(reserialized.path()).unwrap()).unwrap();
    assert_eq!(original, rewritten);
}

#[test]
fn test_load_missing_record_is_io_failure() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::at(dir.path().join("absent.json"));
    assert!(matches!(store.load(), Err(PipelineError::Io(_))));
}

#[test]
fn test_save_after_delete_is_io_failure() {
    let dir = tempdir().unwrap();
    let store = AnnotationStore::for_source(dir.path(), "cloud.txt".as_ref()).unwrap();
    store.initialize(&sample_partition(), &sample_points()).unwrap();
    store.delete().unwrap();

    let mut state = LabelState::new();
    state.set_label(0, "tree");
    let err = store.save(&state).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
    assert!(!store.exists(), "save must not recreate a deleted record");
}

#[test]
fn test_malformed_json_is_record_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"cluster\": 0,").unwrap();

    let store = AnnotationStore::at(path);
    assert!(matches!(store.load(), Err(PipelineError::RecordCorrupt(_))));
}

#[test]
fn test_ordinal_mismatch_is_record_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shuffled.json");
    std::fs::write(
        &path,
        r#"[{"cluster": 1, "label": -1, "points": [[0.0, 0.0, 0.0]]}]"#,
    )
    .unwrap();

    let store = AnnotationStore::at(path);
    assert!(matches!(store.load(), Err(PipelineError::RecordCorrupt(_))));
}

#[test]
fn test_empty_cluster_is_record_corrupt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hollow.json");
    std::fs::write(&path, r#"[{"cluster": 0, "label": -1, "points": []}]"#).unwrap();

    let store = AnnotationStore::at(path);
    assert!(matches!(store.load(), Err(PipelineError::RecordCorrupt(_))));
}
