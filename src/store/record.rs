use serde::{Deserialize, Serialize};

use crate::cloud::Point3;

/// A cluster label: the −1 sentinel until the operator assigns one, then an
/// integer or string tag. Serialized untagged, so the record file holds a
/// plain JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Id(i64),
    Text(String),
}

impl Label {
    pub const UNLABELED: Label = Label::Id(-1);

    pub fn is_unlabeled(&self) -> bool {
        *self == Label::UNLABELED
    }
}

impl From<i64> for Label {
    fn from(id: i64) -> Self {
        Label::Id(id)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::Text(text)
    }
}

/// One cluster's persisted form: its ordinal, its label, and the
/// materialized coordinates of every member in member order.
///
/// Records store coordinates rather than indices so the file stays
/// self-contained and human-inspectable. `points` is written once at
/// initialization and never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub cluster: u32,
    pub label: Label,
    pub points: Vec<Point3>,
}
