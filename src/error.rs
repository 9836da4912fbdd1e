use thiserror::Error;

/// Errors surfaced by the segmentation pipeline and the annotation store.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Point set is empty")]
    EmptyPointSet,

    #[error("Graph has no vertices")]
    EmptyGraph,

    #[error("Annotation record is corrupt: {0}")]
    RecordCorrupt(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
