// crates/core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fetching observations from a data source
#[derive(Debug, Error)]
pub enum DataError {
    #[error("No data available for dataset '{dataset}' at location '{location}'")]
    DataUnavailable { dataset: String, location: String },

    #[error("Unknown dataset '{dataset}'")]
    UnknownDataset { dataset: String },
}

/// Errors raised while loading or applying a sentence encoder
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("Word vector file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading word vectors {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed word vector file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Vector for token '{token}' has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        token: String,
        expected: usize,
        actual: usize,
    },
}

impl EncoderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors raised when building or running a similarity filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown similarity filter '{name}', expected 'rule' or 'embedding'")]
    UnknownVariant { name: String },

    #[error("Embedding filter requires a word vector file")]
    MissingVectors,

    #[error(transparent)]
    Encoder(#[from] EncoderError),
}

/// Error raised when a document plan cannot be assembled
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("No messages left to plan a document from")]
    EmptyPlan,
}

/// Top-level pipeline error covering every stage
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("No content survived selection for dataset '{dataset}' at location '{location}'")]
    EmptyPlan { dataset: String, location: String },
}
