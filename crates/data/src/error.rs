// crates/data/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading dataset caches
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dataset cache {path} does not exist. Datasets must be generated before startup.")]
    CacheMissing { path: PathBuf },

    #[error("IO error reading dataset cache {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset cache {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::CacheMissing { path },
            _ => Self::Io { path, source },
        }
    }
}
