use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("bundle directory does not exist: {0}")]
    BundleNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid graph document {path}: {source}")]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value in {path}: {detail}")]
    BadValue { path: PathBuf, detail: String },
}
