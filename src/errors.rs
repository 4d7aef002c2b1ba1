use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed input data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("User {0} is not part of the vocabulary")]
    UnknownUser(u32),
    #[error("Item {0} is not part of the vocabulary")]
    UnknownItem(u32),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PreprocessError {
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        PreprocessError::Io { path: path.into(), source }
    }
}
