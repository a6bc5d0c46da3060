use std::path::PathBuf;

use thiserror::Error;

/// Failures at the I/O edge. Synthesis itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid options: {0}")]
    Options(String),
    #[error(transparent)]
    Glob(#[from] glob::PatternError),
    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
