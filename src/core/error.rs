//! Unified error type for every core operation.

use std::path::PathBuf;

/// Errors surfaced by the core. Every public entry point returns one of these
/// kinds rather than mixing in-band strings with exceptions.
#[derive(Debug, thiserror::Error)]
pub enum ArtError {
    #[error("not a repository (or any parent up to /): missing .art/art.json")]
    RepositoryMissing,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("no remote configured")]
    RemoteUnconfigured,

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArtError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ArtResult<T> = Result<T, ArtError>;
