use std::path::PathBuf;

use thiserror::Error;

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Errors raised while reading or writing the workspace.
///
/// A failed traversal or snapshot is reported as a whole; partial results are
/// never returned alongside an error.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk workspace: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path {0} escapes the project root")]
    OutsideRoot(String),

    #[error("Record store failure: {0:#}")]
    Store(anyhow::Error),
}

impl WorkspaceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
