use std::path::PathBuf;

use thiserror::Error;

/// Failure while saving or loading a project folder.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed project file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// File or folder the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PersistError::Io { path, .. }
            | PersistError::Parse { path, .. }
            | PersistError::Encode { path, .. } => path,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PersistError::Io { path, source }
    }
}
