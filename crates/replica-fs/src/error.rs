//! Error types for replica-fs

use std::path::PathBuf;

/// Result type for replica-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in replica-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found or not a directory: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::DirectoryNotFound { path }
            | Self::LockFailed { path } => path,
        }
    }
}
