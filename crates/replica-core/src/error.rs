//! Error types for replica-core

/// Result type for replica-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in replica-core operations
///
/// A cycle only returns an error for cycle-fatal conditions such as a
/// missing root directory. Per-file failures are collected in the
/// [`CycleReport`](crate::sync::CycleReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid runtime configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A whole sync cycle could not run
    #[error("Sync cycle failed: {message}")]
    CycleFailed { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from replica-fs
    #[error(transparent)]
    Fs(#[from] replica_fs::Error),
}
