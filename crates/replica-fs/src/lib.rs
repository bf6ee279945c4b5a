//! Filesystem primitives for replica-sync
//!
//! Provides streaming content fingerprints, point-in-time directory
//! snapshots, and the copy/remove operations used to mutate a replica.

pub mod checksum;
pub mod error;
pub mod io;
pub mod snapshot;

pub use checksum::{Fingerprint, fingerprint_file, fingerprint_reader};
pub use error::{Error, Result};
pub use snapshot::{DirectorySnapshot, FileEntry};
