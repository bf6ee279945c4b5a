//! Core orchestration layer for replica-sync
//!
//! This crate keeps a replica directory identical to a source directory:
//!
//! - **Planning**: compare two snapshots by content fingerprint and decide
//!   what to delete, create or update
//! - **Execution**: apply the plan, isolating per-file failures
//! - **Scheduling**: repeat the cycle at a fixed interval until shutdown
//!
//! # Architecture
//!
//! ```text
//!        replica-cli
//!             |
//!       replica-core
//!             |
//!        replica-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use replica_core::{MirrorConfig, MirrorEngine};
//!
//! fn example() -> replica_core::Result<()> {
//!     let config = MirrorConfig::new("/data/source", "/data/replica", Duration::from_secs(30))?;
//!     let report = MirrorEngine::new(config).run_cycle()?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod scheduler;
pub mod sync;

pub use config::MirrorConfig;
pub use error::{Error, Result};
pub use scheduler::{Scheduler, SchedulerStats};
pub use sync::{
    ActionKind, CycleReport, FileFailure, MemorySink, MirrorEngine, Outcome, SyncAction,
    SyncEvent, SyncEventSink, SyncExecutor, SyncPlan, SyncPlanner, TracingSink,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config_displays_message() {
        let error = Error::InvalidConfig {
            message: "interval must be greater than zero".into(),
        };

        let display = format!("{}", error);
        assert!(
            display.contains("interval must be greater than zero"),
            "Error display should contain the message, got: {}",
            display
        );
    }

    #[test]
    fn error_from_fs_is_transparent() {
        let fs_error = replica_fs::Error::DirectoryNotFound {
            path: "/missing".into(),
        };
        let expected = fs_error.to_string();

        let error: Error = fs_error.into();
        assert_eq!(error.to_string(), expected);
    }
}
