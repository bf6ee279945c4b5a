//! MirrorEngine implementation
//!
//! One cycle is: snapshot both directories once, plan, execute, report.
//! Nothing survives from one cycle to the next except the configuration.

use std::sync::Arc;

use replica_fs::DirectorySnapshot;

use crate::Result;
use crate::config::MirrorConfig;

use super::events::{SyncEventSink, TracingSink};
use super::executor::SyncExecutor;
use super::plan::SyncPlanner;
use super::report::{CycleReport, FileFailure};

/// Runs sync cycles for one source/replica pair
pub struct MirrorEngine {
    config: MirrorConfig,
    executor: SyncExecutor,
}

impl MirrorEngine {
    /// Create an engine that reports actions through `tracing`.
    pub fn new(config: MirrorConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create an engine that reports actions to a custom sink.
    pub fn with_sink(config: MirrorConfig, sink: Arc<dyn SyncEventSink>) -> Self {
        Self {
            config,
            executor: SyncExecutor::new(sink),
        }
    }

    /// Run one complete cycle.
    ///
    /// # Errors
    ///
    /// Returns an error only when a root directory cannot be listed. The
    /// replica is left untouched in that case. Per-file failures are
    /// logged and collected in the returned report.
    pub fn run_cycle(&self) -> Result<CycleReport> {
        let source = DirectorySnapshot::take(&self.config.source)?;
        let replica = DirectorySnapshot::take(&self.config.replica)?;

        let plan = SyncPlanner::new(&source, &replica).plan();
        if plan.is_noop() {
            tracing::debug!(unchanged = plan.unchanged, "Replica already up to date");
            return Ok(CycleReport::unchanged(&plan));
        }

        let plan_failures = plan
            .failures
            .into_iter()
            .map(|failure| {
                tracing::warn!(
                    name = %failure.name.to_string_lossy(),
                    "Failed to compare file: {}",
                    failure.error
                );
                FileFailure {
                    path: failure.error.path().to_path_buf(),
                    reason: failure.error.to_string(),
                }
            })
            .collect();

        let results = self.executor.execute_all(plan.actions);
        let report = CycleReport::from_results(plan_failures, plan.unchanged, &results);

        if report.is_clean() {
            tracing::info!("Sync cycle complete: {}", report);
        } else {
            tracing::warn!("Sync cycle complete with failures: {}", report);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::fs;
    use std::time::Duration;

    #[test]
    fn missing_source_fails_cycle_and_keeps_replica() {
        let dir = tempfile::tempdir().unwrap();
        let replica = dir.path().join("replica");
        fs::create_dir(&replica).unwrap();
        fs::write(replica.join("keep.txt"), "k").unwrap();

        let config =
            MirrorConfig::new(dir.path().join("gone"), &replica, Duration::from_secs(1)).unwrap();
        let err = MirrorEngine::new(config).run_cycle().unwrap_err();

        assert!(matches!(
            err,
            Error::Fs(replica_fs::Error::DirectoryNotFound { .. })
        ));
        assert!(replica.join("keep.txt").exists());
    }

    #[test]
    fn missing_replica_fails_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        fs::create_dir(&source).unwrap();

        let config =
            MirrorConfig::new(&source, dir.path().join("gone"), Duration::from_secs(1)).unwrap();

        assert!(MirrorEngine::new(config).run_cycle().is_err());
    }
}
