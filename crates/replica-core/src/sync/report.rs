//! Per-cycle summary of what changed and what failed

use std::fmt;
use std::path::PathBuf;

use super::events::ActionKind;
use super::executor::ActionResult;
use super::plan::SyncPlan;

/// A file that could not be synchronized this cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Tally of one completed cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    /// Planning and execution failures, in the order they occurred
    pub failures: Vec<FileFailure>,
}

impl CycleReport {
    /// Build a report from a plan's leftovers and the executor's results.
    pub fn from_results(
        plan_failures: Vec<FileFailure>,
        unchanged: usize,
        results: &[ActionResult],
    ) -> Self {
        let mut report = Self {
            unchanged,
            failures: plan_failures,
            ..Self::default()
        };

        for result in results {
            match &result.error {
                None => match result.action.kind() {
                    ActionKind::Create => report.created += 1,
                    ActionKind::Update => report.updated += 1,
                    ActionKind::Delete => report.deleted += 1,
                },
                Some(e) => report.failures.push(FileFailure {
                    path: result.action.dest().to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }

        report
    }

    /// Report for a plan with nothing to do.
    pub fn unchanged(plan: &SyncPlan) -> Self {
        Self {
            unchanged: plan.unchanged,
            ..Self::default()
        }
    }

    /// Number of successful mutations
    pub fn changes(&self) -> usize {
        self.created + self.updated + self.deleted
    }

    /// True when every planned action succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted, {} unchanged, {} failed",
            self.created,
            self.updated,
            self.deleted,
            self.unchanged,
            self.failures.len()
        )
    }
}
