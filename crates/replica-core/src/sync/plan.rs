//! Turning a pair of snapshots into an ordered list of actions
//!
//! Deletions come first, then creates and updates, each group in file-name
//! order. Files present on both sides are only rewritten when their
//! fingerprints differ.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use replica_fs::{DirectorySnapshot, fingerprint_file};

use super::events::ActionKind;

/// A single mutation to apply to the replica
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Remove a replica file that no longer exists in the source
    Delete { path: PathBuf },
    /// Copy a source file that is missing from the replica
    Create { source: PathBuf, dest: PathBuf },
    /// Overwrite a replica file whose content differs from the source
    Update { source: PathBuf, dest: PathBuf },
}

impl SyncAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Delete { .. } => ActionKind::Delete,
            Self::Create { .. } => ActionKind::Create,
            Self::Update { .. } => ActionKind::Update,
        }
    }

    /// The replica path this action mutates.
    pub fn dest(&self) -> &Path {
        match self {
            Self::Delete { path } => path,
            Self::Create { dest, .. } | Self::Update { dest, .. } => dest,
        }
    }

    /// The source path, for copies.
    pub fn source(&self) -> Option<&Path> {
        match self {
            Self::Delete { .. } => None,
            Self::Create { source, .. } | Self::Update { source, .. } => Some(source),
        }
    }
}

/// A file that could not be compared during planning
#[derive(Debug)]
pub struct PlanFailure {
    pub name: OsString,
    pub error: replica_fs::Error,
}

/// Output of [`SyncPlanner::plan`]
#[derive(Debug, Default)]
pub struct SyncPlan {
    /// Actions in the order they must be applied
    pub actions: Vec<SyncAction>,
    /// Files already identical on both sides
    pub unchanged: usize,
    /// Files skipped because they could not be fingerprinted
    pub failures: Vec<PlanFailure>,
}

impl SyncPlan {
    /// True when nothing needs to change and nothing failed.
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty() && self.failures.is_empty()
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind() == kind).count()
    }
}

/// Compares a source snapshot against a replica snapshot
pub struct SyncPlanner<'a> {
    source: &'a DirectorySnapshot,
    replica: &'a DirectorySnapshot,
}

impl<'a> SyncPlanner<'a> {
    pub fn new(source: &'a DirectorySnapshot, replica: &'a DirectorySnapshot) -> Self {
        Self { source, replica }
    }

    /// Produce the actions that bring the replica in line with the source.
    ///
    /// Fingerprints are computed only for names present on both sides. A
    /// fingerprint failure on either file skips that name and is recorded
    /// in [`SyncPlan::failures`]; the rest of the plan is unaffected.
    pub fn plan(&self) -> SyncPlan {
        let mut plan = SyncPlan::default();

        for entry in self.replica.entries() {
            if !self.source.contains(&entry.name) {
                plan.actions.push(SyncAction::Delete {
                    path: entry.path.clone(),
                });
            }
        }

        for entry in self.source.entries() {
            let Some(existing) = self.replica.get(&entry.name) else {
                plan.actions.push(SyncAction::Create {
                    source: entry.path.clone(),
                    dest: self.replica.path_for(&entry.name),
                });
                continue;
            };

            match same_content(&entry.path, &existing.path) {
                Ok(true) => {
                    tracing::debug!(path = %existing.path.display(), "Replica file up to date");
                    plan.unchanged += 1;
                }
                Ok(false) => plan.actions.push(SyncAction::Update {
                    source: entry.path.clone(),
                    dest: existing.path.clone(),
                }),
                Err(error) => plan.failures.push(PlanFailure {
                    name: entry.name.clone(),
                    error,
                }),
            }
        }

        plan
    }
}

fn same_content(source: &Path, replica: &Path) -> replica_fs::Result<bool> {
    let source_fp = fingerprint_file(source)?;
    let replica_fp = fingerprint_file(replica)?;
    Ok(source_fp == replica_fp)
}
