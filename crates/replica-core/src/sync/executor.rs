//! Applying planned actions to the replica

use std::sync::Arc;

use replica_fs::io;

use super::events::{Outcome, SyncEvent, SyncEventSink};
use super::plan::SyncAction;

/// Result of applying one action
#[derive(Debug)]
pub struct ActionResult {
    pub action: SyncAction,
    pub error: Option<replica_fs::Error>,
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Applies [`SyncAction`]s and reports each attempt to an event sink.
///
/// Actions are independent: a failure is recorded and the remaining
/// actions still run.
pub struct SyncExecutor {
    sink: Arc<dyn SyncEventSink>,
}

impl SyncExecutor {
    pub fn new(sink: Arc<dyn SyncEventSink>) -> Self {
        Self { sink }
    }

    /// Apply a single action and record the outcome.
    pub fn execute(&self, action: &SyncAction) -> replica_fs::Result<()> {
        let result = match action {
            SyncAction::Delete { path } => io::remove_file(path),
            SyncAction::Create { source, dest } | SyncAction::Update { source, dest } => {
                io::copy_file(source, dest).map(|_| ())
            }
        };

        let outcome = match &result {
            Ok(()) => Outcome::Succeeded,
            Err(e) => Outcome::Failed {
                reason: e.to_string(),
            },
        };
        self.sink.record(&SyncEvent {
            kind: action.kind(),
            source: action.source().map(ToOwned::to_owned),
            dest: action.dest().to_path_buf(),
            outcome,
        });

        result
    }

    /// Apply every action in order, continuing past failures.
    pub fn execute_all(&self, actions: Vec<SyncAction>) -> Vec<ActionResult> {
        actions
            .into_iter()
            .map(|action| {
                let error = self.execute(&action).err();
                ActionResult { action, error }
            })
            .collect()
    }
}
