//! Structured events emitted for every attempted replica mutation

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// Kind of mutation applied to the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Delete,
    Create,
    Update,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one attempted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed { reason: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// One attempted action and how it went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEvent {
    pub kind: ActionKind,
    /// Source file, absent for deletions
    pub source: Option<PathBuf>,
    /// Replica file that was (or should have been) mutated
    pub dest: PathBuf,
    pub outcome: Outcome,
}

/// Receiver for [`SyncEvent`]s
pub trait SyncEventSink: Send + Sync {
    fn record(&self, event: &SyncEvent);
}

/// Forwards events to `tracing`: successes at INFO, failures at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SyncEventSink for TracingSink {
    fn record(&self, event: &SyncEvent) {
        let dest = event.dest.display();
        match (&event.outcome, event.kind) {
            (Outcome::Succeeded, ActionKind::Delete) => {
                tracing::info!(kind = %event.kind, "Removed replica file: {}", dest);
            }
            (Outcome::Succeeded, ActionKind::Create) => {
                tracing::info!(kind = %event.kind, "Created replica file: {}", dest);
            }
            (Outcome::Succeeded, ActionKind::Update) => {
                tracing::info!(kind = %event.kind, "Updated replica file: {}", dest);
            }
            (Outcome::Failed { reason }, kind) => match &event.source {
                Some(source) => tracing::warn!(
                    kind = %kind,
                    source = %source.display(),
                    "Failed to {} replica file {}: {}",
                    kind,
                    dest,
                    reason
                ),
                None => tracing::warn!(
                    kind = %kind,
                    "Failed to {} replica file {}: {}",
                    kind,
                    dest,
                    reason
                ),
            },
        }
    }
}

/// Keeps every event in memory, in the order recorded.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SyncEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SyncEventSink for MemorySink {
    fn record(&self, event: &SyncEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
