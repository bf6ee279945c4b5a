//! Synchronization of a replica directory with its source
//!
//! Provides the planner, executor, event reporting and the per-cycle
//! engine that ties them together.

mod engine;
mod events;
mod executor;
mod plan;
mod report;

pub use engine::MirrorEngine;
pub use events::{ActionKind, MemorySink, Outcome, SyncEvent, SyncEventSink, TracingSink};
pub use executor::{ActionResult, SyncExecutor};
pub use plan::{PlanFailure, SyncAction, SyncPlan, SyncPlanner};
pub use report::{CycleReport, FileFailure};
